//! Ministry filter-option resolution.

use std::collections::BTreeMap;

use crate::item::InventoryItem;

/// Non-ministry tag that leaks into the directory data; dropped from the
/// options list. TODO: remove once the directory stops tagging event gear
/// with this pseudo-ministry.
pub const EXCLUDED_OPTION: &str = "events";

/// Build the ministry dropdown options.
///
/// Union of the registered (directory) names with names observed on items —
/// a ministry that only appears on items is still offered. Deduplicated by
/// trimmed, lowercased key with the first-seen casing kept (registered names
/// are seen first), sorted alphabetically case-insensitively.
pub fn ministry_options(registered: &[String], items: &[InventoryItem]) -> Vec<String> {
    let mut by_key: BTreeMap<String, String> = BTreeMap::new();

    let observed = items.iter().map(|item| item.ministry_name.as_str());
    for name in registered.iter().map(String::as_str).chain(observed) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            continue;
        }

        let key = trimmed.to_lowercase();
        if key == EXCLUDED_OPTION {
            continue;
        }

        by_key.entry(key).or_insert_with(|| trimmed.to_string());
    }

    // BTreeMap iteration over the lowercased keys gives the
    // case-insensitive alphabetical order directly.
    by_key.into_values().collect()
}
