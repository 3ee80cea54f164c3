//! Search and categorical filtering over the item collection.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Sentinel meaning "no restriction" for the categorical selectors.
pub const ALL: &str = "all";

/// Active filter selections.
///
/// The three selectors hold either a concrete value or the `"all"`
/// sentinel; `search` is free text. The default state passes everything
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub status: String,
    pub label: String,
    pub ministry: String,
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            status: ALL.to_string(),
            label: ALL.to_string(),
            ministry: ALL.to_string(),
            search: String::new(),
        }
    }
}

impl FilterState {
    /// True when every selector is `"all"` and the search box is blank.
    pub fn is_pass_through(&self) -> bool {
        is_all(&self.status) && is_all(&self.label) && is_all(&self.ministry)
            && self.search.trim().is_empty()
    }

    /// Apply the filter, preserving input order (stable filter).
    ///
    /// Deterministic for a given `(items, filters)` pair and idempotent:
    /// re-filtering an already-filtered result is a no-op.
    pub fn apply(&self, items: &[InventoryItem]) -> Vec<InventoryItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }

    /// Logical AND of all active predicates.
    pub fn matches(&self, item: &InventoryItem) -> bool {
        self.matches_search(item)
            && selector_matches(&self.status, item.status.as_str())
            && selector_matches(&self.label, item.label.as_str())
            && selector_matches(&self.ministry, &item.ministry_name)
    }

    fn matches_search(&self, item: &InventoryItem) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            item.item_name.as_str(),
            item.description.as_str(),
            item.ministry_name.as_str(),
            item.remarks.as_str(),
            item.label.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Exact case-insensitive match unless the selector is the `"all"` sentinel.
fn selector_matches(selected: &str, value: &str) -> bool {
    is_all(selected) || selected.trim().to_lowercase() == value.trim().to_lowercase()
}

fn is_all(selected: &str) -> bool {
    selected.trim().eq_ignore_ascii_case(ALL)
}
