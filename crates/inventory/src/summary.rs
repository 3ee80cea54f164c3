//! Collection-wide aggregation: summary totals and categorical breakdowns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{InventoryItem, ItemLabel, ItemStatus};
use crate::metrics::ItemMetrics;

/// Aggregated financial and categorical view of a collection.
///
/// Derived in a single pass over `(items, now)`; an empty collection yields
/// well-formed zero values. The reduction is associative, so any permutation
/// of the same items produces identical totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_quantity: u64,
    pub total_book_value: f64,
    pub total_acquisition_cost: f64,
    pub donated_count: usize,
    pub church_provided_count: usize,
    /// Items whose status is anything other than `Good`.
    pub needs_attention: usize,
    pub fully_depreciated: usize,
    /// Item counts keyed by status string; missing statuses land under
    /// `"unknown"`.
    pub by_status: BTreeMap<String, usize>,
    /// Item counts keyed by label string; missing labels land under
    /// `"unlabeled"`.
    pub by_label: BTreeMap<String, usize>,
}

impl InventorySummary {
    /// Reduce `items` into a summary as of `now`.
    pub fn of(items: &[InventoryItem], now: DateTime<Utc>) -> Self {
        let mut summary = Self::default();

        for item in items {
            let metrics = ItemMetrics::compute(item, now);

            summary.total_items += 1;
            summary.total_quantity += u64::from(item.quantity);
            summary.total_book_value += metrics.total_book_value;
            summary.total_acquisition_cost += metrics.total_acquisition_cost;

            match item.label {
                ItemLabel::Donated => summary.donated_count += 1,
                ItemLabel::ChurchProvided => summary.church_provided_count += 1,
                ItemLabel::Unlabeled => {}
            }

            if item.status != ItemStatus::Good {
                summary.needs_attention += 1;
            }
            if metrics.fully_depreciated {
                summary.fully_depreciated += 1;
            }

            *summary
                .by_status
                .entry(item.status.as_str().to_string())
                .or_insert(0) += 1;
            *summary
                .by_label
                .entry(item.label.as_str().to_string())
                .or_insert(0) += 1;
        }

        summary
    }
}

/// Items whose status calls for follow-up (anything other than `Good`),
/// in input order.
pub fn needs_attention(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| item.status != ItemStatus::Good)
        .collect()
}

/// Items written down to (or within tolerance of) zero as of `now`,
/// in input order.
pub fn fully_depreciated(items: &[InventoryItem], now: DateTime<Utc>) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| ItemMetrics::compute(item, now).fully_depreciated)
        .collect()
}
