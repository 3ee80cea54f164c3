//! Straight-line depreciation metrics, derived per item at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parishkeep_core::num::guarded_div;

use crate::item::InventoryItem;

/// Elapsed time is measured in flat 365-day years.
const SECONDS_PER_YEAR: f64 = 365.0 * 86_400.0;

/// Book values within half a currency unit of zero count as written off.
const FULLY_DEPRECIATED_TOLERANCE: f64 = 0.5;

/// Financial metrics for a single asset, computed against a reference
/// instant. Never persisted; recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetrics {
    pub quantity: u32,
    pub depreciable_base: f64,
    pub annual_depreciation_per_unit: f64,
    pub accumulated_per_unit: f64,
    pub book_value_per_unit: f64,
    pub total_book_value: f64,
    pub total_acquisition_cost: f64,
    /// Share of the depreciable base consumed so far, in `[0, 100]`.
    pub depreciation_percent: f64,
    pub fully_depreciated: bool,
}

impl ItemMetrics {
    /// Compute metrics for `item` as of `now`.
    ///
    /// Total function: inputs are pre-coerced at the directory boundary and
    /// every division here guards its denominator, so no input can fault.
    /// Future-dated acquisitions clamp to zero elapsed years.
    pub fn compute(item: &InventoryItem, now: DateTime<Utc>) -> Self {
        let cost = item.acquisition_cost;
        let salvage = item.salvage_value;

        // Salvage above cost is tolerated; the base just floors at zero.
        let depreciable_base = (cost - salvage).max(0.0);

        let annual_depreciation_per_unit = match item.useful_life_years {
            Some(years) => guarded_div(depreciable_base, f64::from(years)),
            None => 0.0,
        };

        let years_used = item
            .acquisition_date
            .map(|acquired| {
                let elapsed = (now - acquired).num_seconds() as f64 / SECONDS_PER_YEAR;
                elapsed.max(0.0)
            })
            .unwrap_or(0.0);

        // Non-decreasing in time, capped at the base.
        let accumulated_per_unit =
            (annual_depreciation_per_unit * years_used).clamp(0.0, depreciable_base);

        let book_value_per_unit = (cost - accumulated_per_unit).max(0.0);
        let quantity = item.quantity;
        let units = f64::from(quantity);

        let depreciation_percent = if depreciable_base > 0.0 {
            (accumulated_per_unit / depreciable_base * 100.0).min(100.0)
        } else {
            0.0
        };

        let fully_depreciated =
            depreciable_base > 0.0 && book_value_per_unit <= FULLY_DEPRECIATED_TOLERANCE;

        Self {
            quantity,
            depreciable_base,
            annual_depreciation_per_unit,
            accumulated_per_unit,
            book_value_per_unit,
            total_book_value: book_value_per_unit * units,
            total_acquisition_cost: cost * units,
            depreciation_percent,
            fully_depreciated,
        }
    }
}
