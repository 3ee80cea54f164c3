//! Pure inventory depreciation engine.
//!
//! This crate contains the business rules for church asset inventory:
//! straight-line depreciation metrics, collection summaries, filtering,
//! ministry option resolution, and pagination. Everything here is
//! deterministic domain logic (no IO, no HTTP, no storage) — metrics are
//! derived from `(items, now)` on every read and never persisted.

pub mod filter;
pub mod item;
pub mod metrics;
pub mod ministry;
pub mod pagination;
pub mod summary;

pub use filter::FilterState;
pub use item::{InventoryItem, ItemLabel, ItemPayload, ItemStatus};
pub use metrics::ItemMetrics;
pub use ministry::ministry_options;
pub use pagination::PaginationState;
pub use summary::{InventorySummary, fully_depreciated, needs_attention};
