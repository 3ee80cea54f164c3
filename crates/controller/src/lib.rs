//! Orchestration layer for the inventory engine.
//!
//! The controller owns the canonical in-memory item collection (single
//! writer; every engine component is a pure reader), drives the directory
//! collaborators, and carries the shared loading/error state plus an
//! explicit observer registry — no module-level caches or global emitters.

pub mod controller;
pub mod notify;

pub use controller::{DateRange, InventoryController, PageView};
pub use notify::{ChangeObserver, ObserverRegistry};
