//! Tracing/logging setup shared by every parishkeep process.

pub mod tracing;

pub use self::tracing::init;
