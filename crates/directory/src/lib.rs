//! Collaborator boundary for the inventory engine.
//!
//! Everything the engine needs from the outside world crosses this crate:
//! the item directory (CRUD), the ministry directory (paged name listing),
//! and the report renderer. Wire tolerance lives here too — bare-array vs
//! envelope responses, stringly-typed numbers, and partial records are all
//! normalized in one step before anything reaches the engine.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use client::{
    ItemDirectory, MinistryDirectory, ReportArtifact, ReportInput, ReportRenderer,
};
pub use config::DirectoryConfig;
pub use error::DirectoryError;
pub use http::HttpDirectoryClient;
