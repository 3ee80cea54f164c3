//! Service contracts for the engine's external collaborators.
//!
//! The controller is generic over these traits; production wires them to
//! [`crate::http::HttpDirectoryClient`], tests wire them to in-memory
//! fakes. Calls are fire-and-await: no built-in timeout, retry, or
//! cancellation — a failed call surfaces immediately.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use parishkeep_inventory::{InventoryItem, InventorySummary, ItemMetrics, ItemPayload};

use crate::error::DirectoryError;

/// The item directory: owner of asset records.
#[async_trait]
pub trait ItemDirectory: Send + Sync {
    /// List all items. `page_size_hint` is passed through to the service;
    /// the response may still be paged or bare — both shapes normalize to
    /// one sequence.
    async fn list_items(&self, page_size_hint: usize) -> Result<Vec<InventoryItem>, DirectoryError>;

    async fn create_item(&self, payload: &ItemPayload) -> Result<(), DirectoryError>;

    async fn update_item(&self, id: i64, payload: &ItemPayload) -> Result<(), DirectoryError>;

    async fn delete_item(&self, id: i64) -> Result<(), DirectoryError>;
}

/// The ministry directory: canonical ministry names, served in pages.
#[async_trait]
pub trait MinistryDirectory: Send + Sync {
    /// Full name listing; implementations follow the next-page indicator
    /// until exhausted.
    async fn list_ministries(&self) -> Result<Vec<String>, DirectoryError>;
}

/// Everything a report needs: the (already filtered, optionally
/// date-bounded) items, their metrics, and the current summary.
#[derive(Debug, Clone, Serialize)]
pub struct ReportInput<'a> {
    pub items: &'a [InventoryItem],
    pub metrics: &'a [ItemMetrics],
    pub summary: &'a InventorySummary,
}

/// A downloadable artifact. The engine is format-agnostic: whatever the
/// renderer produced is handed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// External report renderer.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, input: ReportInput<'_>) -> Result<ReportArtifact, DirectoryError>;
}

#[async_trait]
impl<S> ItemDirectory for Arc<S>
where
    S: ItemDirectory + ?Sized,
{
    async fn list_items(&self, page_size_hint: usize) -> Result<Vec<InventoryItem>, DirectoryError> {
        (**self).list_items(page_size_hint).await
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<(), DirectoryError> {
        (**self).create_item(payload).await
    }

    async fn update_item(&self, id: i64, payload: &ItemPayload) -> Result<(), DirectoryError> {
        (**self).update_item(id, payload).await
    }

    async fn delete_item(&self, id: i64) -> Result<(), DirectoryError> {
        (**self).delete_item(id).await
    }
}

#[async_trait]
impl<S> MinistryDirectory for Arc<S>
where
    S: MinistryDirectory + ?Sized,
{
    async fn list_ministries(&self) -> Result<Vec<String>, DirectoryError> {
        (**self).list_ministries().await
    }
}

#[async_trait]
impl<S> ReportRenderer for Arc<S>
where
    S: ReportRenderer + ?Sized,
{
    async fn render(&self, input: ReportInput<'_>) -> Result<ReportArtifact, DirectoryError> {
        (**self).render(input).await
    }
}
