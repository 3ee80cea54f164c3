//! HTTP implementations of the collaborator contracts.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use parishkeep_inventory::{InventoryItem, ItemPayload};

use crate::client::{
    ItemDirectory, MinistryDirectory, ReportArtifact, ReportInput, ReportRenderer,
};
use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::wire::{ListPage, RawInventoryItem, RawMinistry, first_validation_message};

/// Fallback shown when a rejection body carries no usable message.
const GENERIC_REJECTION: &str = "the directory service rejected the change";

/// One client for all three collaborator roles — the church API serves the
/// item directory, the ministry directory, and the report renderer under a
/// single root.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl HttpDirectoryClient {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DirectoryError> {
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(DirectoryError::network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(DirectoryError::decode)
    }

    /// Check a mutation response; rejections surface the first server
    /// validation message (or a generic fallback).
    async fn check_mutation(&self, response: reqwest::Response) -> Result<(), DirectoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .as_ref()
            .and_then(first_validation_message)
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());

        Err(DirectoryError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ItemDirectory for HttpDirectoryClient {
    async fn list_items(&self, page_size_hint: usize) -> Result<Vec<InventoryItem>, DirectoryError> {
        let url = format!("{}?page_size={page_size_hint}", self.url("/inventory/items/"));
        let page: ListPage<RawInventoryItem> = self.get_json(&url).await?;
        let (raw, _next) = page.into_parts();

        tracing::debug!(count = raw.len(), "listed inventory items");
        Ok(raw.into_iter().map(RawInventoryItem::normalize).collect())
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<(), DirectoryError> {
        let response = self
            .authorized(self.client.post(self.url("/inventory/items/")).json(payload))
            .send()
            .await
            .map_err(DirectoryError::network)?;
        self.check_mutation(response).await
    }

    async fn update_item(&self, id: i64, payload: &ItemPayload) -> Result<(), DirectoryError> {
        let url = format!("{}{id}/", self.url("/inventory/items/"));
        let response = self
            .authorized(self.client.put(&url).json(payload))
            .send()
            .await
            .map_err(DirectoryError::network)?;
        self.check_mutation(response).await
    }

    async fn delete_item(&self, id: i64) -> Result<(), DirectoryError> {
        let url = format!("{}{id}/", self.url("/inventory/items/"));
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(DirectoryError::network)?;
        self.check_mutation(response).await
    }
}

#[async_trait]
impl MinistryDirectory for HttpDirectoryClient {
    async fn list_ministries(&self) -> Result<Vec<String>, DirectoryError> {
        let mut names = Vec::new();
        let mut url = Some(self.url("/ministries/"));

        // Follow the next-page indicator until the listing is exhausted.
        while let Some(current) = url {
            let page: ListPage<RawMinistry> = self.get_json(&current).await?;
            let (raw, next) = page.into_parts();
            names.extend(raw.into_iter().filter_map(|m| m.name));
            url = next;
        }

        tracing::debug!(count = names.len(), "listed ministries");
        Ok(names)
    }
}

#[async_trait]
impl ReportRenderer for HttpDirectoryClient {
    async fn render(&self, input: ReportInput<'_>) -> Result<ReportArtifact, DirectoryError> {
        let response = self
            .authorized(self.client.post(self.url("/reports/inventory/")).json(&input))
            .send()
            .await
            .map_err(DirectoryError::network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name)
            .unwrap_or_else(|| "inventory-report".to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(DirectoryError::network)?
            .to_vec();

        Ok(ReportArtifact {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Pull `filename="..."` (or the unquoted form) out of a
/// Content-Disposition header.
fn disposition_file_name(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let part = part.trim();
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"').trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}
