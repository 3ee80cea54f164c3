//! Inventory controller: fetch, mutate, derive, export.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use parishkeep_core::{EngineError, EngineResult};
use parishkeep_directory::config::DEFAULT_PAGE_SIZE_HINT;
use parishkeep_directory::{
    DirectoryError, ItemDirectory, MinistryDirectory, ReportArtifact, ReportInput, ReportRenderer,
};
use parishkeep_inventory::{
    FilterState, InventoryItem, InventorySummary, ItemMetrics, ItemPayload, PaginationState,
    ministry_options,
};

use crate::notify::{ChangeObserver, ObserverRegistry};

/// Inclusive acquisition-date bound applied on top of the active filters
/// when exporting a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let date = instant.date_naive();
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// One served page of the filtered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub items: Vec<InventoryItem>,
    /// The page actually served (the request clamped into range).
    pub page: usize,
    pub total_pages: usize,
}

/// Owner of the canonical item collection.
///
/// Exactly one writer: every mutating operation takes `&mut self`, so the
/// overlapping-request races of a shared-slot design cannot be expressed
/// against this API. All derived views (summary, filtered list, pages,
/// ministry options) are recomputed from current state on every read.
pub struct InventoryController<I, M, R> {
    item_directory: I,
    ministry_directory: M,
    report_renderer: R,

    items: Vec<InventoryItem>,
    ministry_names: Vec<String>,
    filters: FilterState,
    pagination: PaginationState,

    /// Single user-visible error slot; cleared when the next operation
    /// begins.
    last_error: Option<EngineError>,
    loading: bool,

    observers: ObserverRegistry,
    page_size_hint: usize,
}

impl<I, M, R> InventoryController<I, M, R>
where
    I: ItemDirectory,
    M: MinistryDirectory,
    R: ReportRenderer,
{
    pub fn new(item_directory: I, ministry_directory: M, report_renderer: R) -> Self {
        Self {
            item_directory,
            ministry_directory,
            report_renderer,
            items: Vec::new(),
            ministry_names: Vec::new(),
            filters: FilterState::default(),
            pagination: PaginationState::default(),
            last_error: None,
            loading: false,
            observers: ObserverRegistry::new(),
            page_size_hint: DEFAULT_PAGE_SIZE_HINT,
        }
    }

    pub fn with_page_size_hint(mut self, hint: usize) -> Self {
        self.page_size_hint = hint.max(1);
        self
    }

    // ---- read state ----

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    // ---- derived views (recomputed eagerly, never cached) ----

    /// Collection summary as of `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> InventorySummary {
        InventorySummary::of(&self.items, now)
    }

    /// The collection under the active filters, in canonical order.
    pub fn filtered(&self) -> Vec<InventoryItem> {
        self.filters.apply(&self.items)
    }

    /// The served page of the filtered collection.
    pub fn current_page(&self) -> PageView {
        let filtered = self.filtered();
        let page = self.pagination.resolve_page(filtered.len());
        let total_pages = self.pagination.total_pages(filtered.len());
        let items = self.pagination.slice(&filtered).to_vec();
        PageView {
            items,
            page,
            total_pages,
        }
    }

    /// Ministry dropdown options: registered names unioned with names
    /// observed on the current items.
    pub fn ministry_options(&self) -> Vec<String> {
        ministry_options(&self.ministry_names, &self.items)
    }

    // ---- filter/pagination state ----

    pub fn subscribe(&mut self, observer: std::sync::Arc<dyn ChangeObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.observers.notify();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.observers.notify();
    }

    /// Requesting a page beyond the end is fine; serving clamps to the
    /// last valid page.
    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
        self.observers.notify();
    }

    /// Resets the requested page to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
        self.observers.notify();
    }

    // ---- operations ----

    /// Fetch the item collection and the ministry directory.
    ///
    /// On failure the collection is cleared and a fetch-failure message
    /// lands in the error slot.
    pub async fn load(&mut self) -> EngineResult<()> {
        self.begin_operation();
        let result = self.refetch().await;
        self.end_operation();
        result
    }

    /// Create an item, then refetch the full collection so displayed
    /// metrics reflect server-confirmed state (no optimistic patch).
    pub async fn create(&mut self, payload: &ItemPayload) -> EngineResult<()> {
        self.begin_operation();
        let result = self.item_directory.create_item(payload).await;
        let outcome = self.finish_mutation("create", result).await;
        self.end_operation();
        outcome
    }

    /// Update an item, then refetch the full collection.
    pub async fn update(&mut self, id: i64, payload: &ItemPayload) -> EngineResult<()> {
        self.begin_operation();
        let result = self.item_directory.update_item(id, payload).await;
        let outcome = self.finish_mutation("update", result).await;
        self.end_operation();
        outcome
    }

    /// Delete an item, then refetch the full collection.
    pub async fn delete(&mut self, id: i64) -> EngineResult<()> {
        self.begin_operation();
        let result = self.item_directory.delete_item(id).await;
        let outcome = self.finish_mutation("delete", result).await;
        self.end_operation();
        outcome
    }

    /// Export a report over the filtered collection, optionally bounded by
    /// acquisition date. Items without an acquisition date are excluded
    /// only while a bound is active. The summary handed to the renderer is
    /// the whole-collection summary, not a summary of the bounded subset.
    pub async fn export_report(
        &mut self,
        date_range: Option<DateRange>,
        now: DateTime<Utc>,
    ) -> EngineResult<ReportArtifact> {
        self.begin_operation();

        let filtered = self.filtered();
        let bounded: Vec<InventoryItem> = match date_range {
            Some(range) => filtered
                .into_iter()
                .filter(|item| {
                    item.acquisition_date
                        .map(|acquired| range.contains(acquired))
                        .unwrap_or(false)
                })
                .collect(),
            None => filtered,
        };

        let metrics: Vec<ItemMetrics> = bounded
            .iter()
            .map(|item| ItemMetrics::compute(item, now))
            .collect();
        let summary = self.summary(now);

        let result = self
            .report_renderer
            .render(ReportInput {
                items: &bounded,
                metrics: &metrics,
                summary: &summary,
            })
            .await
            .map_err(|err| {
                EngineError::fetch(format!("failed to export report: {}", err.user_message()))
            });

        match &result {
            Ok(artifact) => {
                tracing::info!(
                    items = bounded.len(),
                    file_name = %artifact.file_name,
                    "exported inventory report"
                );
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.last_error = Some(err.clone());
            }
        }

        self.end_operation();
        result
    }

    // ---- internals ----

    fn begin_operation(&mut self) {
        self.loading = true;
        self.last_error = None;
        self.observers.notify();
    }

    fn end_operation(&mut self) {
        self.loading = false;
        self.observers.notify();
    }

    /// Replace the collection with server-confirmed state; on failure
    /// clear it and record the fetch error.
    async fn refetch(&mut self) -> EngineResult<()> {
        let fetched = self.fetch_all().await;
        match fetched {
            Ok((items, ministries)) => {
                tracing::info!(items = items.len(), ministries = ministries.len(), "loaded inventory");
                self.items = items;
                self.ministry_names = ministries;
                Ok(())
            }
            Err(err) => {
                let err = EngineError::fetch(format!(
                    "failed to load inventory: {}",
                    err.user_message()
                ));
                tracing::warn!("{err}");
                self.items.clear();
                self.ministry_names.clear();
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn fetch_all(&self) -> Result<(Vec<InventoryItem>, Vec<String>), DirectoryError> {
        let items = self.item_directory.list_items(self.page_size_hint).await?;
        let ministries = self.ministry_directory.list_ministries().await?;
        Ok((items, ministries))
    }

    /// Mutations refetch on success; rejections leave the prior collection
    /// untouched, surface the server's validation message, and propagate
    /// the error to the caller (so a form can stay open for correction).
    async fn finish_mutation(
        &mut self,
        operation: &str,
        result: Result<(), DirectoryError>,
    ) -> EngineResult<()> {
        match result {
            Ok(()) => {
                tracing::info!(operation, "inventory mutation accepted");
                self.refetch().await
            }
            Err(err) => {
                let err = EngineError::mutation(err.user_message());
                tracing::warn!(operation, "inventory mutation rejected: {err}");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
