//! Page slicing with bounds clamping.

use serde::{Deserialize, Serialize};

/// Default rows per page in the inventory table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page position over a (filtered) collection.
///
/// Pages are 1-based. The requested page may become invalid when the
/// underlying collection shrinks; serving clamps it silently to the last
/// valid page rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changing the page size resets the requested page to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Number of pages for a collection of `len` items; never 0, even when
    /// the collection is empty.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// The page actually served: the request clamped into
    /// `[1, total_pages]`.
    pub fn resolve_page(&self, len: usize) -> usize {
        self.page.clamp(1, self.total_pages(len))
    }

    /// The served page's window of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.resolve_page(items.len());
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        if start >= items.len() {
            return &[];
        }
        &items[start..end]
    }
}
