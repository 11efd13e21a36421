//! Per-view page cursor

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::PageDirection;
use crate::ids::ViewKey;

/// Current page of one view
///
/// `page` is 1-based and stays within `1..=total_pages`. `total_pages` is the
/// bound computed by the last [`clamp`](Self::clamp) and is what
/// [`advance`](Self::advance) clamps against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    view_key: ViewKey,
    page: usize,
    page_size: usize,
    total_pages: usize,
}

impl PaginationCursor {
    /// Create a cursor on the first page
    pub fn new(view_key: ViewKey, page_size: usize) -> Self {
        Self {
            view_key,
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    /// `max(1, ceil(row_count / page_size))`
    pub fn total_pages_for(row_count: usize, page_size: usize) -> usize {
        row_count.div_ceil(page_size.max(1)).max(1)
    }

    /// Recompute the page bound for `row_count` rows and pull the page into it
    pub fn clamp(mut self, row_count: usize) -> Self {
        self.total_pages = Self::total_pages_for(row_count, self.page_size);
        self.page = self.page.clamp(1, self.total_pages);
        self
    }

    /// Step one page; stays put at either boundary
    pub fn advance(mut self, direction: PageDirection) -> Self {
        let target = self.page as i64 + direction.delta();
        self.page = target.clamp(1, self.total_pages as i64) as usize;
        self
    }

    /// Half-open row range shown on the current page
    pub fn row_range(&self, row_count: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(row_count);
        let end = (start + self.page_size).min(row_count);
        start..end
    }

    pub fn view_key(&self) -> &ViewKey {
        &self.view_key
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Move to an explicit page, e.g. when restoring state; out-of-range values are kept until the next clamp
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}
