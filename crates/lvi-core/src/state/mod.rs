use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::ids::ViewKey;
use crate::navigation::{PageDirection, PagerCommand, PaginationCursor, DEFAULT_PAGE_SIZE};

/// Keyed store of pagination cursors, one per view
///
/// Cursors are created lazily on first access and live as long as the store.
/// Keys are disjoint, so touching one view never moves another.
#[derive(Clone)]
pub struct PaginationState {
    cursors: Arc<RwLock<AHashMap<ViewKey, PaginationCursor>>>,
    page_size: usize,
}

impl PaginationState {
    /// Create a store using the default page size
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a store with a custom page size
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            cursors: Arc::new(RwLock::new(AHashMap::new())),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Get the cursor for a view, creating it on page 1 if missing
    pub fn cursor(&self, key: &ViewKey) -> PaginationCursor {
        if let Some(cursor) = self.cursors.read().get(key) {
            return cursor.clone();
        }
        self.cursors
            .write()
            .entry(key.clone())
            .or_insert_with(|| PaginationCursor::new(key.clone(), self.page_size))
            .clone()
    }

    /// Clamp a view's cursor against the current row count and persist it
    pub fn clamp(&self, key: &ViewKey, row_count: usize) -> PaginationCursor {
        let mut cursors = self.cursors.write();
        let cursor = cursors
            .entry(key.clone())
            .or_insert_with(|| PaginationCursor::new(key.clone(), self.page_size));
        let clamped = cursor.clone().clamp(row_count);
        if clamped.page() != cursor.page() {
            tracing::debug!(view = %key, from = cursor.page(), to = clamped.page(), "Clamped page cursor");
        }
        *cursor = clamped.clone();
        clamped
    }

    /// Step a view's cursor one page and persist it
    pub fn advance(&self, key: &ViewKey, direction: PageDirection) -> PaginationCursor {
        let mut cursors = self.cursors.write();
        let cursor = cursors
            .entry(key.clone())
            .or_insert_with(|| PaginationCursor::new(key.clone(), self.page_size));
        *cursor = cursor.clone().advance(direction);
        cursor.clone()
    }

    /// Apply a pager command
    pub fn apply(&self, command: &PagerCommand) -> PaginationCursor {
        self.advance(&command.view_key, command.direction)
    }

    /// Check whether a view has been rendered with pagination yet
    pub fn contains(&self, key: &ViewKey) -> bool {
        self.cursors.read().contains_key(key)
    }

    /// Number of views holding a cursor
    pub fn len(&self) -> usize {
        self.cursors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.read().is_empty()
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}
