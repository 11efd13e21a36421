use serde::{Deserialize, Serialize};

use crate::ids::ViewKey;

mod cursor;

pub use cursor::PaginationCursor;

/// Rows shown per page of the brand chart
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pager button direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    /// Signed page delta
    pub fn delta(self) -> i64 {
        match self {
            PageDirection::Previous => -1,
            PageDirection::Next => 1,
        }
    }

    /// Widget suffix for the matching pager button
    pub fn widget_suffix(self) -> &'static str {
        match self {
            PageDirection::Previous => "prev",
            PageDirection::Next => "next",
        }
    }
}

/// A pager click, addressed to one view's cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerCommand {
    pub view_key: ViewKey,
    pub direction: PageDirection,
}

impl PagerCommand {
    pub fn new(view_key: ViewKey, direction: PageDirection) -> Self {
        Self { view_key, direction }
    }

    pub fn previous(view_key: ViewKey) -> Self {
        Self::new(view_key, PageDirection::Previous)
    }

    pub fn next(view_key: ViewKey) -> Self {
        Self::new(view_key, PageDirection::Next)
    }
}
