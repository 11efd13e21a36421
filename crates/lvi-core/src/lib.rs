//! Core functionality for the LVI results dashboard
//!
//! This crate provides the view identities, the per-view pagination state
//! and the query registry seam shared by the data, view and app crates.

pub mod events;
pub mod ids;
pub mod navigation;
pub mod state;

// Re-export commonly used types
pub use ids::{ViewKey, WidgetId};
pub use navigation::{PageDirection, PagerCommand, PaginationCursor, DEFAULT_PAGE_SIZE};
pub use state::PaginationState;
pub use data::{MetricSelection, QueryHandle, QueryRegistry, ViewDescriptor};

pub mod data {
    use crate::ids::ViewKey;
    use serde::{Deserialize, Serialize};

    /// Opaque query text; the core never inspects it
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct QueryHandle(pub String);

    impl QueryHandle {
        pub fn new(statement: impl Into<String>) -> Self {
            Self(statement.into())
        }

        pub fn statement(&self) -> &str {
            &self.0
        }
    }

    /// How a view picks the column driving its brand chart
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub enum MetricSelection {
        /// Walk the shared priority list
        Priority,
        /// Always chart this column, labelled as given
        Fixed { column: String, label: String },
    }

    /// A named, independently paginated query
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ViewDescriptor {
        pub name: String,
        pub query: QueryHandle,
        pub metric: MetricSelection,
    }

    impl ViewDescriptor {
        /// Create a view that uses priority metric selection
        pub fn new(name: impl Into<String>, query: QueryHandle) -> Self {
            Self {
                name: name.into(),
                query,
                metric: MetricSelection::Priority,
            }
        }

        /// Pin the charted metric for this view
        pub fn with_fixed_metric(mut self, column: impl Into<String>, label: impl Into<String>) -> Self {
            self.metric = MetricSelection::Fixed {
                column: column.into(),
                label: label.into(),
            };
            self
        }

        /// Pagination and widget key for this view
        pub fn key(&self) -> ViewKey {
            ViewKey::derive(&self.name)
        }
    }

    /// Trait for the registry that executes each view's query
    #[async_trait::async_trait]
    pub trait QueryRegistry: Send + Sync {
        /// Run the view's query and return the raw rectangular result
        async fn execute(&self, view: &ViewDescriptor) -> anyhow::Result<arrow::record_batch::RecordBatch>;

        /// Get the registry name (database file, fixture set, ...)
        fn source_name(&self) -> &str;
    }
}
