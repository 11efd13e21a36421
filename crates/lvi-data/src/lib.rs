//! Query results and registries for the LVI results dashboard

pub mod config;
pub mod schema;
pub mod sources;
pub mod table;
pub mod value;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use config::{DashboardConfig, FixedMetric, ViewConfig};
pub use schema::{ColumnKind, SchemaDescriptor};
pub use sources::{BatchBuilder, MemoryRegistry, SqliteRegistry};
pub use table::{DataRecord, ResultSet, ResultTable, Row};
pub use value::CellValue;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("{message}")]
    QueryFailed { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("SQLite error: {0}")]
    Sqlite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown view '{0}'")]
    UnknownView(String),

    #[error("Views '{first}' and '{second}' both map to state key '{key}'")]
    DuplicateViewKey {
        key: String,
        first: String,
        second: String,
    },
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        DataError::Config(error.to_string())
    }
}

impl DataError {
    /// Wrap any failure raised while running a view's query
    pub fn query_failed(message: impl Into<String>) -> Self {
        DataError::QueryFailed {
            message: message.into(),
        }
    }
}
