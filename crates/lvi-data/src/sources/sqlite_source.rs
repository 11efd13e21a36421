//! SQLite query registry implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use lvi_core::data::{QueryRegistry, ViewDescriptor};
use parking_lot::Mutex;
use rusqlite::{types::Value, Connection, OpenFlags};

use crate::DataError;

/// Runs each view's statement against one read-only SQLite connection
///
/// The connection is opened once and reused for every render; every query is
/// a single read statement so no transaction is needed.
pub struct SqliteRegistry {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteRegistry {
    /// Open a database file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| DataError::Sqlite(format!("Failed to open database {}: {}", path.display(), e)))?;

        tracing::info!("Opened SQLite registry at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Wrap an existing connection (tests, in-memory databases)
    pub fn from_connection(conn: Connection, name: impl Into<PathBuf>) -> Self {
        Self {
            path: name.into(),
            conn: Mutex::new(conn),
        }
    }

    /// Run one statement and collect every row into a batch
    fn run(&self, sql: &str) -> Result<RecordBatch, DataError> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DataError::Sqlite(format!("Failed to prepare query: {}", e)))?;

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut columns: Vec<Vec<Value>> = names.iter().map(|_| Vec::new()).collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| DataError::Sqlite(format!("Failed to execute query: {}", e)))?;

        while let Some(row) = rows
            .next()
            .map_err(|e| DataError::Sqlite(format!("Failed to fetch row: {}", e)))?
        {
            for (col_idx, column) in columns.iter_mut().enumerate() {
                let value: Value = row
                    .get(col_idx)
                    .map_err(|e| DataError::Sqlite(format!("Failed to get column value: {}", e)))?;
                column.push(value);
            }
        }

        let mut fields = Vec::with_capacity(names.len());
        let mut arrays = Vec::with_capacity(names.len());
        for (name, values) in names.iter().zip(columns) {
            let (data_type, array) = build_column(values);
            fields.push(Field::new(name, data_type, true));
            arrays.push(array);
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }
}

/// Pick an Arrow type from the values SQLite actually returned
///
/// All integers (or null) → Int64, integers and reals → Float64, anything else
/// (including an all-null column) → Utf8.
fn build_column(values: Vec<Value>) -> (DataType, ArrayRef) {
    let has_value = values.iter().any(|v| !matches!(v, Value::Null));
    let all_int = values.iter().all(|v| matches!(v, Value::Integer(_) | Value::Null));
    let all_num = values
        .iter()
        .all(|v| matches!(v, Value::Integer(_) | Value::Real(_) | Value::Null));

    if has_value && all_int {
        let ints: Vec<Option<i64>> = values
            .into_iter()
            .map(|v| match v {
                Value::Integer(i) => Some(i),
                _ => None,
            })
            .collect();
        (DataType::Int64, Arc::new(Int64Array::from(ints)))
    } else if has_value && all_num {
        let floats: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| match v {
                Value::Integer(i) => Some(i as f64),
                Value::Real(f) => Some(f),
                _ => None,
            })
            .collect();
        (DataType::Float64, Arc::new(Float64Array::from(floats)))
    } else {
        let strings: Vec<Option<String>> = values
            .into_iter()
            .map(|v| match v {
                Value::Null => None,
                Value::Integer(i) => Some(i.to_string()),
                Value::Real(f) => Some(f.to_string()),
                Value::Text(s) => Some(s),
                Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
            })
            .collect();
        (DataType::Utf8, Arc::new(StringArray::from(strings)))
    }
}

#[async_trait]
impl QueryRegistry for SqliteRegistry {
    async fn execute(&self, view: &ViewDescriptor) -> anyhow::Result<RecordBatch> {
        tracing::debug!("Running query for view '{}'", view.name);
        let batch = self.run(view.query.statement())?;
        tracing::info!(
            "Query for '{}' returned {} rows, {} columns",
            view.name,
            batch.num_rows(),
            batch.num_columns()
        );
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_core::data::QueryHandle;

    fn registry() -> SqliteRegistry {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE scores (brandname TEXT, ranking_value REAL, rank INTEGER, platform_a TEXT);
            INSERT INTO scores VALUES ('Acme', 91.456, 1, 'Yelp');
            INSERT INTO scores VALUES ('Bolt', 80, 2, NULL);
            INSERT INTO scores VALUES ('Core', NULL, 3, NULL);
            ",
        )
        .unwrap();
        SqliteRegistry::from_connection(conn, "memory.db")
    }

    fn view(sql: &str) -> ViewDescriptor {
        ViewDescriptor::new("Test", QueryHandle::new(sql))
    }

    #[test]
    fn test_column_types_follow_values() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let batch = rt
            .block_on(registry().execute(&view("SELECT brandname, ranking_value, rank, platform_a FROM scores ORDER BY rank")))
            .unwrap();

        assert_eq!(batch.num_rows(), 3);
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).data_type(), &DataType::Float64);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(schema.field(3).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_all_null_column_is_text() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let batch = rt
            .block_on(registry().execute(&view("SELECT NULL AS platform_b FROM scores")))
            .unwrap();
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_bad_statement_is_an_error() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt
            .block_on(registry().execute(&view("SELECT * FROM missing_table")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to prepare query"));
    }

    #[test]
    fn test_empty_result_keeps_columns() {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let batch = rt
            .block_on(registry().execute(&view("SELECT brandname FROM scores WHERE rank > 10")))
            .unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(0).name(), "brandname");
    }

    #[test]
    fn test_open_read_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lvi.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);").unwrap();
        }

        let registry = SqliteRegistry::open(&path).unwrap();
        assert_eq!(registry.source_name(), "lvi.db");
        assert!(registry.run("INSERT INTO t VALUES (2)").is_err());
        assert_eq!(registry.run("SELECT x FROM t").unwrap().num_rows(), 1);
    }
}
