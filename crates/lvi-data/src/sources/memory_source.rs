//! In-memory query registry, used for fixtures and offline demos

use std::sync::Arc;

use ahash::AHashMap;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use lvi_core::data::{QueryRegistry, ViewDescriptor};
use parking_lot::RwLock;

use crate::DataError;

/// Scripted outcome for one view
#[derive(Debug, Clone)]
enum Scripted {
    Batch(RecordBatch),
    Failure(String),
}

/// Registry answering each view name with a canned batch or failure
///
/// Results can be swapped between renders to simulate data changing under a
/// view.
pub struct MemoryRegistry {
    name: String,
    results: RwLock<AHashMap<String, Scripted>>,
}

impl MemoryRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: RwLock::new(AHashMap::new()),
        }
    }

    /// Answer `view_name` with `batch`
    pub fn with_result(self, view_name: impl Into<String>, batch: RecordBatch) -> Self {
        self.set_result(view_name, batch);
        self
    }

    /// Answer `view_name` with a query failure
    pub fn with_failure(self, view_name: impl Into<String>, message: impl Into<String>) -> Self {
        self.set_failure(view_name, message);
        self
    }

    pub fn set_result(&self, view_name: impl Into<String>, batch: RecordBatch) {
        self.results.write().insert(view_name.into(), Scripted::Batch(batch));
    }

    pub fn set_failure(&self, view_name: impl Into<String>, message: impl Into<String>) {
        self.results
            .write()
            .insert(view_name.into(), Scripted::Failure(message.into()));
    }
}

#[async_trait]
impl QueryRegistry for MemoryRegistry {
    async fn execute(&self, view: &ViewDescriptor) -> anyhow::Result<RecordBatch> {
        match self.results.read().get(&view.name) {
            Some(Scripted::Batch(batch)) => Ok(batch.clone()),
            Some(Scripted::Failure(message)) => Err(DataError::query_failed(message.clone()).into()),
            None => Err(DataError::UnknownView(view.name.clone()).into()),
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Column-at-a-time builder for small record batches
#[derive(Default)]
pub struct BatchBuilder {
    fields: Vec<Field>,
    arrays: Vec<ArrayRef>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(mut self, name: &str, values: Vec<Option<i64>>) -> Self {
        self.fields.push(Field::new(name, arrow::datatypes::DataType::Int64, true));
        self.arrays.push(Arc::new(Int64Array::from(values)));
        self
    }

    pub fn float(mut self, name: &str, values: Vec<Option<f64>>) -> Self {
        self.fields.push(Field::new(name, arrow::datatypes::DataType::Float64, true));
        self.arrays.push(Arc::new(Float64Array::from(values)));
        self
    }

    pub fn text<S: AsRef<str>>(mut self, name: &str, values: Vec<Option<S>>) -> Self {
        let values: Vec<Option<&str>> = values.iter().map(|v| v.as_ref().map(|s| s.as_ref())).collect();
        self.fields.push(Field::new(name, arrow::datatypes::DataType::Utf8, true));
        self.arrays.push(Arc::new(StringArray::from(values)));
        self
    }

    pub fn build(self) -> Result<RecordBatch, DataError> {
        Ok(RecordBatch::try_new(Arc::new(Schema::new(self.fields)), self.arrays)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_core::data::QueryHandle;

    #[test]
    fn test_scripted_results() {
        let batch = BatchBuilder::new()
            .text("brandname", vec![Some("Acme")])
            .build()
            .unwrap();
        let registry = MemoryRegistry::new("fixtures")
            .with_result("Good", batch)
            .with_failure("Bad", "connection refused");

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let good = ViewDescriptor::new("Good", QueryHandle::new("-"));
        let bad = ViewDescriptor::new("Bad", QueryHandle::new("-"));
        let missing = ViewDescriptor::new("Missing", QueryHandle::new("-"));

        assert_eq!(rt.block_on(registry.execute(&good)).unwrap().num_rows(), 1);
        assert_eq!(
            rt.block_on(registry.execute(&bad)).unwrap_err().to_string(),
            "connection refused"
        );
        assert!(rt.block_on(registry.execute(&missing)).is_err());
    }
}
