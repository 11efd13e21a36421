//! Normalization of raw query results into display-ready result sets

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;

use crate::schema::{ColumnKind, SchemaDescriptor};
use crate::value::CellValue;
use crate::DataError;

/// Decimal places kept for numeric columns
pub const DISPLAY_DECIMALS: i32 = 2;

/// One row, ordered like the schema
pub type Row = Vec<CellValue>;

/// A row projected onto named fields, as charts consume it
pub type DataRecord = IndexMap<String, CellValue>;

static NULL_CELL: CellValue = CellValue::Null;

/// Round half away from zero to [`DISPLAY_DECIMALS`] places
pub fn round_for_display(value: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    (value * scale).round() / scale
}

/// Normalized, read-only result of one view's query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    schema: SchemaDescriptor,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Build from already normalized parts
    pub fn new(schema: SchemaDescriptor, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == schema.len()));
        Self { schema, rows }
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.has_column(name)
    }

    /// Cell at `row` for `column`; null when either is out of range
    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        self.schema
            .index_of(column)
            .and_then(|idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .unwrap_or(&NULL_CELL)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Project one row onto the given fields
    pub fn record(&self, row: usize, fields: &[&str]) -> DataRecord {
        fields
            .iter()
            .map(|field| (field.to_string(), self.value(row, field).clone()))
            .collect()
    }
}

/// Turns raw Arrow batches into [`ResultSet`]s
pub struct ResultTable;

impl ResultTable {
    /// Normalize a raw batch
    ///
    /// Numeric columns are rounded for display; NaN becomes null. Other
    /// columns are rendered as text. A repeated column name is kept under
    /// the first free `<name>_<n>`, counting from 2.
    pub fn normalize(batch: &RecordBatch) -> Result<ResultSet, DataError> {
        let mut schema = SchemaDescriptor::new();
        let mut columns: Vec<Vec<CellValue>> = Vec::with_capacity(batch.num_columns());

        let arrow_schema = batch.schema();
        for (field, array) in arrow_schema.fields().iter().zip(batch.columns()) {
            let kind = ColumnKind::from_arrow(field.data_type());
            if !schema.push(field.name().clone(), kind) {
                let renamed = (2..)
                    .map(|n| format!("{}_{}", field.name(), n))
                    .find(|candidate| !schema.has_column(candidate))
                    .unwrap_or_default();
                tracing::warn!("Repeated column '{}' kept as '{}'", field.name(), renamed);
                schema.push(renamed, kind);
            }

            let cells = match kind {
                ColumnKind::Numeric => numeric_cells(array)?,
                ColumnKind::Categorical => text_cells(array)?,
            };
            columns.push(cells);
        }

        let rows = (0..batch.num_rows())
            .map(|i| columns.iter().map(|column| column[i].clone()).collect())
            .collect();

        Ok(ResultSet::new(schema, rows))
    }
}

fn numeric_cells(array: &ArrayRef) -> Result<Vec<CellValue>, DataError> {
    let cast = arrow::compute::cast(array, &DataType::Float64)?;
    let floats = cast
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| ArrowError::CastError(format!("cannot read {} as Float64", array.data_type())))?;

    Ok((0..floats.len())
        .map(|i| {
            if floats.is_null(i) || !floats.value(i).is_finite() {
                CellValue::Null
            } else {
                CellValue::Number(round_for_display(floats.value(i)))
            }
        })
        .collect())
}

fn text_cells(array: &ArrayRef) -> Result<Vec<CellValue>, DataError> {
    let cast = arrow::compute::cast(array, &DataType::Utf8)?;
    let strings = cast
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ArrowError::CastError(format!("cannot read {} as Utf8", array.data_type())))?;

    Ok((0..strings.len())
        .map(|i| {
            if strings.is_null(i) {
                CellValue::Null
            } else {
                CellValue::Text(strings.value(i).to_string())
            }
        })
        .collect())
}
