//! Full result table shown under each view's charts

use lvi_data::{CellValue, ResultSet, Row};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Every row and column of a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// The positional row index is never shown
    pub hide_index: bool,
}

impl TableSpec {
    /// Mirror the result in query order; the table is not paginated
    pub fn from_result(result: &ResultSet) -> Self {
        Self {
            columns: result.schema().column_names().map(String::from).collect(),
            rows: result.rows().to_vec(),
            hide_index: true,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// Column-keyed JSON rows, the shape data grids usually take
    pub fn to_json_rows(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.clone(), Value::from(cell)))
                    .collect();
                Value::Object(object)
            })
            .collect();
        json!({
            "columns": self.columns,
            "rows": rows,
            "hide_index": self.hide_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_data::{BatchBuilder, ResultTable};

    #[test]
    fn test_table_keeps_every_row_and_column() {
        let batch = BatchBuilder::new()
            .text("brandname", vec![Some("Acme"), Some("Bolt"), None])
            .float("ranking_value", vec![Some(3.14159), None, Some(2.0)])
            .text("platform_a", vec![Some("Yelp"), Some(""), None])
            .build()
            .unwrap();
        let table = TableSpec::from_result(&ResultTable::normalize(&batch).unwrap());

        assert_eq!(table.columns, vec!["brandname", "ranking_value", "platform_a"]);
        assert_eq!(table.row_count(), 3);
        assert!(table.hide_index);
        assert_eq!(table.cell(0, "ranking_value"), Some(&CellValue::Number(3.14)));
        assert_eq!(table.cell(1, "ranking_value"), Some(&CellValue::Null));
        assert_eq!(table.cell(0, "missing"), None);

        let json = table.to_json_rows();
        assert_eq!(json["rows"][0]["brandname"], "Acme");
        assert!(json["rows"][2]["brandname"].is_null());
    }
}
