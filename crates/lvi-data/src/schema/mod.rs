use arrow::datatypes::DataType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Classification of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer, floating point or decimal values (rounded at normalization)
    Numeric,
    /// Anything else, shown as-is
    Categorical,
}

impl ColumnKind {
    /// Classify an Arrow column type
    pub fn from_arrow(data_type: &DataType) -> Self {
        if data_type.is_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// Column set of a result, computed once after the query runs
///
/// Builders ask it capability questions (`requires`) instead of probing rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    columns: IndexMap<String, ColumnKind>,
}

impl SchemaDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column; returns false if the name is already taken
    pub fn push(&mut self, name: impl Into<String>, kind: ColumnKind) -> bool {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return false;
        }
        self.columns.insert(name, kind);
        true
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// True when every named column is present
    pub fn requires(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.has_column(name))
    }

    /// True when at least one named column is present
    pub fn any_of(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_column(name))
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns.get(name).copied()
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.kind(name) == Some(ColumnKind::Numeric)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.kind(name) == Some(ColumnKind::Categorical)
    }

    /// Position of a column in query order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Column names in query order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_and_kinds() {
        let mut schema = SchemaDescriptor::new();
        schema.push("brandname", ColumnKind::Categorical);
        schema.push("ranking_value", ColumnKind::Numeric);

        assert!(schema.requires(&["brandname", "ranking_value"]));
        assert!(!schema.requires(&["brandname", "ai_overall_score"]));
        assert!(schema.any_of(&["platform_a", "brandname"]));
        assert!(schema.is_numeric("ranking_value"));
        assert!(schema.is_categorical("brandname"));
        assert_eq!(schema.index_of("ranking_value"), Some(1));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut schema = SchemaDescriptor::new();
        assert!(schema.push("rank", ColumnKind::Numeric));
        assert!(!schema.push("rank", ColumnKind::Categorical));
        assert_eq!(schema.kind("rank"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_arrow_classification() {
        assert_eq!(ColumnKind::from_arrow(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_arrow(&DataType::Float64), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_arrow(&DataType::Utf8), ColumnKind::Categorical);
        assert_eq!(ColumnKind::from_arrow(&DataType::Null), ColumnKind::Categorical);
    }
}
