//! Cell values of a normalized result set

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell: number, text or null
///
/// Serializes untagged. Whole numbers are written without a fraction, so a
/// rank of `1.0` comes out as `1`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The value as an `i64` when it is a whole number in the exact range
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// Trimmed text, or `None` for nulls and whitespace-only strings
    ///
    /// Numbers are rendered with their display form so that a numeric label
    /// column still groups.
    pub fn trimmed_label(&self) -> Option<String> {
        let label = match self {
            CellValue::Null => return None,
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
        };
        (!label.is_empty()).then_some(label)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(i) = self.as_integer() {
            return serializer.serialize_i64(i);
        }
        match self {
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Null => serializer.serialize_none(),
        }
    }
}

impl From<&CellValue> for serde_json::Value {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Number(n) => match cell.as_integer() {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Value::from(*n),
            },
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_label() {
        assert_eq!(CellValue::from("  Yelp ").trimmed_label().as_deref(), Some("Yelp"));
        assert_eq!(CellValue::from("   ").trimmed_label(), None);
        assert_eq!(CellValue::Null.trimmed_label(), None);
    }

    #[test]
    fn test_serializes_untagged() {
        let values = vec![CellValue::Number(1.5), CellValue::from("x"), CellValue::Null];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1.5,"x",null]"#);
    }

    #[test]
    fn test_whole_numbers_have_no_fraction() {
        let values = vec![
            CellValue::Number(1.0),
            CellValue::Number(-40.0),
            CellValue::Number(0.5),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[1,-40,0.5]");

        assert_eq!(serde_json::Value::from(&CellValue::Number(7.0)).to_string(), "7");
        assert_eq!(serde_json::Value::from(&CellValue::Number(2.35)).to_string(), "2.35");

        let back: Vec<CellValue> = serde_json::from_str("[1,2.5]").unwrap();
        assert_eq!(back, vec![CellValue::Number(1.0), CellValue::Number(2.5)]);
    }
}
