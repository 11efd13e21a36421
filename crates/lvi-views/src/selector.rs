//! Choosing the metric column for a view's brand chart

use lvi_core::MetricSelection;
use lvi_data::SchemaDescriptor;
use serde::{Deserialize, Serialize};

/// Category axis of the brand chart
pub const BRAND_COLUMN: &str = "brandname";

/// Metric columns in order of preference
pub const METRIC_PRIORITY: [&str; 3] = ["ranking_value", "ai_overall_score", "optimization_score"];

/// Column to chart and its axis label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricChoice {
    pub column: String,
    pub label: String,
}

pub struct ChartSelector;

impl ChartSelector {
    /// First column of `priority` present in the schema
    ///
    /// Returns `None` when nothing matches or the schema has no categorical
    /// brand column to put on the other axis. Ties go strictly to list order.
    pub fn select_metric<'a>(schema: &SchemaDescriptor, priority: &[&'a str]) -> Option<&'a str> {
        if !schema.is_categorical(BRAND_COLUMN) {
            return None;
        }
        priority.iter().copied().find(|column| schema.has_column(column))
    }

    /// Resolve a view's metric selection against a schema
    pub fn resolve(schema: &SchemaDescriptor, selection: &MetricSelection) -> Option<MetricChoice> {
        match selection {
            MetricSelection::Fixed { column, label } => schema.has_column(column).then(|| MetricChoice {
                column: column.clone(),
                label: label.clone(),
            }),
            MetricSelection::Priority => Self::select_metric(schema, &METRIC_PRIORITY).map(|column| MetricChoice {
                column: column.to_string(),
                label: metric_label(column),
            }),
        }
    }
}

/// `ranking_value` → `Ranking Value`
pub fn metric_label(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_data::ColumnKind;

    fn schema(columns: &[(&str, ColumnKind)]) -> SchemaDescriptor {
        let mut schema = SchemaDescriptor::new();
        for (name, kind) in columns {
            schema.push(*name, *kind);
        }
        schema
    }

    #[test]
    fn test_priority_order_wins() {
        let s = schema(&[
            ("brandname", ColumnKind::Categorical),
            ("optimization_score", ColumnKind::Numeric),
            ("ranking_value", ColumnKind::Numeric),
        ]);
        assert_eq!(ChartSelector::select_metric(&s, &METRIC_PRIORITY), Some("ranking_value"));
    }

    #[test]
    fn test_falls_through_to_last_candidate() {
        let s = schema(&[
            ("brandname", ColumnKind::Categorical),
            ("optimization_score", ColumnKind::Numeric),
        ]);
        assert_eq!(ChartSelector::select_metric(&s, &METRIC_PRIORITY), Some("optimization_score"));
    }

    #[test]
    fn test_no_candidate_present() {
        let s = schema(&[("brandname", ColumnKind::Categorical), ("rank", ColumnKind::Numeric)]);
        assert_eq!(ChartSelector::select_metric(&s, &METRIC_PRIORITY), None);
    }

    #[test]
    fn test_requires_brand_column() {
        let s = schema(&[("ranking_value", ColumnKind::Numeric)]);
        assert_eq!(ChartSelector::select_metric(&s, &METRIC_PRIORITY), None);
    }

    #[test]
    fn test_fixed_metric_override() {
        let s = schema(&[
            ("brandname", ColumnKind::Categorical),
            ("ranking_value", ColumnKind::Numeric),
            ("optimization_score", ColumnKind::Numeric),
        ]);
        let fixed = MetricSelection::Fixed {
            column: "optimization_score".to_string(),
            label: "Optimization Score".to_string(),
        };
        let choice = ChartSelector::resolve(&s, &fixed).unwrap();
        assert_eq!(choice.column, "optimization_score");

        let choice = ChartSelector::resolve(&s, &MetricSelection::Priority).unwrap();
        assert_eq!(choice.column, "ranking_value");
        assert_eq!(choice.label, "Ranking Value");
    }

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("ai_overall_score"), "Ai Overall Score");
        assert_eq!(metric_label("ranking_value"), "Ranking Value");
    }
}
