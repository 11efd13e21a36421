//! Platform frequency bar chart

use indexmap::IndexMap;
use lvi_data::{CellValue, DataRecord, ResultSet};

use super::Skipped;
use crate::spec::{Channel, ChartSpec, Encoding, FieldType, Mark, TooltipField, Width};

/// Columns whose values are pooled before counting
pub const PLATFORM_COLUMNS: [&str; 2] = ["platform_a", "platform_b"];

const PLATFORM_FIELD: &str = "platform";
const COUNT_FIELD: &str = "count";

/// Count non-blank platform values across both platform columns
///
/// Values are trimmed first; null, empty and whitespace-only entries are
/// dropped. Result is sorted by count, highest first, ties in first-seen order.
pub fn count_platforms(result: &ResultSet) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for column in PLATFORM_COLUMNS {
        let Some(cells) = result.column(column) else {
            continue;
        };
        for label in cells.filter_map(CellValue::trimmed_label) {
            *counts.entry(label).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Vertical bar chart of platform counts
pub fn build(result: &ResultSet, view_name: &str) -> Result<ChartSpec, Skipped> {
    if !result.schema().any_of(&PLATFORM_COLUMNS) {
        tracing::debug!("No platform columns in '{}'", view_name);
        return Err(Skipped::MissingColumns(
            "No platform columns (platform_a / platform_b) available for chart.",
        ));
    }

    let counts = count_platforms(result);
    if counts.is_empty() {
        return Err(Skipped::NoData("No platform data available."));
    }

    let data: Vec<DataRecord> = counts
        .into_iter()
        .map(|(platform, count)| {
            let mut record = DataRecord::new();
            record.insert(PLATFORM_FIELD.to_string(), CellValue::Text(platform));
            record.insert(COUNT_FIELD.to_string(), CellValue::Number(count as f64));
            record
        })
        .collect();

    Ok(ChartSpec {
        title: format!("Platform Counts ({})", view_name),
        mark: Mark::bar(),
        x: Encoding::nominal(PLATFORM_FIELD, "Platform").sorted_descending_by(Channel::Y),
        y: Encoding::quantitative(COUNT_FIELD, "Count"),
        color: None,
        tooltip: vec![
            TooltipField::new(PLATFORM_FIELD, FieldType::Nominal, "Platform"),
            TooltipField::new(COUNT_FIELD, FieldType::Quantitative, "Count"),
        ],
        brush: None,
        width: Width::Container,
        height: 400,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_data::{BatchBuilder, ResultTable};

    fn result(a: Vec<Option<&str>>, b: Option<Vec<Option<&str>>>) -> ResultSet {
        let mut builder = BatchBuilder::new()
            .text("brandname", a.iter().map(|_| Some("x")).collect::<Vec<_>>())
            .text("platform_a", a);
        if let Some(b) = b {
            builder = builder.text("platform_b", b);
        }
        ResultTable::normalize(&builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_counts_skip_blank_and_null() {
        let set = result(
            vec![Some("Yelp"), Some(""), Some("Yelp")],
            Some(vec![None, Some("Google"), Some("   ")]),
        );
        assert_eq!(
            count_platforms(&set),
            vec![("Yelp".to_string(), 2), ("Google".to_string(), 1)]
        );
    }

    #[test]
    fn test_values_are_trimmed_before_grouping() {
        let set = result(vec![Some(" Yelp"), Some("Yelp "), Some("Google")], None);
        assert_eq!(count_platforms(&set)[0], ("Yelp".to_string(), 2));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let set = result(vec![Some("Google"), Some("Yelp"), Some("Bing"), Some("Yelp")], None);
        assert_eq!(
            count_platforms(&set),
            vec![
                ("Yelp".to_string(), 2),
                ("Google".to_string(), 1),
                ("Bing".to_string(), 1)
            ]
        );

        // platform_a values are seen before platform_b values
        let set = result(vec![Some("Bing"), None], Some(vec![Some("Apple Maps"), Some("Google")]));
        let order: Vec<String> = count_platforms(&set).into_iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Bing", "Apple Maps", "Google"]);
    }

    #[test]
    fn test_chart_spec() {
        let set = result(vec![Some("Google"), Some("Yelp"), Some("Yelp")], None);
        let chart = build(&set, "Top 100").unwrap();
        assert_eq!(chart.title, "Platform Counts (Top 100)");
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0]["platform"], CellValue::from("Yelp"));
        assert_eq!(chart.data[0]["count"], CellValue::Number(2.0));
        assert_eq!(chart.x.field_type, FieldType::Nominal);
        assert_eq!(chart.height, 400);
    }

    #[test]
    fn test_all_blank_is_no_data() {
        let set = result(vec![None, Some(" ")], Some(vec![Some(""), None]));
        assert_eq!(build(&set, "v").unwrap_err(), Skipped::NoData("No platform data available."));
    }

    #[test]
    fn test_no_platform_columns() {
        let batch = BatchBuilder::new().text("brandname", vec![Some("a")]).build().unwrap();
        let set = ResultTable::normalize(&batch).unwrap();
        assert!(matches!(build(&set, "v"), Err(Skipped::MissingColumns(_))));
    }
}
