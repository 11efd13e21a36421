//! Two-score scatter plot with brushing

use indexmap::IndexSet;
use lvi_data::{CellValue, DataRecord, ResultSet};

use super::utils::assign_palette;
use super::Skipped;
use crate::selector::BRAND_COLUMN;
use crate::spec::{
    AxisDomain, Brush, BrushRegion, ChartSpec, ColorEncoding, Encoding, FieldType, LegendOrient, Mark,
    TooltipField, Width,
};

/// X axis score
pub const X_COLUMN: &str = "optimization_score";
/// Y axis score
pub const Y_COLUMN: &str = "ai_overall_score";
/// Column the color category is read from
pub const COLOR_SOURCE: &str = "platform_a";
/// Derived field holding the color category
pub const COLOR_FIELD: &str = "platform_a_label";
/// Category for points with no platform
pub const UNLABELED: &str = "N/A";

const POINT_SIZE: f64 = 60.0;

/// A point that survived the null filter
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub category: String,
    pub row: usize,
}

/// Rows with both scores, labelled by platform (`N/A` when blank)
pub fn collect_points(result: &ResultSet) -> Vec<ScatterPoint> {
    (0..result.row_count())
        .filter_map(|row| {
            let x = result.value(row, X_COLUMN).as_number()?;
            let y = result.value(row, Y_COLUMN).as_number()?;
            let category = result
                .value(row, COLOR_SOURCE)
                .trimmed_label()
                .unwrap_or_else(|| UNLABELED.to_string());
            Some(ScatterPoint { x, y, category, row })
        })
        .collect()
}

/// Scatter of the two scores, colored by platform
///
/// `brush` is the current interval selection, if any; it only changes
/// opacity, never which points are included.
pub fn build(result: &ResultSet, view_name: &str, brush: Option<BrushRegion>) -> Result<ChartSpec, Skipped> {
    if !result.schema().requires(&[X_COLUMN, Y_COLUMN]) {
        tracing::debug!("Scatter skipped for '{}': score columns missing", view_name);
        return Err(Skipped::MissingColumns(
            "Scatter plot requires 'optimization_score' and 'ai_overall_score' columns.",
        ));
    }

    let points = collect_points(result);
    if points.is_empty() {
        return Err(Skipped::NoData("No data available for scatter plot."));
    }

    // Both are Some: points is non-empty
    let (Some(x_domain), Some(y_domain)) = (
        AxisDomain::padded(points.iter().map(|p| p.x)),
        AxisDomain::padded(points.iter().map(|p| p.y)),
    ) else {
        return Err(Skipped::NoData("No data available for scatter plot."));
    };

    let categories: IndexSet<&str> = points.iter().map(|p| p.category.as_str()).collect();

    let data: Vec<DataRecord> = points
        .iter()
        .map(|point| {
            let mut record = DataRecord::new();
            record.insert(BRAND_COLUMN.to_string(), result.value(point.row, BRAND_COLUMN).clone());
            record.insert(X_COLUMN.to_string(), CellValue::Number(point.x));
            record.insert(Y_COLUMN.to_string(), CellValue::Number(point.y));
            record.insert(COLOR_FIELD.to_string(), CellValue::Text(point.category.clone()));
            record
        })
        .collect();

    Ok(ChartSpec {
        title: format!("AI vs Optimization by Platform ({})", view_name),
        mark: Mark::circle(POINT_SIZE),
        x: Encoding::quantitative(X_COLUMN, "Optimization Score").with_domain(x_domain),
        y: Encoding::quantitative(Y_COLUMN, "AI Overall Score").with_domain(y_domain),
        color: Some(ColorEncoding {
            field: COLOR_FIELD.to_string(),
            legend_orient: LegendOrient::Bottom,
            legend_title: None,
            palette: assign_palette(categories),
        }),
        tooltip: vec![
            TooltipField::new(BRAND_COLUMN, FieldType::Nominal, "Brand"),
            TooltipField::new(X_COLUMN, FieldType::Quantitative, "Optimization"),
            TooltipField::new(Y_COLUMN, FieldType::Quantitative, "AI Overall"),
            TooltipField::new(COLOR_FIELD, FieldType::Nominal, "Platform A"),
        ],
        brush: Some(Brush::new(brush)),
        width: Width::Container,
        height: 400,
        data,
    })
}
