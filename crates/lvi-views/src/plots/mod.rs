//! Chart builders

pub mod bar;
pub mod platform_counts;
pub mod scatter;
pub mod utils;

pub use bar::{BrandChart, BrandChartRenderer};

use lvi_data::ResultSet;

use crate::spec::{BrushRegion, ChartSpec, Notice};

/// Why an auxiliary chart was not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// The result lacks a column the chart needs
    MissingColumns(&'static str),
    /// Columns exist but no row survives filtering
    NoData(&'static str),
}

impl Skipped {
    pub fn message(&self) -> &'static str {
        match self {
            Skipped::MissingColumns(message) | Skipped::NoData(message) => message,
        }
    }

    /// Placeholder shown in the chart's slot
    pub fn notice(&self) -> Notice {
        Notice::info(self.message())
    }
}

/// Builds the two charts shown side by side under the brand chart
///
/// Each chart is gated on its own columns, so one can be skipped while the
/// other still renders.
pub struct AuxiliaryVisualizer;

impl AuxiliaryVisualizer {
    /// Platform frequency chart, or `None` when it cannot be drawn
    pub fn build_platform_counts(result: &ResultSet, view_name: &str) -> Option<ChartSpec> {
        platform_counts::build(result, view_name).ok()
    }

    /// Score scatter, or `None` when it cannot be drawn
    pub fn build_scatter(result: &ResultSet, view_name: &str, brush: Option<BrushRegion>) -> Option<ChartSpec> {
        scatter::build(result, view_name, brush).ok()
    }

    /// Platform chart or the placeholder to show instead
    pub fn platform_counts_slot(result: &ResultSet, view_name: &str) -> Result<ChartSpec, Notice> {
        platform_counts::build(result, view_name).map_err(|skipped| skipped.notice())
    }

    /// Scatter or the placeholder to show instead
    pub fn scatter_slot(
        result: &ResultSet,
        view_name: &str,
        brush: Option<BrushRegion>,
    ) -> Result<ChartSpec, Notice> {
        scatter::build(result, view_name, brush).map_err(|skipped| skipped.notice())
    }
}
