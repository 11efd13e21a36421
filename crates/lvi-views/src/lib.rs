//! Chart and table specs for the LVI results dashboard
//!
//! Everything here turns a normalized [`lvi_data::ResultSet`] into
//! declarative specs. Drawing them is left to whatever surface hosts the
//! dashboard; [`export`] covers the Vega-Lite case.

pub mod export;
pub mod plots;
pub mod selector;
pub mod spec;
pub mod tables;

pub use export::to_vega_lite;
pub use plots::{AuxiliaryVisualizer, BrandChart, BrandChartRenderer, Skipped};
pub use selector::{ChartSelector, MetricChoice, BRAND_COLUMN, METRIC_PRIORITY};
pub use spec::{
    AxisDomain, Brush, BrushRegion, ChartSpec, Notice, NoticeLevel, PagerButton, PagerControlsSpec,
};
pub use tables::TableSpec;
