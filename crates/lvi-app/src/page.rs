//! What one activation of a view produces

use lvi_core::ViewKey;
use lvi_views::{to_vega_lite, BrandChart, ChartSpec, MetricChoice, Notice, TableSpec};
use serde::Serialize;
use serde_json::Value;

/// Shown in place of the charts when the query returned no rows
pub const EMPTY_MESSAGE: &str = "No data returned.";

/// Content of one auxiliary chart slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AuxSlot {
    Chart(ChartSpec),
    Placeholder(Notice),
}

impl AuxSlot {
    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            AuxSlot::Chart(chart) => Some(chart),
            AuxSlot::Placeholder(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<&Notice> {
        match self {
            AuxSlot::Chart(_) => None,
            AuxSlot::Placeholder(notice) => Some(notice),
        }
    }
}

impl From<Result<ChartSpec, Notice>> for AuxSlot {
    fn from(result: Result<ChartSpec, Notice>) -> Self {
        match result {
            Ok(chart) => AuxSlot::Chart(chart),
            Err(notice) => AuxSlot::Placeholder(notice),
        }
    }
}

/// A view with rows to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyPage {
    /// View name, shown as the subheader
    pub subheader: String,
    pub view_key: ViewKey,
    /// Metric driving the brand chart, if any column qualified
    pub metric: Option<MetricChoice>,
    pub brand_chart: Option<BrandChart>,
    pub table: TableSpec,
    pub platform_counts: AuxSlot,
    pub scatter: AuxSlot,
}

impl ReadyPage {
    /// Every chart on the page, brand chart first
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.brand_chart
            .iter()
            .map(|brand| &brand.chart)
            .chain(self.platform_counts.chart())
            .chain(self.scatter.chart())
    }
}

/// Result of activating a view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderedPage {
    /// The query failed; only this view is affected
    Failed {
        view: String,
        message: String,
        notice: Notice,
    },
    /// The query succeeded with no rows
    Empty { view: String, notice: Notice },
    Ready(Box<ReadyPage>),
}

impl RenderedPage {
    pub fn failed(view: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        RenderedPage::Failed {
            view: view.into(),
            notice: Notice::error(format!("Database error: {}", message)),
            message,
        }
    }

    pub fn empty(view: impl Into<String>) -> Self {
        RenderedPage::Empty {
            view: view.into(),
            notice: Notice::warning(EMPTY_MESSAGE),
        }
    }

    pub fn view_name(&self) -> &str {
        match self {
            RenderedPage::Failed { view, .. } | RenderedPage::Empty { view, .. } => view,
            RenderedPage::Ready(page) => &page.subheader,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RenderedPage::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&ReadyPage> {
        match self {
            RenderedPage::Ready(page) => Some(page),
            _ => None,
        }
    }

    /// Inline message for failed and empty pages
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            RenderedPage::Failed { notice, .. } | RenderedPage::Empty { notice, .. } => Some(notice),
            RenderedPage::Ready(_) => None,
        }
    }

    /// Rows in the view's result; zero unless ready
    pub fn row_count(&self) -> usize {
        self.as_ready().map_or(0, |page| page.table.row_count())
    }

    /// Vega-Lite documents for every chart on the page
    pub fn vega_lite_documents(&self) -> Vec<Value> {
        self.as_ready()
            .map(|page| page.charts().map(to_vega_lite).collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
