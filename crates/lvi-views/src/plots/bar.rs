//! Paginated brand bar chart

use std::cmp::Ordering;

use lvi_core::{PageDirection, PagerCommand, PaginationState, ViewKey, WidgetId};
use lvi_data::{DataRecord, ResultSet};
use serde::{Deserialize, Serialize};

use crate::selector::BRAND_COLUMN;
use crate::spec::{
    Channel, ChartSpec, Encoding, FieldType, Mark, PagerButton, PagerControlsSpec, TooltipField, Width,
};

/// Minimum chart height in pixels
const MIN_HEIGHT: u32 = 200;

/// Height added per bar
const ROW_HEIGHT: u32 = 20;

const PAGER_INFO: &str = "Scroll to see more brands";

/// Chart and pager produced by one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandChart {
    pub chart: ChartSpec,
    pub pager: PagerControlsSpec,
}

/// Renders one page of brands as a horizontal bar chart
///
/// Reads and clamps the view's cursor in the shared [`PaginationState`];
/// the cursor only moves when a pager command is applied.
pub struct BrandChartRenderer<'a> {
    state: &'a PaginationState,
}

impl<'a> BrandChartRenderer<'a> {
    pub fn new(state: &'a PaginationState) -> Self {
        Self { state }
    }

    /// Build the chart for the view's current page
    ///
    /// Produces nothing when the brand or metric column is missing or the
    /// result has no rows; that is a display gate, not an error.
    pub fn render(
        &self,
        result: &ResultSet,
        metric: &str,
        view_key: &ViewKey,
        title_prefix: &str,
    ) -> Option<BrandChart> {
        if !result.schema().requires(&[BRAND_COLUMN, metric]) {
            tracing::debug!("Skipping brand chart for {}: needs '{}' and '{}'", view_key, BRAND_COLUMN, metric);
            return None;
        }

        let total_rows = result.row_count();
        if total_rows == 0 {
            return None;
        }

        let cursor = self.state.clamp(view_key, total_rows);
        let range = cursor.row_range(total_rows);
        let (first, last) = (range.start + 1, range.end);

        let mut data: Vec<DataRecord> = range.map(|row| result.record(row, &[BRAND_COLUMN, metric])).collect();
        sort_page_descending(&mut data, metric);

        let height = MIN_HEIGHT.max(ROW_HEIGHT * data.len() as u32);

        let chart = ChartSpec {
            title: format!("{} (Brands {}–{})", title_prefix, first, last),
            mark: Mark::bar(),
            x: Encoding::quantitative(metric, title_prefix),
            y: Encoding::nominal(BRAND_COLUMN, "Brand").sorted_descending_by(Channel::X),
            color: None,
            tooltip: vec![
                TooltipField::new(BRAND_COLUMN, FieldType::Nominal, "Brand"),
                TooltipField::new(metric, FieldType::Quantitative, title_prefix),
            ],
            brush: None,
            width: Width::Container,
            height,
            data,
        };

        let pager = PagerControlsSpec {
            view_key: view_key.clone(),
            info: PAGER_INFO.to_string(),
            previous: pager_button(view_key, PageDirection::Previous, "⬅️ Previous", !cursor.is_first()),
            next: pager_button(view_key, PageDirection::Next, "Next ➡️", !cursor.is_last()),
            page: cursor.page(),
            total_pages: cursor.total_pages(),
            label: format!("Page {} of {}", cursor.page(), cursor.total_pages()),
        };

        Some(BrandChart { chart, pager })
    }

    /// Apply a pager click to the cursor it addresses
    pub fn advance(&self, command: &PagerCommand) -> usize {
        self.state.apply(command).page()
    }
}

fn pager_button(view_key: &ViewKey, direction: PageDirection, caption: &str, enabled: bool) -> PagerButton {
    PagerButton {
        widget_id: WidgetId::for_view(view_key).with(direction.widget_suffix()).build(),
        caption: caption.to_string(),
        command: PagerCommand::new(view_key.clone(), direction),
        enabled,
    }
}

/// Order one page by metric, highest first; nulls sink. Only this page is
/// sorted, so the order says nothing about brands on other pages.
fn sort_page_descending(data: &mut [DataRecord], metric: &str) {
    data.sort_by(|a, b| {
        let a = a.get(metric).and_then(|v| v.as_number());
        let b = b.get(metric).and_then(|v| v.as_number());
        match (a, b) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
