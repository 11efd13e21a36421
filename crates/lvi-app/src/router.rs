//! Routing a view activation through query, normalization and charts

use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use lvi_core::data::{QueryRegistry, ViewDescriptor};
use lvi_core::{PaginationState, ViewKey};
use lvi_data::config::validate_views;
use lvi_data::{DataError, ResultSet, ResultTable};
use lvi_views::{AuxiliaryVisualizer, BrandChartRenderer, BrushRegion, ChartSelector, TableSpec};
use tracing::{debug, error, info, warn};

use crate::page::{ReadyPage, RenderedPage};

/// Owns the ordered view registry and the query registry behind it
pub struct ViewRouter {
    views: Vec<ViewDescriptor>,
    registry: Arc<dyn QueryRegistry>,
}

impl ViewRouter {
    /// Create a router, rejecting an empty registry or colliding view keys
    pub fn new(views: Vec<ViewDescriptor>, registry: Arc<dyn QueryRegistry>) -> Result<Self, DataError> {
        validate_views(&views)?;
        info!("Registered {} views against {}", views.len(), registry.source_name());
        Ok(Self { views, registry })
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    /// View names in navigation order
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|view| view.name.as_str())
    }

    /// The first registered view
    pub fn default_view(&self) -> &ViewDescriptor {
        // new() rejects an empty list
        &self.views[0]
    }

    pub fn find(&self, name: &str) -> Option<&ViewDescriptor> {
        self.views.iter().find(|view| view.name == name)
    }

    pub fn find_by_key(&self, key: &ViewKey) -> Option<&ViewDescriptor> {
        self.views.iter().find(|view| &view.key() == key)
    }

    pub fn registry(&self) -> &Arc<dyn QueryRegistry> {
        &self.registry
    }

    /// Run the named view's query and compose its page
    ///
    /// Failures never escape: they come back as [`RenderedPage::Failed`] so
    /// the caller can keep serving other views.
    pub async fn activate_view(
        &self,
        name: &str,
        state: &PaginationState,
        brush: Option<BrushRegion>,
    ) -> RenderedPage {
        let Some(view) = self.find(name) else {
            let error = DataError::UnknownView(name.to_string());
            error!("{}", error);
            return RenderedPage::failed(name, error.to_string());
        };

        info!("Activating view '{}'", view.name);
        let outcome = self.registry.execute(view).await;
        self.compose(view, outcome, state, brush)
    }

    /// Build the page for a query outcome
    pub fn compose(
        &self,
        view: &ViewDescriptor,
        outcome: anyhow::Result<RecordBatch>,
        state: &PaginationState,
        brush: Option<BrushRegion>,
    ) -> RenderedPage {
        let result = match outcome.and_then(|batch| Ok(ResultTable::normalize(&batch)?)) {
            Ok(result) => result,
            Err(e) => {
                error!("Query for '{}' failed: {}", view.name, e);
                return RenderedPage::failed(&view.name, e.to_string());
            }
        };

        if result.is_empty() {
            warn!("View '{}' returned no rows", view.name);
            return RenderedPage::empty(&view.name);
        }

        info!("View '{}' returned {} rows", view.name, result.row_count());
        RenderedPage::Ready(Box::new(self.ready_page(view, &result, state, brush)))
    }

    fn ready_page(
        &self,
        view: &ViewDescriptor,
        result: &ResultSet,
        state: &PaginationState,
        brush: Option<BrushRegion>,
    ) -> ReadyPage {
        let view_key = view.key();
        let metric = ChartSelector::resolve(result.schema(), &view.metric);

        let brand_chart = match &metric {
            Some(choice) => {
                BrandChartRenderer::new(state).render(result, &choice.column, &view_key, &choice.label)
            }
            None => {
                debug!("No chartable metric for '{}'", view.name);
                None
            }
        };

        ReadyPage {
            subheader: view.name.clone(),
            view_key,
            metric,
            brand_chart,
            table: TableSpec::from_result(result),
            platform_counts: AuxiliaryVisualizer::platform_counts_slot(result, &view.name).into(),
            scatter: AuxiliaryVisualizer::scatter_slot(result, &view.name, brush).into(),
        }
    }
}
