//! One dashboard session
//!
//! A session owns everything that lives between renders: the pagination
//! cursors, the event bus, the active view and the scatter brush. Every
//! interaction is one blocking render pass on the session's runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use lvi_core::events::{events, EventBus};
use lvi_core::{PagerCommand, PaginationState};
use lvi_data::{DashboardConfig, DataError, SqliteRegistry};
use lvi_views::{BrandChartRenderer, BrushRegion};
use parking_lot::RwLock;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::page::RenderedPage;
use crate::router::ViewRouter;
use crate::views::builtin_views;

pub struct Session {
    title: String,
    router: ViewRouter,
    state: PaginationState,
    events: EventBus,
    active: RwLock<Option<String>>,
    brush: RwLock<Option<BrushRegion>>,
    runtime: Runtime,
}

impl Session {
    /// Create a session over `router` with `page_size` brands per page
    pub fn new(router: ViewRouter, page_size: usize) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start session runtime")?;

        Ok(Self {
            title: lvi_data::config::DEFAULT_TITLE.to_string(),
            router,
            state: PaginationState::with_page_size(page_size),
            events: EventBus::new(),
            active: RwLock::new(None),
            brush: RwLock::new(None),
            runtime,
        })
    }

    /// Open the configured SQLite database with the configured (or built-in) views
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let database = config
            .database
            .as_ref()
            .context("No database configured; set \"database\" in the config or create one with --sample")?;

        let registry = SqliteRegistry::open(database)
            .with_context(|| format!("Failed to open database {}", database.display()))?;
        let views = config.view_descriptors(builtin_views);
        let router = ViewRouter::new(views, Arc::new(registry))?;

        let mut session = Self::new(router, config.page_size)?;
        session.title = config.title.clone();
        Ok(session)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Name of the view rendered last, if any
    pub fn active_view(&self) -> Option<String> {
        self.active.read().clone()
    }

    /// Select a view and render it
    ///
    /// Unknown names and query failures come back as failed pages; the
    /// session stays usable either way. An unknown name leaves the active
    /// view as it was.
    pub fn activate(&self, name: &str) -> RenderedPage {
        let brush = *self.brush.read();
        let page = self
            .runtime
            .block_on(self.router.activate_view(name, &self.state, brush));

        if self.router.find(name).is_some() {
            *self.active.write() = Some(name.to_string());
        }
        self.publish(&page);
        page
    }

    /// Render the default view
    pub fn activate_default(&self) -> RenderedPage {
        let name = self.router.default_view().name.clone();
        self.activate(&name)
    }

    /// Re-render whichever view is active, or the default one
    pub fn refresh(&self) -> RenderedPage {
        match self.active_view() {
            Some(name) => self.activate(&name),
            None => self.activate_default(),
        }
    }

    /// Apply a pager click, then re-render the view it belongs to
    pub fn dispatch(&self, command: &PagerCommand) -> Result<RenderedPage, DataError> {
        let view = self
            .router
            .find_by_key(&command.view_key)
            .ok_or_else(|| DataError::UnknownView(command.view_key.to_string()))?;
        let name = view.name.clone();

        let page = BrandChartRenderer::new(&self.state).advance(command);
        let cursor = self.state.cursor(&command.view_key);
        info!("Pager {:?} on '{}' -> page {} of {}", command.direction, name, page, cursor.total_pages());
        self.events.publish(events::PageChanged {
            view_key: command.view_key.clone(),
            page,
            total_pages: cursor.total_pages(),
        });

        Ok(self.activate(&name))
    }

    /// Set or clear the scatter brush and re-render the active view
    pub fn set_brush(&self, region: Option<BrushRegion>) -> RenderedPage {
        *self.brush.write() = region;
        self.refresh()
    }

    /// Render every view in navigation order, ending on the first
    pub fn render_all(&self) -> Vec<RenderedPage> {
        let names: Vec<String> = self.router.view_names().map(String::from).collect();
        let pages = names.iter().map(|name| self.activate(name)).collect();
        if let Some(first) = names.first() {
            *self.active.write() = Some(first.clone());
        }
        pages
    }

    fn publish(&self, page: &RenderedPage) {
        match page {
            RenderedPage::Failed { view, message, .. } => {
                warn!("View '{}' failed; other views are unaffected", view);
                self.events.publish(events::QueryFailed {
                    view_name: view.clone(),
                    message: message.clone(),
                });
            }
            RenderedPage::Empty { view, .. } => {
                self.events.publish(events::ViewActivated {
                    view_name: view.clone(),
                    view_key: lvi_core::ViewKey::derive(view),
                    row_count: 0,
                });
            }
            RenderedPage::Ready(ready) => {
                self.events.publish(events::ViewActivated {
                    view_name: ready.subheader.clone(),
                    view_key: ready.view_key.clone(),
                    row_count: ready.table.row_count(),
                });
            }
        }
    }
}
