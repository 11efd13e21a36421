//! Dashboard configuration

use std::path::{Path, PathBuf};

use ahash::AHashMap;
use lvi_core::data::{QueryHandle, ViewDescriptor};
use lvi_core::navigation::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Page title used when the config does not set one
pub const DEFAULT_TITLE: &str = "2026 LVI Results";

/// Metric pinned for a view instead of the priority walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedMetric {
    pub column: String,
    pub label: String,
}

/// One view entry in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub name: String,
    pub sql: String,
    #[serde(default)]
    pub fixed_metric: Option<FixedMetric>,
}

impl From<&ViewConfig> for ViewDescriptor {
    fn from(config: &ViewConfig) -> Self {
        let view = ViewDescriptor::new(config.name.clone(), QueryHandle::new(config.sql.clone()));
        match &config.fixed_metric {
            Some(metric) => view.with_fixed_metric(metric.column.clone(), metric.label.clone()),
            None => view,
        }
    }
}

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title
    pub title: String,

    /// SQLite database file
    pub database: Option<PathBuf>,

    /// Brands per chart page
    pub page_size: usize,

    /// Views overriding the built-in registry, in navigation order
    pub views: Option<Vec<ViewConfig>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            database: None,
            page_size: DEFAULT_PAGE_SIZE,
            views: None,
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        tracing::info!("Loaded dashboard config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(text)?;
        if config.page_size == 0 {
            return Err(DataError::Config("page_size must be greater than zero".to_string()));
        }
        if let Some(views) = &config.views {
            if views.is_empty() {
                return Err(DataError::Config("views must not be empty when given".to_string()));
            }
        }
        Ok(config)
    }

    /// Configured views, or `builtin` when the config has none
    pub fn view_descriptors(&self, builtin: impl FnOnce() -> Vec<ViewDescriptor>) -> Vec<ViewDescriptor> {
        match &self.views {
            Some(views) => views.iter().map(ViewDescriptor::from).collect(),
            None => builtin(),
        }
    }
}

/// Check that view names and derived state keys are unique
pub fn validate_views(views: &[ViewDescriptor]) -> Result<(), DataError> {
    if views.is_empty() {
        return Err(DataError::Config("no views registered".to_string()));
    }

    let mut seen: AHashMap<String, &str> = AHashMap::new();
    for view in views {
        let key = view.key().to_string();
        if let Some(first) = seen.insert(key.clone(), &view.name) {
            return Err(DataError::DuplicateViewKey {
                key,
                first: first.to_string(),
                second: view.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvi_core::data::MetricSelection;

    #[test]
    fn test_defaults_apply_to_missing_fields() {
        let config = DashboardConfig::from_json(r#"{"database": "lvi.db"}"#).unwrap();
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.database, Some(PathBuf::from("lvi.db")));
        assert!(config.views.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(DashboardConfig::from_json(r#"{"page_size": 0}"#).is_err());
    }

    #[test]
    fn test_configured_views_replace_builtin() {
        let config = DashboardConfig::from_json(
            r#"{
                "views": [
                    {"name": "Overall", "sql": "SELECT 1", "fixed_metric": {"column": "optimization_score", "label": "Optimization Score"}},
                    {"name": "Retail", "sql": "SELECT 2"}
                ]
            }"#,
        )
        .unwrap();

        let views = config.view_descriptors(Vec::new);
        assert_eq!(views.len(), 2);
        assert!(matches!(views[0].metric, MetricSelection::Fixed { .. }));
        assert_eq!(views[1].metric, MetricSelection::Priority);
        assert_eq!(views[1].query.statement(), "SELECT 2");
    }

    #[test]
    fn test_colliding_keys_rejected() {
        let views = vec![
            ViewDescriptor::new("Food Brands", QueryHandle::new("a")),
            ViewDescriptor::new("Food/Brands", QueryHandle::new("b")),
        ];
        match validate_views(&views) {
            Err(DataError::DuplicateViewKey { key, .. }) => assert_eq!(key, "page_food_brands"),
            other => panic!("expected key collision, got {:?}", other),
        }
    }

    #[test]
    fn test_unique_views_pass() {
        let views = vec![
            ViewDescriptor::new("Food", QueryHandle::new("a")),
            ViewDescriptor::new("Retail", QueryHandle::new("b")),
        ];
        assert!(validate_views(&views).is_ok());
    }
}
