//! Stable identifiers for views and their widgets
//!
//! A view's display name doubles as its label in the navigation list, so the
//! key used for pagination state and widget identity is derived from it.
//! Derivation is deterministic; uniqueness across a registry is checked when
//! the registry is built.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Prefix shared by every derived view key
const VIEW_KEY_PREFIX: &str = "page";

/// State key for one view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewKey(String);

impl ViewKey {
    /// Derive the key from a view's display name
    ///
    /// Lowercases the name, turns whitespace and path separators into `_`
    /// and drops parentheses: `"Top 100 (Food/Bev)"` becomes
    /// `"page_top_100_food_bev"`.
    pub fn derive(display_name: &str) -> Self {
        let mut slug = String::with_capacity(display_name.len());
        for ch in display_name.chars() {
            match ch {
                '(' | ')' => {}
                '/' | '\\' => slug.push('_'),
                c if c.is_whitespace() => slug.push('_'),
                c => slug.extend(c.to_lowercase()),
            }
        }
        Self(WidgetId::new(VIEW_KEY_PREFIX).with(slug).build())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Widget ID builder that keeps widget identities unique per view
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Start from a view key
    pub fn for_view(key: &ViewKey) -> Self {
        Self::new(key)
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }
}
