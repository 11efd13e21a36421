//! Utilities for plot specs

pub mod colors;

// Re-export commonly used items
pub use colors::{categorical_color, assign_palette};
