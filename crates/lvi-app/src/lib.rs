//! The LVI results dashboard: view routing, sessions and the built-in views

pub mod cli;
pub mod page;
pub mod router;
pub mod sample;
pub mod session;
pub mod views;

pub use page::{AuxSlot, ReadyPage, RenderedPage, EMPTY_MESSAGE};
pub use router::ViewRouter;
pub use sample::{create_sample_database, DEFAULT_SAMPLE_BRANDS};
pub use session::Session;
pub use views::builtin_views;
