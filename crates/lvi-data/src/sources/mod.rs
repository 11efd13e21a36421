pub mod memory_source;
pub mod sqlite_source;

pub use memory_source::{BatchBuilder, MemoryRegistry};
pub use sqlite_source::SqliteRegistry;
