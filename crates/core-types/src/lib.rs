pub mod dataset;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dataset::Dataset;
pub use enums::Column;
pub use error::CoreError;
pub use structs::{DateWindow, Record};
