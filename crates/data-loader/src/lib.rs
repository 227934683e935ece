//! # Dataset Loader
//!
//! This crate is the system's only window onto the price file. It reads the
//! monthly export once at startup and hands back a validated `Dataset`.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file-format knowledge lives here. The rest of the
//!   application only ever sees `core_types::Dataset`.
//! - **Fail Fast:** A missing column, an unparsable row or a duplicate date is a
//!   `LoaderError`. The dashboard does not start on bad input.
//!
//! ## Public API
//!
//! - `DataSource`: The trait implemented by every dataset source.
//! - `CsvSource`: Loads a `Dataset` from a CSV file.
//! - `load_from_reader`: Parses CSV from any reader.
//! - `LoaderError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod csv_source;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use csv_source::{load_from_reader, CsvSource, DATE_HEADER};
pub use error::LoaderError;

use core_types::Dataset;

/// Trait for types that can load the price history.
pub trait DataSource {
    fn load(&self) -> Result<Dataset, LoaderError>;
}
