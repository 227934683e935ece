//! # Charts
//!
//! This crate turns the price history into the data behind the three
//! time-series views of the dashboard.
//!
//! As a Layer 1 crate, it depends only on `core-types`. It prescribes no visual
//! styling: a `ChartPayload` carries titles, axis labels, trace names and the
//! `(date, value)` points of each series.
//!
//! - `filter`: selects the records inside a `DateWindow`.
//! - `project`: maps those records into a `ChartPayload`.

// Declare the modules that make up this crate.
pub mod error;
pub mod filter;
pub mod payload;
pub mod projector;

// Re-export the core types to provide a clean public API.
pub use error::ChartError;
pub use filter::filter;
pub use payload::{ChartLayout, ChartPayload, PctChangeChart, Point, PriceChart, Trace, TraceKind, VolumeChart};
pub use projector::project;
