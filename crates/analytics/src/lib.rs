//! # Statistics Engine
//!
//! This crate derives the headline numbers of the dashboard from the full
//! price history.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   HTTP or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatisticsEngine` takes a `Dataset` and
//!   produces a `KpiSummary` or a `DescriptiveStatistics` table. Results are
//!   computed once at startup and cached by the caller.
//!
//! ## Public API
//!
//! - `StatisticsEngine`: The calculator for KPIs and descriptive statistics.
//! - `KpiSummary`, `DescriptiveStatistics`, `ColumnStatistics`: The result types.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatisticsEngine;
pub use error::AnalyticsError;
pub use report::{ColumnStatistics, DescriptiveStatistics, KpiSummary};
