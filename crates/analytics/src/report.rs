use core_types::Column;
use serde::{Deserialize, Serialize};

/// The headline figures of the dashboard, derived once from the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Highest close price over the whole history.
    pub max_close: f64,
    /// Growth from the first to the last close, in percent.
    pub total_growth_pct: f64,
    /// Mean of `open - adj_close` across all records.
    pub avg_open_adj_close_diff: f64,
    /// Mean of the defined monthly percentage changes.
    /// `None` when no record carries a monthly change.
    pub avg_monthly_growth_pct: Option<f64>,
}

/// The summary of a single numeric column.
///
/// Every figure is `None` for a column without defined values, and
/// `std_dev` is also `None` for a column with a single one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: Column,
    /// Number of defined values the summary was computed from.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 divisor).
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive statistics for every numeric column, in source-file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub columns: Vec<ColumnStatistics>,
}

impl DescriptiveStatistics {
    /// Looks up the summary of one column.
    pub fn get(&self, column: Column) -> Option<&ColumnStatistics> {
        self.columns.iter().find(|c| c.column == column)
    }
}
