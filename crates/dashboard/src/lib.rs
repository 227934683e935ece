//! # Dashboard Snapshot
//!
//! The read-only state behind the dashboard: the dataset, the KPIs and the
//! descriptive statistics, all derived once at startup. Share it between
//! request handlers with an `Arc<Dashboard>`; nothing in it is ever mutated.
//!
//! The only interactive operation is `Dashboard::on_window_changed`, which
//! filters the dataset to the selected window and projects the three charts.

use analytics::{DescriptiveStatistics, KpiSummary, StatisticsEngine};
use charts::{ChartError, ChartPayload};
use core_types::{Dataset, DateWindow};

pub mod error;
pub mod span;

pub use error::DashboardError;
pub use span::DatasetSpan;

/// The central, immutable state of a running dashboard.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    kpis: KpiSummary,
    statistics: DescriptiveStatistics,
    span: DatasetSpan,
}

impl Dashboard {
    /// Derives and caches everything the dashboard shows for the whole history.
    ///
    /// Statistics failures are fatal: there is no dashboard without valid KPIs.
    pub fn build(dataset: Dataset) -> Result<Self, DashboardError> {
        let engine = StatisticsEngine::new();
        let kpis = engine.compute_kpis(&dataset)?;
        let statistics = engine.compute_descriptive_stats(&dataset)?;
        let span = DatasetSpan::of(&dataset);

        tracing::info!(
            records = dataset.len(),
            first = %span.first,
            last = %span.last,
            max_close = kpis.max_close,
            total_growth_pct = kpis.total_growth_pct,
            "Dashboard snapshot ready."
        );

        Ok(Self {
            dataset,
            kpis,
            statistics,
            span,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn kpis(&self) -> &KpiSummary {
        &self.kpis
    }

    pub fn statistics(&self) -> &DescriptiveStatistics {
        &self.statistics
    }

    pub fn span(&self) -> &DatasetSpan {
        &self.span
    }

    /// Recomputes the chart payload for a newly selected window.
    ///
    /// A window outside the data span is not an error for the user: it
    /// produces empty charts.
    pub fn on_window_changed(&self, window: &DateWindow) -> ChartPayload {
        match charts::filter(self.dataset.records(), window) {
            Ok(records) => {
                tracing::debug!(
                    start = %window.start(),
                    end = %window.end(),
                    selected = records.len(),
                    "Projecting charts for window."
                );
                charts::project(records)
            }
            Err(e @ ChartError::OutOfRange { .. }) => {
                tracing::debug!(error = %e, "Window has no overlap with the data; rendering empty charts.");
                charts::project(&[])
            }
        }
    }
}
