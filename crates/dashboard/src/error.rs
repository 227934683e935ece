use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to derive dashboard statistics: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
