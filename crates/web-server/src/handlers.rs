use crate::{error::AppError, AppState};
use analytics::{DescriptiveStatistics, KpiSummary};
use axum::{
    extract::{Query, State},
    http::Uri,
    response::Html,
    Json,
};
use charts::ChartPayload;
use chrono::NaiveDate;
use core_types::DateWindow;
use dashboard::DatasetSpan;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// The selected window. Either bound may be omitted to mean the edge of the data.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub kpis: KpiSummary,
    pub statistics: DescriptiveStatistics,
}

/// # GET /
/// Serves the dashboard page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{title}}", &escape_html(&state.title)))
}

/// # GET /api/summary
/// The KPIs and descriptive statistics, computed once at startup.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        kpis: state.dashboard.kpis().clone(),
        statistics: state.dashboard.statistics().clone(),
    })
}

/// # GET /api/span
/// The data span and the month marks for the range control.
pub async fn get_span(State(state): State<Arc<AppState>>) -> Json<DatasetSpan> {
    Json(state.dashboard.span().clone())
}

/// # GET /api/charts?start=YYYY-MM-DD&end=YYYY-MM-DD
/// Recomputes the three chart payloads for the selected window.
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<ChartPayload>, AppError> {
    let dataset = state.dashboard.dataset();
    let requested = DateWindow::new(
        query.start.unwrap_or(dataset.first().date),
        query.end.unwrap_or(dataset.last().date),
    )?;

    // A window with no overlap is passed through untouched and renders empty.
    let window = dataset.clamp(&requested).unwrap_or(requested);
    Ok(Json(state.dashboard.on_window_changed(&window)))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
