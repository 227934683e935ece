use axum::{routing::get, Router};
use dashboard::Dashboard;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The dashboard snapshot is immutable, so handlers read it without locking.
pub struct AppState {
    pub dashboard: Dashboard,
    /// Heading shown on the dashboard page.
    pub title: String,
}

/// Builds the application routes around a shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([axum::http::Method::GET])
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/span", get(handlers::get_span))
        .route("/api/charts", get(handlers::get_charts))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the dashboard until the process is stopped.
///
/// Tracing is initialized by the binary before this is called.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    tracing::info!("Registering routes:");
    tracing::info!("  GET /");
    tracing::info!("  GET /api/health");
    tracing::info!("  GET /api/summary");
    tracing::info!("  GET /api/span");
    tracing::info!("  GET /api/charts?start=YYYY-MM-DD&end=YYYY-MM-DD");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
