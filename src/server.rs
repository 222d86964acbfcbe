use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    catalog::CatalogCache,
    config::{Config, WebConfig},
    feedback::FeedbackStore,
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Start the plan advisor server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Loads the plan catalog, tolerating a missing file
/// 3. Sets up signal handlers for graceful shutdown and catalog reload
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_route = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        let handle = Arc::new(metrics::init_metrics()?);
        Some((config.metrics.endpoint.clone(), handle))
    } else {
        None
    };

    let catalog = Arc::new(CatalogCache::new(
        config.catalog.path.clone(),
        config.catalog.refresh_interval(),
    ));

    // Startup continues without a catalog; the first request retries the load
    match catalog.reload().await {
        Ok(loaded) => info!(
            "Loaded {} plans from {} ({} rows skipped)",
            loaded.len(),
            config.catalog.path.display(),
            loaded.summary().skipped
        ),
        Err(e) => warn!("Starting without a plan catalog: {}", e),
    }

    let feedback = Arc::new(FeedbackStore::new(config.feedback.path.clone()));

    let (shutdown_tx, signal_handle) = setup_signal_handlers(catalog.clone());
    let mut shutdown_rx = shutdown_tx.subscribe();

    let state = AppState::new(catalog, feedback);
    let app = create_router(state, &config.web, metrics_route);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting plan advisor on {}", addr);
    info!(
        "Catalog: {} (refresh every {}s), static files: {}",
        config.catalog.path.display(),
        config.catalog.refresh_interval_seconds,
        config.web.static_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` carries the scrape path and recorder handle; `None` leaves the
/// scrape endpoint unmounted.
pub fn create_router(
    state: AppState,
    web: &WebConfig,
    metrics: Option<(String, Arc<PrometheusHandle>)>,
) -> Router {
    let api_routes = Router::new()
        .route("/api/plans/featured", get(handlers::plans::featured_plans))
        .route("/api/plans/prepaid", get(handlers::plans::prepaid_plans))
        .route("/api/plans/all", get(handlers::plans::all_plans))
        .route(
            "/api/plans/reload",
            get(handlers::plans::reload_plans).post(handlers::plans::reload_plans),
        )
        .route("/chat", post(handlers::chat::handle_chat))
        .route("/select_plan", post(handlers::select::select_plan))
        .route("/contact-feedback", post(handlers::feedback::submit_feedback))
        .route("/feedback-submit", post(handlers::feedback::submit_feedback))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state);

    let mut app = Router::new().merge(api_routes);

    if let Some((endpoint, handle)) = metrics {
        let metrics_routes = Router::new()
            .route(&endpoint, get(handlers::metrics_handler::metrics))
            .with_state(handle);
        app = app.merge(metrics_routes);
    }

    app.route_service("/", ServeFile::new(web.static_dir.join(&web.index_file)))
        .fallback_service(ServeDir::new(&web.static_dir))
        // Requests are small JSON bodies and form posts
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
