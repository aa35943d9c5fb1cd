use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    pipeline::ProductAnalyzer,
    providers::completion::CompletionClient,
    store::ProductStore,
};

/// Start the HTTP server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Connects the product store and runs migrations
/// 3. Builds the completion client and analyzer shared by all requests
/// 4. Serves until SIGINT/SIGTERM, then drains connections
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let store = ProductStore::connect(&config.database).await?;
    let client = Arc::new(CompletionClient::new(&config.llm));
    let analyzer = Arc::new(ProductAnalyzer::new(client, config.llm.model.clone()));

    let app_state = AppState { analyzer, store };
    let app = create_router(app_state, metrics_handle, config.server.max_upload_bytes);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!(
        %addr,
        model = %config.llm.model,
        endpoint = %config.llm.base_url,
        "Starting product-lens server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
    max_upload_bytes: usize,
) -> Router {
    let api_routes = Router::new()
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/new", post(handlers::products::create_product))
        .route(
            "/api/products/analyze",
            post(handlers::analyze::analyze_product),
        )
        // Path used by earlier clients
        .route(
            "/api/products/analize",
            post(handlers::analyze::analyze_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(app_state);

    let router = match metrics_handle {
        Some(handle) => Router::new()
            .route("/metrics", get(handlers::metrics_handler::metrics))
            .with_state(handle)
            .merge(api_routes),
        None => api_routes,
    };

    router
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, initiating graceful shutdown"),
        _ = terminate => info!("SIGTERM received, initiating graceful shutdown"),
    }
}
