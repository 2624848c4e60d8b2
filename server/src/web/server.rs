use crate::config::Config;
use crate::constants::{http, limits};
use crate::store::DataStore;
use crate::web::{handlers, middleware::cors_headers, AppState};
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_web_server(config: Arc<Config>, store: Arc<DataStore>) -> Result<()> {
    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.web_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::static_not_found.into_service());

    Router::new()
        // === SCHEDULE DATA ===
        .route(
            http::DATA_ROUTE,
            get(handlers::get_data)
                .post(handlers::post_data)
                .fallback(handlers::api_not_found),
        )
        .route("/api/", any(handlers::api_not_found))
        .route("/api/{*rest}", any(handlers::api_not_found))
        // === STATIC FILES ===
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(limits::MAX_BODY_BYTES))
        .layer(middleware::from_fn(cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Interrupt received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
