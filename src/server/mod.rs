// HTTP server - Axum REST API for playlist generation
// Serves the JSON API plus an optional static frontend directory.

pub mod routes;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::ai::Recommender;
use crate::media::MediaLibrary;

/// Shared state for request handlers
pub struct AppState {
    pub recommender: Recommender,
    pub library: Arc<dyn MediaLibrary>,
}

/// Build the application router
pub fn router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    // CORS is wide open, the API carries no credentials of its own
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(HeaderValue::from_static("*"));

    let api = routes::api_routes().with_state(state);

    let app = match static_dir.filter(|dir| dir.exists()) {
        Some(dir) => {
            info!(dir = %dir.display(), "serving static frontend");
            let index = dir.join("index.html");
            api.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index)))
        }
        None => api,
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}

/// Bind and serve until ctrl-c
pub async fn serve(
    state: Arc<AppState>,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<(), std::io::Error> {
    let app = router(state, static_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received, draining connections");
        })
        .await?;

    info!("server stopped");
    Ok(())
}
