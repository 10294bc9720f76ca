// Modules
pub mod ai;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod server;

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai::{completion, ModelRouter, ProviderRouter, Recommender};
use config::AppConfig;
use media::PlexClient;
use server::AppState;

const DEFAULT_LOG_FILTER: &str = "plexmuse=debug,plexmuse_lib=debug,tower_http=info";

/// Install the global tracing subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Wire configuration, clients and the HTTP server together and serve.
///
/// With `env_file` set, configuration comes from that file alone; otherwise
/// from the process environment plus an optional `.env`.
pub async fn run(env_file: Option<PathBuf>) -> anyhow::Result<()> {
    init_tracing();

    let config = match env_file {
        Some(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::from_env().context("failed to load configuration")?,
    };
    info!(
        openai = config.credentials.has_openai(),
        anthropic = config.credentials.has_anthropic(),
        plex = %config.plex_base_url,
        "configuration loaded"
    );

    let http =
        completion::http_client(config.http_timeout).context("failed to create HTTP client")?;

    let backend = Arc::new(ProviderRouter::new(&config.credentials, http.clone()));
    let state = Arc::new(AppState {
        recommender: Recommender::new(backend, ModelRouter::new()),
        library: Arc::new(PlexClient::new(
            config.plex_base_url.clone(),
            config.plex_token.clone(),
            http,
        )),
    });

    server::serve(state, config.port, config.static_dir.clone())
        .await
        .context("server error")
}
