use std::sync::Arc;

use anyhow::Context;
use shareflix_metadata::tmdb::TmdbClient;
use shareflix_resolver::pipeline::StreamResolver;
use shareflix_server::config::AddonConfig;
use shareflix_webshare::client::WebshareClient;
use shareflix_webshare::session::SessionManager;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AddonConfig::from_env().context("invalid configuration")?;
    info!(
        username = %config.credentials.username,
        regions = ?config.title_regions,
        search_limit = config.resolver.search.limit,
        auth_retry = ?config.resolver.auth_retry,
        "configuration loaded"
    );

    let tmdb = TmdbClient::new(config.tmdb_api_key.clone())
        .regions(config.title_regions.clone())
        .language(config.tmdb_language.clone());

    // One backend client and one session for the whole process.
    let webshare = Arc::new(WebshareClient::new());
    let sessions = Arc::new(SessionManager::new(
        webshare.clone(),
        config.credentials.clone(),
    ));
    info!(device_id = %sessions.device_id(), "session manager ready");

    let resolver = StreamResolver::new(Arc::new(tmdb), webshare, sessions, config.resolver);

    let app_state = shareflix_server::state::AppState {
        resolver: Arc::new(resolver),
        resolve_timeout: config.resolve_timeout,
    };

    let app = shareflix_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "addon listening; manifest at /manifest.json");

    axum::serve(listener, app).await?;
    Ok(())
}
