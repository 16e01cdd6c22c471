use std::sync::Arc;

use anyhow::{Context, Result};
use bazaar_api::{AppState, ItemStore, router::router};
use bazaar_auth::{AuthService, TokenConfig};
use bazaar_core::AppConfig;

mod seed;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting bazaar server");

    let (config, overrides) = AppConfig::load_with_env().context("Failed to load configuration")?;
    for key in &overrides {
        tracing::info!("config override from environment: {key}");
    }

    let store = seed::build_credential_store(&config.users)?;
    tracing::info!("credential store ready ({} users)", store.len());

    let token_config = TokenConfig::new(
        config.auth.secret_key.clone(),
        &config.auth.algorithm,
        config.auth.token_ttl_minutes,
    )
    .context("Invalid auth configuration")?;

    let state = Arc::new(AppState::new(
        AuthService::new(store, token_config),
        ItemStore::with_demo_items(),
    ));

    let app = router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
