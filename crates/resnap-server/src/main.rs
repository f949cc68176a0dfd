mod api;
mod middleware;

use std::sync::Arc;

use resnap_core::AppConfig;
use resnap_ebay::EbayClient;
use resnap_vision::VisionClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

/// Characters of the startup token that are safe to log.
const TOKEN_PREVIEW_CHARS: usize = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = resnap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = build_state(&config)?;
    if let Some(ebay) = state.ebay.as_ref() {
        probe_marketplace(ebay).await;
    } else {
        tracing::warn!("EBAY_CLIENT_ID/EBAY_CLIENT_SECRET not set; /lookup will return 503");
    }
    if state.vision.is_none() {
        tracing::warn!("Azure OpenAI settings not set; /caption will answer \"unknown item\"");
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "resnap-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let ebay = config
        .ebay
        .as_ref()
        .map(|creds| {
            EbayClient::with_base_urls(
                &creds.client_id,
                &creds.client_secret,
                config.provider_timeout_secs,
                &config.ebay_api_base_url,
                &config.ebay_identity_base_url,
            )
            .map(|client| Arc::new(client.with_search_limit(config.ebay_search_limit)))
        })
        .transpose()?;

    let vision = config
        .vision
        .as_ref()
        .map(|azure| {
            VisionClient::new(
                &azure.endpoint,
                &azure.api_key,
                &azure.deployment,
                &azure.api_version,
                config.provider_timeout_secs,
            )
            .map(Arc::new)
        })
        .transpose()?;

    Ok(AppState { ebay, vision })
}

/// Fetches one token at startup so bad credentials show up in the log early.
/// Failure is logged and the server still starts.
async fn probe_marketplace(ebay: &EbayClient) {
    match ebay.access_token().await {
        Ok(token) => {
            let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
            tracing::info!(token_preview = %preview, "eBay access token acquired");
        }
        Err(e) => tracing::error!(error = %e, "failed to acquire eBay access token"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
