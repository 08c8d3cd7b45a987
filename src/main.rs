use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use nft_verifier::api;
use nft_verifier::config::Config;
use nft_verifier::gateway::NodeClient;
use nft_verifier::registry::ScammerRegistry;
use nft_verifier::verifier::Verifier;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=debug for raw NFT payloads,
    // LOG_FORMAT=json for machine-readable output)
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::info!("NFT Verifier starting");

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path)?;
    tracing::info!(
        node = %config.node.api_url,
        transactions_limit = config.node.transactions_limit,
        "Configuration loaded from {}",
        config_path
    );

    // The registry is a startup snapshot, shared read-only by every request
    let registry = Arc::new(ScammerRegistry::load(&config.registry));
    let node = Arc::new(NodeClient::new(&config.node.api_url)?);
    let verifier = Verifier::new(node, registry, config.node.transactions_limit);

    let shutdown = CancellationToken::new();

    let mut server = {
        let shutdown = shutdown.clone();
        let api_config = config.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api::serve(verifier, &api_config, shutdown).await {
                tracing::error!(error = %e, "API server failed");
            }
        })
    };

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutdown signal received, stopping API server...");
        }
        _ = &mut server => {
            tracing::warn!("API server exited");
            return Ok(());
        }
    }

    shutdown.cancel();
    let _ = server.await;

    tracing::info!("NFT Verifier stopped");
    Ok(())
}
