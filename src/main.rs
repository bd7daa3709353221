//! lodewatch — Discord bot that watches one FFXIV world's population tier
//! on the Lodestone world status page and announces when character
//! creation opens up.
//!
//! One poll loop, one channel, one `/healthcheck` command. Configuration
//! is environment-driven and fatal-if-missing; everything after startup
//! is transient and self-heals on the next tick.

use anyhow::{Context as _, Result};
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

mod config;
mod discord;
mod monitor;
mod status;

use config::Config;
use discord::Handler;
use monitor::Monitor;
use status::extract::TextScanExtractor;
use status::fetch::LodestoneSource;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodewatch=info".into()),
        )
        .with_target(false)
        .init();

    info!("🔭 lodewatch v{}", env!("CARGO_PKG_VERSION"));

    // Fatal before any network activity if required variables are absent.
    let config = Config::from_env().context("Configuration error")?;

    info!(
        world = %config.world,
        interval_minutes = config.interval_minutes,
        dev_mode = config.dev_mode,
        "Configuration loaded"
    );

    let monitor = Arc::new(Monitor::new());
    let source: Arc<dyn status::StatusSource> = Arc::new(
        LodestoneSource::new(&config.status_url).context("Failed to build status page client")?,
    );
    let extractor: Arc<dyn status::TierExtractor> = Arc::new(TextScanExtractor::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
    let handler = Handler::new(
        config.clone(),
        Arc::clone(&monitor),
        source,
        extractor,
        shutdown_rx,
    );

    let mut client = Client::builder(&config.token, intents)
        .application_id(serenity::model::id::ApplicationId::new(config.client_id))
        .event_handler(handler)
        .await
        .context("Failed to build Discord client")?;

    // Ctrl-C stops the poller first, then the gateway shards.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutdown requested — stopping poller and gateway");
        let _ = shutdown_tx.send(true);
        shard_manager.shutdown_all().await;
    });

    client.start().await.context("Discord client error")?;
    info!("lodewatch stopped");
    Ok(())
}
