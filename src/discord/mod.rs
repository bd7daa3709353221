//! Discord gateway wiring: startup announcement, slash command
//! registration, and kicking off the monitor once the bot is connected.

pub mod notify;

use serenity::async_trait;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::{Command, Interaction};
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, RoleId};
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::monitor::{health, poller::Poller, Monitor};
use crate::status::{StatusSource, TierExtractor};
use notify::ChannelNotifier;

pub const HEALTHCHECK_COMMAND: &str = "healthcheck";

pub struct Handler {
    config: Config,
    monitor: Arc<Monitor>,
    source: Arc<dyn StatusSource>,
    extractor: Arc<dyn TierExtractor>,
    shutdown: watch::Receiver<bool>,
    monitoring_started: AtomicBool,
}

impl Handler {
    pub fn new(
        config: Config,
        monitor: Arc<Monitor>,
        source: Arc<dyn StatusSource>,
        extractor: Arc<dyn TierExtractor>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            monitor,
            source,
            extractor,
            shutdown,
            monitoring_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Gateway resumes re-fire ready; the monitor must only start once.
        if self.monitoring_started.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = Command::create_global_command(
            &ctx.http,
            CreateCommand::new(HEALTHCHECK_COMMAND)
                .description("Show the monitor's last known world status"),
        )
        .await
        {
            error!("Failed to register /{} command: {}", HEALTHCHECK_COMMAND, e);
        }

        let channel = ChannelId::new(self.config.channel_id);
        let mode = self.config.mode();

        // The announcement doubles as a delivery probe: if the bot cannot
        // post to the channel, monitoring must not start.
        let announce = channel
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(notify::startup_embed(
                    &self.config.world,
                    self.config.interval_minutes,
                    mode,
                )),
            )
            .await;
        if let Err(e) = announce {
            error!(
                "Failed to announce startup in channel {}: {} — monitoring not started",
                channel, e
            );
            self.monitoring_started.store(false, Ordering::SeqCst);
            return;
        }

        let notifier = Arc::new(ChannelNotifier::new(
            ctx.http.clone(),
            channel,
            self.config.role_id.map(RoleId::new),
            mode,
        ));

        let poller = Poller::new(
            Arc::clone(&self.source),
            Arc::clone(&self.extractor),
            notifier,
            Arc::clone(&self.monitor),
            self.config.world.clone(),
            mode,
            self.config.interval(),
        );
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move { poller.run(shutdown).await });

        info!(
            channel = %channel,
            interval_minutes = self.config.interval_minutes,
            dev_mode = self.config.dev_mode,
            "Monitoring started"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != HEALTHCHECK_COMMAND {
            return;
        }

        let report = health::report(
            &self.monitor,
            &self.config.world,
            self.config.interval_minutes,
        )
        .await;

        if let Ok(json) = serde_json::to_string(&report) {
            tracing::debug!(report = %json, "Health report requested");
        }

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().embed(notify::health_embed(&report)),
        );
        if let Err(e) = command.create_response(&ctx.http, response).await {
            warn!("Failed to reply to /{}: {}", HEALTHCHECK_COMMAND, e);
        }
    }
}
