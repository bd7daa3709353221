//! Outbound Discord delivery: status embeds and the role mention rules.

use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::Http;
use serenity::model::id::{ChannelId, RoleId};
use serenity::model::Timestamp;
use std::sync::Arc;
use tracing::info;

use crate::monitor::health::HealthReport;
use crate::monitor::policy::NotificationKind;
use crate::monitor::{Mode, Notifier, StatusUpdate};

const COLOR_AVAILABLE: u32 = 0x00ff00;
const COLOR_UNAVAILABLE: u32 = 0xff0000;
const COLOR_INFO: u32 = 0x3498db;
const EMBED_FOOTER: &str = "FFXIV Server Monitor";

/// Sends status embeds to the configured channel.
pub struct ChannelNotifier {
    http: Arc<Http>,
    channel: ChannelId,
    role: Option<RoleId>,
    mode: Mode,
}

impl ChannelNotifier {
    pub fn new(http: Arc<Http>, channel: ChannelId, role: Option<RoleId>, mode: Mode) -> Self {
        Self {
            http,
            channel,
            role,
            mode,
        }
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(
        &self,
        update: &StatusUpdate,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut message = CreateMessage::new().embed(status_embed(update));
        if should_mention(self.mode, update.available) {
            if let Some(role) = self.role {
                message = message.content(format!("<@&{}>", role.get()));
            }
        }
        self.channel.send_message(&self.http, message).await?;
        info!(world = %update.world, tier = %update.tier, "Status update sent");
        Ok(())
    }
}

/// Role mentions ping on availability in Standard mode and on every message
/// in Dev mode. The two rules are intentionally kept separate.
fn should_mention(mode: Mode, available: bool) -> bool {
    match mode {
        Mode::Dev => true,
        Mode::Standard => available,
    }
}

fn title_for(update: &StatusUpdate) -> String {
    if update.available {
        format!("✅ {} Server - Character Creation Available!", update.world)
    } else {
        format!("❌ {} Server - Character Creation Unavailable", update.world)
    }
}

pub fn status_embed(update: &StatusUpdate) -> CreateEmbed {
    let color = if update.available {
        COLOR_AVAILABLE
    } else {
        COLOR_UNAVAILABLE
    };

    let mut embed = CreateEmbed::new()
        .title(title_for(update))
        .description(format!("Server Status: **{}**", update.tier))
        .colour(color)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(EMBED_FOOTER));

    embed = if update.available {
        embed.field(
            "🎉 Good News!",
            format!("You can now create new characters on {}!", update.world),
            false,
        )
    } else {
        embed.field(
            "Status",
            "Character creation is currently unavailable. The bot will notify when it becomes available.",
            false,
        )
    };

    if update.kind == NotificationKind::Periodic {
        embed = embed.field("Periodic check", "No change since the last check (dev mode).", false);
    }

    embed
}

pub fn startup_embed(world: &str, interval_minutes: u64, mode: Mode) -> CreateEmbed {
    CreateEmbed::new()
        .title("🔭 lodewatch online")
        .description(format!(
            "Monitoring **{}** every {} minute(s) in {} mode.",
            world,
            interval_minutes,
            mode_label(mode)
        ))
        .colour(COLOR_INFO)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(EMBED_FOOTER))
}

pub fn health_embed(report: &HealthReport) -> CreateEmbed {
    let color = if report.available {
        COLOR_AVAILABLE
    } else {
        COLOR_UNAVAILABLE
    };
    let last_checked = report
        .last_checked_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    CreateEmbed::new()
        .title(format!("🩺 {} health", report.world))
        .colour(color)
        .field("Tier", report.tier.to_string(), true)
        .field(
            "Character creation",
            if report.available { "open" } else { "closed" },
            true,
        )
        .field("Last checked", last_checked, true)
        .field("Uptime", report.uptime_human(), true)
        .field(
            "Check interval",
            format!("{} min", report.interval_minutes),
            true,
        )
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(EMBED_FOOTER))
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Standard => "standard",
        Mode::Dev => "dev",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Tier;

    #[test]
    fn test_mention_rules() {
        // Dev mode pings regardless of availability.
        assert!(should_mention(Mode::Dev, true));
        assert!(should_mention(Mode::Dev, false));
        // Standard mode pings only when the world opened up.
        assert!(should_mention(Mode::Standard, true));
        assert!(!should_mention(Mode::Standard, false));
    }

    #[test]
    fn test_titles() {
        let open = StatusUpdate {
            world: "Behemoth".to_string(),
            tier: Tier::Standard,
            available: true,
            kind: NotificationKind::StateChange,
        };
        assert_eq!(
            title_for(&open),
            "✅ Behemoth Server - Character Creation Available!"
        );

        let closed = StatusUpdate {
            tier: Tier::Congested,
            available: false,
            ..open
        };
        assert_eq!(
            title_for(&closed),
            "❌ Behemoth Server - Character Creation Unavailable"
        );
    }
}
