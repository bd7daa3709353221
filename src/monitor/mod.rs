//! Monitor state shared between the poll loop and the health query, plus
//! the outbound notification seam.

pub mod health;
pub mod policy;
pub mod poller;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::status::Tier;
use policy::NotificationKind;

/// Notification behavior selected at startup, fixed thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Notify only when the world transitions into availability.
    Standard,
    /// Notify every tick, for verifying end-to-end delivery.
    Dev,
}

/// Point-in-time snapshot of what the poller last saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorState {
    pub last_tier: Tier,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Shared handle over the poller's mutable record.
///
/// The poller is the only writer; the health command reads snapshots.
/// Both fields change together under one write guard, so a reader never
/// sees a tier from one check paired with the timestamp of another.
pub struct Monitor {
    state: RwLock<MonitorState>,
    started_at: Instant,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MonitorState {
                last_tier: Tier::Unknown,
                last_checked_at: None,
            }),
            started_at: Instant::now(),
        }
    }

    pub async fn snapshot(&self) -> MonitorState {
        *self.state.read().await
    }

    /// Record a completed check attempt. `tier` is `None` when extraction
    /// found nothing: the timestamp still advances, the last tier is kept.
    pub async fn record_check(&self, tier: Option<Tier>, at: DateTime<Utc>) {
        let mut state = self.state.write().await;
        if let Some(tier) = tier {
            state.last_tier = tier;
        }
        state.last_checked_at = Some(at);
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

/// One decided-and-approved notification, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub world: String,
    pub tier: Tier,
    pub available: bool,
    pub kind: NotificationKind,
}

/// Outbound delivery seam, implemented by the Discord channel notifier.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        update: &StatusUpdate,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
