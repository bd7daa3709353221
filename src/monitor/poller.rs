//! The poll loop: fetch, extract, decide, notify, record.
//!
//! Runs one check immediately on start, then on the configured interval
//! until the shutdown signal flips. Every failure past startup is
//! transient; the loop never exits on error.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use super::{policy, Mode, Monitor, Notifier, StatusUpdate};
use crate::status::{StatusSource, Tier, TierExtractor};

pub struct Poller {
    source: Arc<dyn StatusSource>,
    extractor: Arc<dyn TierExtractor>,
    notifier: Arc<dyn Notifier>,
    monitor: Arc<Monitor>,
    world: String,
    mode: Mode,
    interval: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        extractor: Arc<dyn TierExtractor>,
        notifier: Arc<dyn Notifier>,
        monitor: Arc<Monitor>,
        world: String,
        mode: Mode,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            extractor,
            notifier,
            monitor,
            world,
            mode,
            interval,
        }
    }

    /// Run until `shutdown` flips to true or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            world = %self.world,
            interval_secs = self.interval.as_secs(),
            "Status poller starting — initial check..."
        );
        self.tick().await;

        let mut timer = time::interval(self.interval);
        timer.tick().await; // Skip the immediate tick (we already ran)

        loop {
            tokio::select! {
                _ = timer.tick() => self.tick().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown signal received — poller stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One fetch -> extract -> decide -> notify -> record cycle.
    pub async fn tick(&self) {
        debug!(world = %self.world, "Checking world status...");

        let page = match self.source.fetch_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!("Status page fetch failed: {} — retrying next tick", e);
                return;
            }
        };

        let tier = self.extractor.extract(&page, &self.world);
        let now = Utc::now();

        if tier == Tier::Unknown {
            // The page came back but carried nothing recognizable for this
            // world. The check attempt still counts; the last known tier
            // stays as-is.
            warn!(world = %self.world, "No tier found in status page");
            self.monitor.record_check(None, now).await;
            return;
        }

        let prev = self.monitor.snapshot().await.last_tier;
        let decision = policy::decide(prev, tier, self.mode);

        info!(
            world = %self.world,
            tier = %tier,
            prev = %prev,
            notify = decision.should_notify,
            "World status checked"
        );

        if decision.should_notify {
            let update = StatusUpdate {
                world: self.world.clone(),
                tier,
                available: tier.is_available(),
                kind: decision.kind,
            };
            if let Err(e) = self.notifier.notify(&update).await {
                warn!("Failed to deliver status notification: {}", e);
            }
        }

        self.monitor.record_check(Some(tier), now).await;
    }
}
