//! On-demand health report for the `/healthcheck` command.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Monitor;
use crate::status::Tier;

/// Read-only view of the monitor, assembled per query.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub world: String,
    pub tier: Tier,
    pub available: bool,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub uptime_secs: u64,
    pub interval_minutes: u64,
}

pub async fn report(monitor: &Monitor, world: &str, interval_minutes: u64) -> HealthReport {
    let state = monitor.snapshot().await;
    HealthReport {
        world: world.to_string(),
        tier: state.last_tier,
        available: state.last_tier.is_available(),
        last_checked_at: state.last_checked_at,
        uptime_secs: monitor.uptime().as_secs(),
        interval_minutes,
    }
}

impl HealthReport {
    /// Human-readable uptime, e.g. "2h 05m 11s".
    pub fn uptime_human(&self) -> String {
        let secs = self.uptime_secs;
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        let s = secs % 60;
        if h > 0 {
            format!("{}h {:02}m {:02}s", h, m, s)
        } else if m > 0 {
            format!("{}m {:02}s", m, s)
        } else {
            format!("{}s", s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_before_any_tick() {
        let monitor = Monitor::new();
        let report = report(&monitor, "Behemoth", 5).await;
        assert_eq!(report.tier, Tier::Unknown);
        assert!(!report.available);
        assert_eq!(report.last_checked_at, None);
        assert_eq!(report.interval_minutes, 5);
    }

    #[tokio::test]
    async fn test_report_after_successful_check() {
        let monitor = Monitor::new();
        let now = Utc::now();
        monitor.record_check(Some(Tier::Preferred), now).await;

        let report = report(&monitor, "Behemoth", 5).await;
        assert_eq!(report.tier, Tier::Preferred);
        assert!(report.available);
        assert_eq!(report.last_checked_at, Some(now));
    }

    #[test]
    fn test_uptime_human() {
        let mut report = HealthReport {
            world: "Behemoth".to_string(),
            tier: Tier::Unknown,
            available: false,
            last_checked_at: None,
            uptime_secs: 42,
            interval_minutes: 5,
        };
        assert_eq!(report.uptime_human(), "42s");
        report.uptime_secs = 125;
        assert_eq!(report.uptime_human(), "2m 05s");
        report.uptime_secs = 7511;
        assert_eq!(report.uptime_human(), "2h 05m 11s");
    }
}
