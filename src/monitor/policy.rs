//! Decides whether a freshly extracted tier warrants a channel message.

use super::Mode;
use crate::status::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The tier differs from the previous check.
    StateChange,
    /// Dev-mode heartbeat with no underlying change.
    Periodic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDecision {
    pub should_notify: bool,
    pub kind: NotificationKind,
}

/// Notification rules.
///
/// Standard mode fires only on the transition into availability: the
/// audience cares about the moment character creation opens up, and every
/// other transition is churn. Dev mode fires every tick so an operator can
/// verify delivery without waiting for a real transition.
///
/// `next` must be a real tier; extraction misses short-circuit before this
/// point.
pub fn decide(prev: Tier, next: Tier, mode: Mode) -> NotificationDecision {
    let kind = if next != prev {
        NotificationKind::StateChange
    } else {
        NotificationKind::Periodic
    };

    let should_notify = match mode {
        Mode::Dev => true,
        Mode::Standard => next != prev && next.is_available() && !prev.is_available(),
    };

    NotificationDecision {
        should_notify,
        kind,
    }
}
