//! Match lifecycle notifications.
//!
//! Transitions notify an explicit observer list synchronously after the
//! owning transaction has committed; nothing fires on a rolled-back guard
//! failure. Consumers include the round-advance scheduler, the auto-pause
//! policy, and out-of-scope broadcast collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

/// One lifecycle notification. Round variants carry the round number so
/// observers can log and schedule without re-reading the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchNotification {
    MatchStarted { match_id: i64 },
    MatchRunning { match_id: i64 },
    MatchPaused { match_id: i64 },
    MatchEnded { match_id: i64 },
    RoundStarted { match_id: i64, number: i32 },
    RoundEnded { match_id: i64, number: i32 },
}

impl MatchNotification {
    pub fn match_id(&self) -> i64 {
        match self {
            Self::MatchStarted { match_id }
            | Self::MatchRunning { match_id }
            | Self::MatchPaused { match_id }
            | Self::MatchEnded { match_id }
            | Self::RoundStarted { match_id, .. }
            | Self::RoundEnded { match_id, .. } => *match_id,
        }
    }
}

/// An observer of match lifecycle notifications.
#[async_trait]
pub trait MatchObserver: Send + Sync {
    async fn on_notification(&self, notification: &MatchNotification);
}

/// Explicit observer registry.
///
/// Fan-out is best-effort: observers run in subscription order and cannot
/// veto or fail a transition that already committed.
#[derive(Default)]
pub struct EventBus {
    observers: RwLock<Vec<Arc<dyn MatchObserver>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn MatchObserver>) {
        self.observers.write().push(observer);
    }

    pub async fn publish(&self, notification: &MatchNotification) {
        debug!(match_id = notification.match_id(), ?notification, "Publishing notification");

        // Clone the list out so no lock is held across observer awaits.
        let observers: Vec<_> = self.observers.read().clone();
        for observer in observers {
            observer.on_notification(notification).await;
        }
    }

    pub async fn publish_all(&self, notifications: &[MatchNotification]) {
        for notification in notifications {
            self.publish(notification).await;
        }
    }
}
