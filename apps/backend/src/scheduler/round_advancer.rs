//! Deferred round-end checks.
//!
//! Whenever a match (re-)enters Running or a round starts, a background task
//! is scheduled for the round's deadline. The deadline is read from a fresh
//! snapshot at scheduling time, and the guard is re-checked when the task
//! fires, so a check that was overtaken by a pause, a manual end, or a
//! concurrent trigger simply drops out; stale tasks need no cancellation
//! beyond that re-check.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::events::{MatchNotification, MatchObserver};
use crate::services::MatchFlowService;

/// Fired this long after the deadline, which the guard requires to have
/// strictly passed.
const DEADLINE_GRACE_MS: u64 = 25;

/// Scheduling trigger that asks the match to end its current round once the
/// round's allotted time (pauses included) has fully elapsed.
pub struct RoundAdvancer {
    service: Arc<MatchFlowService>,
}

impl RoundAdvancer {
    pub fn new(service: Arc<MatchFlowService>) -> Self {
        Self { service }
    }

    async fn schedule_check(&self, match_id: i64) {
        let details = match self.service.get_match(match_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(match_id, error = %e, "Cannot snapshot match for round scheduling");
                return;
            }
        };

        // Nothing left to schedule for an ended match, and a round that
        // already ended is awaiting an explicit resume.
        if details.ended_at.is_some() {
            return;
        }
        let Some(current) = &details.current_round else {
            return;
        };
        let Some(deadline) = details.next_round_starts_at else {
            return;
        };

        let now = self.service.clock().now();
        let wait_ms = (deadline - now).whole_milliseconds().max(0) as u64 + DEADLINE_GRACE_MS;
        let round_number = current.number;
        debug!(match_id, round = round_number, wait_ms, "Scheduling round-end check");

        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;

            match service.try_end_current_round(match_id).await {
                Ok(true) => {
                    debug!(match_id, round = round_number, "Scheduled check ended the round")
                }
                Ok(false) => {
                    // Paused meanwhile, ended by a concurrent trigger, or the
                    // deadline moved: all expected outcomes.
                    debug!(match_id, round = round_number, "Scheduled check was a no-op")
                }
                Err(e) => {
                    warn!(match_id, round = round_number, error = %e, "Scheduled round-end check failed")
                }
            }
        });
    }
}

#[async_trait]
impl MatchObserver for RoundAdvancer {
    async fn on_notification(&self, notification: &MatchNotification) {
        match notification {
            MatchNotification::MatchRunning { match_id }
            | MatchNotification::RoundStarted { match_id, .. } => {
                self.schedule_check(*match_id).await;
            }
            _ => {}
        }
    }
}
