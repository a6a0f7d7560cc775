//! Pause-on-expiry policy.
//!
//! Natural round expiry does not auto-advance: when a round ends, the match
//! pauses and waits for an explicit `resume()`, which is what moves play to
//! the next round.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::errors::domain::DomainError;
use crate::events::{MatchNotification, MatchObserver};
use crate::services::MatchFlowService;

pub struct AutoPause {
    service: Arc<MatchFlowService>,
}

impl AutoPause {
    pub fn new(service: Arc<MatchFlowService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MatchObserver for AutoPause {
    async fn on_notification(&self, notification: &MatchNotification) {
        let MatchNotification::RoundEnded { match_id, number } = notification else {
            return;
        };

        match self.service.pause(*match_id).await {
            Ok(_) => {
                info!(match_id, round = number, "Match paused awaiting next round");
            }
            Err(e) if matches!(e.as_domain(), Some(DomainError::InvalidTransition(_))) => {
                // Someone else already paused or ended the match.
                debug!(match_id, round = number, "Auto-pause skipped: {e}");
            }
            Err(e) => {
                warn!(match_id, round = number, error = %e, "Auto-pause failed");
            }
        }
    }
}
