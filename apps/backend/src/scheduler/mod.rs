//! Background behavior around the match lifecycle: the deferred round-end
//! trigger and the pause-on-expiry policy.

pub mod auto_pause;
pub mod round_advancer;

use std::sync::Arc;

use crate::services::MatchFlowService;

pub use auto_pause::AutoPause;
pub use round_advancer::RoundAdvancer;

/// Subscribe the scheduling trigger and the pause-on-expiry policy to the
/// service's notifications.
pub fn install(service: &Arc<MatchFlowService>) {
    service
        .events()
        .subscribe(Arc::new(RoundAdvancer::new(Arc::clone(service))));
    service
        .events()
        .subscribe(Arc::new(AutoPause::new(Arc::clone(service))));
}
