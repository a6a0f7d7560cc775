mod common;

use std::sync::Arc;
use std::time::Duration;

use backend::entities::matches::MatchStatus;
use backend::{scheduler, RegistrationService, SystemClock};
use serial_test::serial;

use common::{flow_service, match_with_two_players, test_db, two_level_structure};

/// Drives two 2-second blind levels end-to-end on the real clock: rounds
/// expire through the deferred trigger, expiry pauses the match, and each
/// resume is what advances play.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn scheduled_checks_drive_rounds_and_expiry_pauses() {
    let db = test_db().await;
    let clock = Arc::new(SystemClock);
    let flow = flow_service(&db, clock.clone(), two_level_structure(2));
    let registrations = RegistrationService::new(db.clone(), clock);
    scheduler::install(&flow);

    let match_id = match_with_two_players(&flow, &registrations, "turbo").await;
    flow.start(match_id).await.expect("start");

    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Running);
    assert_eq!(details.current_round.as_ref().expect("round 1").number, 1);

    // Round 1 expires after ~2s; give the trigger a generous margin.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Paused, "expiry pauses the match");
    assert!(details.current_round.is_none(), "round 1 has ended");
    assert!(details.ended_at.is_none(), "the match itself continues");

    // Resume advances to round 2 and re-arms the trigger.
    flow.resume(match_id).await.expect("resume");
    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Running);
    assert_eq!(details.current_round.as_ref().expect("round 2").number, 2);

    // Round 2 expires in turn.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Paused);
    assert!(details.current_round.is_none());

    // The final resume exhausts the structure and completes the match.
    flow.resume(match_id).await.expect("final resume");
    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Ended);
    assert!(details.ended_at.is_some());
    assert!(details.current_round.is_none());

    // With the match ended, stray triggers stay no-ops.
    assert!(!flow.try_end_current_round(match_id).await.expect("try"));
}
