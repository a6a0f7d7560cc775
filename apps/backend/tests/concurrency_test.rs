mod common;

use std::sync::Arc;

use backend::errors::domain::DomainError;
use backend::{ManualClock, RegistrationService};
use backend::entities::matches::MatchStatus;
use serial_test::serial;
use time::Duration;

use common::{flow_service, match_with_two_players, test_db, two_level_structure, T0};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn concurrent_pauses_let_exactly_one_win() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock.clone());

    let match_id = match_with_two_players(&flow, &registrations, "pause-race").await;
    flow.start(match_id).await.expect("start");
    clock.advance(Duration::seconds(5));

    let first = {
        let flow = Arc::clone(&flow);
        tokio::spawn(async move { flow.pause(match_id).await })
    };
    let second = {
        let flow = Arc::clone(&flow);
        tokio::spawn(async move { flow.pause(match_id).await })
    };

    let outcomes = [
        first.await.expect("join"),
        second.await.expect("join"),
    ];

    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one pause must win the race");

    // The loser re-validated against committed state and saw Paused.
    let loss = outcomes
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one loser");
    assert!(matches!(
        loss.as_domain(),
        Some(DomainError::InvalidTransition(_))
    ));

    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Paused);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn concurrent_round_end_triggers_end_the_round_once() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock.clone());

    let match_id = match_with_two_players(&flow, &registrations, "end-race").await;
    flow.start(match_id).await.expect("start");
    clock.advance(Duration::seconds(61));

    let mut triggers = Vec::new();
    for _ in 0..4 {
        let flow = Arc::clone(&flow);
        triggers.push(tokio::spawn(
            async move { flow.try_end_current_round(match_id).await },
        ));
    }

    let mut ended = 0;
    for trigger in triggers {
        if trigger.await.expect("join").expect("no hard failure") {
            ended += 1;
        }
    }
    assert_eq!(ended, 1, "the round must end exactly once");

    // The round is ended; every further trigger is a no-op.
    let details = flow.get_match(match_id).await.expect("details");
    assert!(details.current_round.is_none());
    assert!(!flow.try_end_current_round(match_id).await.expect("try"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn resume_racing_a_round_end_trigger_serializes() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock.clone());

    let match_id = match_with_two_players(&flow, &registrations, "resume-race").await;
    flow.start(match_id).await.expect("start");

    // Pause mid-round, then let the deadline pass on the wall clock. The
    // deadline also moves by the pause span, so after resume the round still
    // has 50 active seconds left and the stale trigger must no-op.
    clock.advance(Duration::seconds(10));
    flow.pause(match_id).await.expect("pause");
    clock.advance(Duration::seconds(120));

    let resume = {
        let flow = Arc::clone(&flow);
        tokio::spawn(async move { flow.resume(match_id).await })
    };
    let trigger = {
        let flow = Arc::clone(&flow);
        tokio::spawn(async move { flow.try_end_current_round(match_id).await })
    };

    let resumed = resume.await.expect("join");
    let triggered = trigger.await.expect("join").expect("no hard failure");

    assert!(resumed.is_ok(), "resume must succeed");
    assert!(!triggered, "trigger must lose: deadline moved with the pause");

    let details = flow.get_match(match_id).await.expect("details");
    assert_eq!(details.status, MatchStatus::Running);
    let current = details.current_round.expect("round 1 still active");
    assert_eq!(current.number, 1);
    assert_eq!(current.time_in_pause, 120);
}
