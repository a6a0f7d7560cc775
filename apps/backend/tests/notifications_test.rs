mod common;

use std::sync::Arc;

use backend::{MatchNotification, MatchObserver, RegistrationService};
use backend::ManualClock;
use parking_lot::Mutex;
use serial_test::serial;
use time::Duration;

use common::{flow_service, match_with_two_players, test_db, two_level_structure, T0};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<MatchNotification>>,
}

#[async_trait::async_trait]
impl MatchObserver for Recorder {
    async fn on_notification(&self, notification: &MatchNotification) {
        self.seen.lock().push(notification.clone());
    }
}

/// Observers hear about every committed transition, in order, and nothing
/// about rolled-back attempts.
#[tokio::test]
#[serial]
async fn lifecycle_notifications_follow_committed_transitions() {
    let db = test_db().await;
    let clock = Arc::new(ManualClock::new(T0));
    let flow = flow_service(&db, clock.clone(), two_level_structure(60));
    let registrations = RegistrationService::new(db.clone(), clock.clone());

    let recorder = Arc::new(Recorder::default());
    flow.events().subscribe(recorder.clone());

    let match_id = match_with_two_players(&flow, &registrations, "observed").await;

    // A rejected transition publishes nothing.
    flow.pause(match_id).await.expect_err("not running yet");
    assert!(recorder.seen.lock().is_empty());

    flow.start(match_id).await.expect("start");

    clock.advance(Duration::seconds(61));
    flow.end_current_round(match_id).await.expect("end round 1");
    flow.start_next_round(match_id).await.expect("round 2");

    clock.advance(Duration::seconds(9));
    flow.pause(match_id).await.expect("pause");
    clock.advance(Duration::seconds(30));
    flow.resume(match_id).await.expect("resume");

    // Round 2 deadline: T0 + (60 + 60) + 30s of pause = T0+150.
    clock.advance(Duration::seconds(51));
    flow.end_current_round(match_id).await.expect("end round 2");
    flow.start_next_round(match_id).await.expect("complete");

    let seen = recorder.seen.lock().clone();
    assert_eq!(
        seen,
        vec![
            MatchNotification::MatchStarted { match_id },
            MatchNotification::RoundStarted {
                match_id,
                number: 1
            },
            MatchNotification::MatchRunning { match_id },
            MatchNotification::RoundEnded {
                match_id,
                number: 1
            },
            MatchNotification::RoundStarted {
                match_id,
                number: 2
            },
            MatchNotification::MatchPaused { match_id },
            MatchNotification::MatchRunning { match_id },
            MatchNotification::RoundEnded {
                match_id,
                number: 2
            },
            MatchNotification::MatchEnded { match_id },
        ]
    );
}
