//! Property tests for derived time values (pure domain, no DB).
//!
//! Properties tested:
//! - active play plus pause time always accounts for the full wall clock
//! - the next-round deadline is the start plus scheduled play plus pauses
//! - pause accounting only draws from rounds unless the match is paused now

use proptest::prelude::*;
use rust_decimal::Decimal;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::domain::timing::{elapsed_time, next_round_starts_at, time_in_pause, total_time};
use crate::entities::matches::MatchStatus;
use crate::repos::matches::Match;
use crate::repos::rounds::Round;

const T0: OffsetDateTime = datetime!(2025-08-01 12:00:00 UTC);

fn running_match() -> Match {
    Match {
        id: 1,
        name: "prop-match".into(),
        status: MatchStatus::Running,
        started_at: Some(T0),
        paused_at: None,
        ended_at: None,
        rounds_total: 12,
        created_at: T0,
        updated_at: T0,
    }
}

fn rounds_from(specs: &[(i64, i64)]) -> Vec<Round> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (duration_secs, pause))| Round {
            id: i as i64 + 1,
            match_id: 1,
            number: i as i32 + 1,
            small_blind: Decimal::new(25, 2),
            big_blind: Decimal::new(50, 2),
            duration_secs: *duration_secs,
            started_at: T0,
            time_in_pause: *pause,
            ended_at: None,
            created_at: T0,
            updated_at: T0,
        })
        .collect()
}

proptest! {
    /// Property: elapsed + paused always equals total wall-clock time once
    /// the match has started, whatever the pause history looks like.
    #[test]
    fn prop_elapsed_plus_pause_is_total(
        specs in prop::collection::vec((1i64..3600, 0i64..3600), 1..8),
        observed_after in 0i64..100_000,
        pause_span in 0i64..3600,
        currently_paused in any::<bool>(),
    ) {
        let mut record = running_match();
        let now = T0 + Duration::seconds(observed_after);
        if currently_paused {
            record.status = MatchStatus::Paused;
            record.paused_at = Some(now - Duration::seconds(pause_span));
        }
        let rounds = rounds_from(&specs);

        prop_assert_eq!(
            elapsed_time(&record, &rounds, now) + time_in_pause(&record, &rounds, now),
            total_time(&record, now)
        );
    }

    /// Property: the deadline is the start time pushed by scheduled play and
    /// by exactly the accumulated pause time.
    #[test]
    fn prop_deadline_shifts_by_pause_time(
        specs in prop::collection::vec((1i64..3600, 0i64..3600), 1..8),
        observed_after in 0i64..100_000,
    ) {
        let record = running_match();
        let now = T0 + Duration::seconds(observed_after);
        let rounds = rounds_from(&specs);

        let scheduled: i64 = rounds.iter().map(|r| r.duration_secs).sum();
        let paused: i64 = rounds.iter().map(|r| r.time_in_pause).sum();

        prop_assert_eq!(
            next_round_starts_at(&record, &rounds, now),
            Some(T0 + Duration::seconds(scheduled + paused))
        );
    }

    /// Property: while running, pause accounting comes from rounds alone.
    #[test]
    fn prop_running_pause_time_is_round_sum(
        specs in prop::collection::vec((1i64..3600, 0i64..3600), 0..8),
        observed_after in 0i64..100_000,
    ) {
        let record = running_match();
        let now = T0 + Duration::seconds(observed_after);
        let rounds = rounds_from(&specs);

        let paused: i64 = rounds.iter().map(|r| r.time_in_pause).sum();
        prop_assert_eq!(time_in_pause(&record, &rounds, now), paused);
    }
}
