//! Derived time values for a match snapshot.
//!
//! All functions are pure over a `(match, rounds, now)` snapshot; services
//! evaluate them against freshly locked rows, never against a stale in-memory
//! instance. Pause time is excluded from elapsed play and pushes every
//! deadline forward by the same amount.

use time::{Duration, OffsetDateTime};

use crate::repos::matches::Match;
use crate::repos::rounds::Round;

/// Total seconds the match has spent paused: the recorded pause time of every
/// round plus the in-progress pause span if the match is currently paused.
pub fn time_in_pause(record: &Match, rounds: &[Round], now: OffsetDateTime) -> i64 {
    let past: i64 = rounds.iter().map(|r| r.time_in_pause).sum();

    let current = match (record.is_paused(), record.paused_at) {
        (true, Some(paused_at)) => (now - paused_at).whole_seconds(),
        _ => 0,
    };

    past + current
}

/// Seconds of active play since the match started; 0 if it never started.
pub fn elapsed_time(record: &Match, rounds: &[Round], now: OffsetDateTime) -> i64 {
    let Some(started_at) = record.started_at else {
        return 0;
    };

    (now - started_at).whole_seconds() - time_in_pause(record, rounds, now)
}

/// Wall-clock seconds since the match started, pauses included.
pub fn total_time(record: &Match, now: OffsetDateTime) -> i64 {
    match record.started_at {
        Some(started_at) => (now - started_at).whole_seconds(),
        None => 0,
    }
}

/// When the current round's allotted time is up and the next round is due.
///
/// `started_at + sum of durations of all rounds created so far + time in
/// pause`. Every pause shifts the deadline forward, so it must be recomputed
/// rather than cached.
pub fn next_round_starts_at(
    record: &Match,
    rounds: &[Round],
    now: OffsetDateTime,
) -> Option<OffsetDateTime> {
    let started_at = record.started_at?;

    let scheduled: i64 = rounds.iter().map(|r| r.duration_secs).sum();
    Some(started_at + Duration::seconds(scheduled + time_in_pause(record, rounds, now)))
}

/// The active round: the one with no `ended_at`, unless the match itself has
/// ended (an ended match has no current round).
pub fn current_round<'a>(record: &Match, rounds: &'a [Round]) -> Option<&'a Round> {
    if record.has_ended() {
        return None;
    }

    rounds.iter().find(|r| !r.has_ended())
}

/// Whether a new round may be appended: the match must not have ended, and
/// there must be no active round (either none exists yet, or the last one has
/// been ended).
pub fn can_start_next_round(record: &Match, rounds: &[Round]) -> bool {
    if record.has_ended() {
        return false;
    }

    current_round(record, rounds).is_none()
}

/// Whether the current round may be ended now.
///
/// False while paused (pause freezes the round clock), after the match has
/// ended, and when no active round exists. Otherwise the round's scheduled
/// deadline, which already accounts for historical pause time, must have
/// strictly passed.
pub fn can_end_current_round(record: &Match, rounds: &[Round], now: OffsetDateTime) -> bool {
    if record.is_paused() || record.has_ended() {
        return false;
    }

    if current_round(record, rounds).is_none() {
        return false;
    }

    match next_round_starts_at(record, rounds, now) {
        Some(deadline) => now > deadline,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::entities::matches::MatchStatus;

    fn match_record(status: MatchStatus) -> Match {
        let t0 = datetime!(2025-08-01 12:00:00 UTC);
        Match {
            id: 1,
            name: "friday-night".into(),
            status,
            started_at: Some(t0),
            paused_at: None,
            ended_at: None,
            rounds_total: 2,
            created_at: t0,
            updated_at: t0,
        }
    }

    fn round(number: i32, duration_secs: i64, time_in_pause: i64, ended: bool) -> Round {
        let t0 = datetime!(2025-08-01 12:00:00 UTC);
        Round {
            id: number as i64,
            match_id: 1,
            number,
            small_blind: Decimal::new(25, 2),
            big_blind: Decimal::new(50, 2),
            duration_secs,
            started_at: t0,
            time_in_pause,
            ended_at: ended.then_some(t0 + Duration::seconds(duration_secs)),
            created_at: t0,
            updated_at: t0,
        }
    }

    #[test]
    fn elapsed_time_is_zero_before_start() {
        let mut record = match_record(MatchStatus::Created);
        record.started_at = None;
        let now = datetime!(2025-08-01 12:05:00 UTC);

        assert!(!record.was_started());
        assert_eq!(elapsed_time(&record, &[], now), 0);
        assert_eq!(total_time(&record, now), 0);
        assert_eq!(next_round_starts_at(&record, &[], now), None);
    }

    #[test]
    fn pause_span_counts_while_paused() {
        // Worked example: start at T0, pause at T0+30, observe at T0+90.
        let mut record = match_record(MatchStatus::Paused);
        record.paused_at = Some(datetime!(2025-08-01 12:00:30 UTC));
        let rounds = vec![round(1, 60, 0, false)];
        let now = datetime!(2025-08-01 12:01:30 UTC);

        assert_eq!(time_in_pause(&record, &rounds, now), 60);
        assert_eq!(elapsed_time(&record, &rounds, now), 30);
        assert_eq!(total_time(&record, now), 90);
    }

    #[test]
    fn recorded_pause_time_shifts_the_deadline() {
        // After the resume at T0+90 the round carries 60s of pause time, so
        // round 1 now ends at T0+120 instead of T0+60.
        let record = match_record(MatchStatus::Running);
        let rounds = vec![round(1, 60, 60, false)];
        let now = datetime!(2025-08-01 12:01:30 UTC);

        assert_eq!(
            next_round_starts_at(&record, &rounds, now),
            Some(datetime!(2025-08-01 12:02:00 UTC))
        );
        assert!(!can_end_current_round(&record, &rounds, now));

        // 31 more wall-clock seconds: deadline strictly passed.
        let later = datetime!(2025-08-01 12:02:01 UTC);
        assert!(can_end_current_round(&record, &rounds, later));
    }

    #[test]
    fn cannot_end_while_paused_even_past_deadline() {
        let mut record = match_record(MatchStatus::Paused);
        record.paused_at = Some(datetime!(2025-08-01 12:02:00 UTC));
        let rounds = vec![round(1, 60, 0, false)];
        let now = datetime!(2025-08-01 12:10:00 UTC);

        assert!(!can_end_current_round(&record, &rounds, now));
    }

    #[test]
    fn current_round_is_the_unended_one() {
        let record = match_record(MatchStatus::Running);
        let rounds = vec![round(1, 60, 0, true), round(2, 60, 0, false)];

        let current = current_round(&record, &rounds).expect("round 2 active");
        assert_eq!(current.number, 2);
    }

    #[test]
    fn ended_match_has_no_current_round() {
        let mut record = match_record(MatchStatus::Ended);
        record.ended_at = Some(datetime!(2025-08-01 13:00:00 UTC));
        let rounds = vec![round(1, 60, 0, true), round(2, 60, 0, true)];

        assert!(current_round(&record, &rounds).is_none());
        assert!(!can_start_next_round(&record, &rounds));
        assert!(!can_end_current_round(
            &record,
            &rounds,
            datetime!(2025-08-01 14:00:00 UTC)
        ));
    }

    #[test]
    fn next_round_may_start_once_current_has_ended() {
        let record = match_record(MatchStatus::Running);

        let active = vec![round(1, 60, 0, false)];
        assert!(!can_start_next_round(&record, &active));

        let ended = vec![round(1, 60, 0, true)];
        assert!(can_start_next_round(&record, &ended));

        // Before any round exists the first round may always start.
        assert!(can_start_next_round(&record, &[]));
    }
}
