//! State transitions of the match lifecycle.
//!
//! Locking discipline, applied by every mutating operation here:
//! 1. begin an exclusive transaction (`with_txn`),
//! 2. re-fetch the match row under an exclusive row lock,
//! 3. re-validate the guard against that freshly locked state,
//! 4. apply the mutation and commit,
//! 5. notify observers with the post-commit facts.
//!
//! Rounds are only ever written while their match row is held, so reading
//! them without their own lock inside the same transaction is safe.

use time::OffsetDateTime;
use tracing::{debug, info};

use super::MatchFlowService;
use crate::db::with_txn;
use crate::domain::{timing, BlindStructure};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::events::MatchNotification;
use crate::repos::buy_ins;
use crate::repos::matches::{self, Match};
use crate::repos::rounds::{self, Round};

/// Minimum number of registered players before a match may start.
const MIN_PLAYERS: u64 = 2;

/// Outcome of a guarded round advance.
enum NextRound {
    /// A new round was appended.
    Started(Round),
    /// The blind structure is exhausted; the match completes instead.
    Exhausted,
}

impl MatchFlowService {
    /// Create a match in Created status with no rounds. `rounds_total` is
    /// fixed to the structure length for the lifetime of the match.
    pub async fn create_match(&self, name: &str) -> Result<Match, AppError> {
        let rounds_total = self.structure().len() as i32;
        let clock = self.clock().clone();
        let name = name.to_string();

        let record = with_txn(self.db(), |txn| {
            let name = name.clone();
            Box::pin(async move {
                let now = clock.now();
                Ok(matches::create_match(txn, &name, rounds_total, now).await?)
            })
        })
        .await?;

        info!(match_id = record.id, name, "Match created");
        Ok(record)
    }

    /// Created -> Running. Requires at least two registered players; creates
    /// round #1 from the first blind level in the same transaction.
    pub async fn start(&self, match_id: i64) -> Result<Match, AppError> {
        let clock = self.clock().clone();
        let structure = self.structure().clone();
        let (record, notifications) = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_for_update(txn, match_id).await?;

                if !record.is_created() {
                    return Err(DomainError::invalid_transition(format!(
                        "Match {match_id} was already started"
                    ))
                    .into());
                }

                let players = buy_ins::count_by_match(txn, match_id).await?;
                if players < MIN_PLAYERS {
                    return Err(DomainError::insufficient_players(format!(
                        "Match {match_id} can only start with {MIN_PLAYERS} or more players, has {players}"
                    ))
                    .into());
                }

                let record = matches::mark_started(txn, match_id, now).await?;
                let round = match append_round(&structure, txn, &record, &[], now).await? {
                    NextRound::Started(round) => round,
                    NextRound::Exhausted => {
                        return Err(AppError::internal("blind structure has no first level"))
                    }
                };

                Ok((
                    record,
                    vec![
                        MatchNotification::MatchStarted { match_id },
                        MatchNotification::RoundStarted {
                            match_id,
                            number: round.number,
                        },
                        MatchNotification::MatchRunning { match_id },
                    ],
                ))
            })
        })
        .await?;

        info!(match_id, "Match started");
        self.events().publish_all(&notifications).await;
        Ok(record)
    }

    /// Running -> Paused.
    pub async fn pause(&self, match_id: i64) -> Result<Match, AppError> {
        let clock = self.clock().clone();
        let record = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_for_update(txn, match_id).await?;

                if !record.is_running() {
                    return Err(DomainError::invalid_transition(format!(
                        "Match {match_id} can not be paused"
                    ))
                    .into());
                }

                Ok(matches::mark_paused(txn, match_id, now).await?)
            })
        })
        .await?;

        info!(match_id, "Match paused");
        self.events()
            .publish(&MatchNotification::MatchPaused { match_id })
            .await;
        Ok(record)
    }

    /// Paused -> Running.
    ///
    /// Folds the completed pause span into the latest round's accumulator,
    /// then advances to the next round if the current one has ended (the
    /// normal case after the pause-on-expiry policy). Advancing past the
    /// last blind level completes the match instead, and Running is never
    /// re-entered.
    pub async fn resume(&self, match_id: i64) -> Result<Match, AppError> {
        let clock = self.clock().clone();
        let structure = self.structure().clone();
        let (record, notifications) = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_for_update(txn, match_id).await?;

                if !record.is_paused() {
                    return Err(DomainError::invalid_transition(format!(
                        "Match {match_id} can not be resumed"
                    ))
                    .into());
                }

                let mut round_list = rounds::find_all_by_match(txn, match_id).await?;

                // The pause span accrues to the latest round even when that
                // round already ended while awaiting the next one, so the
                // deadline formulas stay aligned with the wall clock.
                let last_round_id = round_list.last().map(|r| r.id);
                if let (Some(paused_at), Some(round_id)) = (record.paused_at, last_round_id) {
                    let span = (now - paused_at).whole_seconds();
                    let updated = rounds::add_time_in_pause(txn, round_id, span, now).await?;
                    let last_slot = round_list
                        .last_mut()
                        .ok_or_else(|| AppError::internal("round list emptied while locked"))?;
                    *last_slot = updated;
                }

                let mut notifications = Vec::new();

                if timing::current_round(&record, &round_list).is_none() {
                    match append_round(&structure, txn, &record, &round_list, now).await? {
                        NextRound::Started(round) => {
                            notifications.push(MatchNotification::RoundStarted {
                                match_id,
                                number: round.number,
                            });
                        }
                        NextRound::Exhausted => {
                            let record = matches::mark_ended(txn, match_id, now).await?;
                            notifications.push(MatchNotification::MatchEnded { match_id });
                            return Ok((record, notifications));
                        }
                    }
                }

                let record = matches::mark_running(txn, match_id, now).await?;
                notifications.push(MatchNotification::MatchRunning { match_id });
                Ok((record, notifications))
            })
        })
        .await?;

        info!(match_id, status = record.status.label(), "Match resumed");
        self.events().publish_all(&notifications).await;
        Ok(record)
    }

    /// Explicitly append the next round, guarded by `can_start_next_round`;
    /// fails with `NotYetTime` while the current round is still active or
    /// the match has ended. Exhausting the blind structure completes the
    /// match instead of creating a round.
    pub async fn start_next_round(&self, match_id: i64) -> Result<Match, AppError> {
        let clock = self.clock().clone();
        let structure = self.structure().clone();
        let (record, notifications) = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_for_update(txn, match_id).await?;
                let round_list = rounds::find_all_by_match(txn, match_id).await?;

                match append_round(&structure, txn, &record, &round_list, now).await? {
                    NextRound::Started(round) => Ok((
                        matches::require_match(txn, match_id).await?,
                        vec![MatchNotification::RoundStarted {
                            match_id,
                            number: round.number,
                        }],
                    )),
                    NextRound::Exhausted => {
                        let record = matches::mark_ended(txn, match_id, now).await?;
                        Ok((record, vec![MatchNotification::MatchEnded { match_id }]))
                    }
                }
            })
        })
        .await?;

        self.events().publish_all(&notifications).await;
        Ok(record)
    }

    /// End the current round, or fail with `NotYetTime` when the guard does
    /// not hold. The round-ended notification drives the scheduling trigger
    /// and the pause-on-expiry policy.
    pub async fn end_current_round(&self, match_id: i64) -> Result<Round, AppError> {
        let clock = self.clock().clone();
        let round = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_for_update(txn, match_id).await?;
                let round_list = rounds::find_all_by_match(txn, match_id).await?;

                if !timing::can_end_current_round(&record, &round_list, now) {
                    return Err(DomainError::not_yet_time(format!(
                        "It's not time to end the current round of match {match_id} yet"
                    ))
                    .into());
                }

                let current = timing::current_round(&record, &round_list)
                    .ok_or_else(|| AppError::internal("guard passed without a current round"))?;

                Ok(rounds::end_round(txn, current.id, now).await?)
            })
        })
        .await?;

        info!(match_id, round = round.number, "Round ended");
        self.events()
            .publish(&MatchNotification::RoundEnded {
                match_id,
                number: round.number,
            })
            .await;
        Ok(round)
    }

    /// Best-effort variant of [`end_current_round`](Self::end_current_round)
    /// for scheduled triggers: a failed guard is an expected outcome, not an
    /// error, and reports `false`.
    ///
    /// The guard is pre-checked under a shared lock so the frequent "not yet
    /// time" case never contends with writers; only a passing pre-check
    /// escalates to the exclusive-lock path, which re-validates and may still
    /// lose the race.
    pub async fn try_end_current_round(&self, match_id: i64) -> Result<bool, AppError> {
        let clock = self.clock().clone();
        let can_end = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_shared(txn, match_id).await?;
                let round_list = rounds::find_all_by_match(txn, match_id).await?;
                Ok(timing::can_end_current_round(&record, &round_list, now))
            })
        })
        .await?;

        if !can_end {
            debug!(match_id, "Round-end check: not yet time, skipping");
            return Ok(false);
        }

        match self.end_current_round(match_id).await {
            Ok(_) => Ok(true),
            Err(AppError::Domain(DomainError::NotYetTime(_)))
            | Err(AppError::Domain(DomainError::AlreadyEnded(_))) => {
                debug!(match_id, "Round-end check lost the race, skipping");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

}

/// Append the round after `round_list` under the caller's row lock.
async fn append_round(
    structure: &BlindStructure,
    txn: &sea_orm::DatabaseTransaction,
    record: &Match,
    round_list: &[Round],
    now: OffsetDateTime,
) -> Result<NextRound, AppError> {
    if !timing::can_start_next_round(record, round_list) {
        return Err(DomainError::not_yet_time(format!(
            "It's not time to go to the next round of match {} yet",
            record.id
        ))
        .into());
    }

    let number = round_list.last().map(|r| r.number).unwrap_or(0) + 1;
    let Some(level) = structure.level(number as usize - 1) else {
        return Ok(NextRound::Exhausted);
    };

    let round = rounds::create_round(
        txn,
        record.id,
        number,
        level.small_blind,
        level.big_blind,
        level.duration_secs,
        now,
    )
    .await?;

    debug!(match_id = record.id, round = round.number, "Round created");
    Ok(NextRound::Started(round))
}
