//! Read-only match views with computed fields, consumed by the external
//! HTTP/CLI layer.

use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use super::MatchFlowService;
use crate::db::with_txn;
use crate::domain::blinds::BlindLevelSummary;
use crate::domain::timing;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::repos::matches::{self, Match};
use crate::repos::rounds::{self, Round};

/// The active round as exposed on the match detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentRoundView {
    pub number: i32,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub duration_secs: i64,
    pub started_at: OffsetDateTime,
    pub time_in_pause: i64,
}

impl From<&Round> for CurrentRoundView {
    fn from(round: &Round) -> Self {
        Self {
            number: round.number,
            small_blind: round.small_blind,
            big_blind: round.big_blind,
            duration_secs: round.duration_secs,
            started_at: round.started_at,
            time_in_pause: round.time_in_pause,
        }
    }
}

/// Snapshot of a match with its derived time values, all computed against the
/// same `now` so the fields are mutually consistent.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetails {
    pub id: i64,
    pub name: String,
    pub status: MatchStatus,
    pub started_at: Option<OffsetDateTime>,
    pub paused_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub rounds_total: i32,
    pub is_paused: bool,
    pub elapsed_time: i64,
    pub time_in_pause: i64,
    pub total_time: i64,
    pub next_round_starts_at: Option<OffsetDateTime>,
    pub current_round: Option<CurrentRoundView>,
    pub blind_structure: Vec<BlindLevelSummary>,
}

impl MatchFlowService {
    /// All matches ordered by id.
    pub async fn list_matches(&self) -> Result<Vec<Match>, AppError> {
        with_txn(self.db(), |txn| {
            Box::pin(async move { Ok(matches::list_all(txn).await?) })
        })
        .await
    }

    /// One match with its computed fields.
    pub async fn get_match(&self, match_id: i64) -> Result<MatchDetails, AppError> {
        let (record, round_list) = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let record = matches::require_match(txn, match_id).await?;
                let round_list = rounds::find_all_by_match(txn, match_id).await?;
                Ok((record, round_list))
            })
        })
        .await?;

        let now = self.clock().now();
        Ok(self.build_details(record, &round_list, now))
    }

    /// One match looked up by its unique name.
    pub async fn get_match_by_name(&self, name: &str) -> Result<Option<MatchDetails>, AppError> {
        let name = name.to_string();
        let loaded = with_txn(self.db(), |txn| {
            Box::pin(async move {
                let Some(record) = matches::find_by_name(txn, &name).await? else {
                    return Ok(None);
                };
                let round_list = rounds::find_all_by_match(txn, record.id).await?;
                Ok(Some((record, round_list)))
            })
        })
        .await?;

        let now = self.clock().now();
        Ok(loaded.map(|(record, round_list)| self.build_details(record, &round_list, now)))
    }

    fn build_details(&self, record: Match, round_list: &[Round], now: OffsetDateTime) -> MatchDetails {
        MatchDetails {
            is_paused: record.is_paused(),
            elapsed_time: timing::elapsed_time(&record, round_list, now),
            time_in_pause: timing::time_in_pause(&record, round_list, now),
            total_time: timing::total_time(&record, now),
            next_round_starts_at: timing::next_round_starts_at(&record, round_list, now),
            current_round: timing::current_round(&record, round_list).map(CurrentRoundView::from),
            blind_structure: self.structure().summary(),
            id: record.id,
            name: record.name,
            status: record.status,
            started_at: record.started_at,
            paused_at: record.paused_at,
            ended_at: record.ended_at,
            rounds_total: record.rounds_total,
        }
    }
}
