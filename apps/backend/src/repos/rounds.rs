//! Round repository functions for domain layer.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Round domain model: one timed blind level within a match. Blind values are
/// frozen at creation and never recomputed from the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub match_id: i64,
    pub number: i32,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub duration_secs: i64,
    pub started_at: OffsetDateTime,
    pub time_in_pause: i64,
    pub ended_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Round {
    /// A round has ended strictly when `ended_at` is set.
    pub fn has_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            number: model.number,
            small_blind: model.small_blind,
            big_blind: model.big_blind,
            duration_secs: model.duration_secs,
            started_at: model.started_at,
            time_in_pause: model.time_in_pause,
            ended_at: model.ended_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// Free functions (generic) for round operations

pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let records = rounds_adapter::find_all_by_match(conn, match_id).await?;
    Ok(records.into_iter().map(Round::from).collect())
}

/// Create a new round with values frozen from the blind structure.
pub async fn create_round(
    txn: &DatabaseTransaction,
    match_id: i64,
    number: i32,
    small_blind: Decimal,
    big_blind: Decimal,
    duration_secs: i64,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        match_id,
        number,
        small_blind,
        big_blind,
        duration_secs,
        now,
    };
    let record = rounds_adapter::create_round(txn, dto).await?;
    Ok(Round::from(record))
}

/// Add a completed pause span to the round's accumulator; persists
/// immediately. Only `resume()` calls this.
pub async fn add_time_in_pause(
    txn: &DatabaseTransaction,
    round_id: i64,
    seconds: i64,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let record = rounds_adapter::add_time_in_pause(txn, round_id, seconds, now).await?;
    Ok(Round::from(record))
}

/// End a round. One-shot: a second end fails with `AlreadyEnded`.
pub async fn end_round(
    txn: &DatabaseTransaction,
    round_id: i64,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let existing = rounds_adapter::find_by_id(txn, round_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })?;

    if existing.ended_at.is_some() {
        return Err(DomainError::already_ended(format!(
            "Round {} of match {} is already ended",
            existing.number, existing.match_id
        )));
    }

    let record = rounds_adapter::mark_ended(txn, round_id, now).await?;
    Ok(Round::from(record))
}
