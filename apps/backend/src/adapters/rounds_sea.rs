//! SeaORM adapter for the rounds repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::rounds;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// DTO for creating a new round. Blind values are frozen copies from the
/// structure at creation time.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub match_id: i64,
    pub number: i32,
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub duration_secs: i64,
    pub now: OffsetDateTime,
}

/// Find a round by ID
pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// All rounds for a match (ordered by number)
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::MatchId.eq(match_id))
        .order_by_asc(rounds::Column::Number)
        .all(conn)
        .await
}

/// Create a new round; `started_at` is stamped at creation.
pub async fn create_round(
    txn: &DatabaseTransaction,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        number: Set(dto.number),
        small_blind: Set(dto.small_blind),
        big_blind: Set(dto.big_blind),
        duration_secs: Set(dto.duration_secs),
        started_at: Set(dto.now),
        time_in_pause: Set(0),
        ended_at: Set(None),
        created_at: Set(dto.now),
        updated_at: Set(dto.now),
    };

    round.insert(txn).await
}

async fn require_row(
    txn: &DatabaseTransaction,
    round_id: i64,
) -> Result<rounds::Model, sea_orm::DbErr> {
    find_by_id(txn, round_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Round {round_id} not found")))
}

/// Add a completed pause span to the round's accumulator.
pub async fn add_time_in_pause(
    txn: &DatabaseTransaction,
    round_id: i64,
    seconds: i64,
    now: OffsetDateTime,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let record = require_row(txn, round_id).await?;

    let total = record.time_in_pause + seconds;
    let mut active: rounds::ActiveModel = record.into();
    active.time_in_pause = Set(total);
    active.updated_at = Set(now);
    active.update(txn).await
}

/// Stamp `ended_at`; the one-shot guard lives in the repos layer.
pub async fn mark_ended(
    txn: &DatabaseTransaction,
    round_id: i64,
    now: OffsetDateTime,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let record = require_row(txn, round_id).await?;

    let mut active: rounds::ActiveModel = record.into();
    active.ended_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(txn).await
}
