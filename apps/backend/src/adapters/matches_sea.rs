//! SeaORM adapter for the matches repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbBackend, EntityTrait,
    NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::matches::{self, MatchStatus};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// DTO for creating a new match.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub name: String,
    pub rounds_total: i32,
    pub now: OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::Name.eq(name))
        .one(conn)
        .await
}

/// All matches ordered by id
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

/// Fetch the match row under an exclusive (FOR UPDATE) row lock.
///
/// SQLite has no row-locking clause; its single writer already serializes
/// transactions, so the lock is only emitted on Postgres.
pub async fn find_by_id_for_update(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    let mut query = matches::Entity::find_by_id(match_id);
    if txn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }
    query.one(txn).await
}

/// Fetch the match row under a shared (FOR SHARE) row lock, for cheap guard
/// pre-checks that must not block concurrent readers.
pub async fn find_by_id_shared(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    let mut query = matches::Entity::find_by_id(match_id);
    if txn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_shared();
    }
    query.one(txn).await
}

/// Create a new match in Created status with no rounds.
pub async fn create_match(
    txn: &DatabaseTransaction,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let match_active = matches::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        status: Set(MatchStatus::Created),
        started_at: Set(None),
        paused_at: Set(None),
        ended_at: Set(None),
        rounds_total: Set(dto.rounds_total),
        created_at: Set(dto.now),
        updated_at: Set(dto.now),
    };

    match_active.insert(txn).await
}

async fn require_row(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(txn, match_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Match {match_id} not found")))
}

/// Created -> Running: stamp `started_at` once.
pub async fn mark_started(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let record = require_row(txn, match_id).await?;

    let mut active: matches::ActiveModel = record.into();
    active.status = Set(MatchStatus::Running);
    active.started_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(txn).await
}

/// Running -> Paused: stamp `paused_at`.
pub async fn mark_paused(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let record = require_row(txn, match_id).await?;

    let mut active: matches::ActiveModel = record.into();
    active.status = Set(MatchStatus::Paused);
    active.paused_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(txn).await
}

/// Paused -> Running: the pause span has been folded into the current round,
/// so `paused_at` is cleared.
pub async fn mark_running(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let record = require_row(txn, match_id).await?;

    let mut active: matches::ActiveModel = record.into();
    active.status = Set(MatchStatus::Running);
    active.paused_at = Set(None);
    active.updated_at = Set(now);
    active.update(txn).await
}

/// Terminal transition: the blind structure is exhausted.
pub async fn mark_ended(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<matches::Model, sea_orm::DbErr> {
    let record = require_row(txn, match_id).await?;

    let mut active: matches::ActiveModel = record.into();
    active.status = Set(MatchStatus::Ended);
    active.ended_at = Set(Some(now));
    active.paused_at = Set(None);
    active.updated_at = Set(now);
    active.update(txn).await
}
