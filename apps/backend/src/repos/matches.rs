//! Match repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::entities::matches;
use crate::entities::matches::MatchStatus;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Match domain model
///
/// Snapshot of the persisted match row. An instance is stale the moment a
/// mutating operation runs; lifecycle guards are always re-validated against
/// a freshly locked row, never against a held snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub name: String,
    pub status: MatchStatus,
    pub started_at: Option<OffsetDateTime>,
    pub paused_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub rounds_total: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Match {
    pub fn is_created(&self) -> bool {
        self.status == MatchStatus::Created
    }

    pub fn is_running(&self) -> bool {
        self.status == MatchStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == MatchStatus::Paused
    }

    /// `started_at` is stamped exactly once, so this survives pauses.
    pub fn was_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status: model.status,
            started_at: model.started_at,
            paused_at: model.paused_at,
            ended_at: model.ended_at,
            rounds_total: model.rounds_total,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// Free functions (generic) for match operations

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let record = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(record.map(Match::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Match>, DomainError> {
    let record = matches_adapter::find_by_name(conn, name).await?;
    Ok(record.map(Match::from))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Match>, DomainError> {
    let records = matches_adapter::list_all(conn).await?;
    Ok(records.into_iter().map(Match::from).collect())
}

/// Find match by ID or return error if not found.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found")))
}

/// Re-fetch the authoritative match row under an exclusive row lock.
///
/// Every state-mutating operation starts here so that concurrent transitions
/// serialize and the loser re-validates its guard against committed state.
pub async fn require_match_for_update(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<Match, DomainError> {
    let record = matches_adapter::find_by_id_for_update(txn, match_id).await?;
    record
        .map(Match::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found")))
}

/// Re-fetch the match row under a shared row lock for guard pre-checks.
pub async fn require_match_shared(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<Match, DomainError> {
    let record = matches_adapter::find_by_id_shared(txn, match_id).await?;
    record
        .map(Match::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found")))
}

pub async fn create_match(
    txn: &DatabaseTransaction,
    name: &str,
    rounds_total: i32,
    now: OffsetDateTime,
) -> Result<Match, DomainError> {
    let dto = matches_adapter::MatchCreate {
        name: name.to_string(),
        rounds_total,
        now,
    };
    let record = matches_adapter::create_match(txn, dto).await?;
    Ok(Match::from(record))
}

pub async fn mark_started(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<Match, DomainError> {
    let record = matches_adapter::mark_started(txn, match_id, now).await?;
    Ok(Match::from(record))
}

pub async fn mark_paused(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<Match, DomainError> {
    let record = matches_adapter::mark_paused(txn, match_id, now).await?;
    Ok(Match::from(record))
}

pub async fn mark_running(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<Match, DomainError> {
    let record = matches_adapter::mark_running(txn, match_id, now).await?;
    Ok(Match::from(record))
}

pub async fn mark_ended(
    txn: &DatabaseTransaction,
    match_id: i64,
    now: OffsetDateTime,
) -> Result<Match, DomainError> {
    let record = matches_adapter::mark_ended(txn, match_id, now).await?;
    Ok(Match::from(record))
}
