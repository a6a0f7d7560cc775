//! Buy-in repository functions for domain layer.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::buy_ins_sea as buy_ins_adapter;
use crate::entities::buy_ins;
use crate::errors::domain::DomainError;

/// Buy-in domain model: ties a player to a match with a contributed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyIn {
    pub id: i64,
    pub player_id: i64,
    pub match_id: i64,
    pub amount: Decimal,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<buy_ins::Model> for BuyIn {
    fn from(model: buy_ins::Model) -> Self {
        Self {
            id: model.id,
            player_id: model.player_id,
            match_id: model.match_id,
            amount: model.amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// Free functions (generic) for buy-in operations

/// Number of registrations for a match; gates `start()`.
pub async fn count_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, DomainError> {
    Ok(buy_ins_adapter::count_by_match(conn, match_id).await?)
}

pub async fn find_by_player_and_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    match_id: i64,
) -> Result<Option<BuyIn>, DomainError> {
    let record = buy_ins_adapter::find_by_player_and_match(conn, player_id, match_id).await?;
    Ok(record.map(BuyIn::from))
}

pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<BuyIn>, DomainError> {
    let records = buy_ins_adapter::find_all_by_match(conn, match_id).await?;
    Ok(records.into_iter().map(BuyIn::from).collect())
}

pub async fn create_buy_in(
    txn: &DatabaseTransaction,
    player_id: i64,
    match_id: i64,
    amount: Decimal,
    now: OffsetDateTime,
) -> Result<BuyIn, DomainError> {
    let dto = buy_ins_adapter::BuyInCreate {
        player_id,
        match_id,
        amount,
        now,
    };
    let record = buy_ins_adapter::create_buy_in(txn, dto).await?;
    Ok(BuyIn::from(record))
}
