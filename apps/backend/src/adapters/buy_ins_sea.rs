//! SeaORM adapter for the buy-ins repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::buy_ins;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// DTO for creating a buy-in.
#[derive(Debug, Clone)]
pub struct BuyInCreate {
    pub player_id: i64,
    pub match_id: i64,
    pub amount: Decimal,
    pub now: OffsetDateTime,
}

/// Number of registrations for a match
pub async fn count_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    buy_ins::Entity::find()
        .filter(buy_ins::Column::MatchId.eq(match_id))
        .count(conn)
        .await
}

pub async fn find_by_player_and_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    match_id: i64,
) -> Result<Option<buy_ins::Model>, sea_orm::DbErr> {
    buy_ins::Entity::find()
        .filter(buy_ins::Column::PlayerId.eq(player_id))
        .filter(buy_ins::Column::MatchId.eq(match_id))
        .one(conn)
        .await
}

/// All buy-ins of the given match
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<buy_ins::Model>, sea_orm::DbErr> {
    buy_ins::Entity::find()
        .filter(buy_ins::Column::MatchId.eq(match_id))
        .order_by_asc(buy_ins::Column::Id)
        .all(conn)
        .await
}

pub async fn create_buy_in(
    txn: &DatabaseTransaction,
    dto: BuyInCreate,
) -> Result<buy_ins::Model, sea_orm::DbErr> {
    let buy_in = buy_ins::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        match_id: Set(dto.match_id),
        amount: Set(dto.amount),
        created_at: Set(dto.now),
        updated_at: Set(dto.now),
    };

    buy_in.insert(txn).await
}
