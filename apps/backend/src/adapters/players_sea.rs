//! SeaORM adapter for the players repository.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet, Set};
use time::OffsetDateTime;

use crate::entities::players;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn create_player(
    txn: &DatabaseTransaction,
    name: String,
    now: OffsetDateTime,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    player.insert(txn).await
}
