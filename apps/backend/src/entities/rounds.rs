use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    pub number: i32,
    #[sea_orm(column_name = "small_blind", column_type = "Decimal(Some((10, 2)))")]
    pub small_blind: Decimal,
    #[sea_orm(column_name = "big_blind", column_type = "Decimal(Some((10, 2)))")]
    pub big_blind: Decimal,
    #[sea_orm(column_name = "duration_secs")]
    pub duration_secs: i64,
    #[sea_orm(column_name = "started_at")]
    pub started_at: OffsetDateTime,
    #[sea_orm(column_name = "time_in_pause")]
    pub time_in_pause: i64,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
