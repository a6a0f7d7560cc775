//! SeaORM query layer. Adapters speak in entity models and `DbErr`; the repos
//! layer converts both into domain terms.

pub mod buy_ins_sea;
pub mod matches_sea;
pub mod players_sea;
pub mod rounds_sea;
