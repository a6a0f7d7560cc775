//! Repository layer: domain models and free functions generic over
//! `ConnectionTrait`, converting entity models and `DbErr` into domain terms.

pub mod buy_ins;
pub mod matches;
pub mod players;
pub mod rounds;
