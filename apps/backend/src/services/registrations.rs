//! Buy-in registration: gates who may participate before a match starts.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::db::with_txn;
use crate::domain::Clock;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::buy_ins::{self, BuyIn};
use crate::repos::matches;
use crate::repos::players::{self, Player};

/// Registration service.
///
/// Registration is only open while the match sits in Created status; the
/// match row is share-locked during the check so a concurrent `start()`
/// cannot slip between guard and insert.
pub struct RegistrationService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Register a player to a match with a buy-in amount.
    ///
    /// Fails with `RegistrationClosed` once the match left Created status and
    /// with `AlreadyRegistered` on a duplicate buy-in. The unique
    /// (player_id, match_id) index backstops registration races; the loser of
    /// such a race also surfaces as `AlreadyRegistered`.
    pub async fn register(
        &self,
        match_id: i64,
        player_id: i64,
        amount: Decimal,
    ) -> Result<BuyIn, AppError> {
        let clock = self.clock.clone();
        let buy_in = with_txn(&self.db, |txn| {
            Box::pin(async move {
                let now = clock.now();
                let record = matches::require_match_shared(txn, match_id).await?;

                if !record.is_created() {
                    return Err(DomainError::registration_closed(format!(
                        "Match {} no longer accepts buy-ins",
                        record.name
                    ))
                    .into());
                }

                let player = players::require_player(txn, player_id).await?;

                if buy_ins::find_by_player_and_match(txn, player_id, match_id)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::already_registered(format!(
                        "Player {} is already registered to match {}",
                        player.name, record.name
                    ))
                    .into());
                }

                Ok(buy_ins::create_buy_in(txn, player_id, match_id, amount, now).await?)
            })
        })
        .await?;

        info!(match_id, player_id, %amount, "Player registered");
        Ok(buy_in)
    }

    /// Create a player record.
    pub async fn create_player(&self, name: &str) -> Result<Player, AppError> {
        let clock = self.clock.clone();
        let name = name.to_string();
        with_txn(&self.db, |txn| {
            Box::pin(async move {
                let now = clock.now();
                Ok(players::create_player(txn, &name, now).await?)
            })
        })
        .await
    }

    /// All buy-ins of the given match.
    pub async fn buy_ins_of_match(&self, match_id: i64) -> Result<Vec<BuyIn>, AppError> {
        with_txn(&self.db, |txn| {
            Box::pin(async move { Ok(buy_ins::find_all_by_match(txn, match_id).await?) })
        })
        .await
    }
}
