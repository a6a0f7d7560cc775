#![allow(dead_code)]

// tests/common/mod.rs

use std::sync::Arc;

use backend::domain::{BlindLevel, BlindStructure, Clock};
use backend::{connect_db, DbProfile, MatchFlowService, RegistrationService};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use time::macros::datetime;
use time::OffsetDateTime;

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Anchor instant for manual-clock tests.
pub const T0: OffsetDateTime = datetime!(2025-08-01 20:00:00 UTC);

/// Fresh migrated in-memory database, isolated per test.
pub async fn test_db() -> DatabaseConnection {
    let url = backend::db_url(DbProfile::Test).expect("test db url");
    let db = connect_db(&url).await.expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Short two-level structure used by lifecycle tests.
pub fn two_level_structure(duration_secs: i64) -> BlindStructure {
    BlindStructure::new(vec![
        BlindLevel::new(Decimal::new(25, 2), Decimal::new(50, 2), duration_secs),
        BlindLevel::new(Decimal::new(50, 2), Decimal::new(100, 2), duration_secs),
    ])
}

pub fn flow_service(
    db: &DatabaseConnection,
    clock: Arc<dyn Clock>,
    structure: BlindStructure,
) -> Arc<MatchFlowService> {
    Arc::new(MatchFlowService::with_structure(
        db.clone(),
        clock,
        structure,
    ))
}

/// Create a match with two registered players, ready to start.
pub async fn match_with_two_players(
    flow: &MatchFlowService,
    registrations: &RegistrationService,
    name: &str,
) -> i64 {
    let record = flow.create_match(name).await.expect("create match");

    let alice = registrations
        .create_player("Alice")
        .await
        .expect("create Alice");
    let bob = registrations.create_player("Bob").await.expect("create Bob");

    registrations
        .register(record.id, alice.id, Decimal::new(1000, 2))
        .await
        .expect("register Alice");
    registrations
        .register(record.id, bob.id, Decimal::new(1000, 2))
        .await
        .expect("register Bob");

    record.id
}
