pub mod txn;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::error::AppError;

/// Connect to the database behind the given URL.
///
/// In-memory SQLite is capped at a single pooled connection: every checkout
/// must see the same database, and the single writer serializes transactions
/// the way the Postgres row locks do in production.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.sqlx_logging(false);
    if url.contains("sqlite::memory:") {
        opts.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))?;
    Ok(db)
}

pub use txn::with_txn;
