//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts into
//! `crate::errors::domain::DomainError` through the `From` impl below, and
//! higher layers map `DomainError` to `AppError` via `From`.

use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split_whitespace().next();
    }
    None
}

/// Map a unique-violation on a known constraint to its domain conflict.
///
/// The buy_ins (player_id, match_id) index backstops registration races: two
/// concurrent registrations serialize on the index, and the loser surfaces as
/// `AlreadyRegistered` rather than a raw constraint error.
fn map_unique_violation(error_msg: &str) -> Option<DomainError> {
    // SQLite spells out table.column; Postgres reports the index name.
    if let Some(table_column) = extract_sqlite_table_column(error_msg) {
        if table_column.starts_with("buy_ins.") {
            return Some(DomainError::already_registered(
                "Player already registered to this match",
            ));
        }
        if table_column.starts_with("matches.") {
            return Some(DomainError::infra(
                InfraErrorKind::Other("UniqueMatchName".into()),
                "A match with this name already exists",
            ));
        }
    }
    if error_msg.contains("ux_buy_ins_player_id_match_id") {
        return Some(DomainError::already_registered(
            "Player already registered to this match",
        ));
    }
    if error_msg.contains("ux_matches_name") {
        return Some(DomainError::infra(
            InfraErrorKind::Other("UniqueMatchName".into()),
            "A match with this name already exists",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    if let sea_orm::DbErr::RecordNotFound(_) = &e {
        return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
    }

    // Unique violations: SQLSTATE 23505 on Postgres, "UNIQUE constraint
    // failed" on SQLite.
    if mentions_sqlstate(&error_msg, "23505") || error_msg.contains("UNIQUE constraint failed") {
        if let Some(mapped) = map_unique_violation(&error_msg) {
            return mapped;
        }
        warn!(error = %error_msg, "Unmapped unique violation");
        return DomainError::infra(
            InfraErrorKind::Other("UniqueViolation".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.to_lowercase().contains("timed out") || error_msg.to_lowercase().contains("timeout")
    {
        return DomainError::infra(InfraErrorKind::Timeout, error_msg);
    }

    warn!(error = %error_msg, "Database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), error_msg)
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_buy_in_unique_violation_maps_to_already_registered() {
        let err = sea_orm::DbErr::Custom(
            "error returned from database: UNIQUE constraint failed: buy_ins.player_id".into(),
        );
        assert!(matches!(
            map_db_err(err),
            DomainError::AlreadyRegistered(_)
        ));
    }

    #[test]
    fn postgres_buy_in_index_maps_to_already_registered() {
        let err = sea_orm::DbErr::Custom(
            "SQLSTATE(23505): duplicate key value violates unique constraint \"ux_buy_ins_player_id_match_id\"".into(),
        );
        assert!(matches!(
            map_db_err(err),
            DomainError::AlreadyRegistered(_)
        ));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("rounds".into());
        assert!(matches!(map_db_err(err), DomainError::NotFound(_, _)));
    }
}
