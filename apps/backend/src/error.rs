use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;

/// Application-level error type exposed at the crate boundary.
///
/// Domain guard failures are carried verbatim so callers (an HTTP layer, a
/// scheduled job, tests) can branch on them; everything else is flattened to
/// an operational variant with a stable error code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable SCREAMING_SNAKE_CASE code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(d) => match d {
                DomainError::InvalidTransition(_) => ErrorCode::InvalidTransition,
                DomainError::InsufficientPlayers(_) => ErrorCode::InsufficientPlayers,
                DomainError::NotYetTime(_) => ErrorCode::NotYetTime,
                DomainError::AlreadyEnded(_) => ErrorCode::AlreadyEnded,
                DomainError::RegistrationClosed(_) => ErrorCode::RegistrationClosed,
                DomainError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
                DomainError::NotFound(kind, _) => match kind {
                    crate::errors::domain::NotFoundKind::Match => ErrorCode::MatchNotFound,
                    crate::errors::domain::NotFoundKind::Round => ErrorCode::RoundNotFound,
                    crate::errors::domain::NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    _ => ErrorCode::NotFound,
                },
                DomainError::Infra(kind, _) => match kind {
                    InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                    InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                    _ => ErrorCode::DbError,
                },
            },
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Returns the inner domain error, if this is a domain failure.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(d) => Some(d),
            _ => None,
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::internal(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Domain(crate::infra::db_errors::map_db_err(e))
    }
}
