//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Callers outside the crate should
//! work with `Result<T, crate::error::AppError>` and convert from
//! `DomainError` using the provided `From<DomainError> for AppError`
//! implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
    Round,
    Player,
    Other(String),
}

/// Central domain error type.
///
/// The lifecycle variants map 1:1 to the guard failures of the match state
/// machine; all of them abort the surrounding transaction so no partial state
/// is ever committed.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Operation is not valid in the match's current status
    InvalidTransition(String),
    /// Match start attempted with fewer than the required registrations
    InsufficientPlayers(String),
    /// Round/match advance attempted before its deadline
    NotYetTime(String),
    /// Double-end of a round
    AlreadyEnded(String),
    /// Buy-in attempted after the match left the Created status
    RegistrationClosed(String),
    /// Player already holds a buy-in for this match
    AlreadyRegistered(String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::InvalidTransition(d) => write!(f, "invalid transition: {d}"),
            DomainError::InsufficientPlayers(d) => write!(f, "insufficient players: {d}"),
            DomainError::NotYetTime(d) => write!(f, "not yet time: {d}"),
            DomainError::AlreadyEnded(d) => write!(f, "already ended: {d}"),
            DomainError::RegistrationClosed(d) => write!(f, "registration closed: {d}"),
            DomainError::AlreadyRegistered(d) => write!(f, "already registered: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn invalid_transition(detail: impl Into<String>) -> Self {
        Self::InvalidTransition(detail.into())
    }
    pub fn insufficient_players(detail: impl Into<String>) -> Self {
        Self::InsufficientPlayers(detail.into())
    }
    pub fn not_yet_time(detail: impl Into<String>) -> Self {
        Self::NotYetTime(detail.into())
    }
    pub fn already_ended(detail: impl Into<String>) -> Self {
        Self::AlreadyEnded(detail.into())
    }
    pub fn registration_closed(detail: impl Into<String>) -> Self {
        Self::RegistrationClosed(detail.into())
    }
    pub fn already_registered(detail: impl Into<String>) -> Self {
        Self::AlreadyRegistered(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
