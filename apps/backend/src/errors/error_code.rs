//! Error codes for the match backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear at the API boundary.

use core::fmt;

/// Centralized error codes for the match backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lifecycle guard failures
    /// Operation not valid in the match's current status
    InvalidTransition,
    /// Match started with fewer than 2 registered players
    InsufficientPlayers,
    /// Round/match advance attempted before its deadline
    NotYetTime,
    /// Round was already ended
    AlreadyEnded,
    /// Buy-in attempted on a match that already started
    RegistrationClosed,
    /// Player already registered to the match
    AlreadyRegistered,

    // Resource Not Found
    /// Match not found
    MatchNotFound,
    /// Round not found
    RoundNotFound,
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Unique constraint violation
    UniqueViolation,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Lifecycle guard failures
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::NotYetTime => "NOT_YET_TIME",
            Self::AlreadyEnded => "ALREADY_ENDED",
            Self::RegistrationClosed => "REGISTRATION_CLOSED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",

            // Resource Not Found
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::InvalidTransition.as_str(), "INVALID_TRANSITION");
        assert_eq!(
            ErrorCode::InsufficientPlayers.as_str(),
            "INSUFFICIENT_PLAYERS"
        );
        assert_eq!(ErrorCode::NotYetTime.as_str(), "NOT_YET_TIME");
        assert_eq!(ErrorCode::AlreadyEnded.as_str(), "ALREADY_ENDED");
        assert_eq!(ErrorCode::RegistrationClosed.as_str(), "REGISTRATION_CLOSED");
        assert_eq!(ErrorCode::AlreadyRegistered.as_str(), "ALREADY_REGISTERED");
        assert_eq!(ErrorCode::MatchNotFound.as_str(), "MATCH_NOT_FOUND");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            ErrorCode::InvalidTransition.to_string(),
            ErrorCode::InvalidTransition.as_str()
        );
    }
}
