//! Error types for advisor operations.

use thiserror::Error;

/// Reasons a configuration is rejected.
///
/// A rejected configuration leaves the previous one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Funds must be positive.
    #[error("funds must be greater than zero")]
    NonPositiveFunds,
    /// Funds are below the currency's minimum.
    #[error("funds must be at least {minimum}")]
    FundsBelowMinimum {
        /// Smallest accepted bankroll in the configured currency.
        minimum: i64,
    },
    /// Funds are above the currency's maximum.
    #[error("funds must be at most {maximum}")]
    FundsAboveMaximum {
        /// Largest accepted bankroll in the configured currency.
        maximum: i64,
    },
    /// Loss limit must lie within 0..=100 percent.
    #[error("loss limit must be between 0 and 100 percent")]
    LossLimitOutOfRange,
    /// Bet amount must be positive.
    #[error("bet amount must be greater than zero")]
    NonPositiveBet,
    /// Bet amount exceeds the bankroll.
    #[error("bet amount exceeds the bankroll")]
    BetExceedsBankroll,
    /// At least one verification is required.
    #[error("required verifications must be at least 1")]
    ZeroVerifications,
}

/// Errors that can occur when submitting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The session has ended; reset to continue.
    #[error("session has ended")]
    SessionEnded,
    /// The session is paused; resume to continue.
    #[error("session is paused")]
    Paused,
}

/// Errors that can occur for pause and resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The session has ended; only a reset is accepted.
    #[error("session has ended")]
    SessionEnded,
    /// The session is already paused.
    #[error("session is already paused")]
    AlreadyPaused,
    /// The session is not paused.
    #[error("session is not paused")]
    NotPaused,
}

/// Errors reported by a settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PersistError {
    /// The backing storage could not be reached.
    #[error("settings storage is unavailable")]
    Unavailable,
    /// Stored data could not be decoded.
    #[error("stored settings are corrupt")]
    Corrupt,
    /// Stored settings failed validation.
    #[error("stored settings are invalid: {0}")]
    Invalid(ConfigError),
}
