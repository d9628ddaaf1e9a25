//! Unified error type for the ledger, the calculator, configuration and the HTTP layer.

use thiserror::Error;

/// Every failure the service can report.
///
/// Ledger and calculator failures are detected before any state is touched, so returning one of
/// these never leaves a half-applied mutation behind.
#[derive(Debug, Error)]
pub enum Error {
    /// A request field is missing, has the wrong shape, or is out of range.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// A monetary amount is negative where it must not be, or is not a finite number.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// No envelope carries the referenced id.
    #[error("Envelope not found: {id}")]
    EnvelopeNotFound {
        /// The id as the caller supplied it
        id: String,
    },

    /// The source envelope of a transfer cannot cover the requested amount.
    #[error("Insufficient funds: balance {current} cannot cover {required}")]
    InsufficientFunds {
        /// Balance of the source envelope
        current: f64,
        /// Amount the transfer asked for
        required: f64,
    },

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// I/O failure, e.g. binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], as seen by callers of the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range request fields
    InvalidInput,
    /// The referenced envelope does not exist
    NotFound,
    /// Transfer source lacks the balance
    InsufficientFunds,
    /// Failures that are not the caller's fault
    Internal,
}

impl Error {
    /// Classifies the error for response mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } | Self::InvalidAmount { .. } => ErrorKind::InvalidInput,
            Self::EnvelopeNotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Config { .. } | Self::Io(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for building an [`Error::InvalidInput`].
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for building an [`Error::EnvelopeNotFound`].
    #[must_use]
    pub fn envelope_not_found(id: impl ToString) -> Self {
        Self::EnvelopeNotFound { id: id.to_string() }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
