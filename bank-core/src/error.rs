//! Error types for the bank core

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for bank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bank errors
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (account number, name, contact, amount)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Account number already registered
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Unknown account number
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Withdrawal exceeds current balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the caller asked to withdraw
        requested: Decimal,
        /// Balance at the time of the request
        available: Decimal,
    },

    /// Corrupt persisted record (malformed timestamp, kind, or number)
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        // A failed read/write is an IO failure; anything else means the
        // row itself could not be parsed or encoded.
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => Error::Io(io),
                other => Error::Format(format!("{other:?}")),
            }
        } else {
            Error::Format(err.to_string())
        }
    }
}
