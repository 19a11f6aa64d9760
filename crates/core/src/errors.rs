//! Core error types for the dalia portfolio accounting engine.
//!
//! This module defines storage-agnostic error types. Storage-specific
//! failures are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::quotes::QuoteError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio accounting core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Valuation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Quote lookup failed: {0}")]
    Quote(#[from] QuoteError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for ledger store operations.
///
/// The storage layer converts its own failures (I/O, poisoned locks,
/// whatever the backend surfaces) into this format. A failed append
/// never partially applies: either the record is durably recorded with
/// its sequence number, or the ledger is unchanged.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The referenced portfolio does not exist.
    #[error("Portfolio not found: {0}")]
    PortfolioNotFound(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The store could not durably persist the record.
    #[error("Ledger append failed: {0}")]
    AppendFailed(String),

    /// Internal/unexpected storage error.
    #[error("Internal ledger error: {0}")]
    Internal(String),
}

/// Errors raised while replaying a ledger or gating an intake.
///
/// These are business-rule rejections, not bugs, and are surfaced to
/// the caller verbatim.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Insufficient position for {ticker}: tried to sell {requested} but only {held} held")]
    InsufficientPosition {
        ticker: String,
        requested: Decimal,
        held: Decimal,
    },

    #[error("Insufficient cash: withdrawal of {requested} exceeds balance of {available}")]
    InsufficientCash {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid ledger record: {0}")]
    InvalidRecord(String),
}

/// Validation errors for user input.
///
/// Always raised before any persistence attempt; safe to retry after
/// correcting the input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
