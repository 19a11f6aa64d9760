//! Quote-related error types.

use thiserror::Error;

/// Errors raised by price lookups.
///
/// Per-ticker and non-fatal: the summary builder maps these to a
/// missing market value on the affected holding.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("No price available for {0}")]
    PriceUnavailable(String),

    #[error("Price lookup for {0} timed out")]
    Timeout(String),

    #[error("Provider error: {0}")]
    Provider(String),
}
