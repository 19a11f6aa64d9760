//! Dalia Core - Domain entities, services, and traits.
//!
//! This crate contains the portfolio accounting core: the append-only
//! ledger contract, the replay-based valuation engine, and the summary
//! builder that enriches positions with live prices. It is
//! storage-agnostic and defines traits that are implemented by the
//! `storage-memory` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod portfolios;
pub mod quotes;
pub mod securities;
pub mod summary;
pub mod valuation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
