//! Quotes module - the market price provider boundary.
//!
//! Live prices come from an external collaborator behind
//! [`QuoteProviderTrait`]. A failed or slow lookup degrades a single
//! holding's valuation, never a whole summary.

mod quotes_errors;
mod quotes_model;
mod quotes_traits;

pub use quotes_errors::QuoteError;
pub use quotes_model::Quote;
pub use quotes_traits::{MockQuoteProvider, QuoteProviderTrait};
