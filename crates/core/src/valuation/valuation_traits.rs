use std::sync::Arc;

use rust_decimal::Decimal;

use super::valuation_model::{Position, Valuation};
use crate::Result;

/// Trait defining the contract for valuation reads.
///
/// Implementations are safe to call concurrently from multiple
/// readers; each call yields a result derived from a point-in-time
/// snapshot of the portfolio's ledger, and a result can never be
/// staler than the last successful append.
pub trait ValuationServiceTrait: Send + Sync {
    /// The full derived state of the portfolio.
    fn get_valuation(&self, portfolio_id: &str) -> Result<Arc<Valuation>>;

    /// Open positions (quantity > 0), sorted by ticker.
    fn get_holdings(&self, portfolio_id: &str) -> Result<Vec<Position>>;

    /// The current cash balance.
    fn get_cash_balance(&self, portfolio_id: &str) -> Result<Decimal>;

    /// Drops any cached derived state for the portfolio. Reads stay
    /// correct without this (staleness is detected against the ledger
    /// head), but external invalidation triggers may call it to free
    /// the entry eagerly.
    fn invalidate(&self, portfolio_id: &str);
}
