//! Valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived holding state for one security in one portfolio.
///
/// Never persisted as source of truth; always recomputable from the
/// ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    pub quantity: Decimal,
    /// Weighted-average cost per unit. `None` while the position is
    /// flat: after quantity reaches exactly zero the basis is gone,
    /// and the next BUY establishes a fresh one.
    pub average_cost: Option<Decimal>,
    pub currency: String,
}

impl Position {
    pub fn new(ticker: String, currency: String) -> Self {
        Self {
            ticker,
            quantity: Decimal::ZERO,
            average_cost: None,
            currency,
        }
    }

    /// Total cost basis of the held quantity.
    pub fn total_cost_basis(&self) -> Decimal {
        self.quantity * self.average_cost.unwrap_or(Decimal::ZERO)
    }
}

/// The full derived state of one portfolio: the result of replaying
/// its ledger from the beginning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub positions: HashMap<String, Position>,
    pub cash_balance: Decimal,
    /// Cumulative realized P&L: sell proceeds against the average cost
    /// at time of sale, plus dividend income.
    pub realized_pl: Decimal,
}

impl Valuation {
    pub fn empty() -> Self {
        Self {
            positions: HashMap::new(),
            cash_balance: Decimal::ZERO,
            realized_pl: Decimal::ZERO,
        }
    }

    /// Positions with a non-zero quantity, sorted by ticker.
    pub fn open_positions(&self) -> Vec<Position> {
        let mut open: Vec<Position> = self
            .positions
            .values()
            .filter(|p| p.quantity > Decimal::ZERO)
            .cloned()
            .collect();
        open.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        open
    }
}
