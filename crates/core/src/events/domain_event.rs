//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Callers
/// translate them into platform-specific actions; in particular,
/// `LedgerChanged` is the invalidation signal for any derived-state
/// cache built on top of the core: once it fires for a portfolio, any
/// cached positions or summaries for that portfolio are stale.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A transaction or cash flow was appended to a portfolio's ledger.
    LedgerChanged {
        portfolio_id: String,
        /// Tickers touched by the appended records (empty for pure cash flows)
        tickers: Vec<String>,
    },

    /// A portfolio was created.
    PortfolioCreated { portfolio_id: String },
}

impl DomainEvent {
    /// Creates a LedgerChanged event.
    pub fn ledger_changed(portfolio_id: String, tickers: Vec<String>) -> Self {
        Self::LedgerChanged {
            portfolio_id,
            tickers,
        }
    }

    /// Creates a PortfolioCreated event.
    pub fn portfolio_created(portfolio_id: String) -> Self {
        Self::PortfolioCreated { portfolio_id }
    }
}
