use async_trait::async_trait;

use super::summary_model::PortfolioSummary;
use crate::Result;

/// Trait defining the contract for the portfolio summary builder.
#[async_trait]
pub trait SummaryServiceTrait: Send + Sync {
    /// Builds the full summary: replayed positions and cash enriched
    /// with live prices. Price lookups are bounded per ticker; a slow
    /// or failed lookup degrades only that holding.
    async fn get_portfolio_summary(&self, portfolio_id: &str) -> Result<PortfolioSummary>;
}
