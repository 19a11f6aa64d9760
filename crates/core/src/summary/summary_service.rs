use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::summary_model::{HoldingSummary, PortfolioSummary};
use super::summary_traits::SummaryServiceTrait;
use crate::constants::QUOTE_TIMEOUT_MS;
use crate::quotes::QuoteProviderTrait;
use crate::valuation::{Position, ValuationServiceTrait};
use crate::Result;

/// Builds the read-facing portfolio summary: replayed positions and
/// cash enriched with live market prices.
pub struct SummaryService {
    valuation_service: Arc<dyn ValuationServiceTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
    quote_timeout: Duration,
}

impl SummaryService {
    pub fn new(
        valuation_service: Arc<dyn ValuationServiceTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
    ) -> Self {
        Self::with_quote_timeout(
            valuation_service,
            quote_provider,
            Duration::from_millis(QUOTE_TIMEOUT_MS),
        )
    }

    pub fn with_quote_timeout(
        valuation_service: Arc<dyn ValuationServiceTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
        quote_timeout: Duration,
    ) -> Self {
        Self {
            valuation_service,
            quote_provider,
            quote_timeout,
        }
    }

    /// Fetches the latest price for one ticker, bounded by the
    /// configured timeout. Failures degrade to `None`.
    async fn fetch_price(&self, ticker: &str) -> Option<Decimal> {
        let lookup = self.quote_provider.get_latest_price(ticker);
        match tokio::time::timeout(self.quote_timeout, lookup).await {
            Ok(Ok(quote)) => Some(quote.price),
            Ok(Err(e)) => {
                warn!("Price lookup failed for {}: {}", ticker, e);
                None
            }
            Err(_) => {
                warn!(
                    "Price lookup for {} timed out after {:?}",
                    ticker, self.quote_timeout
                );
                None
            }
        }
    }

    fn summarize_holding(position: &Position, price: Option<Decimal>) -> HoldingSummary {
        let average_cost = position.average_cost.unwrap_or(Decimal::ZERO);
        let cost_basis = position.quantity * average_cost;

        let market_value = price.map(|p| position.quantity * p);
        let unrealized_pl = market_value.map(|mv| mv - cost_basis);
        let unrealized_pl_pct = unrealized_pl.and_then(|pl| {
            if cost_basis == Decimal::ZERO {
                None
            } else {
                Some(pl / cost_basis * dec!(100))
            }
        });

        HoldingSummary {
            ticker: position.ticker.clone(),
            quantity: position.quantity,
            average_cost,
            currency: position.currency.clone(),
            market_price: price,
            market_value,
            unrealized_pl,
            unrealized_pl_pct,
        }
    }
}

#[async_trait]
impl SummaryServiceTrait for SummaryService {
    async fn get_portfolio_summary(&self, portfolio_id: &str) -> Result<PortfolioSummary> {
        let valuation = self.valuation_service.get_valuation(portfolio_id)?;
        let open_positions = valuation.open_positions();

        debug!(
            "Building summary for portfolio {} with {} open positions",
            portfolio_id,
            open_positions.len()
        );

        let prices = join_all(
            open_positions
                .iter()
                .map(|position| self.fetch_price(&position.ticker)),
        )
        .await;

        let holdings: Vec<HoldingSummary> = open_positions
            .iter()
            .zip(prices)
            .map(|(position, price)| Self::summarize_holding(position, price))
            .collect();

        let is_complete = holdings.iter().all(|h| h.market_value.is_some());
        let total_market_value: Decimal = holdings.iter().filter_map(|h| h.market_value).sum();
        let total_unrealized_pl: Decimal = holdings.iter().filter_map(|h| h.unrealized_pl).sum();

        Ok(PortfolioSummary {
            portfolio_id: portfolio_id.to_string(),
            holdings,
            cash_balance: valuation.cash_balance,
            total_value: valuation.cash_balance + total_market_value,
            total_unrealized_pl,
            total_realized_pl: valuation.realized_pl,
            is_complete,
            as_of: Utc::now(),
        })
    }
}
