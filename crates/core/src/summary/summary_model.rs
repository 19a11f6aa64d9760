//! Summary view models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One holding enriched with live market data.
///
/// The market fields are `None` when the price lookup for this ticker
/// failed or timed out; the rest of the summary is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSummary {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    pub currency: String,
    pub market_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub unrealized_pl: Option<Decimal>,
    pub unrealized_pl_pct: Option<Decimal>,
}

/// Aggregate portfolio view consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio_id: String,
    pub holdings: Vec<HoldingSummary>,
    pub cash_balance: Decimal,
    /// Cash plus the market value of every priced holding. Holdings
    /// without a price are excluded; `is_complete` flags that.
    pub total_value: Decimal,
    pub total_unrealized_pl: Decimal,
    pub total_realized_pl: Decimal,
    /// False when at least one holding is missing a market price.
    pub is_complete: bool,
    pub as_of: DateTime<Utc>,
}
