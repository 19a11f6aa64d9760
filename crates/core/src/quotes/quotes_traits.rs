//! Quote provider trait and test support.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{Quote, QuoteError};

/// Trait for the external market price provider.
///
/// Implementations may hit the network; callers are expected to bound
/// each lookup (the summary builder wraps every call in a timeout).
#[async_trait]
pub trait QuoteProviderTrait: Send + Sync {
    /// Returns the latest known price for the given ticker.
    async fn get_latest_price(&self, ticker: &str) -> Result<Quote, QuoteError>;
}

/// In-memory provider for tests: serves prices from a fixed table and
/// returns `PriceUnavailable` for everything else.
#[derive(Clone, Default)]
pub struct MockQuoteProvider {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, ticker: &str, price: Decimal) {
        self.prices
            .lock()
            .unwrap()
            .insert(ticker.to_string(), price);
    }

    pub fn remove_price(&self, ticker: &str) {
        self.prices.lock().unwrap().remove(ticker);
    }
}

#[async_trait]
impl QuoteProviderTrait for MockQuoteProvider {
    async fn get_latest_price(&self, ticker: &str) -> Result<Quote, QuoteError> {
        let price = self
            .prices
            .lock()
            .unwrap()
            .get(ticker)
            .copied()
            .ok_or_else(|| QuoteError::PriceUnavailable(ticker.to_string()))?;
        Ok(Quote {
            ticker: ticker.to_string(),
            price,
            currency: crate::constants::DEFAULT_CURRENCY.to_string(),
            as_of: Utc::now(),
        })
    }
}
