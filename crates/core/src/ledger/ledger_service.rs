use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::ledger_model::*;
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::errors::{CalculatorError, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::portfolios::PortfolioServiceTrait;
use crate::valuation::ValuationServiceTrait;
use crate::{Error, Result};

/// Transaction intake: validates, normalizes, and appends records.
///
/// All rejections happen before any persistence attempt; a submitted
/// record either lands in the ledger whole or leaves it untouched.
/// The position and cash gates read derived state and then append, so
/// both steps run under one per-portfolio lock: two concurrent
/// submissions can never pass a gate against the same snapshot.
/// After a successful append the service emits `LedgerChanged` so any
/// caching layer above the core can invalidate.
pub struct LedgerService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    portfolio_service: Arc<dyn PortfolioServiceTrait>,
    valuation_service: Arc<dyn ValuationServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    /// One lock per portfolio, guarding the gate-check-then-append
    /// window. Entries are created on first use and never removed.
    intake_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LedgerService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        portfolio_service: Arc<dyn PortfolioServiceTrait>,
        valuation_service: Arc<dyn ValuationServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            ledger_repository,
            portfolio_service,
            valuation_service,
            event_sink,
            intake_locks: DashMap::new(),
        }
    }

    fn intake_lock(&self, portfolio_id: &str) -> Arc<Mutex<()>> {
        self.intake_locks
            .entry(portfolio_id.to_string())
            .or_default()
            .clone()
    }

    /// Rejects a SELL that exceeds the currently held quantity, and a
    /// BUY/SELL whose currency conflicts with the open position's
    /// (currency conversion is out of scope, so positions stay
    /// homogeneous).
    fn check_position_rules(
        &self,
        input: &NewAssetTransaction,
        ticker: &str,
        currency: &str,
    ) -> Result<()> {
        let valuation = self.valuation_service.get_valuation(&input.portfolio_id)?;
        let position = valuation.positions.get(ticker);

        if let Some(position) = position {
            if position.quantity > Decimal::ZERO && position.currency != currency {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "{} is held in {}; a {} {} cannot be applied to it",
                    ticker,
                    position.currency,
                    currency,
                    input.kind.as_str()
                ))));
            }
        }

        if input.kind == TransactionKind::Sell {
            let held = position.map(|p| p.quantity).unwrap_or(Decimal::ZERO);
            if input.quantity > held {
                return Err(CalculatorError::InsufficientPosition {
                    ticker: ticker.to_string(),
                    requested: input.quantity,
                    held,
                }
                .into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    fn get_transactions(&self, portfolio_id: &str) -> Result<Vec<AssetTransaction>> {
        self.ledger_repository.list_transactions(portfolio_id)
    }

    fn get_cash_flows(&self, portfolio_id: &str) -> Result<Vec<CashFlow>> {
        self.ledger_repository.list_cash_flows(portfolio_id)
    }

    async fn add_transaction(&self, input: NewAssetTransaction) -> Result<AssetTransaction> {
        input.validate()?;

        let portfolio = self.portfolio_service.get_portfolio(&input.portfolio_id)?;

        let ticker = input.normalized_ticker();
        let currency = input
            .currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.trim().to_uppercase())
            .unwrap_or(portfolio.base_currency);

        let lock = self.intake_lock(&input.portfolio_id);
        let _guard = lock.lock().await;

        if input.kind != TransactionKind::Dividend {
            self.check_position_rules(&input, &ticker, &currency)?;
        }

        let normalized = NewAssetTransaction {
            ticker: ticker.clone(),
            amount: Some(input.effective_amount()),
            currency: Some(currency),
            ..input
        };

        let created = self.ledger_repository.append_transaction(normalized).await?;
        debug!(
            "Appended {} {} x{} to portfolio {} (seq {})",
            created.kind.as_str(),
            created.ticker,
            created.quantity,
            created.portfolio_id,
            created.sequence
        );

        self.event_sink.emit(DomainEvent::ledger_changed(
            created.portfolio_id.clone(),
            vec![created.ticker.clone()],
        ));
        Ok(created)
    }

    async fn add_cash_flow(&self, input: NewCashFlow) -> Result<CashFlow> {
        input.validate()?;

        // Surfaces PortfolioNotFound before any balance math.
        self.portfolio_service.get_portfolio(&input.portfolio_id)?;

        let lock = self.intake_lock(&input.portfolio_id);
        let _guard = lock.lock().await;

        if input.kind == CashFlowKind::Withdrawal {
            let balance = self
                .valuation_service
                .get_cash_balance(&input.portfolio_id)?;
            if balance + input.amount < Decimal::ZERO {
                return Err(CalculatorError::InsufficientCash {
                    requested: -input.amount,
                    available: balance,
                }
                .into());
            }
        }

        let created = self.ledger_repository.append_cash_flow(input).await?;
        debug!(
            "Appended {} of {} to portfolio {} (seq {})",
            created.kind.as_str(),
            created.amount,
            created.portfolio_id,
            created.sequence
        );

        self.event_sink.emit(DomainEvent::ledger_changed(
            created.portfolio_id.clone(),
            vec![],
        ));
        Ok(created)
    }
}
