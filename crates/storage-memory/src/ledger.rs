//! In-memory append-only ledger store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use dalia_core::errors::LedgerError;
use dalia_core::ledger::{
    AssetTransaction, CashFlow, LedgerEntry, LedgerRepositoryTrait, NewAssetTransaction,
    NewCashFlow,
};
use dalia_core::{Error, Result};

use crate::portfolios::MemoryPortfolioRepository;

/// Per-portfolio log. Entries are kept in insertion order; reads sort
/// by `(timestamp, sequence)` so backdated records replay in the right
/// place.
struct PortfolioLog {
    next_sequence: u64,
    entries: Vec<LedgerEntry>,
}

impl Default for PortfolioLog {
    fn default() -> Self {
        Self {
            next_sequence: 1,
            entries: Vec::new(),
        }
    }
}

/// Append-only ledger store backed by a sharded in-memory map.
///
/// Holding the map entry for the duration of an append serializes
/// writers to the same portfolio; writers to different portfolios
/// proceed independently.
pub struct MemoryLedgerRepository {
    portfolios: Arc<MemoryPortfolioRepository>,
    logs: DashMap<String, PortfolioLog>,
}

impl MemoryLedgerRepository {
    pub fn new(portfolios: Arc<MemoryPortfolioRepository>) -> Self {
        Self {
            portfolios,
            logs: DashMap::new(),
        }
    }

    fn ensure_portfolio(&self, portfolio_id: &str) -> Result<()> {
        if !self.portfolios.exists(portfolio_id) {
            return Err(Error::Ledger(LedgerError::PortfolioNotFound(
                portfolio_id.to_string(),
            )));
        }
        Ok(())
    }

    /// Point-in-time snapshot of a portfolio's log, in replay order.
    fn snapshot(&self, portfolio_id: &str) -> Result<Vec<LedgerEntry>> {
        self.ensure_portfolio(portfolio_id)?;
        let mut entries = self
            .logs
            .get(portfolio_id)
            .map(|log| log.entries.clone())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.sort_key());
        Ok(entries)
    }
}

#[async_trait]
impl LedgerRepositoryTrait for MemoryLedgerRepository {
    async fn append_transaction(&self, new: NewAssetTransaction) -> Result<AssetTransaction> {
        self.ensure_portfolio(&new.portfolio_id)?;
        new.validate()?;
        let currency = new
            .currency
            .clone()
            .ok_or_else(|| LedgerError::AppendFailed("transaction has no currency".to_string()))?;

        let mut log = self.logs.entry(new.portfolio_id.clone()).or_default();
        let sequence = log.next_sequence;
        let transaction = AssetTransaction {
            id: Uuid::new_v4().to_string(),
            portfolio_id: new.portfolio_id.clone(),
            sequence,
            ticker: new.normalized_ticker(),
            kind: new.kind,
            quantity: new.quantity,
            price: new.price,
            amount: new.effective_amount(),
            currency,
            note: new.note,
            timestamp: new.timestamp,
        };
        log.entries
            .push(LedgerEntry::Transaction(transaction.clone()));
        log.next_sequence += 1;

        debug!(
            "Appended {} {} to portfolio {} (seq {})",
            transaction.kind.as_str(),
            transaction.ticker,
            transaction.portfolio_id,
            sequence
        );
        Ok(transaction)
    }

    async fn append_cash_flow(&self, new: NewCashFlow) -> Result<CashFlow> {
        self.ensure_portfolio(&new.portfolio_id)?;
        new.validate()?;

        let mut log = self.logs.entry(new.portfolio_id.clone()).or_default();
        let sequence = log.next_sequence;
        let cash_flow = CashFlow {
            id: Uuid::new_v4().to_string(),
            portfolio_id: new.portfolio_id.clone(),
            sequence,
            kind: new.kind,
            amount: new.amount,
            description: new.description,
            timestamp: new.timestamp,
        };
        log.entries.push(LedgerEntry::CashFlow(cash_flow.clone()));
        log.next_sequence += 1;

        debug!(
            "Appended {} to portfolio {} (seq {})",
            cash_flow.kind.as_str(),
            cash_flow.portfolio_id,
            sequence
        );
        Ok(cash_flow)
    }

    fn list_transactions(&self, portfolio_id: &str) -> Result<Vec<AssetTransaction>> {
        Ok(self
            .snapshot(portfolio_id)?
            .into_iter()
            .filter_map(|entry| match entry {
                LedgerEntry::Transaction(tx) => Some(tx),
                LedgerEntry::CashFlow(_) => None,
            })
            .collect())
    }

    fn list_cash_flows(&self, portfolio_id: &str) -> Result<Vec<CashFlow>> {
        Ok(self
            .snapshot(portfolio_id)?
            .into_iter()
            .filter_map(|entry| match entry {
                LedgerEntry::CashFlow(cf) => Some(cf),
                LedgerEntry::Transaction(_) => None,
            })
            .collect())
    }

    fn list_entries(&self, portfolio_id: &str) -> Result<Vec<LedgerEntry>> {
        self.snapshot(portfolio_id)
    }

    fn head_sequence(&self, portfolio_id: &str) -> Result<u64> {
        self.ensure_portfolio(portfolio_id)?;
        Ok(self
            .logs
            .get(portfolio_id)
            .map(|log| log.next_sequence - 1)
            .unwrap_or(0))
    }
}
