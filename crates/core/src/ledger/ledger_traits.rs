use async_trait::async_trait;

use super::ledger_model::*;
use crate::Result;

/// Trait defining the contract for the ledger store.
///
/// Appends assign a per-portfolio monotonically increasing sequence
/// number, shared across transactions and cash flows, and return only
/// once the record is durably recorded (all-or-nothing). Appends to
/// one portfolio are serialized; appends to different portfolios are
/// independent. Once an append returns, every subsequent list call
/// from any caller observes the record.
///
/// Inputs are expected to be validated and normalized by the service
/// layer: currency resolved, ticker uppercased, amount signed.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    async fn append_transaction(&self, new: NewAssetTransaction) -> Result<AssetTransaction>;
    async fn append_cash_flow(&self, new: NewCashFlow) -> Result<CashFlow>;

    /// Transactions ordered by `(timestamp, sequence)` ascending.
    fn list_transactions(&self, portfolio_id: &str) -> Result<Vec<AssetTransaction>>;
    /// Cash flows ordered by `(timestamp, sequence)` ascending.
    fn list_cash_flows(&self, portfolio_id: &str) -> Result<Vec<CashFlow>>;
    /// The merged stream, ordered by `(timestamp, sequence)` ascending.
    /// This ordering is the single replay order and is never permuted.
    fn list_entries(&self, portfolio_id: &str) -> Result<Vec<LedgerEntry>>;

    /// The last sequence number assigned for the portfolio (0 when the
    /// ledger is empty). Used by derived-state caches for staleness
    /// checks.
    fn head_sequence(&self, portfolio_id: &str) -> Result<u64>;
}

/// Trait defining the contract for the transaction intake service.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    fn get_transactions(&self, portfolio_id: &str) -> Result<Vec<AssetTransaction>>;
    fn get_cash_flows(&self, portfolio_id: &str) -> Result<Vec<CashFlow>>;

    /// Validates, normalizes, and appends a security transaction.
    /// Rejections (validation, oversell) happen before any persistence.
    async fn add_transaction(&self, input: NewAssetTransaction) -> Result<AssetTransaction>;

    /// Validates and appends a cash movement. An overdrawing
    /// withdrawal is rejected before persistence.
    async fn add_cash_flow(&self, input: NewCashFlow) -> Result<CashFlow>;
}
