//! Ledger module - append-only transaction and cash flow records.
//!
//! The ledger is the single source of truth for a portfolio: positions,
//! cash balance, and P&L are all derived by replaying it. Records are
//! immutable once appended and totally ordered by
//! `(timestamp, sequence)` within a portfolio.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

#[cfg(test)]
mod ledger_model_tests;


pub use ledger_model::{
    AssetTransaction, CashFlow, CashFlowKind, LedgerEntry, NewAssetTransaction, NewCashFlow,
    TransactionKind,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
