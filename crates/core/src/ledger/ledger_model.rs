//! Ledger domain models.
//!
//! Records are tagged variants: each kind carries only the fields that
//! are valid for it, so a DIVIDEND can never demand a price and a cash
//! flow can never reference a ticker.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Kind of a security transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
    Dividend,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "BUY",
            TransactionKind::Sell => "SELL",
            TransactionKind::Dividend => "DIVIDEND",
        }
    }
}

/// Kind of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowKind {
    Deposit,
    Withdrawal,
}

impl CashFlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowKind::Deposit => "DEPOSIT",
            CashFlowKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

/// A recorded security transaction. Immutable once appended.
///
/// `amount` is the signed cash effect: negative for BUY, positive for
/// SELL and DIVIDEND. Its magnitude may differ from quantity x price
/// (fees, withholding); the sign invariant is what the ledger enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransaction {
    pub id: String,
    pub portfolio_id: String,
    /// Per-portfolio monotonic sequence number, shared with cash flows.
    /// Tie-breaks equal timestamps by insertion order; never renumbered.
    pub sequence: u64,
    pub ticker: String,
    pub kind: TransactionKind,
    pub quantity: Decimal,
    /// Price per unit. Present for BUY/SELL, absent for DIVIDEND.
    pub price: Option<Decimal>,
    /// Signed cash effect of the transaction.
    pub amount: Decimal,
    pub currency: String,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A recorded cash movement. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub id: String,
    pub portfolio_id: String,
    /// Per-portfolio monotonic sequence number, shared with transactions.
    pub sequence: u64,
    pub kind: CashFlowKind,
    /// Signed amount: positive for DEPOSIT, negative for WITHDRAWAL.
    pub amount: Decimal,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// One entry of the merged, replayable ledger stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entryType", rename_all = "camelCase")]
pub enum LedgerEntry {
    Transaction(AssetTransaction),
    CashFlow(CashFlow),
}

impl LedgerEntry {
    pub fn portfolio_id(&self) -> &str {
        match self {
            LedgerEntry::Transaction(tx) => &tx.portfolio_id,
            LedgerEntry::CashFlow(cf) => &cf.portfolio_id,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            LedgerEntry::Transaction(tx) => tx.sequence,
            LedgerEntry::CashFlow(cf) => cf.sequence,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LedgerEntry::Transaction(tx) => tx.timestamp,
            LedgerEntry::CashFlow(cf) => cf.timestamp,
        }
    }

    /// The replay ordering key. `(timestamp, sequence)` is a total
    /// order within one portfolio.
    pub fn sort_key(&self) -> (DateTime<Utc>, u64) {
        (self.timestamp(), self.sequence())
    }
}

/// Input model for recording a security transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssetTransaction {
    pub portfolio_id: String,
    pub ticker: String,
    pub kind: TransactionKind,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    /// Signed cash effect. When omitted, derived as quantity x price
    /// with the sign implied by the kind. Required for DIVIDEND.
    pub amount: Option<Decimal>,
    /// Defaults to the portfolio's base currency when omitted.
    pub currency: Option<String>,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewAssetTransaction {
    /// Validates field presence and sign consistency.
    pub fn validate(&self) -> Result<()> {
        if self.portfolio_id.trim().is_empty() {
            return Err(missing("portfolioId"));
        }
        if self.ticker.trim().is_empty() {
            return Err(missing("ticker"));
        }

        match self.kind {
            TransactionKind::Buy | TransactionKind::Sell => {
                if self.quantity <= Decimal::ZERO {
                    return Err(invalid(format!(
                        "{} quantity must be positive, got {}",
                        self.kind.as_str(),
                        self.quantity
                    )));
                }
                let price = self.price.ok_or_else(|| missing("price"))?;
                if price <= Decimal::ZERO {
                    return Err(invalid(format!(
                        "{} price must be positive, got {}",
                        self.kind.as_str(),
                        price
                    )));
                }
                if let Some(amount) = self.amount {
                    let sign_ok = match self.kind {
                        TransactionKind::Buy => amount < Decimal::ZERO,
                        _ => amount > Decimal::ZERO,
                    };
                    if !sign_ok {
                        return Err(invalid(format!(
                            "{} amount must be {}, got {}",
                            self.kind.as_str(),
                            if self.kind == TransactionKind::Buy {
                                "negative (cash outflow)"
                            } else {
                                "positive (cash inflow)"
                            },
                            amount
                        )));
                    }
                }
            }
            TransactionKind::Dividend => {
                if self.quantity < Decimal::ZERO {
                    return Err(invalid(format!(
                        "DIVIDEND quantity cannot be negative, got {}",
                        self.quantity
                    )));
                }
                if self.price.is_some() {
                    return Err(invalid(
                        "DIVIDEND does not take a price; record the total amount".to_string(),
                    ));
                }
                let amount = self.amount.ok_or_else(|| missing("amount"))?;
                if amount <= Decimal::ZERO {
                    return Err(invalid(format!(
                        "DIVIDEND amount must be positive, got {}",
                        amount
                    )));
                }
            }
        }
        Ok(())
    }

    /// Uppercased, trimmed ticker.
    pub fn normalized_ticker(&self) -> String {
        self.ticker.trim().to_uppercase()
    }

    /// The signed cash effect, deriving it from quantity x price when
    /// the caller omitted it. Call only after `validate()`.
    pub fn effective_amount(&self) -> Decimal {
        if let Some(amount) = self.amount {
            return amount;
        }
        let gross = self.quantity * self.price.unwrap_or(Decimal::ZERO);
        match self.kind {
            TransactionKind::Buy => -gross,
            TransactionKind::Sell | TransactionKind::Dividend => gross,
        }
    }
}

/// Input model for recording a cash movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashFlow {
    pub portfolio_id: String,
    pub kind: CashFlowKind,
    /// Signed: positive for DEPOSIT, negative for WITHDRAWAL.
    pub amount: Decimal,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewCashFlow {
    /// Validates sign consistency between kind and amount.
    pub fn validate(&self) -> Result<()> {
        if self.portfolio_id.trim().is_empty() {
            return Err(missing("portfolioId"));
        }
        let sign_ok = match self.kind {
            CashFlowKind::Deposit => self.amount > Decimal::ZERO,
            CashFlowKind::Withdrawal => self.amount < Decimal::ZERO,
        };
        if !sign_ok {
            return Err(invalid(format!(
                "{} amount must be {}, got {}",
                self.kind.as_str(),
                match self.kind {
                    CashFlowKind::Deposit => "positive",
                    CashFlowKind::Withdrawal => "negative",
                },
                self.amount
            )));
        }
        Ok(())
    }
}

fn missing(field: &str) -> Error {
    Error::Validation(ValidationError::MissingField(field.to_string()))
}

fn invalid(msg: String) -> Error {
    Error::Validation(ValidationError::InvalidInput(msg))
}
