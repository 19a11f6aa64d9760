//! The replay engine: folds an ordered ledger stream into positions,
//! cash balance, and realized P&L.
//!
//! Pure and deterministic: the same ordered input always produces the
//! same output, bit for bit. All arithmetic is `Decimal`; binary
//! floats never touch money or quantities here, because repeated
//! averaging amplifies their rounding error and breaks replay
//! determinism. No intermediate rounding is applied either - display
//! rounding is the caller's concern.

use rust_decimal::Decimal;

use crate::errors::{CalculatorError, Result};
use crate::ledger::{AssetTransaction, CashFlow, LedgerEntry, TransactionKind};
use crate::valuation::valuation_model::{Position, Valuation};

/// Replays the merged, `(timestamp, sequence)`-ordered ledger stream
/// of one portfolio.
///
/// The only error this raises of its own is
/// [`CalculatorError::InsufficientPosition`], when the history
/// contains a SELL exceeding the quantity held at that point - intake
/// rejects such records, so hitting it here means the ledger was
/// populated outside the intake path. Malformed records (a BUY without
/// a price) surface as `InvalidRecord` for the same reason.
pub fn compute_positions_and_cash(entries: &[LedgerEntry]) -> Result<Valuation> {
    let mut valuation = Valuation::empty();

    for entry in entries {
        match entry {
            LedgerEntry::CashFlow(cf) => apply_cash_flow(&mut valuation, cf),
            LedgerEntry::Transaction(tx) => apply_transaction(&mut valuation, tx)?,
        }
    }

    Ok(valuation)
}

fn apply_cash_flow(valuation: &mut Valuation, cf: &CashFlow) {
    // Sign consistency is an intake invariant; the fold just sums.
    valuation.cash_balance += cf.amount;
}

fn apply_transaction(valuation: &mut Valuation, tx: &AssetTransaction) -> Result<()> {
    match tx.kind {
        TransactionKind::Buy => apply_buy(valuation, tx),
        TransactionKind::Sell => apply_sell(valuation, tx),
        TransactionKind::Dividend => {
            // Full amount is realized income; no quantity or basis effect.
            valuation.realized_pl += tx.amount;
            valuation.cash_balance += tx.amount;
            Ok(())
        }
    }
}

fn apply_buy(valuation: &mut Valuation, tx: &AssetTransaction) -> Result<()> {
    let price = required_price(tx)?;
    let position = valuation
        .positions
        .entry(tx.ticker.clone())
        .or_insert_with(|| Position::new(tx.ticker.clone(), tx.currency.clone()));

    let new_quantity = position.quantity + tx.quantity;
    position.average_cost = match position.average_cost {
        // Flat position: this BUY establishes the basis.
        None => Some(price),
        Some(avg) => {
            Some((position.quantity * avg + tx.quantity * price) / new_quantity)
        }
    };
    position.quantity = new_quantity;

    valuation.cash_balance += tx.amount;
    Ok(())
}

fn apply_sell(valuation: &mut Valuation, tx: &AssetTransaction) -> Result<()> {
    let price = required_price(tx)?;

    let held = valuation
        .positions
        .get(&tx.ticker)
        .map(|p| p.quantity)
        .unwrap_or(Decimal::ZERO);
    if tx.quantity > held {
        return Err(CalculatorError::InsufficientPosition {
            ticker: tx.ticker.clone(),
            requested: tx.quantity,
            held,
        }
        .into());
    }

    // held >= quantity > 0, so the position exists and has a basis.
    let position = valuation
        .positions
        .get_mut(&tx.ticker)
        .ok_or_else(|| CalculatorError::InvalidRecord(format!(
            "SELL of {} with no position in replay state",
            tx.ticker
        )))?;
    let average_cost = position.average_cost.ok_or_else(|| {
        CalculatorError::InvalidRecord(format!(
            "position {} has quantity but no average cost",
            tx.ticker
        ))
    })?;

    // Weighted-average method: disposing units never changes the
    // average cost of the remainder.
    valuation.realized_pl += (price - average_cost) * tx.quantity;
    position.quantity -= tx.quantity;
    if position.quantity == Decimal::ZERO {
        position.average_cost = None;
    }

    valuation.cash_balance += tx.amount;
    Ok(())
}

fn required_price(tx: &AssetTransaction) -> Result<Decimal> {
    tx.price.ok_or_else(|| {
        CalculatorError::InvalidRecord(format!(
            "{} transaction {} on {} has no price",
            tx.kind.as_str(),
            tx.id,
            tx.ticker
        ))
        .into()
    })
}
