use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::CalculatorError;
use crate::ledger::{
    AssetTransaction, CashFlow, CashFlowKind, LedgerEntry, TransactionKind,
};
use crate::valuation::compute_positions_and_cash;
use crate::Error;

fn ts(seq: u64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 24, 12, 0, 0).unwrap() + Duration::minutes(seq as i64)
}

fn tx(
    seq: u64,
    kind: TransactionKind,
    ticker: &str,
    quantity: Decimal,
    price: Option<Decimal>,
    amount: Decimal,
) -> LedgerEntry {
    LedgerEntry::Transaction(AssetTransaction {
        id: format!("tx-{}", seq),
        portfolio_id: "pf-1".to_string(),
        sequence: seq,
        ticker: ticker.to_string(),
        kind,
        quantity,
        price,
        amount,
        currency: "MXN".to_string(),
        note: None,
        timestamp: ts(seq),
    })
}

fn buy(seq: u64, ticker: &str, quantity: Decimal, price: Decimal) -> LedgerEntry {
    tx(
        seq,
        TransactionKind::Buy,
        ticker,
        quantity,
        Some(price),
        -(quantity * price),
    )
}

fn sell(seq: u64, ticker: &str, quantity: Decimal, price: Decimal) -> LedgerEntry {
    tx(
        seq,
        TransactionKind::Sell,
        ticker,
        quantity,
        Some(price),
        quantity * price,
    )
}

fn dividend(seq: u64, ticker: &str, amount: Decimal) -> LedgerEntry {
    tx(
        seq,
        TransactionKind::Dividend,
        ticker,
        Decimal::ZERO,
        None,
        amount,
    )
}

fn flow(seq: u64, kind: CashFlowKind, amount: Decimal) -> LedgerEntry {
    LedgerEntry::CashFlow(CashFlow {
        id: format!("cf-{}", seq),
        portfolio_id: "pf-1".to_string(),
        sequence: seq,
        kind,
        amount,
        description: None,
        timestamp: ts(seq),
    })
}

#[test]
fn test_empty_ledger_is_all_zero() {
    let valuation = compute_positions_and_cash(&[]).unwrap();
    assert!(valuation.positions.is_empty());
    assert_eq!(valuation.cash_balance, dec!(0));
    assert_eq!(valuation.realized_pl, dec!(0));
}

#[test]
fn test_worked_scenario_buy_buy_sell_dividend() {
    let entries = vec![
        buy(1, "GMEXICOB", dec!(10), dec!(100)),
        buy(2, "GMEXICOB", dec!(10), dec!(120)),
        sell(3, "GMEXICOB", dec!(5), dec!(150)),
        dividend(4, "GMEXICOB", dec!(50)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();

    let position = &valuation.positions["GMEXICOB"];
    assert_eq!(position.quantity, dec!(15));
    assert_eq!(position.average_cost, Some(dec!(110)));
    // (150 - 110) * 5 + 50
    assert_eq!(valuation.realized_pl, dec!(250));
    // -1000 - 1200 + 750 + 50
    assert_eq!(valuation.cash_balance, dec!(-1400));
}

#[test]
fn test_deposit_then_withdrawal() {
    let entries = vec![
        flow(1, CashFlowKind::Deposit, dec!(1000)),
        flow(2, CashFlowKind::Withdrawal, dec!(-400)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    assert_eq!(valuation.cash_balance, dec!(600));
    assert!(valuation.positions.is_empty());
}

#[test]
fn test_sell_does_not_change_average_cost() {
    let entries = vec![
        buy(1, "WALMEX", dec!(10), dec!(100)),
        buy(2, "WALMEX", dec!(10), dec!(120)),
        sell(3, "WALMEX", dec!(7), dec!(90)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    let position = &valuation.positions["WALMEX"];
    assert_eq!(position.quantity, dec!(13));
    assert_eq!(position.average_cost, Some(dec!(110)));
    // Selling below average realizes a loss.
    assert_eq!(valuation.realized_pl, dec!(-140));
}

#[test]
fn test_oversell_is_rejected() {
    let entries = vec![
        buy(1, "WALMEX", dec!(5), dec!(100)),
        sell(2, "WALMEX", dec!(6), dec!(100)),
    ];
    let err = compute_positions_and_cash(&entries).unwrap_err();
    match err {
        Error::Calculation(CalculatorError::InsufficientPosition {
            ticker,
            requested,
            held,
        }) => {
            assert_eq!(ticker, "WALMEX");
            assert_eq!(requested, dec!(6));
            assert_eq!(held, dec!(5));
        }
        other => panic!("Expected InsufficientPosition, got {other:?}"),
    }
}

#[test]
fn test_sell_with_no_position_is_rejected() {
    let entries = vec![sell(1, "WALMEX", dec!(5), dec!(100))];
    let err = compute_positions_and_cash(&entries).unwrap_err();
    assert!(matches!(
        err,
        Error::Calculation(CalculatorError::InsufficientPosition { .. })
    ));
}

#[test]
fn test_zero_crossing_resets_basis() {
    let entries = vec![
        buy(1, "AMXB", dec!(10), dec!(100)),
        sell(2, "AMXB", dec!(10), dec!(150)),
        buy(3, "AMXB", dec!(4), dec!(70)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    let position = &valuation.positions["AMXB"];
    assert_eq!(position.quantity, dec!(4));
    // Fresh basis, uninfluenced by the 100-cost history.
    assert_eq!(position.average_cost, Some(dec!(70)));
    assert_eq!(valuation.realized_pl, dec!(500));
}

#[test]
fn test_flat_position_has_no_average_cost() {
    let entries = vec![
        buy(1, "AMXB", dec!(10), dec!(100)),
        sell(2, "AMXB", dec!(10), dec!(150)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    let position = &valuation.positions["AMXB"];
    assert_eq!(position.quantity, dec!(0));
    assert_eq!(position.average_cost, None);
    assert!(valuation.open_positions().is_empty());
}

#[test]
fn test_dividend_needs_no_position() {
    // Dividends carry no cost basis; a record can land after the
    // position was closed out.
    let entries = vec![dividend(1, "KOFUBL", dec!(75))];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    assert_eq!(valuation.realized_pl, dec!(75));
    assert_eq!(valuation.cash_balance, dec!(75));
    assert!(valuation.positions.is_empty());
}

#[test]
fn test_positions_track_independently() {
    let entries = vec![
        buy(1, "WALMEX", dec!(10), dec!(60)),
        buy(2, "GMEXICOB", dec!(5), dec!(100)),
        sell(3, "WALMEX", dec!(4), dec!(80)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    assert_eq!(valuation.positions.len(), 2);
    assert_eq!(valuation.positions["WALMEX"].quantity, dec!(6));
    assert_eq!(valuation.positions["GMEXICOB"].quantity, dec!(5));
    assert_eq!(valuation.realized_pl, dec!(80));
}

#[test]
fn test_fractional_quantities() {
    let entries = vec![
        buy(1, "NAFTRACISHRS", dec!(1.5), dec!(100)),
        buy(2, "NAFTRACISHRS", dec!(0.5), dec!(120)),
    ];
    let valuation = compute_positions_and_cash(&entries).unwrap();
    let position = &valuation.positions["NAFTRACISHRS"];
    assert_eq!(position.quantity, dec!(2));
    assert_eq!(position.average_cost, Some(dec!(105)));
}

// --- Property tests ---

/// One step of a randomly generated history. Sells are generated
/// against whatever is held at that point, so the history stays valid.
#[derive(Debug, Clone)]
enum Op {
    Deposit(u32),
    Withdrawal(u32),
    Buy { qty: u32, price_cents: u32 },
    SellSome { fraction_pct: u32, price_cents: u32 },
    Dividend(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..100_000).prop_map(Op::Deposit),
        (1u32..10_000).prop_map(Op::Withdrawal),
        ((1u32..1_000), (1u32..1_000_000))
            .prop_map(|(qty, price_cents)| Op::Buy { qty, price_cents }),
        ((1u32..=100), (1u32..1_000_000)).prop_map(|(fraction_pct, price_cents)| {
            Op::SellSome {
                fraction_pct,
                price_cents,
            }
        }),
        (1u32..10_000).prop_map(Op::Dividend),
    ]
}

/// Materializes ops into a valid single-ticker ledger.
fn build_entries(ops: &[Op]) -> Vec<LedgerEntry> {
    let mut entries = Vec::new();
    let mut held = Decimal::ZERO;
    for (i, op) in ops.iter().enumerate() {
        let seq = (i + 1) as u64;
        match op {
            Op::Deposit(amount) => {
                entries.push(flow(seq, CashFlowKind::Deposit, Decimal::from(*amount)));
            }
            Op::Withdrawal(amount) => {
                entries.push(flow(seq, CashFlowKind::Withdrawal, -Decimal::from(*amount)));
            }
            Op::Buy { qty, price_cents } => {
                let quantity = Decimal::from(*qty);
                let price = Decimal::from(*price_cents) / dec!(100);
                entries.push(buy(seq, "PROPT", quantity, price));
                held += quantity;
            }
            Op::SellSome {
                fraction_pct,
                price_cents,
            } => {
                // Whole-unit portion of the held quantity; skip when flat.
                let quantity = (held * Decimal::from(*fraction_pct) / dec!(100)).floor();
                if quantity > Decimal::ZERO {
                    let price = Decimal::from(*price_cents) / dec!(100);
                    entries.push(sell(seq, "PROPT", quantity, price));
                    held -= quantity;
                }
            }
            Op::Dividend(amount) => {
                entries.push(dividend(seq, "PROPT", Decimal::from(*amount)));
            }
        }
    }
    entries
}

proptest! {
    /// Replaying the same history twice yields bit-identical results.
    #[test]
    fn prop_replay_is_deterministic(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let entries = build_entries(&ops);
        let first = compute_positions_and_cash(&entries).unwrap();
        let second = compute_positions_and_cash(&entries).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The final cash balance is exactly the sum of every record's
    /// signed cash effect.
    #[test]
    fn prop_cash_identity(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let entries = build_entries(&ops);
        let expected: Decimal = entries
            .iter()
            .map(|e| match e {
                LedgerEntry::Transaction(tx) => tx.amount,
                LedgerEntry::CashFlow(cf) => cf.amount,
            })
            .sum();
        let valuation = compute_positions_and_cash(&entries).unwrap();
        prop_assert_eq!(valuation.cash_balance, expected);
    }

    /// After BUYs only, the average cost is the true quantity-weighted
    /// mean of the purchase prices, within fixed-point tolerance.
    #[test]
    fn prop_average_cost_is_weighted_mean(
        buys in proptest::collection::vec(((1u32..1_000), (1u32..1_000_000)), 1..40)
    ) {
        let mut entries = Vec::new();
        let mut total_qty = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        for (i, (qty, price_cents)) in buys.iter().enumerate() {
            let quantity = Decimal::from(*qty);
            let price = Decimal::from(*price_cents) / dec!(100);
            entries.push(buy((i + 1) as u64, "PROPT", quantity, price));
            total_qty += quantity;
            total_cost += quantity * price;
        }
        let valuation = compute_positions_and_cash(&entries).unwrap();
        let average_cost = valuation.positions["PROPT"].average_cost.unwrap();
        let direct = total_cost / total_qty;
        let drift = (average_cost - direct).abs();
        prop_assert!(drift < dec!(0.000000001), "drift {} too large", drift);
    }

    /// Selling any quantity up to the held amount never moves the
    /// average cost of the remainder.
    #[test]
    fn prop_sell_neutrality(
        qty1 in 1u32..500, price1 in 1u32..100_000,
        qty2 in 1u32..500, price2 in 1u32..100_000,
        sell_fraction in 1u32..100, sell_price in 1u32..100_000,
    ) {
        let q1 = Decimal::from(qty1);
        let q2 = Decimal::from(qty2);
        let entries_before = vec![
            buy(1, "PROPT", q1, Decimal::from(price1) / dec!(100)),
            buy(2, "PROPT", q2, Decimal::from(price2) / dec!(100)),
        ];
        let before = compute_positions_and_cash(&entries_before).unwrap();
        let avg_before = before.positions["PROPT"].average_cost.unwrap();

        let sell_qty = ((q1 + q2) * Decimal::from(sell_fraction) / dec!(100)).floor();
        prop_assume!(sell_qty > Decimal::ZERO && sell_qty < q1 + q2);

        let mut entries = entries_before;
        entries.push(sell(3, "PROPT", sell_qty, Decimal::from(sell_price) / dec!(100)));
        let after = compute_positions_and_cash(&entries).unwrap();
        prop_assert_eq!(after.positions["PROPT"].average_cost, Some(avg_before));
    }
}
