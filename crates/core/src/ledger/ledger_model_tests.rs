use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::ledger::{CashFlowKind, NewAssetTransaction, NewCashFlow, TransactionKind};

fn buy_input() -> NewAssetTransaction {
    NewAssetTransaction {
        portfolio_id: "pf-1".to_string(),
        ticker: "gmexicob".to_string(),
        kind: TransactionKind::Buy,
        quantity: dec!(10),
        price: Some(dec!(100)),
        amount: None,
        currency: None,
        note: None,
        timestamp: Utc.with_ymd_and_hms(2025, 6, 24, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_buy_validates_and_derives_amount() {
    let input = buy_input();
    assert!(input.validate().is_ok());
    assert_eq!(input.effective_amount(), dec!(-1000));
    assert_eq!(input.normalized_ticker(), "GMEXICOB");
}

#[test]
fn test_sell_derives_positive_amount() {
    let input = NewAssetTransaction {
        kind: TransactionKind::Sell,
        quantity: dec!(5),
        price: Some(dec!(150)),
        ..buy_input()
    };
    assert!(input.validate().is_ok());
    assert_eq!(input.effective_amount(), dec!(750));
}

#[test]
fn test_explicit_amount_wins_over_derived() {
    // Fees make the cash effect larger than quantity x price.
    let input = NewAssetTransaction {
        amount: Some(dec!(-1005.50)),
        ..buy_input()
    };
    assert!(input.validate().is_ok());
    assert_eq!(input.effective_amount(), dec!(-1005.50));
}

#[test]
fn test_buy_rejects_zero_quantity() {
    let input = NewAssetTransaction {
        quantity: dec!(0),
        ..buy_input()
    };
    assert!(input.validate().is_err());
}

#[test]
fn test_buy_rejects_missing_price() {
    let input = NewAssetTransaction {
        price: None,
        ..buy_input()
    };
    assert!(input.validate().is_err());
}

#[test]
fn test_buy_rejects_positive_amount() {
    let input = NewAssetTransaction {
        amount: Some(dec!(1000)),
        ..buy_input()
    };
    assert!(input.validate().is_err());
}

#[test]
fn test_sell_rejects_negative_amount() {
    let input = NewAssetTransaction {
        kind: TransactionKind::Sell,
        amount: Some(dec!(-750)),
        ..buy_input()
    };
    assert!(input.validate().is_err());
}

#[test]
fn test_dividend_takes_amount_not_price() {
    let input = NewAssetTransaction {
        kind: TransactionKind::Dividend,
        quantity: dec!(0),
        price: None,
        amount: Some(dec!(50)),
        ..buy_input()
    };
    assert!(input.validate().is_ok());
    assert_eq!(input.effective_amount(), dec!(50));

    let with_price = NewAssetTransaction {
        price: Some(dec!(2.5)),
        ..input.clone()
    };
    assert!(with_price.validate().is_err());

    let without_amount = NewAssetTransaction {
        amount: None,
        ..input
    };
    assert!(without_amount.validate().is_err());
}

#[test]
fn test_empty_ticker_rejected() {
    let input = NewAssetTransaction {
        ticker: "  ".to_string(),
        ..buy_input()
    };
    assert!(input.validate().is_err());
}

#[test]
fn test_cash_flow_sign_consistency() {
    let deposit = NewCashFlow {
        portfolio_id: "pf-1".to_string(),
        kind: CashFlowKind::Deposit,
        amount: dec!(1000),
        description: None,
        timestamp: Utc::now(),
    };
    assert!(deposit.validate().is_ok());

    let negative_deposit = NewCashFlow {
        amount: dec!(-1000),
        ..deposit.clone()
    };
    assert!(negative_deposit.validate().is_err());

    let withdrawal = NewCashFlow {
        kind: CashFlowKind::Withdrawal,
        amount: dec!(-400),
        ..deposit.clone()
    };
    assert!(withdrawal.validate().is_ok());

    let positive_withdrawal = NewCashFlow {
        kind: CashFlowKind::Withdrawal,
        amount: dec!(400),
        ..deposit.clone()
    };
    assert!(positive_withdrawal.validate().is_err());

    let zero = NewCashFlow {
        amount: dec!(0),
        ..deposit
    };
    assert!(zero.validate().is_err());
}
