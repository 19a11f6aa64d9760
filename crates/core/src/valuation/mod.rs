//! Valuation module - ledger replay into positions, cash, and P&L.

mod valuation_calculator;
mod valuation_model;
mod valuation_service;
mod valuation_traits;

#[cfg(test)]
mod valuation_calculator_tests;


pub use valuation_calculator::compute_positions_and_cash;
pub use valuation_model::{Position, Valuation};
pub use valuation_service::ValuationService;
pub use valuation_traits::ValuationServiceTrait;
