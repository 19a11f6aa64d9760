//! Summary module - read-facing portfolio view with live valuation.

mod summary_model;
mod summary_service;
mod summary_traits;


pub use summary_model::{HoldingSummary, PortfolioSummary};
pub use summary_service::SummaryService;
pub use summary_traits::SummaryServiceTrait;
