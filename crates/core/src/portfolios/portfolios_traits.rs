use async_trait::async_trait;

use super::portfolios_model::{NewPortfolio, Portfolio};
use crate::Result;

/// Trait defining the contract for portfolio repository operations.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
    fn list_portfolios_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    /// Returns the portfolio with the given owner and name, if any.
    fn find_by_user_and_name(&self, user_id: &str, name: &str) -> Result<Option<Portfolio>>;
    async fn create_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio>;
}

/// Trait defining the contract for portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
    fn list_portfolios_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    /// Creates a portfolio. Creating the same (user, name) pair twice
    /// returns the existing portfolio instead of erroring.
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;
}
