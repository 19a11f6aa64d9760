//! In-memory portfolio repository.

use async_trait::async_trait;
use dashmap::DashMap;

use dalia_core::errors::LedgerError;
use dalia_core::portfolios::{Portfolio, PortfolioRepositoryTrait};
use dalia_core::{Error, Result};

/// Repository for portfolio records.
#[derive(Default)]
pub struct MemoryPortfolioRepository {
    portfolios: DashMap<String, Portfolio>,
}

impl MemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a portfolio with the given id exists.
    pub fn exists(&self, portfolio_id: &str) -> bool {
        self.portfolios.contains_key(portfolio_id)
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for MemoryPortfolioRepository {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .get(portfolio_id)
            .map(|p| p.clone())
            .ok_or_else(|| Error::Ledger(LedgerError::PortfolioNotFound(portfolio_id.to_string())))
    }

    fn list_portfolios_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        let mut result: Vec<Portfolio> = self
            .portfolios
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    fn find_by_user_and_name(&self, user_id: &str, name: &str) -> Result<Option<Portfolio>> {
        Ok(self
            .portfolios
            .iter()
            .find(|entry| entry.user_id == user_id && entry.name == name)
            .map(|entry| entry.clone()))
    }

    async fn create_portfolio(&self, portfolio: Portfolio) -> Result<Portfolio> {
        self.portfolios
            .insert(portfolio.id.clone(), portfolio.clone());
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn portfolio(id: &str, user_id: &str, name: &str) -> Portfolio {
        Portfolio {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            base_currency: "MXN".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MemoryPortfolioRepository::new();
        repo.create_portfolio(portfolio("pf-1", "user-1", "Largo plazo"))
            .await
            .unwrap();

        assert!(repo.exists("pf-1"));
        let found = repo.get_portfolio("pf-1").unwrap();
        assert_eq!(found.name, "Largo plazo");

        assert!(matches!(
            repo.get_portfolio("missing").unwrap_err(),
            Error::Ledger(LedgerError::PortfolioNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_user_and_name() {
        let repo = MemoryPortfolioRepository::new();
        repo.create_portfolio(portfolio("pf-1", "user-1", "Largo plazo"))
            .await
            .unwrap();

        let found = repo
            .find_by_user_and_name("user-1", "Largo plazo")
            .unwrap();
        assert_eq!(found.unwrap().id, "pf-1");

        assert!(repo
            .find_by_user_and_name("user-2", "Largo plazo")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let repo = MemoryPortfolioRepository::new();
        repo.create_portfolio(portfolio("pf-1", "user-1", "A"))
            .await
            .unwrap();
        repo.create_portfolio(portfolio("pf-2", "user-1", "B"))
            .await
            .unwrap();
        repo.create_portfolio(portfolio("pf-3", "user-2", "C"))
            .await
            .unwrap();

        let listed = repo.list_portfolios_by_user("user-1").unwrap();
        assert_eq!(listed.len(), 2);
    }
}
