use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use uuid::Uuid;

use super::portfolios_model::{NewPortfolio, Portfolio};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::events::{DomainEvent, DomainEventSink};
use crate::Result;

/// Service for managing portfolios.
pub struct PortfolioService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PortfolioService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            portfolio_repository,
            event_sink,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolio_repository.get_portfolio(portfolio_id)
    }

    fn list_portfolios_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.portfolio_repository.list_portfolios_by_user(user_id)
    }

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;

        // Idempotent on (user, name): re-creating returns the existing one.
        if let Some(existing) = self
            .portfolio_repository
            .find_by_user_and_name(&new_portfolio.user_id, new_portfolio.name.trim())?
        {
            debug!(
                "Portfolio '{}' already exists for user {}; returning {}",
                existing.name, existing.user_id, existing.id
            );
            return Ok(existing);
        }

        let portfolio = Portfolio {
            id: Uuid::new_v4().to_string(),
            user_id: new_portfolio.user_id.clone(),
            name: new_portfolio.name.trim().to_string(),
            base_currency: new_portfolio.base_currency_or_default(),
            created_at: Utc::now(),
        };

        let created = self.portfolio_repository.create_portfolio(portfolio).await?;
        self.event_sink
            .emit(DomainEvent::portfolio_created(created.id.clone()));
        Ok(created)
    }
}
