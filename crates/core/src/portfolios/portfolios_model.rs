//! Portfolio domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CURRENCY;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing one portfolio.
///
/// A portfolio owns exactly one transaction log and one cash flow log;
/// everything else (positions, cash balance, P&L) is derived from
/// those logs. Portfolios are created explicitly and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Currency applied to records that omit one
    pub base_currency: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub user_id: String,
    pub name: String,
    pub base_currency: Option<String>,
}

impl NewPortfolio {
    /// Validates the new portfolio data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Portfolio name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Returns the base currency, falling back to the system default.
    pub fn base_currency_or_default(&self) -> String {
        self.base_currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_uppercase()
    }
}
