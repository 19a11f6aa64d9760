use std::sync::Arc;

use log::debug;

use super::securities_model::SecurityProfile;
use super::securities_traits::{SecurityDirectoryTrait, SecurityServiceTrait};
use crate::constants::{SEARCH_MIN_QUERY_LEN, SEARCH_RESULT_LIMIT};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Service for security search, delegating matching to the directory.
pub struct SecurityService {
    directory: Arc<dyn SecurityDirectoryTrait>,
}

impl SecurityService {
    pub fn new(directory: Arc<dyn SecurityDirectoryTrait>) -> Self {
        Self { directory }
    }
}

impl SecurityServiceTrait for SecurityService {
    fn search_securities(&self, query: &str) -> Result<Vec<SecurityProfile>> {
        let normalized = query.trim().to_lowercase();
        if normalized.chars().count() < SEARCH_MIN_QUERY_LEN {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Search query must be at least {} characters",
                SEARCH_MIN_QUERY_LEN
            ))));
        }

        let results = self.directory.search(&normalized, SEARCH_RESULT_LIMIT)?;
        debug!("Security search '{}' matched {} listings", normalized, results.len());
        Ok(results)
    }
}
