//! In-memory security directory.

use dashmap::DashMap;

use dalia_core::securities::{SecurityDirectoryTrait, SecurityProfile};
use dalia_core::Result;

/// One directory row: the listing profile plus its trading status.
/// Suspended listings stay in the directory but never match a search.
#[derive(Debug, Clone)]
pub struct SecurityListing {
    pub profile: SecurityProfile,
    pub is_active: bool,
}

impl SecurityListing {
    pub fn new(symbol: &str, series: &str, name: &str) -> Self {
        Self {
            profile: SecurityProfile {
                symbol: symbol.to_string(),
                series: series.to_string(),
                name: name.to_string(),
            },
            is_active: true,
        }
    }

    pub fn suspended(symbol: &str, series: &str, name: &str) -> Self {
        Self {
            is_active: false,
            ..Self::new(symbol, series, name)
        }
    }
}

/// Directory of listed securities, keyed by ticker.
#[derive(Default)]
pub struct MemorySecurityDirectory {
    listings: DashMap<String, SecurityListing>,
}

impl MemorySecurityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(listings: Vec<SecurityListing>) -> Self {
        let directory = Self::new();
        for listing in listings {
            directory.upsert(listing);
        }
        directory
    }

    /// Inserts or replaces the listing for its ticker.
    pub fn upsert(&self, listing: SecurityListing) {
        self.listings.insert(listing.profile.ticker(), listing);
    }
}

impl SecurityDirectoryTrait for MemorySecurityDirectory {
    /// Substring match on symbol or issuer name. The query arrives
    /// trimmed and lowercased from the service layer. Results are
    /// ordered by issuer name and capped at `limit`.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SecurityProfile>> {
        let mut matches: Vec<SecurityProfile> = self
            .listings
            .iter()
            .filter(|entry| {
                entry.is_active
                    && (entry.profile.symbol.to_lowercase().contains(query)
                        || entry.profile.name.to_lowercase().contains(query))
            })
            .map(|entry| entry.profile.clone())
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        Ok(matches)
    }
}
