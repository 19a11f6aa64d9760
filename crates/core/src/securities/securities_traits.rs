use super::securities_model::SecurityProfile;
use crate::Result;

/// Trait for the external security directory.
///
/// Implementations own the matching: case-insensitive substring over
/// issuer symbol and name, active listings only, ranked by name.
pub trait SecurityDirectoryTrait: Send + Sync {
    /// Returns up to `limit` listings matching the (already
    /// normalized, lowercase) query.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SecurityProfile>>;
}

/// Trait defining the contract for security search.
pub trait SecurityServiceTrait: Send + Sync {
    /// Validates and runs a free-text search. No match is an empty
    /// list, never an error; a query under the minimum length is a
    /// validation error.
    fn search_securities(&self, query: &str) -> Result<Vec<SecurityProfile>>;
}
