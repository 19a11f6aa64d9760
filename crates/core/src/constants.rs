/// Default currency for portfolios and records that omit one
pub const DEFAULT_CURRENCY: &str = "MXN";

/// Minimum query length accepted by the security directory search
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

/// Maximum number of results returned by a security search
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Per-ticker timeout for live price lookups, in milliseconds
pub const QUOTE_TIMEOUT_MS: u64 = 5_000;
