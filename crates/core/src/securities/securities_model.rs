//! Security directory models.

use serde::{Deserialize, Serialize};

/// One listed security as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfile {
    /// Issuer symbol (e.g. "GMEXICO")
    pub symbol: String,
    /// Listing series (e.g. "B"); may be empty
    pub series: String,
    /// Issuer legal name
    pub name: String,
}

impl SecurityProfile {
    /// The ledger ticker for this listing: symbol and series
    /// concatenated (e.g. "GMEXICOB").
    pub fn ticker(&self) -> String {
        format!("{}{}", self.symbol, self.series)
    }
}
