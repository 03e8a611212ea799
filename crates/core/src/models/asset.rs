use serde::{Deserialize, Serialize};

/// The category of a tracked position.
/// Determines which quote provider fetches its market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Exchange-listed stocks — quoted via the Sina HQ feed
    Stock,
    /// Open-end funds — quoted via the Eastmoney valuation feed
    Fund,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "Stock"),
            AssetType::Fund => write!(f, "Fund"),
        }
    }
}
