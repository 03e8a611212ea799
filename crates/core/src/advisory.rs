use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::asset::AssetType;

/// What the advisory collaborator sees of one held asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetProfile {
    pub asset_type: AssetType,
    pub code: String,
    pub name: String,
    /// Weighted-average cost per unit
    pub cost: f64,
    pub current_price: f64,
}

/// One alternative-asset suggestion with a free-text rationale.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSuggestion {
    pub code: String,
    pub name: String,
    pub rationale: String,
}

/// Suggestions returned for one held asset, keyed by its code.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetAdvice {
    pub code: String,
    pub suggestions: Vec<AssetSuggestion>,
}

/// Opaque external recommendation service. Calls are fallible and have no
/// bearing on holding state; callers surface or drop the result as they
/// see fit.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    async fn advise(&self, profiles: &[AssetProfile]) -> Result<Vec<AssetAdvice>, CoreError>;
}
