use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::Quote;

/// Trait abstraction for market quote feeds.
///
/// Each external source (Eastmoney fund valuations, Sina HQ) implements
/// this trait and isolates its own URL scheme, payload format, and quirks.
/// A new asset category gets a new implementation alongside a new
/// `AssetType` variant.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this feed (for logs/errors).
    fn name(&self) -> &str;

    /// Which asset types this feed can quote.
    fn supported_asset_types(&self) -> Vec<AssetType>;

    /// Fetch one normalized quote for `code`.
    ///
    /// Transport failures, missing records, and unparseable payloads all
    /// surface as `Err`. Callers treat any error as "no data for this
    /// holding" — keep the prior values and move on — never as fatal.
    async fn fetch_quote(&self, code: &str) -> Result<Quote, CoreError>;
}
