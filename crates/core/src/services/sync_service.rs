use log::{debug, warn};
use uuid::Uuid;

use crate::models::holding::Holding;
use crate::models::quote::Quote;
use crate::providers::registry::QuoteProviderRegistry;

/// Refreshes holdings from the external quote feeds.
///
/// Execution is strictly sequential — one holding at a time, in list
/// order, each fetch awaited before the next begins. The fund feed
/// reports through a single shared channel (see `EastmoneyFundProvider`),
/// so concurrent fan-out would corrupt results; sequencing here is a
/// correctness invariant, not a performance choice, and it is applied
/// uniformly to both feeds.
pub struct SyncService {
    registry: QuoteProviderRegistry,
}

impl SyncService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Refresh every holding in place. A failed fetch leaves that
    /// holding's price fields untouched and the loop continues with the
    /// next one, so the slice always keeps its length, order, and ids.
    pub async fn synchronize(&self, holdings: &mut [Holding]) {
        for holding in holdings.iter_mut() {
            self.refresh_one(holding).await;
        }
    }

    /// Same loop, restricted to the given holding ids — the path used
    /// right after a merge to refresh only the affected entries.
    pub async fn synchronize_selected(&self, holdings: &mut [Holding], ids: &[Uuid]) {
        for holding in holdings.iter_mut().filter(|h| ids.contains(&h.id)) {
            self.refresh_one(holding).await;
        }
    }

    async fn refresh_one(&self, holding: &mut Holding) {
        let provider = match self.registry.get_provider_for(&holding.asset_type) {
            Some(p) => p,
            None => {
                warn!(
                    "no quote provider for {} holding {}, skipping",
                    holding.asset_type, holding.code
                );
                return;
            }
        };

        match provider.fetch_quote(&holding.code).await {
            Ok(quote) => {
                Self::apply_quote(holding, quote);
                debug!(
                    "refreshed {} via {}: {}",
                    holding.code,
                    provider.name(),
                    holding.current_price
                );
            }
            Err(e) => {
                warn!(
                    "quote fetch failed for {} via {}: {e}",
                    holding.code,
                    provider.name()
                );
            }
        }
    }

    /// Merge-back policy for one successfully fetched quote:
    /// - `name` only if the feed returned one,
    /// - `current_price` only if positive, otherwise the prior value stays,
    /// - `yesterday_price` from the feed, else the (possibly just-updated)
    ///   current price so day P/L degrades to 0 instead of using a stale
    ///   baseline,
    /// - `price_date` only if the feed returned one.
    fn apply_quote(holding: &mut Holding, quote: Quote) {
        if !quote.name.is_empty() {
            holding.name = quote.name;
        }
        if quote.current_price > 0.0 {
            holding.current_price = quote.current_price;
        }
        holding.yesterday_price = Some(quote.yesterday_price.unwrap_or(holding.current_price));
        if let Some(stamp) = quote.price_date {
            holding.price_date = Some(stamp);
        }
    }
}
