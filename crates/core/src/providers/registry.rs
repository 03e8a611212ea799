use crate::models::asset::AssetType;

use super::eastmoney::EastmoneyFundProvider;
use super::sina::SinaStockProvider;
use super::traits::QuoteProvider;

/// Registry of available quote feeds, routed by `AssetType`.
///
/// The closed set of asset types maps to a closed set of feeds; adding a
/// third category means registering its provider here alongside the new
/// enum variant.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with both default feeds pre-configured.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();

        // Eastmoney — open-end fund valuations
        registry.register(Box::new(EastmoneyFundProvider::new()));

        // Sina HQ — exchange-listed stocks
        registry.register(Box::new(SinaStockProvider::new()));

        registry
    }

    /// Register a quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that supports the given asset type.
    pub fn get_provider_for(&self, asset_type: &AssetType) -> Option<&dyn QuoteProvider> {
        self.providers
            .iter()
            .find(|p| p.supported_asset_types().contains(asset_type))
            .map(|p| p.as_ref())
    }

    /// Names of all providers registered for the given asset type.
    pub fn provider_names(&self, asset_type: &AssetType) -> Vec<String> {
        self.providers
            .iter()
            .filter(|p| p.supported_asset_types().contains(asset_type))
            .map(|p| p.name().to_string())
            .collect()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
