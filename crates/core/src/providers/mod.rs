pub mod registry;
pub mod traits;

// Quote feed implementations
pub mod eastmoney;
pub mod sina;
