use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::AssetType;

/// One incoming purchase row — manual entry or a line from a batch import —
/// not yet reconciled against the holding set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub asset_type: AssetType,

    /// Exchange/fund symbol. The merge engine requires this to be non-empty.
    pub code: String,

    /// Display label as entered; may later be overwritten by the quote feed.
    pub name: String,

    /// Purchase date (daily granularity, informational only)
    pub buy_date: NaiveDate,

    /// Price paid per unit for this purchase
    pub buy_price: f64,

    /// Units bought in this purchase
    pub quantity: f64,
}

impl PositionEntry {
    pub fn new(
        asset_type: AssetType,
        code: impl Into<String>,
        name: impl Into<String>,
        buy_date: NaiveDate,
        buy_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            asset_type,
            code: code.into(),
            name: name.into(),
            buy_date,
            buy_price,
            quantity,
        }
    }

    /// Convenience constructors for the two asset categories.
    pub fn stock(
        code: impl Into<String>,
        name: impl Into<String>,
        buy_date: NaiveDate,
        buy_price: f64,
        quantity: f64,
    ) -> Self {
        Self::new(AssetType::Stock, code, name, buy_date, buy_price, quantity)
    }

    pub fn fund(
        code: impl Into<String>,
        name: impl Into<String>,
        buy_date: NaiveDate,
        buy_price: f64,
        quantity: f64,
    ) -> Self {
        Self::new(AssetType::Fund, code, name, buy_date, buy_price, quantity)
    }
}

/// A single owned position.
///
/// Identity is `(code, asset_type)` — the merge engine keeps that pair
/// unique across the holding set by folding repeat purchases into the
/// existing record instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier, assigned at creation, stable for the record's life
    pub id: Uuid,

    pub asset_type: AssetType,

    /// Exchange/fund symbol; unique together with `asset_type`
    pub code: String,

    /// Display label; refreshed from the quote feed when it returns one
    pub name: String,

    /// Date of the first recorded purchase (informational, not used in cost math)
    pub buy_date: NaiveDate,

    /// Weighted-average cost per unit across all merged purchases.
    /// Defined as 0 when the merged quantity is 0.
    pub buy_price: f64,

    /// Total held units, summed across merges
    pub quantity: f64,

    /// Latest known quote; equals `buy_price` until the first refresh
    pub current_price: f64,

    /// Prior reference price used for day P/L; absent until the first
    /// successful refresh
    #[serde(default)]
    pub yesterday_price: Option<f64>,

    /// Source-formatted freshness stamp of the last quote (a date, a
    /// date+time, or an estimate timestamp, depending on the feed)
    #[serde(default)]
    pub price_date: Option<String>,
}

impl Holding {
    /// Turn an incoming entry into a brand-new holding: fresh id,
    /// `current_price` seeded from the purchase price, no quote data yet.
    pub fn from_entry(entry: PositionEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_type: entry.asset_type,
            code: entry.code,
            name: entry.name,
            buy_date: entry.buy_date,
            buy_price: entry.buy_price,
            quantity: entry.quantity,
            current_price: entry.buy_price,
            yesterday_price: None,
            price_date: None,
        }
    }

    /// Identity test used by the merge engine.
    pub fn matches(&self, code: &str, asset_type: AssetType) -> bool {
        self.code == code && self.asset_type == asset_type
    }

    /// Total cost basis of this position.
    pub fn cost(&self) -> f64 {
        self.buy_price * self.quantity
    }

    /// Market value at the latest known price.
    pub fn market_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    /// Profit/loss attributable to today's price movement, or `None` when
    /// no prior reference price is known yet.
    pub fn day_profit_loss(&self) -> Option<f64> {
        self.yesterday_price
            .map(|y| (self.current_price - y) * self.quantity)
    }
}
