use serde::{Deserialize, Serialize};

/// A normalized market quote fetched from one of the external feeds.
///
/// Fields the feed had nothing usable for are left at their "empty" value
/// (empty `name`, non-positive `current_price`, `None`); the synchronizer's
/// merge-back policy decides what that means for the holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Display name as reported by the feed; empty when omitted
    pub name: String,

    /// Latest price — real-time estimate or close, per the feed's
    /// resolution policy; 0 when nothing parsed
    pub current_price: f64,

    /// Prior reference price (previous close / net asset value)
    pub yesterday_price: Option<f64>,

    /// Source-formatted freshness stamp
    pub price_date: Option<String>,
}
