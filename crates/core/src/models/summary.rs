use serde::{Deserialize, Serialize};

/// Portfolio-level metrics derived from the current holding set.
/// Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Σ buy_price × quantity
    pub total_cost: f64,

    /// Σ current_price × quantity
    pub total_market_value: f64,

    /// total_market_value − total_cost
    pub total_profit_loss: f64,

    /// total_profit_loss / total_cost × 100; 0 when total_cost is 0
    pub total_return_rate: f64,

    /// Σ (current_price − yesterday_price) × quantity over holdings that
    /// have a prior reference price; holdings without one contribute 0
    pub total_day_profit_loss: f64,
}

/// Outcome of the tiered profit-sharing / loss-guarantee schedule.
/// A pure function of `(total_cost, total_profit_loss)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitSharingResult {
    /// Fee owed to the service provider under the tiered schedule
    pub sharing_amount: f64,

    /// Compensation owed to the investor, equal to the total loss
    pub guarantee_amount: f64,
}
