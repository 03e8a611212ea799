use crate::models::holding::Holding;
use crate::models::summary::PortfolioSummary;

/// Derives portfolio-level metrics from the holding set.
///
/// Pure function of current state — no I/O, no internal state. Every
/// ratio is defined as 0 when its denominator is 0, never NaN.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, holdings: &[Holding]) -> PortfolioSummary {
        let total_cost: f64 = holdings.iter().map(Holding::cost).sum();
        let total_market_value: f64 = holdings.iter().map(Holding::market_value).sum();
        let total_profit_loss = total_market_value - total_cost;

        let total_return_rate = if total_cost == 0.0 {
            0.0
        } else {
            total_profit_loss / total_cost * 100.0
        };

        // Holdings that have never been refreshed carry no reference price
        // and contribute exactly 0 to the day figure.
        let total_day_profit_loss: f64 = holdings
            .iter()
            .filter_map(Holding::day_profit_loss)
            .sum();

        PortfolioSummary {
            total_cost,
            total_market_value,
            total_profit_loss,
            total_return_rate,
            total_day_profit_loss,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
