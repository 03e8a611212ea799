use crate::models::summary::ProfitSharingResult;

/// Return-rate boundary below which no fee is owed.
const TIER1_RATE: f64 = 0.03;
/// Return-rate boundary where the higher fee share starts.
const TIER2_RATE: f64 = 0.05;
/// Fee share applied to profit between the 3% and 5% thresholds.
const TIER1_SHARE: f64 = 0.20;
/// Fee share applied to profit above the 5% threshold.
const TIER2_SHARE: f64 = 0.50;

/// Tiered profit-sharing / loss-guarantee schedule.
///
/// Pure piecewise function of `(total_cost, total_profit_loss)`:
/// continuous and monotonically non-decreasing in the profit for a fixed
/// cost. The thresholds are fixed policy constants, not derived values.
pub struct ProfitSharingService;

impl ProfitSharingService {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, total_cost: f64, total_profit_loss: f64) -> ProfitSharingResult {
        if total_cost == 0.0 {
            return ProfitSharingResult {
                sharing_amount: 0.0,
                guarantee_amount: 0.0,
            };
        }

        if total_profit_loss < 0.0 {
            // Downside protection: the investor is made whole.
            return ProfitSharingResult {
                sharing_amount: 0.0,
                guarantee_amount: total_profit_loss.abs(),
            };
        }

        let rate = total_profit_loss / total_cost;
        let tier1_profit = total_cost * TIER1_RATE;
        let tier2_profit = total_cost * TIER2_RATE;

        let sharing_amount = if rate <= TIER1_RATE {
            0.0
        } else if rate <= TIER2_RATE {
            (total_profit_loss - tier1_profit) * TIER1_SHARE
        } else {
            (tier2_profit - tier1_profit) * TIER1_SHARE
                + (total_profit_loss - tier2_profit) * TIER2_SHARE
        };

        ProfitSharingResult {
            sharing_amount,
            guarantee_amount: 0.0,
        }
    }
}

impl Default for ProfitSharingService {
    fn default() -> Self {
        Self::new()
    }
}
