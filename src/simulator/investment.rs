//! Per-cycle investment returns

use crate::config::{InvestmentRates, PlayerConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Returns earned by each capital tier over one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReport {
    pub deposit_rate: f64,
    pub funds_rate: f64,
    pub stocks_rate: f64,
    pub deposit_income: f64,
    pub funds_income: f64,
    pub stocks_income: f64,
    /// Floored sum of all tiers, the figure settlement applies
    pub total: i64,
}

impl InvestmentReport {
    /// Roll this cycle's market
    pub fn roll<R: Rng + ?Sized>(
        config: &PlayerConfig,
        rates: &InvestmentRates,
        rng: &mut R,
    ) -> Self {
        let deposit_rate = rates.deposit;
        let funds_rate = rates.funds + sample_band(rates.funds_band, rng);
        let stocks_rate = rates.stocks + sample_band(rates.stocks_band, rng);

        let deposit_income = config.deposit as f64 * deposit_rate;
        let funds_income = config.funds as f64 * funds_rate;
        let stocks_income = config.stocks as f64 * stocks_rate;

        Self {
            deposit_rate,
            funds_rate,
            stocks_rate,
            deposit_income,
            funds_income,
            stocks_income,
            total: (deposit_income + funds_income + stocks_income).floor() as i64,
        }
    }
}

#[inline]
fn sample_band<R: Rng + ?Sized>((low, high): (f64, f64), rng: &mut R) -> f64 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
