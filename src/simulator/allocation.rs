//! Initial capital allocation

use crate::config::{CarType, GameRules, PlayerConfig, RentType};
use crate::error::{Result, UrbanSurvivalError};
use serde::{Deserialize, Serialize};

/// Player's choices on the allocation screen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Allocation {
    pub rent_type: RentType,
    pub car_type: CarType,
    pub deposit: i64,
    pub stocks: i64,
    pub funds: i64,
    pub insurance: bool,
}

impl Allocation {
    /// Up-front spend: vehicle price, capital and insurance
    pub fn total_spent(&self, rules: &GameRules) -> i64 {
        let insurance = if self.insurance {
            rules.costs.insurance_price
        } else {
            0
        };
        rules.costs.car_price(self.car_type) + self.deposit + self.stocks + self.funds + insurance
    }

    /// Validate against the starting budget
    ///
    /// Returns the resulting configuration and the cash left over.
    pub fn resolve(&self, rules: &GameRules) -> Result<(PlayerConfig, i64)> {
        for (name, amount) in [
            ("deposit", self.deposit),
            ("stocks", self.stocks),
            ("funds", self.funds),
        ] {
            if amount < 0 {
                return Err(UrbanSurvivalError::InvalidAllocation(format!(
                    "{} must not be negative, got {}",
                    name, amount
                )));
            }
        }

        let remaining = rules.initial_cash - self.total_spent(rules);
        if remaining < 0 {
            return Err(UrbanSurvivalError::InvalidAllocation(format!(
                "allocation exceeds budget by {}",
                -remaining
            )));
        }

        let config = PlayerConfig {
            rent_type: self.rent_type,
            car_type: self.car_type,
            deposit: self.deposit,
            stocks: self.stocks,
            funds: self.funds,
            insurance: self.insurance,
        };
        Ok((config, remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_budget() {
        let rules = GameRules::default();
        let allocation = Allocation {
            car_type: CarType::Gas,
            deposit: 20_000,
            stocks: 30_000,
            funds: 10_000,
            insurance: true,
            ..Default::default()
        };
        let (config, cash) = allocation.resolve(&rules).unwrap();
        assert_eq!(cash, 200_000 - 100_000 - 60_000 - 8_000);
        assert_eq!(config.car_type, CarType::Gas);
        assert_eq!(config.invested(), 60_000);
        assert!(config.insurance);
    }

    #[test]
    fn test_resolve_exact_budget() {
        let allocation = Allocation {
            deposit: 200_000,
            ..Default::default()
        };
        let (_, cash) = allocation.resolve(&GameRules::default()).unwrap();
        assert_eq!(cash, 0);
    }

    #[test]
    fn test_over_budget_rejected() {
        let allocation = Allocation {
            car_type: CarType::Electric,
            stocks: 60_001,
            ..Default::default()
        };
        let err = allocation.resolve(&GameRules::default()).unwrap_err();
        assert!(matches!(err, UrbanSurvivalError::InvalidAllocation(_)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let allocation = Allocation {
            funds: -1,
            ..Default::default()
        };
        assert!(allocation.resolve(&GameRules::default()).is_err());
    }
}
