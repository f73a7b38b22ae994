//! Tunable game rules
//!
//! Every field has a default equal to the reference balance, and every
//! struct is `#[serde(default)]` so a partial JSON document only overrides
//! the values it names.

use crate::config::player::{CarType, RentType};
use crate::error::{Result, UrbanSurvivalError};
use serde::{Deserialize, Serialize};

/// Outcome hint jitter configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Perturb parsed stat values
    pub randomize_effects: bool,
    /// Base fluctuation as a fraction of the value's magnitude
    pub jitter_percentage: f64,
    /// Chance that a hint uses double jitter
    pub critical_volatility_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            randomize_effects: true,
            jitter_percentage: 0.15,
            critical_volatility_chance: 0.10,
        }
    }
}

impl GenerationConfig {
    /// Configuration with jitter disabled
    pub fn fixed() -> Self {
        Self {
            randomize_effects: false,
            ..Self::default()
        }
    }
}

/// Monthly costs, one-off prices and per-cycle penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Costs {
    pub rent_cheap: i64,
    pub rent_expensive: i64,
    pub living_expense: i64,
    pub car_gas_price: i64,
    pub car_electric_price: i64,
    pub car_gas_maintenance: i64,
    pub car_electric_maintenance: i64,
    pub insurance_price: i64,
    pub homeless_penalty_health: i32,
    pub homeless_penalty_mental: i32,
    pub medical_bill: i64,
    /// Fraction of the purchase price recovered when a gas car is sold
    pub gas_salvage_fraction: f64,
    /// Fraction of the purchase price recovered when an electric car is sold
    pub electric_salvage_fraction: f64,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            rent_cheap: 2_500,
            rent_expensive: 5_500,
            living_expense: 3_500,
            car_gas_price: 100_000,
            car_electric_price: 140_000,
            car_gas_maintenance: 2_000,
            car_electric_maintenance: 800,
            insurance_price: 8_000,
            homeless_penalty_health: 15,
            homeless_penalty_mental: 15,
            medical_bill: 5_000,
            gas_salvage_fraction: 0.6,
            electric_salvage_fraction: 0.4,
        }
    }
}

impl Costs {
    /// Monthly rent for a housing choice
    #[inline]
    pub fn monthly_rent(&self, rent_type: RentType) -> i64 {
        match rent_type {
            RentType::Homeless => 0,
            RentType::Cheap => self.rent_cheap,
            RentType::Expensive => self.rent_expensive,
        }
    }

    /// Monthly maintenance for a vehicle
    #[inline]
    pub fn monthly_vehicle(&self, car_type: CarType) -> i64 {
        match car_type {
            CarType::None => 0,
            CarType::Gas => self.car_gas_maintenance,
            CarType::Electric => self.car_electric_maintenance,
        }
    }

    /// Purchase price of a vehicle
    #[inline]
    pub fn car_price(&self, car_type: CarType) -> i64 {
        match car_type {
            CarType::None => 0,
            CarType::Gas => self.car_gas_price,
            CarType::Electric => self.car_electric_price,
        }
    }

    /// Resale value of a vehicle
    #[inline]
    pub fn car_salvage(&self, car_type: CarType) -> i64 {
        match car_type {
            CarType::None => 0,
            CarType::Gas => (self.car_gas_price as f64 * self.gas_salvage_fraction).floor() as i64,
            CarType::Electric => {
                (self.car_electric_price as f64 * self.electric_salvage_fraction).floor() as i64
            }
        }
    }
}

/// Ending and performance thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub success_net_worth: i64,
    pub survival_net_worth: i64,
    /// Health and mental must both be strictly above this for a survival ending
    pub survival_min_stat: i32,
    pub high_performance_stat: i32,
    pub low_performance_stat: i32,
    /// Debt may exceed total assets by this much before credit collapse
    pub insolvency_buffer: i64,
    /// Two or more of health/mental/moral at or below this is a systemic collapse
    pub critical_stat: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            success_net_worth: 1_000_000,
            survival_net_worth: 50_000,
            survival_min_stat: 20,
            high_performance_stat: 80,
            low_performance_stat: 40,
            insolvency_buffer: 50_000,
            critical_stat: 5,
        }
    }
}

/// Salary trajectory multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRules {
    pub initial_monthly: i64,
    pub promotion: f64,
    pub pay_cut: f64,
    pub cost_of_living: f64,
}

impl Default for SalaryRules {
    fn default() -> Self {
        Self {
            initial_monthly: 8_000,
            promotion: 1.20,
            pay_cut: 0.90,
            cost_of_living: 1.05,
        }
    }
}

/// Base investment return rates and fluctuation bands per cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentRates {
    pub deposit: f64,
    pub funds: f64,
    pub stocks: f64,
    /// Uniform band `[low, high)` added to the funds rate
    pub funds_band: (f64, f64),
    /// Uniform band `[low, high)` added to the stocks rate
    pub stocks_band: (f64, f64),
}

impl Default for InvestmentRates {
    fn default() -> Self {
        Self {
            deposit: 0.015,
            funds: 0.04,
            stocks: 0.08,
            funds_band: (-0.04, 0.06),
            stocks_band: (-0.10, 0.10),
        }
    }
}

/// Per-stage event draw rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionRules {
    pub core_per_stage: usize,
    pub random_per_stage: usize,
    /// Archetype forced to the front of the final stage for wealthy players
    pub escape_event_id: String,
    /// Net worth must be strictly above this for the escape override
    pub escape_wealth_threshold: i64,
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self {
            core_per_stage: 3,
            random_per_stage: 2,
            escape_event_id: "s5-c2".to_string(),
            escape_wealth_threshold: 400_000,
        }
    }
}

/// Complete rule set for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub initial_cash: i64,
    pub initial_health: i32,
    pub initial_mental: i32,
    pub initial_moral: i32,
    pub stage_count: usize,
    pub months_per_cycle: i64,
    pub debt_interest_rate: f64,
    pub costs: Costs,
    pub thresholds: Thresholds,
    pub salary: SalaryRules,
    pub investment: InvestmentRates,
    pub selection: SelectionRules,
    pub generation: GenerationConfig,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            initial_cash: 200_000,
            initial_health: 80,
            initial_mental: 80,
            initial_moral: 80,
            stage_count: 6,
            months_per_cycle: 6,
            debt_interest_rate: 0.10,
            costs: Costs::default(),
            thresholds: Thresholds::default(),
            salary: SalaryRules::default(),
            investment: InvestmentRates::default(),
            selection: SelectionRules::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl GameRules {
    /// Parse rules from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| UrbanSurvivalError::RulesParse(e.to_string()))
    }

    /// Index of the last stage
    #[inline]
    pub fn final_stage(&self) -> usize {
        self.stage_count.saturating_sub(1)
    }
}
