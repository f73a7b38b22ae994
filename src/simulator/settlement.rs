//! Cycle settlement
//!
//! Closes a stage: collects income, charges the cycle's bills, applies the
//! salary trajectory and the homeless penalty, then either advances to the
//! next stage or classifies the ending.

use super::state::{GameState, Screen, SessionStatus};
use crate::config::{GameRules, RentType, SalaryRules, Thresholds};
use crate::stats::{
    check_game_over, total_assets, Ending, EndingCause, PlayerStats, SETTLEMENT_TRIGGER,
};
use serde::{Deserialize, Serialize};

/// Salary adjustment earned by the stats entering settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryTier {
    /// Health and mental both at or above the high-performance mark
    Promotion,
    /// Health or mental at or below the low-performance mark; a medical bill is charged
    PayCut,
    /// Neither; the salary follows the cost of living
    CostOfLiving,
}

impl SalaryTier {
    pub fn evaluate(stats: &PlayerStats, thresholds: &Thresholds) -> Self {
        if stats.health >= thresholds.high_performance_stat
            && stats.mental >= thresholds.high_performance_stat
        {
            SalaryTier::Promotion
        } else if stats.health <= thresholds.low_performance_stat
            || stats.mental <= thresholds.low_performance_stat
        {
            SalaryTier::PayCut
        } else {
            SalaryTier::CostOfLiving
        }
    }

    #[inline]
    pub fn multiplier(&self, salary: &SalaryRules) -> f64 {
        match self {
            SalaryTier::Promotion => salary.promotion,
            SalaryTier::PayCut => salary.pay_cut,
            SalaryTier::CostOfLiving => salary.cost_of_living,
        }
    }

    /// Next cycle's monthly salary, floored
    #[inline]
    pub fn apply(&self, base_salary: i64, salary: &SalaryRules) -> i64 {
        (base_salary as f64 * self.multiplier(salary)).floor() as i64
    }
}

/// Bill for one cycle, computed from the state entering settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatement {
    pub months: i64,
    pub income: i64,
    pub rent: i64,
    pub living: i64,
    pub vehicle: i64,
    pub interest: i64,
    pub investment: i64,
    pub salary_tier: SalaryTier,
    /// Charged only with a pay cut
    pub medical_bill: i64,
    pub next_salary: i64,
}

impl CycleStatement {
    pub fn compute(state: &GameState, investment_income: i64, rules: &GameRules) -> Self {
        let months = rules.months_per_cycle;
        let costs = &rules.costs;
        let salary_tier = SalaryTier::evaluate(&state.stats, &rules.thresholds);
        let medical_bill = match salary_tier {
            SalaryTier::PayCut => costs.medical_bill,
            _ => 0,
        };

        Self {
            months,
            income: state.base_salary * months,
            rent: costs.monthly_rent(state.config.rent_type) * months,
            living: costs.living_expense * months,
            vehicle: costs.monthly_vehicle(state.config.car_type) * months,
            interest: (state.debt() as f64 * rules.debt_interest_rate).floor() as i64,
            investment: investment_income,
            salary_tier,
            medical_bill,
            next_salary: salary_tier.apply(state.base_salary, &rules.salary),
        }
    }

    /// Rent, living and vehicle costs
    #[inline]
    pub fn expenses(&self) -> i64 {
        self.rent.saturating_add(self.living).saturating_add(self.vehicle)
    }

    /// Cash movement before the medical bill
    #[inline]
    pub fn net_change(&self) -> i64 {
        self.income
            .saturating_sub(self.expenses())
            .saturating_sub(self.interest)
            .saturating_add(self.investment)
    }

    /// Cash movement including the medical bill
    #[inline]
    pub fn total_change(&self) -> i64 {
        self.net_change().saturating_sub(self.medical_bill)
    }
}

/// Result of settling a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    Advanced { stage: usize },
    Ended(Ending),
}

/// Settled state together with the bill that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub state: GameState,
    pub statement: CycleStatement,
    pub outcome: CycleOutcome,
}

impl GameState {
    /// Bill the next settlement would charge
    pub fn statement(&self, investment_income: i64, rules: &GameRules) -> CycleStatement {
        CycleStatement::compute(self, investment_income, rules)
    }

    /// Close the current cycle
    ///
    /// Only acts on a `CycleClosing` state; returns `None` otherwise. The
    /// housing chosen for the next cycle takes effect after this cycle's rent
    /// and homeless penalty are charged.
    pub fn settle(
        &self,
        investment_income: i64,
        next_housing: Option<RentType>,
        rules: &GameRules,
    ) -> Option<Settlement> {
        if self.status != SessionStatus::CycleClosing {
            log::warn!("settlement requested outside of a closing cycle; ignored");
            return None;
        }

        let statement = CycleStatement::compute(self, investment_income, rules);
        let costs = &rules.costs;

        let (health, mental) = if self.config.rent_type == RentType::Homeless {
            (
                (self.stats.health - costs.homeless_penalty_health).max(0),
                (self.stats.mental - costs.homeless_penalty_mental).max(0),
            )
        } else {
            (self.stats.health, self.stats.mental)
        };
        let stats = PlayerStats {
            cash: self.stats.cash.saturating_add(statement.total_change()),
            health,
            mental,
            moral: self.stats.moral,
        };

        log::debug!(
            "stage {} settlement: {:+} cash, salary {} -> {} ({:?})",
            self.stage,
            statement.total_change(),
            self.base_salary,
            statement.next_salary,
            statement.salary_tier
        );

        let assets = total_assets(&stats, &self.config, costs);
        if let Some(ending) =
            check_game_over(&stats, stats.debt(), assets, SETTLEMENT_TRIGGER, &rules.thresholds)
        {
            log::info!("session ended at stage {} settlement: {:?}", self.stage, ending.cause);
            return Some(Settlement {
                state: self.terminate(stats, ending.clone()),
                statement,
                outcome: CycleOutcome::Ended(ending),
            });
        }

        if self.stage >= rules.final_stage() {
            let net_worth = assets.saturating_sub(stats.debt());
            let ending = Ending::verdict(final_verdict(net_worth, &self.stats, &rules.thresholds));
            log::info!("session finished with net worth {}: {:?}", net_worth, ending.cause);
            return Some(Settlement {
                state: self.terminate(stats, ending.clone()),
                statement,
                outcome: CycleOutcome::Ended(ending),
            });
        }

        let mut config = self.config.clone();
        if let Some(rent_type) = next_housing {
            config.rent_type = rent_type;
        }
        let stage = self.stage + 1;
        log::info!("advancing to stage {}", stage);
        let state = GameState {
            screen: Screen::Game,
            stage,
            config,
            stats,
            base_salary: statement.next_salary,
            history: self.history.clone(),
            current_events: Vec::new(),
            current_event_index: 0,
            status: SessionStatus::InProgress,
        };
        Some(Settlement {
            state,
            statement,
            outcome: CycleOutcome::Advanced { stage },
        })
    }

    fn terminate(&self, stats: PlayerStats, ending: Ending) -> GameState {
        GameState {
            screen: Screen::Ending,
            stats,
            status: SessionStatus::Terminal(ending),
            ..self.clone()
        }
    }
}

/// Classify a completed run by net worth
///
/// `entering` are the stats before this cycle's homeless penalty.
fn final_verdict(net_worth: i64, entering: &PlayerStats, thresholds: &Thresholds) -> EndingCause {
    if net_worth >= thresholds.success_net_worth {
        EndingCause::Ascended
    } else if net_worth >= thresholds.survival_net_worth
        && entering.health > thresholds.survival_min_stat
        && entering.mental > thresholds.survival_min_stat
    {
        EndingCause::Survived
    } else {
        EndingCause::Depleted
    }
}
