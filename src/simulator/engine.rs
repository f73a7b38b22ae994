//! State transitions
//!
//! Every transition takes the previous state by reference and returns the
//! next one; the previous state is never modified. Transitions that do not
//! apply in the current phase return an unchanged copy.

use super::allocation::Allocation;
use super::state::{GameState, Screen, SessionStatus};
use crate::config::{AssetKind, CarType, ContentRepository, GameRules};
use crate::error::{Result, UrbanSurvivalError};
use crate::event::{select_stage_events, GameEvent, GameOption, SelectionContext};
use crate::stats::{check_game_over, total_assets};
use rand::Rng;

impl GameState {
    /// Leave the intro for the allocation screen
    pub fn begin_allocation(&self) -> GameState {
        if self.screen != Screen::Intro {
            return self.clone();
        }
        GameState {
            screen: Screen::Allocation,
            ..self.clone()
        }
    }

    /// Apply the initial allocation and enter stage 0
    ///
    /// Allowed once, before any event of the first stage has been drawn.
    pub fn allocate(&self, allocation: &Allocation, rules: &GameRules) -> Result<GameState> {
        if !matches!(self.screen, Screen::Intro | Screen::Allocation) || self.is_game_over() {
            return Err(UrbanSurvivalError::InvalidAllocation(
                "allocation is only possible before the first stage".to_string(),
            ));
        }

        let (config, cash) = allocation.resolve(rules)?;
        log::debug!(
            "allocated: {} housing, {} vehicle, {} invested, {} cash left",
            config.rent_type,
            config.car_type,
            config.invested(),
            cash
        );

        let mut stats = self.stats.clone();
        stats.cash = cash;
        Ok(GameState {
            screen: Screen::Game,
            config,
            stats,
            ..self.clone()
        })
    }

    /// Draw the events for the current stage
    pub fn generate_events<R: Rng + ?Sized>(
        &self,
        content: &ContentRepository,
        rules: &GameRules,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        let ctx = SelectionContext {
            stage: self.stage,
            config: &self.config,
            net_worth: self.net_worth(&rules.costs),
        };
        select_stage_events(content, ctx, rules, rng)
    }

    /// Install a freshly drawn event list
    ///
    /// An empty list closes the cycle at once.
    pub fn install_events(&self, events: Vec<GameEvent>) -> GameState {
        if !self.needs_events() {
            return self.clone();
        }
        if events.is_empty() {
            log::warn!("stage {} produced no events; closing cycle", self.stage);
            return GameState {
                screen: Screen::Summary,
                status: SessionStatus::CycleClosing,
                ..self.clone()
            };
        }
        GameState {
            current_events: events,
            current_event_index: 0,
            ..self.clone()
        }
    }

    /// Resolve the player's choice for the current event
    pub fn select_option(&self, option: &GameOption, rules: &GameRules) -> GameState {
        if self.current_event().is_none() {
            log::warn!("option {:?} ignored: no event awaiting a choice", option.label);
            return self.clone();
        }

        let stats = self.stats.apply_effect(&option.effect);
        let assets = total_assets(&stats, &self.config, &rules.costs);
        if let Some(ending) =
            check_game_over(&stats, stats.debt(), assets, &option.label, &rules.thresholds)
        {
            log::info!(
                "session ended at stage {} on {:?}: {:?}",
                self.stage,
                option.label,
                ending.cause
            );
            return GameState {
                screen: Screen::Ending,
                stats,
                status: SessionStatus::Terminal(ending),
                ..self.clone()
            };
        }

        let mut history = self.history.clone();
        history.push(format!(
            "Stage {}: Selected {} ({})",
            self.stage,
            option.label,
            option.effect.description
        ));

        let next_index = self.current_event_index + 1;
        let stage_done = next_index >= self.current_events.len();
        GameState {
            screen: if stage_done { Screen::Summary } else { Screen::Game },
            stats,
            history,
            current_event_index: next_index,
            status: if stage_done {
                SessionStatus::CycleClosing
            } else {
                SessionStatus::InProgress
            },
            ..self.clone()
        }
    }

    /// Move cash into (`amount > 0`) or out of (`amount < 0`) a capital tier
    ///
    /// Rejected, returning an unchanged copy, when cash or the tier balance
    /// cannot cover the move.
    pub fn adjust_asset(&self, kind: AssetKind, amount: i64) -> GameState {
        if self.is_game_over() || amount == 0 {
            return self.clone();
        }
        if amount > 0 && self.stats.cash < amount {
            log::warn!("cannot move {} into {:?}: cash {}", amount, kind, self.stats.cash);
            return self.clone();
        }
        let covered = amount
            .checked_neg()
            .is_some_and(|withdrawal| self.config.balance(kind) >= withdrawal);
        if amount < 0 && !covered {
            log::warn!(
                "cannot withdraw {} from {:?}: balance {}",
                amount.unsigned_abs(),
                kind,
                self.config.balance(kind)
            );
            return self.clone();
        }

        let mut next = self.clone();
        next.stats.cash = next.stats.cash.saturating_sub(amount);
        let balance = next.config.balance_mut(kind);
        *balance = balance.saturating_add(amount);
        next
    }

    /// Sell the vehicle at its salvage value
    pub fn sell_car(&self, rules: &GameRules) -> GameState {
        if self.is_game_over() || self.config.car_type == CarType::None {
            return self.clone();
        }
        let mut next = self.clone();
        next.stats.cash = next
            .stats
            .cash
            .saturating_add(rules.costs.car_salvage(self.config.car_type));
        next.config.car_type = CarType::None;
        next
    }

    /// Start over from the rule set's initial state
    pub fn reset(&self, rules: &GameRules) -> GameState {
        GameState::new(rules)
    }
}
