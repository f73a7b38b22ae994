//! Game state aggregate

use crate::config::{Costs, GameRules, PlayerConfig};
use crate::event::GameEvent;
use crate::stats::{total_assets, Ending, EndingType, PlayerStats};
use serde::{Deserialize, Serialize};

/// Current UI mode; informational only to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Intro,
    Allocation,
    Game,
    Summary,
    Ending,
}

/// Phase of the stage/settlement state machine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Events of the current stage are being played
    #[default]
    InProgress,
    /// Stage events are exhausted; settlement is due
    CycleClosing,
    /// The session is over; only a reset leaves this phase
    Terminal(Ending),
}

/// Aggregate root for one playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub screen: Screen,
    /// Stage index, `0..stage_count`
    pub stage: usize,
    pub config: PlayerConfig,
    pub stats: PlayerStats,
    /// Monthly salary
    pub base_salary: i64,
    /// Append-only decision log
    pub history: Vec<String>,
    pub current_events: Vec<GameEvent>,
    pub current_event_index: usize,
    pub status: SessionStatus,
}

impl GameState {
    /// Fresh session state with the rule set's starting values
    pub fn new(rules: &GameRules) -> Self {
        Self {
            screen: Screen::Intro,
            stage: 0,
            config: PlayerConfig::default(),
            stats: PlayerStats::new(
                rules.initial_cash,
                rules.initial_health,
                rules.initial_mental,
                rules.initial_moral,
            ),
            base_salary: rules.salary.initial_monthly,
            history: Vec::new(),
            current_events: Vec::new(),
            current_event_index: 0,
            status: SessionStatus::InProgress,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, SessionStatus::Terminal(_))
    }

    #[inline]
    pub fn ending(&self) -> Option<&Ending> {
        match self.status {
            SessionStatus::Terminal(ref ending) => Some(ending),
            _ => None,
        }
    }

    #[inline]
    pub fn ending_type(&self) -> Option<EndingType> {
        self.ending().map(|e| e.ending_type)
    }

    #[inline]
    pub fn ending_reason(&self) -> Option<&str> {
        self.ending().map(|e| e.reason.as_str())
    }

    /// Event awaiting a choice, if any
    #[inline]
    pub fn current_event(&self) -> Option<&GameEvent> {
        match self.status {
            SessionStatus::InProgress => self.current_events.get(self.current_event_index),
            _ => None,
        }
    }

    /// Whether the selector should populate the current stage
    #[inline]
    pub fn needs_events(&self) -> bool {
        self.screen == Screen::Game
            && self.status == SessionStatus::InProgress
            && self.current_events.is_empty()
    }

    #[inline]
    pub fn debt(&self) -> i64 {
        self.stats.debt()
    }

    #[inline]
    pub fn total_assets(&self, costs: &Costs) -> i64 {
        total_assets(&self.stats, &self.config, costs)
    }

    /// Total assets minus outstanding debt
    #[inline]
    pub fn net_worth(&self, costs: &Costs) -> i64 {
        self.total_assets(costs).saturating_sub(self.debt())
    }
}
