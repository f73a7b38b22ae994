//! Player statistics and effect application

use crate::outcome::OptionEffect;
use serde::{Deserialize, Serialize};

/// Upper bound for health, mental and moral
pub const MAX_STAT: i32 = 100;

/// Player statistics
///
/// `cash` is unclamped: a negative balance is debt. Health, mental and
/// moral always stay within `[0, MAX_STAT]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub cash: i64,
    pub health: i32,
    pub mental: i32,
    pub moral: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            cash: 0,
            health: 80,
            mental: 80,
            moral: 80,
        }
    }
}

impl PlayerStats {
    /// Create stats, clamping the bounded values
    pub fn new(cash: i64, health: i32, mental: i32, moral: i32) -> Self {
        Self {
            cash,
            health: clamp_stat(health),
            mental: clamp_stat(mental),
            moral: clamp_stat(moral),
        }
    }

    /// Outstanding debt (the magnitude of negative cash)
    #[inline]
    pub fn debt(&self) -> i64 {
        if self.cash < 0 {
            self.cash.saturating_neg()
        } else {
            0
        }
    }

    /// Return stats after applying an option effect
    #[inline]
    pub fn apply_effect(&self, effect: &OptionEffect) -> Self {
        Self {
            cash: self.cash.saturating_add(effect.cash),
            health: clamp_stat(self.health.saturating_add(effect.health)),
            mental: clamp_stat(self.mental.saturating_add(effect.mental)),
            moral: clamp_stat(self.moral.saturating_add(effect.moral)),
        }
    }
}

/// Clamp a bounded stat into `[0, MAX_STAT]`
#[inline(always)]
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, MAX_STAT)
}

/// Free-function form of [`PlayerStats::apply_effect`]
#[inline]
pub fn apply_effect(stats: &PlayerStats, effect: &OptionEffect) -> PlayerStats {
    stats.apply_effect(effect)
}
