//! Property tests for stats module
//!
//! Clamping of bounded stats and ordering of the game-over rules.

use proptest::prelude::*;

use crate::config::Thresholds;
use crate::outcome::OptionEffect;
use crate::stats::{check_game_over, EndingCause, PlayerStats, MAX_STAT};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate in-range player stats
fn stats_strategy() -> impl Strategy<Value = PlayerStats> {
    (
        -1_000_000..=2_000_000i64,
        0..=MAX_STAT,
        0..=MAX_STAT,
        0..=MAX_STAT,
    )
        .prop_map(|(cash, health, mental, moral)| PlayerStats::new(cash, health, mental, moral))
}

/// Generate effects with arbitrary magnitudes
fn effect_strategy() -> impl Strategy<Value = OptionEffect> {
    (
        -10_000_000..=10_000_000i64,
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
    )
        .prop_map(|(cash, health, mental, moral)| OptionEffect {
            cash,
            health,
            mental,
            moral,
            description: String::new(),
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Bounded stats stay within [0, 100] after any sequence of effects
    #[test]
    fn prop_clamping_law(
        stats in stats_strategy(),
        effects in prop::collection::vec(effect_strategy(), 1..=10)
    ) {
        let mut current = stats;
        for effect in &effects {
            current = current.apply_effect(effect);
            prop_assert!((0..=MAX_STAT).contains(&current.health));
            prop_assert!((0..=MAX_STAT).contains(&current.mental));
            prop_assert!((0..=MAX_STAT).contains(&current.moral));
        }
    }

    /// Cash moves by exactly the effect's cash delta
    #[test]
    fn prop_cash_unclamped(
        stats in stats_strategy(),
        effect in effect_strategy()
    ) {
        let next = stats.apply_effect(&effect);
        prop_assert_eq!(next.cash, stats.cash + effect.cash);
    }

    /// Insolvency is reported before any stat-based rule
    #[test]
    fn prop_insolvency_first(
        stats in stats_strategy(),
        assets in 0..=1_000_000i64,
        excess in 1..=1_000_000i64
    ) {
        let thresholds = Thresholds::default();
        let debt = assets + thresholds.insolvency_buffer + excess;
        let ending = check_game_over(&stats, debt, assets, "trigger", &thresholds);
        prop_assert_eq!(ending.map(|e| e.cause), Some(EndingCause::CreditCollapse));
    }

    /// Healthy, solvent players are never terminal
    #[test]
    fn prop_healthy_solvent_alive(
        health in 6..=MAX_STAT,
        mental in 6..=MAX_STAT,
        moral in 0..=MAX_STAT,
        assets in 0..=1_000_000i64
    ) {
        let stats = PlayerStats::new(0, health, mental, moral);
        let ending = check_game_over(&stats, 0, assets, "trigger", &Thresholds::default());
        prop_assert!(ending.is_none());
    }
}
