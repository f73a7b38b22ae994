//! Survival rules: total assets, game-over evaluation and ending records

use super::state::PlayerStats;
use crate::config::{Costs, PlayerConfig, Thresholds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trigger label used when the check follows a cycle settlement
pub const SETTLEMENT_TRIGGER: &str = "monthly settlement";

/// Ending classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingType {
    Slaughtered,
    Survival,
    Success,
}

impl EndingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndingType::Slaughtered => "slaughtered",
            EndingType::Survival => "survival",
            EndingType::Success => "success",
        }
    }
}

impl fmt::Display for EndingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingCause {
    /// Debt beyond assets plus the insolvency buffer
    CreditCollapse,
    /// Health reached zero
    PhysicalFailure,
    /// Mental reached zero
    PsychologicalFailure,
    /// Two or more stats at the critical threshold
    SystemicCollapse,
    /// Reached the end with too little left
    Depleted,
    /// Reached the end above the survival line
    Survived,
    /// Reached the end above the success line
    Ascended,
}

/// Terminal outcome of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    pub ending_type: EndingType,
    pub cause: EndingCause,
    pub reason: String,
}

impl Ending {
    /// Early failure caused by `trigger`
    pub fn collapse(cause: EndingCause, trigger: &str) -> Self {
        let reason = match cause {
            EndingCause::CreditCollapse => format!(
                "[Credit collapse] The fallout from \"{}\" brought your whole balance sheet down. \
                 The collectors did not bother to knock; they cut the lock and walked in.",
                trigger
            ),
            EndingCause::PhysicalFailure => format!(
                "[Body shutdown] The damage from \"{}\" pushed you past what your body could carry. \
                 Your heart stopped somewhere between one shift and the next.",
                trigger
            ),
            EndingCause::PsychologicalFailure => format!(
                "[Mind lost] The shock of \"{}\" burned out whatever was still holding you together. \
                 You never found your way back.",
                trigger
            ),
            _ => format!(
                "[Systemic collapse] Years of pressure and the aftermath of \"{}\" took body and mind \
                 down together. You fell on a rainy street and the city did not notice.",
                trigger
            ),
        };
        Self {
            ending_type: EndingType::Slaughtered,
            cause,
            reason,
        }
    }

    /// Final-stage classification
    pub fn verdict(cause: EndingCause) -> Self {
        let (ending_type, reason) = match cause {
            EndingCause::Ascended => (
                EndingType::Success,
                "You did the impossible. Discipline, precise decisions and timing carried you \
                 over the wall; the city now answers to people like you.",
            ),
            EndingCause::Survived => (
                EndingType::Survival,
                "You made it through the grinder. No fortune, but you kept your footing and \
                 your life. You are one of the few who walked out.",
            ),
            _ => (
                EndingType::Slaughtered,
                "You lasted to the end, but after the debts and the wear there is almost \
                 nothing left. The city burned your youth as fuel.",
            ),
        };
        Self {
            ending_type,
            cause,
            reason: reason.to_string(),
        }
    }
}

/// Total assets: non-negative cash, all capital tiers and the car's salvage value
///
/// Negative cash is debt and counts as zero here; it is weighed separately.
#[inline]
pub fn total_assets(stats: &PlayerStats, config: &PlayerConfig, costs: &Costs) -> i64 {
    stats
        .cash
        .max(0)
        .saturating_add(config.invested())
        .saturating_add(costs.car_salvage(config.car_type))
}

/// Evaluate the game-over rules in order, returning the first that fires
///
/// 1. debt above total assets plus the insolvency buffer
/// 2. health at zero
/// 3. mental at zero
/// 4. two or more of health/mental/moral at or below the critical threshold
pub fn check_game_over(
    stats: &PlayerStats,
    debt: i64,
    total_assets: i64,
    trigger: &str,
    thresholds: &Thresholds,
) -> Option<Ending> {
    if debt > total_assets.saturating_add(thresholds.insolvency_buffer) {
        return Some(Ending::collapse(EndingCause::CreditCollapse, trigger));
    }

    if stats.health <= 0 {
        return Some(Ending::collapse(EndingCause::PhysicalFailure, trigger));
    }

    if stats.mental <= 0 {
        return Some(Ending::collapse(EndingCause::PsychologicalFailure, trigger));
    }

    let critical = [stats.health, stats.mental, stats.moral]
        .iter()
        .filter(|v| **v <= thresholds.critical_stat)
        .count();
    if critical >= 2 {
        return Some(Ending::collapse(EndingCause::SystemicCollapse, trigger));
    }

    None
}
