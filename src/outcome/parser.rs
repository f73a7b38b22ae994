//! Outcome hint parser
//!
//! Hints look like `"[Cash +2000, HP -15] You got paid, and it hurt."`.

use crate::config::GenerationConfig;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bracketed stat segment followed by free text
static HINT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(.*?)\]\s*(?s:(.*))$").expect("hint pattern is valid"));

/// One `<token> <signed int>` pair inside the bracket segment
static STAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Cash|HP|Health|PSY|Mental|KAR|Moral)\s*([+-]?\d+)")
        .expect("stat pattern is valid")
});

/// Stat targeted by a hint token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Cash,
    Health,
    Mental,
    Moral,
}

impl StatKind {
    /// Map a hint token to a stat, case-insensitive
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_bytes() {
            b"CASH" => Some(StatKind::Cash),
            b"HP" | b"HEALTH" => Some(StatKind::Health),
            b"PSY" | b"MENTAL" => Some(StatKind::Mental),
            b"KAR" | b"MORAL" => Some(StatKind::Moral),
            _ => None,
        }
    }
}

/// Resolved numeric effect of an option
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionEffect {
    pub cash: i64,
    pub health: i32,
    pub mental: i32,
    pub moral: i32,
    /// Narrative result shown after the choice
    pub description: String,
}

impl OptionEffect {
    /// Effect that changes nothing and only carries text
    pub fn text_only(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.cash == 0 && self.health == 0 && self.mental == 0 && self.moral == 0
    }
}

/// Split a hint into its raw stat deltas and trailing text
///
/// Returns `None` when the bracket segment is missing or malformed.
/// Unrecognized tokens are skipped.
pub fn split_hint(hint: &str) -> Option<(Vec<(StatKind, i64)>, &str)> {
    let caps = HINT_PATTERN.captures(hint)?;
    let stats_part = caps.get(1).map_or("", |m| m.as_str());
    let text_part = caps.get(2).map_or("", |m| m.as_str());

    let deltas = STAT_PATTERN
        .captures_iter(stats_part)
        .filter_map(|c| {
            let kind = StatKind::from_token(c.get(1)?.as_str())?;
            let value = c.get(2)?.as_str().parse::<i64>().ok()?;
            Some((kind, value))
        })
        .collect();

    Some((deltas, text_part))
}

/// Parse an outcome hint into a structured effect, applying jitter
///
/// When jitter is enabled a critical-volatility flag is drawn once for the
/// hint (doubling the jitter), then every non-zero value gets its own
/// fluctuation factor in `[-jitter, +jitter]`. The factor scales the value's
/// magnitude and the floored result is added to the signed value.
pub fn parse_outcome_hint<R: Rng + ?Sized>(
    hint: &str,
    config: &GenerationConfig,
    rng: &mut R,
) -> OptionEffect {
    let Some((deltas, text)) = split_hint(hint) else {
        log::debug!("outcome hint without stat segment: {:?}", hint);
        return OptionEffect::text_only(hint);
    };

    let effective_jitter = if config.randomize_effects {
        let chance = config.critical_volatility_chance.clamp(0.0, 1.0);
        let base = config.jitter_percentage.max(0.0);
        if rng.gen_bool(chance) {
            base * 2.0
        } else {
            base
        }
    } else {
        0.0
    };

    let mut cash: i64 = 0;
    let mut health: i64 = 0;
    let mut mental: i64 = 0;
    let mut moral: i64 = 0;

    for (kind, base) in deltas {
        let value = if config.randomize_effects && base != 0 {
            apply_jitter(base, effective_jitter, rng)
        } else {
            base
        };

        match kind {
            StatKind::Cash => cash = cash.saturating_add(value),
            StatKind::Health => health = health.saturating_add(value),
            StatKind::Mental => mental = mental.saturating_add(value),
            StatKind::Moral => moral = moral.saturating_add(value),
        }
    }

    OptionEffect {
        cash,
        health: to_stat(health),
        mental: to_stat(mental),
        moral: to_stat(moral),
        description: text.to_string(),
    }
}

/// Add `floor(|value| * factor)` for a factor drawn from `[-jitter, +jitter]`
#[inline]
pub fn apply_jitter<R: Rng + ?Sized>(value: i64, jitter: f64, rng: &mut R) -> i64 {
    let fluctuation = rng.gen_range(-jitter..=jitter);
    let amount = (value.unsigned_abs() as f64 * fluctuation).floor() as i64;
    value.saturating_add(amount)
}

#[inline]
fn to_stat(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
