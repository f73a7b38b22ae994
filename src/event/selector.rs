//! Stage event selection

use super::processor::{fallback_event, process_archetype, EventKind, GameEvent};
use crate::config::{ContentRepository, EventArchetype, GameRules, PlayerConfig};
use rand::seq::SliceRandom;
use rand::Rng;

/// Inputs the selector needs from the current game state
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub stage: usize,
    pub config: &'a PlayerConfig,
    /// Total assets minus debt, used by the escape override
    pub net_worth: i64,
}

/// Keep archetypes whose requirements admit the player's housing and vehicle
#[inline]
pub fn filter_archetypes<'a>(
    archetypes: &'a [EventArchetype],
    config: &PlayerConfig,
) -> Vec<&'a EventArchetype> {
    archetypes
        .iter()
        .filter(|a| a.is_eligible(config.rent_type, config.car_type))
        .collect()
}

/// Draw up to `count` archetypes uniformly without replacement
#[inline]
pub fn draw_archetypes<'a, R: Rng + ?Sized>(
    eligible: &[&'a EventArchetype],
    count: usize,
    rng: &mut R,
) -> Vec<&'a EventArchetype> {
    eligible
        .choose_multiple(rng, count.min(eligible.len()))
        .copied()
        .collect()
}

/// Force the escape archetype to the front of the core selection
///
/// The archetype is looked up by id in the stage's full core pool. Any copy
/// already drawn is removed, and the list is cut back to `cap`, evicting from
/// the end.
pub fn apply_escape_override<'a>(
    selected: Vec<&'a EventArchetype>,
    core_pool: &'a [EventArchetype],
    escape_id: &str,
    cap: usize,
) -> Vec<&'a EventArchetype> {
    let Some(escape) = core_pool.iter().find(|a| a.id == escape_id) else {
        log::warn!("escape archetype {:?} not found in core pool", escape_id);
        return selected;
    };

    let mut forced = Vec::with_capacity(selected.len() + 1);
    forced.push(escape);
    forced.extend(selected.into_iter().filter(|a| a.id != escape.id));
    forced.truncate(cap);
    forced
}

/// Generate the ordered event list for a stage
///
/// Missing stage content degrades to a single placeholder event.
pub fn select_stage_events<R: Rng + ?Sized>(
    content: &ContentRepository,
    ctx: SelectionContext<'_>,
    rules: &GameRules,
    rng: &mut R,
) -> Vec<GameEvent> {
    let Some(pools) = content.stage_archetypes(ctx.stage) else {
        log::warn!("no story data for stage {}", ctx.stage);
        return vec![fallback_event()];
    };

    let selection = &rules.selection;
    let available_core = filter_archetypes(&pools.core, ctx.config);
    let available_random = filter_archetypes(&pools.random, ctx.config);

    let mut selected_core = draw_archetypes(&available_core, selection.core_per_stage, rng);
    let selected_random = draw_archetypes(&available_random, selection.random_per_stage, rng);

    if ctx.stage == rules.final_stage() && ctx.net_worth > selection.escape_wealth_threshold {
        selected_core = apply_escape_override(
            selected_core,
            &pools.core,
            &selection.escape_event_id,
            selection.core_per_stage,
        );
    }

    log::debug!(
        "stage {}: drew {}/{} core and {}/{} random archetypes",
        ctx.stage,
        selected_core.len(),
        available_core.len(),
        selected_random.len(),
        available_random.len()
    );

    let mut events: Vec<GameEvent> = Vec::with_capacity(selected_core.len() + selected_random.len());
    for archetype in selected_core {
        events.push(process_archetype(archetype, EventKind::Core, &rules.generation, rng));
    }
    for archetype in selected_random {
        events.push(process_archetype(archetype, EventKind::Random, &rules.generation, rng));
    }

    events.shuffle(rng);
    events
}
