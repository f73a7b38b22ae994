//! Archetype to playable event processing

use crate::config::{DialogueLine, EventArchetype, EventCategory, GenerationConfig};
use crate::outcome::{parse_outcome_hint, OptionEffect};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Id of the placeholder event used when a stage has no content
pub const FALLBACK_EVENT_ID: &str = "fallback";

/// Pool an event was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Core,
    Random,
}

/// Option with its effect already resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOption {
    pub label: String,
    pub effect: OptionEffect,
}

/// Played instance of an archetype
///
/// Effects are resolved once, when the event is created, and never
/// recomputed for the rest of the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub category: EventCategory,
    pub title: String,
    pub description: String,
    pub options: SmallVec<[GameOption; 2]>,
    pub dialogue: Vec<DialogueLine>,
    pub image: String,
}

/// Turn an archetype into a playable event, resolving every option's hint
pub fn process_archetype<R: Rng + ?Sized>(
    archetype: &EventArchetype,
    kind: EventKind,
    config: &GenerationConfig,
    rng: &mut R,
) -> GameEvent {
    let options = archetype
        .options
        .iter()
        .map(|opt| GameOption {
            label: opt.label.clone(),
            effect: parse_outcome_hint(&opt.outcome_hint, config, rng),
        })
        .collect();

    GameEvent {
        id: archetype.id.clone(),
        kind,
        category: archetype.category,
        title: archetype.title.clone(),
        description: archetype.description.clone(),
        options,
        dialogue: archetype.dialogue.clone(),
        image: archetype.image.clone(),
    }
}

/// Placeholder event for a stage without content, so play can continue
pub fn fallback_event() -> GameEvent {
    GameEvent {
        id: FALLBACK_EVENT_ID.to_string(),
        kind: EventKind::Core,
        category: EventCategory::General,
        title: "Data missing".to_string(),
        description: "The system could not load this stage.".to_string(),
        options: smallvec![GameOption {
            label: "Continue".to_string(),
            effect: OptionEffect::default(),
        }],
        dialogue: Vec::new(),
        image: String::new(),
    }
}
