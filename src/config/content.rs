//! Event archetype content structures

use super::player::{CarType, RentType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Narrative category of an event, used by the presentation layer for mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Work,
    Love,
    Housing,
    Health,
    Moral,
    #[default]
    General,
}

/// One line of dialogue shown before the options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

/// Option as authored: a label and a raw outcome hint like `"[Cash +1000, HP -10] text"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionTemplate {
    pub label: String,
    pub outcome_hint: String,
}

/// Eligibility predicate over the player's housing and vehicle
///
/// A present field restricts the archetype to the listed values; an absent
/// field places no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Requirements {
    pub rent_type: Option<SmallVec<[RentType; 3]>>,
    pub car_type: Option<SmallVec<[CarType; 3]>>,
}

impl Requirements {
    /// Check whether a housing/vehicle combination satisfies every present field
    #[inline]
    pub fn is_met(&self, rent_type: RentType, car_type: CarType) -> bool {
        if let Some(ref rents) = self.rent_type {
            if !rents.contains(&rent_type) {
                return false;
            }
        }
        if let Some(ref cars) = self.car_type {
            if !cars.contains(&car_type) {
                return false;
            }
        }
        true
    }
}

/// Content-authored event template, not yet instantiated
#[derive(Debug, Clone, Deserialize)]
pub struct EventArchetype {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    pub options: SmallVec<[OptionTemplate; 2]>,
    pub requirements: Option<Requirements>,
    /// Image key resolved by the presentation layer
    #[serde(default)]
    pub image: String,
}

impl EventArchetype {
    /// Archetypes without requirements are always eligible
    #[inline]
    pub fn is_eligible(&self, rent_type: RentType, car_type: CarType) -> bool {
        self.requirements
            .as_ref()
            .map_or(true, |req| req.is_met(rent_type, car_type))
    }
}

/// Archetype pools for a single stage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StagePools {
    pub stage: usize,
    /// Stage theme title
    #[serde(default)]
    pub title: String,
    /// Stage theme summary
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub core: Vec<EventArchetype>,
    #[serde(default)]
    pub random: Vec<EventArchetype>,
}

/// Stage title and summary for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTheme {
    pub title: String,
    pub summary: String,
}
