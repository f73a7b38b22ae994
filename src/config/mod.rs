//! Configuration module for game content and rules
//!
//! This module handles deserialization of the story database (event
//! archetypes grouped by stage) and the tunable rule set.

mod content;
mod player;
mod rules;

pub use content::*;
pub use player::*;
pub use rules::*;

use crate::error::{Result, UrbanSurvivalError};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;

/// Story database shipped with the crate
const BUILTIN_STORY: &str = include_str!("../../content/story.json");

/// Built-in content, parsed once on first use
static BUILTIN_CONTENT: Lazy<Arc<ContentRepository>> = Lazy::new(|| {
    // An empty repository yields placeholder events for every stage
    let repo = deserialize_content(BUILTIN_STORY).unwrap_or_else(|e| {
        log::error!("built-in story content failed to load: {}", e);
        ContentRepository::default()
    });
    Arc::new(repo)
});

/// Get a shared handle to the built-in story content
pub fn builtin_content() -> Arc<ContentRepository> {
    BUILTIN_CONTENT.clone()
}

/// Read-only table of event archetypes keyed by stage
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    stages: AHashMap<usize, StagePools>,
}

/// Document shape of the story database
#[derive(Debug, Deserialize)]
struct StoryDocument {
    stages: Vec<StagePools>,
}

impl ContentRepository {
    /// Build a repository from stage pools, rejecting duplicate stage indices
    pub fn from_stages(stages: Vec<StagePools>) -> Result<Self> {
        let mut map = AHashMap::with_capacity(stages.len());
        for pools in stages {
            let stage = pools.stage;
            if map.insert(stage, pools).is_some() {
                return Err(UrbanSurvivalError::DuplicateStage(stage));
            }
        }
        Ok(Self { stages: map })
    }

    /// Look up the archetype pools for a stage
    #[inline]
    pub fn stage_archetypes(&self, stage: usize) -> Option<&StagePools> {
        self.stages.get(&stage)
    }

    /// Title and summary of a stage, if the stage exists
    pub fn stage_theme(&self, stage: usize) -> Option<StageTheme> {
        self.stages.get(&stage).map(|pools| StageTheme {
            title: pools.title.clone(),
            summary: pools.summary.clone(),
        })
    }

    /// Find an archetype by id within a stage's core pool
    pub fn core_archetype(&self, stage: usize, id: &str) -> Option<&EventArchetype> {
        self.stages
            .get(&stage)
            .and_then(|pools| pools.core.iter().find(|a| a.id == id))
    }

    /// Number of stages with content
    #[inline]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Deserialize the story database from a JSON document
/// Expected format: {"stages": [{"stage": 0, "core": [...], "random": [...]}, ...]}
pub fn deserialize_content(json: &str) -> Result<ContentRepository> {
    let document: StoryDocument = serde_json::from_str(json)
        .map_err(|e| UrbanSurvivalError::ContentParse(e.to_string()))?;
    ContentRepository::from_stages(document.stages)
}
