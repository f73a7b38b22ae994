//! Urban Survival Core - narrative life-sim engine
//!
//! A player allocates a starting budget, then lives through six stages of
//! randomly drawn story events. Each choice moves cash and three bounded
//! stats; each stage closes with a settlement of salary, bills and investment
//! returns, until the player either collapses or reaches the final verdict.
//!
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod error;
pub mod event;
pub mod outcome;
pub mod simulator;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use config::{builtin_content, ContentRepository, GameRules};
pub use error::{Result, UrbanSurvivalError};
pub use simulator::{Allocation, CycleOutcome, GameSession, GameState, SessionStatus};
pub use stats::{Ending, EndingType};
