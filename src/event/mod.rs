//! Event processing module
//!
//! Selection of archetypes per stage and their transformation into
//! playable events with resolved effects.

mod processor;
pub mod selector;


pub use processor::*;
pub use selector::*;
