//! Player statistics and survival checks

mod state;
mod survival;

#[cfg(test)]
mod property_tests;

pub use state::*;
pub use survival::*;
