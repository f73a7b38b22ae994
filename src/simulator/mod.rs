//! Game session simulation: state, transitions and cycle settlement

mod allocation;
mod engine;
mod investment;
mod session;
mod settlement;
mod state;

#[cfg(test)]
mod property_tests;

pub use allocation::*;
pub use investment::*;
pub use session::*;
pub use settlement::*;
pub use state::*;
