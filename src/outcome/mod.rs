//! Outcome hint parsing module
//!
//! This module turns compact hints like "[Cash +1000, HP -10] text" into
//! structured option effects, with optional randomized jitter.

mod parser;


pub use parser::*;
