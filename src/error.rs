//! Error types for the urban survival engine

use thiserror::Error;

/// Main error type for the urban survival engine
///
/// In-game conditions (missing stage content, malformed outcome hints,
/// rejected asset adjustments, terminal states) never produce an error;
/// these variants only cover loading, validation and binding edges.
#[derive(Error, Debug)]
pub enum UrbanSurvivalError {
    #[error("Content parse error: {0}")]
    ContentParse(String),

    #[error("Rules parse error: {0}")]
    RulesParse(String),

    #[error("Duplicate stage in content: {0}")]
    DuplicateStage(usize),

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),

    #[error("Option index {index} out of range for event with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("No active event")]
    NoActiveEvent,

    #[error("Simulation error: {0}")]
    SimulationError(String),
}

#[cfg(feature = "python")]
impl From<UrbanSurvivalError> for pyo3::PyErr {
    fn from(err: UrbanSurvivalError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};

        match err {
            UrbanSurvivalError::ContentParse(_)
            | UrbanSurvivalError::RulesParse(_)
            | UrbanSurvivalError::DuplicateStage(_)
            | UrbanSurvivalError::UnknownName { .. }
            | UrbanSurvivalError::InvalidAllocation(_) => PyValueError::new_err(err.to_string()),
            UrbanSurvivalError::OptionOutOfRange { .. } | UrbanSurvivalError::NoActiveEvent => {
                PyIndexError::new_err(err.to_string())
            }
            UrbanSurvivalError::SimulationError(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the urban survival engine
pub type Result<T> = std::result::Result<T, UrbanSurvivalError>;
