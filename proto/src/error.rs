//! Why a rule regeneration attempt produced no usable Rule Set

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModifyError {
    /// Response was not valid JSON or was missing a required field
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A numeric field was outside its schema bounds
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfBounds {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A numeric field was NaN or infinite
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    /// The generator could not be reached or failed
    #[error("transport error: {0}")]
    Transport(String),

    /// No response arrived before the fallback deadline
    #[error("no response within {0:?}")]
    TimedOut(std::time::Duration),
}

impl ModifyError {
    /// Short title for the user-facing message
    pub fn title(&self) -> &'static str {
        match self {
            ModifyError::Malformed(_) | ModifyError::OutOfBounds { .. } | ModifyError::NonFinite { .. } => {
                "Invalid response format"
            }
            ModifyError::Transport(_) | ModifyError::TimedOut(_) => "Game modification failed",
        }
    }
}
