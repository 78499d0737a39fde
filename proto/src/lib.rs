//! Rule regeneration contract
//!
//! The request body is the complete active Rule Set; the response carries a
//! short description plus the complete replacement Rule Set. Both travel as
//! JSON with camelCase field names.

pub mod error;
pub mod schema;

pub use error::ModifyError;

use game_core::RuleSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// Ask for the rules to be rewritten, starting from `game_state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifyRequest {
    pub game_state: RuleSet,
}

impl ModifyRequest {
    pub fn new(game_state: RuleSet) -> Self {
        Self { game_state }
    }

    pub fn to_json(&self) -> Result<String, ModifyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModifyError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// ============================================================================
// Response
// ============================================================================

/// New rules plus the line announced to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyResponse {
    pub description: String,
    pub game_state: RuleSet,
}

impl ModifyResponse {
    pub fn to_json(&self) -> Result<String, ModifyError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and bound-check a response. Missing fields are an error; no
    /// field is ever defaulted.
    pub fn from_json(raw: &str) -> Result<Self, ModifyError> {
        let response: Self = serde_json::from_str(raw)?;
        schema::validate(&response.game_state)?;
        Ok(response)
    }
}
