//! Model validation error types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Scope is missing required field '{field}'")]
    MissingScopeField { field: &'static str },

    #[error("Program is missing required field '{field}'")]
    MissingProgramField { field: &'static str },
}

impl ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        // Malformed models come from vendor payloads, not from the user
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for model construction
pub type ValidationResult<T> = Result<T, ValidationError>;
