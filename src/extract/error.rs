//! Configuration error types
//!
//! The only errors an extraction run raises at the top level. Per-platform
//! failures are outcomes, not errors.

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("No platforms enabled; pass at least one of --hackerone, --bugcrowd, --intigriti")]
    NoPlatformsEnabled,

    #[error("{0}")]
    Credentials(String),
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NoPlatformsEnabled => Some(
                "No platforms enabled; pass at least one of --hackerone, --bugcrowd, --intigriti",
            ),
            ConfigError::Credentials(message) => Some(message),
        }
    }
}

/// Result type for run configuration
pub type ConfigResult<T> = Result<T, ConfigError>;
