//! Platform adapter error types

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlatformError {
    /// Network or HTTP failure against the vendor API
    #[error("Fetch failed for {platform}: {message}")]
    Fetch { platform: String, message: String },

    /// Fetch exceeded the orchestrator's bound
    #[error("Fetch timed out for {platform} after {seconds}s")]
    Timeout { platform: String, seconds: u64 },

    /// Credential or session failure
    #[error("Authentication failed for {platform}: {message}")]
    Auth { platform: String, message: String },

    /// Vendor payload did not match the expected shape
    #[error("Unparseable {platform} payload: {message}")]
    Parse { platform: String, message: String },
}

impl PlatformError {
    /// Short label used in the per-platform outcome report
    pub fn kind(&self) -> &'static str {
        match self {
            PlatformError::Fetch { .. } => "fetch",
            PlatformError::Timeout { .. } => "timeout",
            PlatformError::Auth { .. } => "auth",
            PlatformError::Parse { .. } => "parse",
        }
    }
}

/// Result type for adapter operations
pub type PlatformResult<T> = Result<T, PlatformError>;
