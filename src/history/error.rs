//! History engine error types

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Storage collaborator failure; the prior snapshot stays intact
    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    /// Internal synchronisation failure
    #[error("History engine internal error: {message}")]
    Internal { message: String },
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
