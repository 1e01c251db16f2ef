//! Notification error types

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {message}")]
    Delivery { message: String },
}

/// Result type for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;
