//! Traits for outbound notification

use crate::history::record::HistoryRecord;
use crate::notify::error::NotifyResult;

/// Sink for recorded scope changes
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one recorded change; the caller logs failures and moves on
    async fn notify(&self, record: &HistoryRecord) -> NotifyResult<()>;
}

/// No-op notifier used when no webhook is configured
pub struct NullNotifier;

#[async_trait::async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _record: &HistoryRecord) -> NotifyResult<()> {
        Ok(())
    }
}
