//! Webhook notifier
//!
//! Posts each history record as JSON to a configured URL.

use crate::history::record::HistoryRecord;
use crate::notify::error::{NotifyError, NotifyResult};
use crate::notify::traits::Notifier;
use std::time::Duration;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Delivery {
                message: format!("HTTP client construction failed: {}", e),
            })?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, record: &HistoryRecord) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Delivery {
                message: format!("webhook returned {}", status),
            });
        }

        log::debug!(
            "notified webhook of {} change(s) for {}",
            record.delta.len(),
            record.program_key
        );
        Ok(())
    }
}
