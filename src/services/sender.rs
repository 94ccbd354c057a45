use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::Notification;

/// Result of delivering one notification from a batch.
#[derive(Debug, Clone, Serialize)]
pub struct SendReceipt {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SendReceipt {
    pub fn ok() -> Self {
        Self {
            success: true,
            detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: Some(detail.into()),
        }
    }
}

/// Transmission to the push gateway.
///
/// Implementations own the wire format, timeouts and any retry policy. The
/// routing core makes a single call per batch of fully-resolved notifications
/// and surfaces the per-item results unmodified, in batch order.
#[async_trait]
pub trait DeliverySender: Send + Sync {
    async fn send(&self, batch: &[Notification]) -> AppResult<Vec<SendReceipt>>;
}
