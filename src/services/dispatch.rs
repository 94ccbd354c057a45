//! Composes validation, targeting and delivery over notification batches.

use std::sync::Arc;

use crate::models::{Notification, RequestEventPayload};
use crate::services::sender::{DeliverySender, SendReceipt};
use crate::services::{mapper, resolver, validation};
use crate::store::{TokenDirectory, UserDirectory};

/// Outcome of one dispatch call.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The request was understood but there was nothing to deliver.
    Accepted,
    /// Per-notification receipts from the delivery sender, in batch order.
    Sent(Vec<SendReceipt>),
}

/// Entry point for both the direct notification API and the webhook.
pub struct DispatchService {
    tokens: Arc<dyn TokenDirectory>,
    users: Arc<dyn UserDirectory>,
    sender: Arc<dyn DeliverySender>,
}

impl DispatchService {
    pub fn new(
        tokens: Arc<dyn TokenDirectory>,
        users: Arc<dyn UserDirectory>,
        sender: Arc<dyn DeliverySender>,
    ) -> Self {
        Self {
            tokens,
            users,
            sender,
        }
    }

    /// Validate, resolve and deliver a batch of notifications.
    ///
    /// Notifications that fail validation or resolve to zero destinations are
    /// dropped from the batch without error: push delivery is best-effort and
    /// must never fail the media server's request path.
    pub async fn dispatch(&self, notifications: Vec<Notification>) -> DispatchOutcome {
        if self.tokens.total_device_count() == 0 {
            tracing::info!("There are currently no devices set up to receive push notifications");
            return DispatchOutcome::Accepted;
        }

        let mut batch: Vec<Notification> = Vec::new();
        for mut notification in notifications {
            let title = notification.title.as_deref().unwrap_or("");
            let body = notification.body.as_deref().unwrap_or("");
            if !validation::is_sendable(title, body) {
                tracing::debug!("Dropping notification without usable title/body");
                continue;
            }

            resolver::resolve(&mut notification, self.tokens.as_ref(), self.users.as_ref());
            if notification.destination_tokens.is_empty() {
                tracing::debug!("Dropping notification with no matching destinations");
                continue;
            }

            batch.push(notification);
        }

        tracing::info!("Received {} valid notifications", batch.len());

        if batch.is_empty() {
            return DispatchOutcome::Accepted;
        }

        tracing::debug!("Posting notifications...");
        match self.sender.send(&batch).await {
            Ok(receipts) => DispatchOutcome::Sent(receipts),
            Err(e) => {
                // A transport-level failure is reported per item, never
                // propagated and never retried here.
                tracing::warn!("Delivery sender failed for the whole batch: {}", e);
                let detail = e.to_string();
                DispatchOutcome::Sent(
                    batch
                        .iter()
                        .map(|_| SendReceipt::failed(detail.clone()))
                        .collect(),
                )
            }
        }
    }

    /// Normalize a webhook event and deliver it as a one-notification batch.
    pub async fn dispatch_webhook(&self, payload: RequestEventPayload) -> DispatchOutcome {
        tracing::debug!(
            "Received webhook event - type: {:?}, event: {:?}, subject: {:?}",
            payload.notification_type,
            payload.event,
            payload.subject
        );

        match mapper::map_to_notification(&payload) {
            Some(notification) => {
                tracing::info!("Processing webhook event as push notification");
                self.dispatch(vec![notification]).await
            }
            None => {
                tracing::debug!("Webhook event ignored");
                DispatchOutcome::Accepted
            }
        }
    }
}
