//! Normalizes webhook events from the media request-management tool into the
//! internal notification shape.

use crate::i18n;
use crate::models::{Notification, RequestEventPayload};

const UNKNOWN_USER: &str = "Unknown User";
const UNKNOWN_MEDIA: &str = "Unknown Media";

/// Mapping rule for a recognized event kind.
struct EventRule {
    kinds: &'static [&'static str],
    is_admin: bool,
    /// Whether the notification targets the user who made the request.
    targets_requester: bool,
    title_key: &'static str,
    body_key: &'static str,
}

const EVENT_RULES: &[EventRule] = &[
    EventRule {
        kinds: &["TEST", "TEST_NOTIFICATION", "MEDIA_PENDING"],
        is_admin: true,
        targets_requester: false,
        title_key: "request.pending.title",
        body_key: "request.pending.body",
    },
    EventRule {
        kinds: &["MEDIA_AUTO_APPROVED"],
        is_admin: true,
        targets_requester: false,
        title_key: "request.auto_approved.title",
        body_key: "request.auto_approved.body",
    },
    EventRule {
        kinds: &["MEDIA_FAILED"],
        is_admin: true,
        targets_requester: false,
        title_key: "request.failed.title",
        body_key: "request.failed.body",
    },
    EventRule {
        kinds: &["MEDIA_APPROVED"],
        is_admin: false,
        targets_requester: true,
        title_key: "request.approved.title",
        body_key: "request.approved.body",
    },
    EventRule {
        kinds: &["MEDIA_DECLINED"],
        is_admin: false,
        targets_requester: true,
        title_key: "request.declined.title",
        body_key: "request.declined.body",
    },
    EventRule {
        kinds: &["MEDIA_AVAILABLE"],
        is_admin: false,
        targets_requester: true,
        title_key: "request.available.title",
        body_key: "request.available.body",
    },
];

/// Convert a webhook payload into a notification, or `None` when the event
/// should be ignored.
///
/// Issue-thread events are never pushed. Unrecognized event types fall back
/// to the payload's raw subject/message, addressed to the requesting user, so
/// future event kinds still reach the requester instead of being dropped.
pub fn map_to_notification(payload: &RequestEventPayload) -> Option<Notification> {
    let raw_type = payload.notification_type.as_deref().unwrap_or("");
    if raw_type.trim().is_empty() {
        tracing::warn!("Invalid webhook payload: missing notification type");
        return None;
    }

    let event_type = raw_type.to_uppercase();
    if event_type.contains("ISSUE") {
        tracing::debug!("Ignoring issue-related event: {}", raw_type);
        return None;
    }

    let media_subject = payload
        .subject
        .clone()
        .unwrap_or_else(|| UNKNOWN_MEDIA.to_string());
    let requested_by = payload
        .request
        .as_ref()
        .and_then(|r| r.requested_by_username.clone())
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    tracing::debug!(
        "Processing webhook event - type: '{}', media: '{}', requested by: '{}'",
        event_type,
        media_subject,
        requested_by
    );

    let mut notification = Notification {
        is_admin: false,
        ..Default::default()
    };

    match EVENT_RULES
        .iter()
        .find(|rule| rule.kinds.contains(&event_type.as_str()))
    {
        Some(rule) => {
            notification.is_admin = rule.is_admin;
            if rule.targets_requester {
                notification.username = Some(requested_by.clone());
            }
            notification.title = Some(i18n::t(rule.title_key));
            notification.body = Some(i18n::t_with(
                rule.body_key,
                &[("user", &requested_by), ("media", &media_subject)],
            ));
        }
        None => {
            tracing::warn!(
                "Unknown webhook event type: '{}', forwarding original content to the requesting user",
                event_type
            );
            notification.title = payload.subject.clone();
            notification.body = payload.message.clone();
            notification.username = Some(requested_by);
        }
    }

    Some(notification)
}
