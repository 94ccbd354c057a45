use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single push notification request.
///
/// Created by a producer (the direct API body or the webhook normalizer),
/// populated with destination tokens exactly once by the targeting resolver,
/// consumed exactly once by the dispatcher, then discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    pub title: Option<String>,
    pub body: Option<String>,

    /// Explicit single-user target. Takes precedence over `username`.
    pub user_id: Option<Uuid>,

    /// Resolved to a user id via the user directory; ignored when `user_id`
    /// is set.
    pub username: Option<String>,

    /// When true the notification targets administrator accounts.
    pub is_admin: bool,

    /// Deduplicated device tokens, empty until the resolver runs.
    #[serde(skip)]
    pub destination_tokens: Vec<String>,
}
