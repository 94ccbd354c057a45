use serde::Deserialize;

/// Inbound webhook payload from the media request-management tool.
///
/// The payload is untrusted: every field is optional and versions of the
/// sender disagree about which nested blocks are present, so nothing here may
/// be assumed non-null. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestEventPayload {
    pub notification_type: Option<String>,
    pub event: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub image: Option<String>,
    pub media: Option<MediaDetails>,
    pub request: Option<RequestDetails>,
    pub issue: Option<IssueDetails>,
    pub comment: Option<CommentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaDetails {
    pub media_type: Option<String>,
    #[serde(rename = "tmdbId")]
    pub tmdb_id: Option<String>,
    #[serde(rename = "tvdbId")]
    pub tvdb_id: Option<String>,
    pub status: Option<String>,
    pub status4k: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestDetails {
    pub request_id: Option<String>,
    #[serde(rename = "requestedBy_email")]
    pub requested_by_email: Option<String>,
    #[serde(rename = "requestedBy_username")]
    pub requested_by_username: Option<String>,
    #[serde(rename = "requestedBy_avatar")]
    pub requested_by_avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueDetails {
    pub issue_id: Option<String>,
    pub issue_type: Option<String>,
    pub issue_status: Option<String>,
    #[serde(rename = "reportedBy_email")]
    pub reported_by_email: Option<String>,
    #[serde(rename = "reportedBy_username")]
    pub reported_by_username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentDetails {
    pub comment_message: Option<String>,
    #[serde(rename = "commentedBy_email")]
    pub commented_by_email: Option<String>,
    #[serde(rename = "commentedBy_username")]
    pub commented_by_username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_payload() {
        let payload: RequestEventPayload = serde_json::from_str(
            r#"{
                "notification_type": "MEDIA_APPROVED",
                "subject": "Dune",
                "request": {"requestedBy_username": "alice"},
                "extra": [{"name": "something", "value": "ignored"}]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.notification_type.as_deref(), Some("MEDIA_APPROVED"));
        assert_eq!(payload.subject.as_deref(), Some("Dune"));
        assert_eq!(
            payload
                .request
                .as_ref()
                .and_then(|r| r.requested_by_username.as_deref()),
            Some("alice")
        );
        assert!(payload.message.is_none());
        assert!(payload.media.is_none());
    }

    #[test]
    fn deserializes_empty_object() {
        let payload: RequestEventPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.notification_type.is_none());
        assert!(payload.request.is_none());
    }
}
