//! Turns a notification's targeting fields into a deduplicated set of device
//! tokens.

use std::collections::HashSet;

use crate::models::Notification;
use crate::store::{TokenDirectory, UserDirectory};

/// Populate `destination_tokens` for one notification.
///
/// The branches are additive: an explicit user target and the admin flag can
/// both contribute tokens. The broadcast branch only runs when no user target
/// was specified at all; a username that fails to resolve still suppresses
/// it, and admin notifications never broadcast to non-admins.
pub fn resolve(
    notification: &mut Notification,
    tokens: &dyn TokenDirectory,
    users: &dyn UserDirectory,
) {
    let mut collected: Vec<String> = Vec::new();

    let has_username = notification
        .username
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());

    if notification.user_id.is_some() || has_username {
        let user_id = notification.user_id.or_else(|| {
            notification
                .username
                .as_deref()
                .and_then(|name| users.find_user_id_by_username(name))
        });

        if let Some(user_id) = user_id {
            tracing::debug!("Getting device tokens associated to user: {}", user_id);
            collected.extend(tokens.tokens_for_user(user_id));
        }
    } else if !notification.is_admin {
        tracing::debug!("No user target provided. Getting all device tokens...");
        collected.extend(tokens.all_tokens());
    }

    if notification.is_admin {
        let admin_tokens = tokens.admin_tokens();
        tracing::debug!(
            "Notification is for admins - adding {} admin device tokens",
            admin_tokens.len()
        );
        collected.extend(admin_tokens);
    }

    let mut seen = HashSet::new();
    collected.retain(|token| seen.insert(token.clone()));

    tracing::debug!(
        "Notification routing summary - is_admin: {}, username: '{}', user_id: '{}', tokens: {}",
        notification.is_admin,
        notification.username.as_deref().unwrap_or("N/A"),
        notification
            .user_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        collected.len()
    );

    notification.destination_tokens = collected;
}
