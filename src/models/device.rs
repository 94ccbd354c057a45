use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A push token registered for one device of one user.
///
/// Owned by the device registry; the routing core only ever reads collections
/// of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    pub device_id: Uuid,
    pub user_id: Uuid,
    pub token: String,
}
