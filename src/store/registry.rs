use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::{TokenDirectory, UserDirectory};
use crate::models::DeviceToken;

/// Volatile in-memory device token store.
///
/// Holds at most one token per device id: re-registering a device replaces
/// its previous token. The administrator view is computed through the user
/// directory.
pub struct DeviceRegistry {
    devices: DashMap<Uuid, DeviceToken>,
    users: Arc<dyn UserDirectory>,
}

impl DeviceRegistry {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            devices: DashMap::new(),
            users,
        }
    }

    /// Register (or replace) the push token for a device.
    pub fn register(&self, device: DeviceToken) -> DeviceToken {
        tracing::debug!("Registering device token for device: {}", device.device_id);
        self.devices.insert(device.device_id, device.clone());
        device
    }

    /// Remove a device's token. Returns the removed record, if any.
    pub fn remove(&self, device_id: Uuid) -> Option<DeviceToken> {
        tracing::debug!("Removing device token for device: {}", device_id);
        self.devices.remove(&device_id).map(|(_, device)| device)
    }
}

impl TokenDirectory for DeviceRegistry {
    fn tokens_for_user(&self, user_id: Uuid) -> Vec<String> {
        self.devices
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.token.clone())
            .collect()
    }

    fn all_tokens(&self) -> Vec<String> {
        self.devices.iter().map(|entry| entry.token.clone()).collect()
    }

    fn admin_tokens(&self) -> Vec<String> {
        self.devices
            .iter()
            .filter(|entry| self.users.is_administrator(entry.user_id))
            .map(|entry| entry.token.clone())
            .collect()
    }

    fn total_device_count(&self) -> usize {
        self.devices.len()
    }
}
