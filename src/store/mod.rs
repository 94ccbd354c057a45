//! Read-only directory seams over the media server's user accounts and the
//! registered device push tokens, plus a volatile in-memory registry.

mod registry;

pub use registry::DeviceRegistry;

use uuid::Uuid;

/// Read-only view over registered device push tokens.
///
/// Implementations are treated as snapshots for the duration of one resolve
/// call; the routing core never writes through this interface.
pub trait TokenDirectory: Send + Sync {
    fn tokens_for_user(&self, user_id: Uuid) -> Vec<String>;
    fn all_tokens(&self) -> Vec<String>;
    fn admin_tokens(&self) -> Vec<String>;
    fn total_device_count(&self) -> usize;
}

/// Read-only view over the media server's user accounts.
pub trait UserDirectory: Send + Sync {
    fn find_user_id_by_username(&self, username: &str) -> Option<Uuid>;
    fn is_administrator(&self, user_id: Uuid) -> bool;
}
