mod device;
mod notification;
mod webhook;

pub use device::DeviceToken;
pub use notification::Notification;
pub use webhook::{
    CommentDetails, IssueDetails, MediaDetails, RequestDetails, RequestEventPayload,
};
