//! Push notification routing core for a media server.
//!
//! Fans notifications out to registered client devices from two entry points:
//! the direct API batch shape and the request-management tool's webhook.
//! Transport, storage and the push gateway itself live behind the
//! [`store::TokenDirectory`], [`store::UserDirectory`] and
//! [`services::sender::DeliverySender`] seams; this crate owns event
//! deduplication, webhook normalization, validation, targeting and dispatch.

pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DeviceToken, Notification, RequestEventPayload};
pub use services::dedup::{DedupCache, DedupPolicy, DedupWindow};
pub use services::dispatch::{DispatchOutcome, DispatchService};
pub use services::sender::{DeliverySender, SendReceipt};
pub use store::{DeviceRegistry, TokenDirectory, UserDirectory};
