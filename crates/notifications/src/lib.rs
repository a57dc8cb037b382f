//! Notifications domain module.
//!
//! The per-recipient notification document. Dispatch (who gets one, and
//! writing them out) lives in `stockroom-infra`.

pub mod notification;

pub use notification::{Notification, NotificationType};
