pub mod checker;
pub mod notification;

pub use crate::domain::model::{Availability, Notification, RunOutcome};
pub use crate::domain::ports::{NotificationSender, PageFetcher, StateStore};
pub use crate::utils::error::Result;
