use crate::domain::model::Notification;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetches the watched page body. Non-2xx responses are errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self) -> Result<String>;
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// The persisted "notified" bit.
pub trait StateStore {
    fn is_notified(&self) -> Result<bool>;
    fn set_notified(&self) -> Result<()>;
    fn clear_notified(&self) -> Result<()>;
}
