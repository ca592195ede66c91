use crate::config::SmtpSettings;
use crate::domain::model::Notification;
use crate::domain::ports::NotificationSender;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

/// Authenticated SMTP submission with STARTTLS.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpSender {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let credentials = Credentials::new(settings.user.clone(), settings.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(settings.timeout_seconds)))
            .build();

        Ok(Self { transport })
    }
}

/// Builds the `multipart/alternative` message (plain text first, HTML second).
pub fn build_message(notification: &Notification) -> Result<Message> {
    let from: Mailbox = notification.from.parse()?;
    let to: Mailbox = notification.to.parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(notification.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            notification.text_body.clone(),
            notification.html_body.clone(),
        ))?;

    Ok(message)
}

#[async_trait]
impl NotificationSender for SmtpSender {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = build_message(notification)?;

        tracing::debug!("Submitting email to {}", notification.to);
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP response code: {}", response.code());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CheckerError;

    fn notification() -> Notification {
        Notification {
            from: "checker@example.com".to_string(),
            to: "me@example.com".to_string(),
            subject: "Plätze frei".to_string(),
            text_body: "plain body".to_string(),
            html_body: "<p>html body</p>".to_string(),
        }
    }

    #[test]
    fn test_message_is_multipart_alternative() {
        let message = build_message(&notification()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("plain body"));
        assert!(raw.contains("<p>html body</p>"));
        assert!(raw.contains("To: me@example.com"));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let mut bad = notification();
        bad.to = "not-an-address".to_string();

        assert!(matches!(
            build_message(&bad),
            Err(CheckerError::AddressError(_))
        ));
    }

    #[test]
    fn test_sender_builds_for_starttls_relay() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: "checker@example.com".to_string(),
            password: "secret".to_string(),
            timeout_seconds: 10,
        };

        assert!(SmtpSender::new(&settings).is_ok());
    }
}
