use crate::config::CheckerConfig;
use crate::core::notification;
use crate::domain::model::{Availability, RunOutcome};
use crate::domain::ports::{NotificationSender, PageFetcher, StateStore};
use crate::utils::error::Result;

/// True iff the sold-out marker is absent from the page body.
pub fn is_available(body: &str, marker: &str) -> bool {
    !body.contains(marker)
}

/// Everything the checker needs besides its ports.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub url: String,
    pub marker: String,
    pub from: String,
    pub to: String,
    pub subject: String,
}

impl From<&CheckerConfig> for CheckSettings {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            url: config.target.url.clone(),
            marker: config.target.marker.clone(),
            from: config.email_from().to_string(),
            to: config.email.to.clone(),
            subject: config.email.subject.clone(),
        }
    }
}

pub struct Checker<F: PageFetcher, S: NotificationSender, T: StateStore> {
    fetcher: F,
    sender: S,
    state: T,
    settings: CheckSettings,
}

impl<F: PageFetcher, S: NotificationSender, T: StateStore> Checker<F, S, T> {
    pub fn new(fetcher: F, sender: S, state: T, settings: CheckSettings) -> Self {
        Self {
            fetcher,
            sender,
            state,
            settings,
        }
    }

    pub fn state(&self) -> &T {
        &self.state
    }

    pub async fn check_availability(&self) -> Result<Availability> {
        let body = self.fetcher.fetch_page().await?;
        Ok(is_available(&body, &self.settings.marker).into())
    }

    pub async fn send_email(&self) -> Result<()> {
        let notification = notification::compose(
            &self.settings.from,
            &self.settings.to,
            &self.settings.subject,
            &self.settings.url,
            chrono::Local::now(),
        );
        self.sender.send(&notification).await?;

        println!("✅ E-Mail gesendet an {}", self.settings.to);
        tracing::info!("Notification sent to {}", self.settings.to);
        Ok(())
    }

    /// One full check: fetch, then send-and-flag, no-op, or clear-flag.
    /// Any error leaves the flag as it was before the failing step.
    pub async fn run(&self) -> Result<RunOutcome> {
        println!("🔍 Prüfe {} ...", self.settings.url);
        let availability = self.check_availability().await?;
        tracing::debug!("Availability: {:?}", availability);

        match availability {
            Availability::Available => {
                if self.state.is_notified()? {
                    println!("🎉 Plätze verfügbar – E-Mail bereits gesendet, kein erneuter Versand.");
                    tracing::info!("Available, notification already sent");
                    return Ok(RunOutcome::AlreadyNotified);
                }

                println!("🎉 PLÄTZE VERFÜGBAR! Sende E-Mail...");
                self.send_email().await?;
                if let Err(e) = self.state.set_notified() {
                    tracing::warn!("Email sent but state was not recorded; next run resends");
                    return Err(e);
                }
                Ok(RunOutcome::Notified)
            }
            Availability::SoldOut => {
                println!("😴 Noch ausgebucht.");
                tracing::info!("Still sold out");
                self.state.clear_notified()?;
                Ok(RunOutcome::SoldOut)
            }
        }
    }

    /// Fetch and report without sending or touching state.
    pub async fn dry_run(&self) -> Result<RunOutcome> {
        println!("🔍 Prüfe {} ... (Testlauf)", self.settings.url);
        let availability = self.check_availability().await?;
        let notified = self.state.is_notified()?;

        tracing::info!(
            "Dry run: {:?}, notified flag {}",
            availability,
            if notified { "set" } else { "unset" }
        );
        println!(
            "{} (Benachrichtigt: {})",
            if availability.is_available() {
                "🎉 Plätze verfügbar."
            } else {
                "😴 Noch ausgebucht."
            },
            if notified { "ja" } else { "nein" }
        );
        Ok(RunOutcome::DryRun(availability))
    }
}
