#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_path, validate_range,
    validate_url, Validate,
};

pub const DEFAULT_URL: &str = "https://www.coachingbyed.de/jetzt-buchen/";
pub const DEFAULT_MARKER: &str = "Alle Plätze sind ausgebucht";
pub const DEFAULT_STATE_FILE: &str = ".state/notified";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; AvailabilityChecker/1.0)";
pub const DEFAULT_SUBJECT: &str = "🎉 Coaching-Platz verfügbar bei ED Coaching!";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// The page being watched and how to recognise "sold out".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    pub url: String,
    pub marker: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub timeout_seconds: u64,
}

// Keeps the password out of `--verbose` config dumps.
impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub to: String,
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub target: TargetSettings,
    pub state_file: String,
    pub smtp: SmtpSettings,
    pub email: EmailSettings,
}

impl CheckerConfig {
    /// Sender address; the SMTP login doubles as the From mailbox.
    pub fn email_from(&self) -> &str {
        &self.smtp.user
    }
}

impl Validate for CheckerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("target.url", &self.target.url)?;
        validate_non_empty_string("target.marker", &self.target.marker)?;
        validate_range("target.timeout_seconds", self.target.timeout_seconds, 1, 300)?;
        validate_path("state.file", &self.state_file)?;
        validate_non_empty_string("SMTP_HOST", &self.smtp.host)?;
        validate_range("SMTP_PORT", self.smtp.port, 1, u16::MAX)?;
        validate_email_address("SMTP_USER", &self.smtp.user)?;
        validate_non_empty_string("SMTP_PASS", &self.smtp.password)?;
        validate_email_address("EMAIL_TO", &self.email.to)?;
        validate_non_empty_string("email.subject", &self.email.subject)?;
        Ok(())
    }
}
