use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Page request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("SMTP delivery failed: {0}")]
    SendError(#[from] lettre::transport::smtp::Error),

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Email could not be built: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("State file error at {path}: {source}")]
    StateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Notification,
    State,
    Configuration,
}

impl CheckerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckerError::FetchError(_) => ErrorCategory::Fetch,
            CheckerError::SendError(_)
            | CheckerError::AddressError(_)
            | CheckerError::MessageError(_) => ErrorCategory::Notification,
            CheckerError::StateError { .. } => ErrorCategory::State,
            CheckerError::ConfigError { .. }
            | CheckerError::MissingConfigError { .. }
            | CheckerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Process exit code for this failure. Runtime failures exit with 1 so the
    /// next scheduled run retries; configuration problems follow clap's 2.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Fetch => format!("Fehler beim Abrufen der Seite: {}", self),
            ErrorCategory::Notification => format!("Fehler beim Senden der E-Mail: {}", self),
            ErrorCategory::State => format!("Statusdatei konnte nicht aktualisiert werden: {}", self),
            ErrorCategory::Configuration => format!("Ungültige Konfiguration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Fetch => "Check the target URL and network; the next scheduled run retries",
            ErrorCategory::Notification => {
                "Check SMTP_HOST, SMTP_PORT, SMTP_USER, SMTP_PASS and EMAIL_TO; the next run retries the send"
            }
            ErrorCategory::State => "Make sure the state directory is writable",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
        }
    }

    pub(crate) fn state(path: &std::path::Path, source: std::io::Error) -> Self {
        CheckerError::StateError {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_exit_with_two() {
        let err = CheckerError::MissingConfigError {
            field: "SMTP_USER".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_state_errors_exit_with_one() {
        let err = CheckerError::state(
            std::path::Path::new(".state/notified"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains(".state/notified"));
    }

    #[test]
    fn test_address_errors_are_notification_failures() {
        let err: CheckerError = "not an address"
            .parse::<lettre::Address>()
            .unwrap_err()
            .into();
        assert_eq!(err.category(), ErrorCategory::Notification);
        assert!(err.user_friendly_message().starts_with("Fehler beim Senden"));
    }
}
