use super::toml_config::TomlConfig;
use super::{
    CheckerConfig, EmailSettings, SmtpSettings, TargetSettings, DEFAULT_SMTP_HOST,
    DEFAULT_SMTP_PORT, DEFAULT_STATE_FILE, DEFAULT_SUBJECT,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use std::path::PathBuf;

/// Command line, with each secret also readable from the environment.
/// Precedence: flag / env var, then the TOML file, then built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "availability-checker")]
#[command(about = "Emails once when a sold-out booking page has free places again")]
pub struct CliConfig {
    /// Optional TOML file with [target], [state] and [email] sections
    #[arg(short, long, env = "CHECKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Page to watch
    #[arg(long)]
    pub url: Option<String>,

    /// Text whose presence means "sold out"
    #[arg(long)]
    pub marker: Option<String>,

    /// Marker file recording that the notification was sent
    #[arg(long)]
    pub state_file: Option<String>,

    /// HTTP request timeout
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long, env = "SMTP_HOST", default_value = DEFAULT_SMTP_HOST)]
    pub smtp_host: String,

    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    #[arg(long, env = "EMAIL_TO")]
    pub email_to: Option<String>,

    /// Check and report only; never send or touch the state file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit JSON log lines instead of compact text
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    /// Merges flags, environment and the optional TOML file.
    pub fn resolve(&self) -> Result<CheckerConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        self.merge(file)
    }

    fn merge(&self, file: TomlConfig) -> Result<CheckerConfig> {
        let defaults = TargetSettings::default();
        let target = TargetSettings {
            url: self.url.clone().or(file.target.url).unwrap_or(defaults.url),
            marker: self
                .marker
                .clone()
                .or(file.target.marker)
                .unwrap_or(defaults.marker),
            timeout_seconds: self
                .timeout_seconds
                .or(file.target.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            user_agent: file.target.user_agent.unwrap_or(defaults.user_agent),
        };

        let user = validate_required_field("SMTP_USER", &self.smtp_user)?.clone();
        let password = validate_required_field("SMTP_PASS", &self.smtp_pass)?.clone();
        let to = self.email_to.clone().or(file.email.to);
        let to = validate_required_field("EMAIL_TO", &to)?.clone();

        Ok(CheckerConfig {
            smtp: SmtpSettings {
                host: self.smtp_host.clone(),
                port: self.smtp_port,
                user,
                password,
                timeout_seconds: target.timeout_seconds,
            },
            target,
            state_file: self
                .state_file
                .clone()
                .or(file.state.file)
                .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string()),
            email: EmailSettings {
                to,
                subject: self
                    .subject
                    .clone()
                    .or(file.email.subject)
                    .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MARKER, DEFAULT_URL};
    use crate::utils::error::CheckerError;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["availability-checker"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    fn with_credentials(extra: &[&str]) -> CliConfig {
        let mut args = vec![
            "--smtp-user",
            "checker@example.com",
            "--smtp-pass",
            "secret",
            "--email-to",
            "me@example.com",
        ];
        args.extend_from_slice(extra);
        parse(&args)
    }

    #[test]
    fn test_defaults_match_built_in_target() {
        let config = with_credentials(&[]).merge(TomlConfig::default()).unwrap();

        assert_eq!(config.target.url, DEFAULT_URL);
        assert_eq!(config.target.marker, DEFAULT_MARKER);
        assert_eq!(config.target.timeout_seconds, 20);
        assert_eq!(config.state_file, DEFAULT_STATE_FILE);
        assert_eq!(config.email.subject, DEFAULT_SUBJECT);
        assert_eq!(config.email_from(), "checker@example.com");
    }

    #[test]
    fn test_missing_credentials_fail() {
        let cli = CliConfig {
            smtp_user: None,
            smtp_pass: None,
            email_to: None,
            ..with_credentials(&[])
        };

        let result = cli.merge(TomlConfig::default());
        assert!(matches!(
            result,
            Err(CheckerError::MissingConfigError { field }) if field == "SMTP_USER"
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[target]
url = "https://file.example.com"
marker = "file marker"

[email]
subject = "from file"
"#,
        )
        .unwrap();

        let config = with_credentials(&["--url", "https://flag.example.com"])
            .merge(file)
            .unwrap();

        assert_eq!(config.target.url, "https://flag.example.com");
        assert_eq!(config.target.marker, "file marker");
        assert_eq!(config.email.subject, "from file");
    }

    #[test]
    fn test_recipient_can_come_from_file() {
        let file = TomlConfig::from_toml_str("[email]\nto = \"file@example.com\"\n").unwrap();
        let cli = CliConfig {
            email_to: None,
            ..with_credentials(&[])
        };

        let config = cli.merge(file).unwrap();
        assert_eq!(config.email.to, "file@example.com");
    }

    #[test]
    fn test_smtp_port_flag() {
        let config = with_credentials(&["--smtp-port", "2525", "--smtp-host", "mail.local"])
            .merge(TomlConfig::default())
            .unwrap();

        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.host, "mail.local");
    }
}
