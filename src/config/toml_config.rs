use crate::utils::error::{CheckerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional file overriding the built-in target, state and email settings.
/// SMTP credentials stay in the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub state: StateSection,
    #[serde(default)]
    pub email: EmailSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSection {
    pub url: Option<String>,
    pub marker: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSection {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailSection {
    pub to: Option<String>,
    pub subject: Option<String>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CheckerError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CheckerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// verbatim so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[target]
url = "https://shop.example.com/tickets"
marker = "Sold out"
timeout_seconds = 5

[state]
file = "/var/lib/checker/notified"

[email]
to = "me@example.com"
subject = "Tickets are back"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.target.url.as_deref(),
            Some("https://shop.example.com/tickets")
        );
        assert_eq!(config.target.marker.as_deref(), Some("Sold out"));
        assert_eq!(config.target.timeout_seconds, Some(5));
        assert_eq!(config.target.user_agent, None);
        assert_eq!(config.state.file.as_deref(), Some("/var/lib/checker/notified"));
        assert_eq!(config.email.subject.as_deref(), Some("Tickets are back"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let config = TomlConfig::from_toml_str("[target]\nmarker = \"gone\"\n").unwrap();

        assert_eq!(config.target.marker.as_deref(), Some("gone"));
        assert!(config.state.file.is_none());
        assert!(config.email.to.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CHECKER_TEST_RECIPIENT", "ops@example.com");

        let toml_content = r#"
[email]
to = "${CHECKER_TEST_RECIPIENT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.email.to.as_deref(), Some("ops@example.com"));

        std::env::remove_var("CHECKER_TEST_RECIPIENT");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[email]
to = "${CHECKER_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.email.to.as_deref(),
            Some("${CHECKER_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[target\nurl = ");
        assert!(matches!(result, Err(CheckerError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[state]\nfile = \"flags/notified\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.state.file.as_deref(), Some("flags/notified"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = TomlConfig::from_file("/nonexistent/checker.toml");
        assert!(matches!(result, Err(CheckerError::ConfigError { .. })));
    }
}
