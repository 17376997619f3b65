use crate::adapters::{HttpIntake, InMemoryIntake};
use crate::domain::ports::ComplaintIntake;
use crate::utils::error::{JansunwaiError, Result};
use crate::utils::validation::{
    validate_id_prefix, validate_positive_number, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeMode {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub mode: IntakeMode,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub mock: MockIntakeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockIntakeConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_start_sequence")]
    pub start_sequence: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_prefix() -> String {
    crate::adapters::in_memory::DEFAULT_PREFIX.to_string()
}

fn default_start_sequence() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            mode: IntakeMode::default(),
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
            mock: MockIntakeConfig::default(),
        }
    }
}

impl Default for MockIntakeConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            start_sequence: default_start_sequence(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl PortalConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(JansunwaiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| JansunwaiError::ConfigParseError {
            field: "portal config".to_string(),
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| JansunwaiError::ConfigParseError {
            field: "env substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("intake.timeout_seconds", self.intake.timeout_seconds, 1)?;

        match self.intake.mode {
            IntakeMode::Http => {
                let endpoint = validate_required_field("intake.endpoint", &self.intake.endpoint)?;
                validate_url("intake.endpoint", endpoint)?;
            }
            IntakeMode::Mock => {
                validate_id_prefix("intake.mock.prefix", &self.intake.mock.prefix)?;
            }
        }

        let levels = ["trace", "debug", "info", "warn", "error"];
        if !levels.contains(&self.logging.level.as_str()) {
            return Err(JansunwaiError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", levels.join(", ")),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.intake.timeout_seconds)
    }

    /// Builds the intake collaborator the configuration points at.
    pub fn build_intake(&self) -> Result<Arc<dyn ComplaintIntake>> {
        match self.intake.mode {
            IntakeMode::Mock => Ok(Arc::new(InMemoryIntake::new(
                self.intake.mock.prefix.clone(),
                self.intake.mock.start_sequence,
            ))),
            IntakeMode::Http => {
                let endpoint = validate_required_field("intake.endpoint", &self.intake.endpoint)?;
                Ok(Arc::new(HttpIntake::new(endpoint.clone(), self.timeout())?))
            }
        }
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config.intake.mode, IntakeMode::Mock);
        assert_eq!(config.intake.timeout_seconds, 10);
        assert_eq!(config.intake.mock.prefix, "JUN");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_http_config() {
        let toml_content = r#"
[intake]
mode = "http"
endpoint = "https://intake.example.gov.in/complaints"
timeout_seconds = 3

[logging]
level = "debug"
json = true
"#;

        let config = PortalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.intake.mode, IntakeMode::Http);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JANSUNWAI_TEST_INTAKE_URL", "https://test.intake.in/v1");

        let toml_content = r#"
[intake]
mode = "http"
endpoint = "${JANSUNWAI_TEST_INTAKE_URL}"
"#;

        let config = PortalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.intake.endpoint.as_deref(),
            Some("https://test.intake.in/v1")
        );

        std::env::remove_var("JANSUNWAI_TEST_INTAKE_URL");
    }

    #[test]
    fn test_http_mode_requires_endpoint() {
        let config = PortalConfig::from_toml_str("[intake]\nmode = \"http\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(JansunwaiError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unresolved_variable_fails_url_validation() {
        let toml_content = r#"
[intake]
mode = "http"
endpoint = "${JANSUNWAI_SURELY_UNSET_VARIABLE}"
"#;
        let config = PortalConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_prefix_and_level_rejected() {
        let config =
            PortalConfig::from_toml_str("[intake.mock]\nprefix = \"J-1\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = PortalConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[intake.mock]\nprefix = \"IND\"\nstart_sequence = 42\n")
            .unwrap();

        let config = PortalConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.intake.mock.prefix, "IND");
        assert_eq!(config.intake.mock.start_sequence, 42);
    }

    #[test]
    fn test_broken_toml_is_parse_error() {
        let err = PortalConfig::from_toml_str("[intake\nmode = ").unwrap_err();
        assert!(matches!(err, JansunwaiError::ConfigParseError { .. }));
    }
}
