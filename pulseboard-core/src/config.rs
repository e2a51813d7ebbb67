//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/pulseboard/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/pulseboard/` (~/.config/pulseboard/)
//! - State/Logs: `$XDG_STATE_HOME/pulseboard/` (~/.local/state/pulseboard/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Advisor (chat relay) configuration (optional; the `ask` surface is
    /// unavailable without it)
    #[serde(default)]
    pub advisor: Option<AdvisorConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Advisor relay configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AdvisorConfig {
    /// Provider type
    pub provider: AdvisorProvider,
    /// Model to use
    pub model: String,
    /// API endpoint (optional, uses default for provider)
    pub endpoint: Option<String>,
    /// API key (can also use env var)
    pub api_key: Option<String>,
    /// Upstream request timeout in seconds. Without this a stalled
    /// upstream would block the conversation turn indefinitely.
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

/// Supported advisor providers
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorProvider {
    Ollama,
    Claude,
    OpenAI,
}

impl AdvisorProvider {
    /// Returns the default endpoint for this provider
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            AdvisorProvider::Ollama => "http://localhost:11434",
            AdvisorProvider::Claude => "https://api.anthropic.com",
            AdvisorProvider::OpenAI => "https://api.openai.com",
        }
    }
}

impl AdvisorConfig {
    /// Resolve the endpoint to use, falling back to the provider default.
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.provider.default_endpoint().to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config(
                "advisor.model must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "advisor.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_advisor_timeout() -> u64 {
    120
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Export configuration
#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    /// Directory where CSV/PDF reports are written
    #[serde(default = "default_export_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if let Some(advisor) = &config.advisor {
            advisor.validate()?;
        }

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/pulseboard/config.toml` (~/.config/pulseboard/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("pulseboard").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/pulseboard/` (~/.local/state/pulseboard/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("pulseboard")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/pulseboard/pulseboard.log` (~/.local/state/pulseboard/pulseboard.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("pulseboard.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.advisor.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[advisor]
provider = "openai"
model = "gpt-4o"
api_key = "sk-test"

[logging]
level = "debug"

[export]
output_dir = "/tmp/reports"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let advisor = config.advisor.unwrap();
        assert_eq!(advisor.provider, AdvisorProvider::OpenAI);
        assert_eq!(advisor.model, "gpt-4o");
        assert_eq!(advisor.timeout_secs, 120);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_advisor_provider_endpoints() {
        assert_eq!(
            AdvisorProvider::Ollama.default_endpoint(),
            "http://localhost:11434"
        );
        assert_eq!(
            AdvisorProvider::Claude.default_endpoint(),
            "https://api.anthropic.com"
        );
    }

    #[test]
    fn test_resolved_endpoint_strips_trailing_slash() {
        let config = AdvisorConfig {
            provider: AdvisorProvider::OpenAI,
            model: "gpt-4o".to_string(),
            endpoint: Some("https://proxy.example.com/v1/".to_string()),
            api_key: None,
            timeout_secs: 120,
        };
        assert_eq!(config.resolved_endpoint(), "https://proxy.example.com/v1");
    }

    #[test]
    fn test_advisor_validation() {
        let config = AdvisorConfig {
            provider: AdvisorProvider::OpenAI,
            model: "".to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: 120,
        };
        assert!(config.validate().is_err());

        let config = AdvisorConfig {
            provider: AdvisorProvider::OpenAI,
            model: "gpt-4o".to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}
