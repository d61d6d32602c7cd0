//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `autorun.toml` in the working directory (or the file named by
//! `AUTORUN_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.
//!
//! The target instance is deliberately allowed to be missing: an
//! unconfigured target is reported on each notification, not at startup.

use serde::Deserialize;

use autorun_app::services::dispatch_service::{DEFAULT_DOCUMENT_PREFIX, DispatchPolicy};
use autorun_domain::command::{DEFAULT_COMMENT, DEFAULT_TIMEOUT_SECS};
use autorun_domain::target::TargetId;

const DEFAULT_CONFIG_PATH: &str = "autorun.toml";

/// SSM accepts execution timeouts between 30 seconds and 30 days.
const TIMEOUT_RANGE: std::ops::RangeInclusive<u32> = 30..=2_592_000;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target instance settings.
    pub target: TargetConfig,
    /// Dispatch policy settings.
    pub dispatch: DispatchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// The managed instance documents are dispatched to.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Instance identifier (e.g. `i-0123456789abcdef0`).
    pub instance_id: Option<String>,
}

/// Dispatch policy configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Only documents whose name starts with this prefix are dispatched.
    pub document_prefix: String,
    /// Execution timeout passed with each command, in seconds.
    pub timeout_secs: u32,
    /// Annotation attached to each command.
    pub comment: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("AUTORUN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Legacy variable name, kept for existing deployments.
        if let Some(val) = lookup("OPENVPN_INSTANCE_ID") {
            self.target.instance_id = Some(val);
        }
        if let Some(val) = lookup("AUTORUN_TARGET_INSTANCE_ID") {
            self.target.instance_id = Some(val);
        }
        if let Some(val) = lookup("AUTORUN_DOCUMENT_PREFIX") {
            self.dispatch.document_prefix = val;
        }
        if let Some(val) = lookup("AUTORUN_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.dispatch.timeout_secs = secs;
            }
        }
        if let Some(val) = lookup("AUTORUN_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.document_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "document_prefix must be non-empty".to_string(),
            ));
        }
        if !TIMEOUT_RANGE.contains(&self.dispatch.timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "timeout_secs must be within {}..={}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Raw configured instance id; resolved per notification.
    #[must_use]
    pub fn target_instance_id(&self) -> Option<String> {
        self.target.instance_id.clone()
    }

    /// Whether the configured instance id resolves to a usable target.
    ///
    /// A whitespace-only value counts as unset.
    #[must_use]
    pub fn target_configured(&self) -> bool {
        TargetId::resolve(self.target.instance_id.as_deref()).is_ok()
    }

    /// Dispatch policy derived from the `[dispatch]` section.
    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            document_prefix: self.dispatch.document_prefix.clone(),
            timeout_secs: self.dispatch.timeout_secs,
            comment: self.dispatch.comment.clone(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "autorund=info,autorun_app=info,autorun_adapter_ssm=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
