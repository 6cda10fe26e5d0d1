// crates/appform-config/src/config.rs
// ============================================================================
// Module: App Form Configuration
// Description: Configuration loading and validation for the appform CLI.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: appform-core, serde, toml, tracing
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! An explicitly named file must exist; when no file is named and the default
//! `appform.toml` is absent, built-in defaults apply.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use appform_core::MAX_DESCRIPTOR_BYTES;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub(crate) const DEFAULT_CONFIG_NAME: &str = "appform.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "APPFORM_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest per-descriptor size limit that may be configured.
pub(crate) const MAX_DESCRIPTOR_BYTES_LIMIT: usize = 16 * 1024 * 1024;
/// Maximum length of a log filter directive string.
pub(crate) const MAX_LOG_FILTER_LENGTH: usize = 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// `appform.toml` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppformConfig {
    /// Descriptor catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Schema output configuration.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppformConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: `path`, then [`CONFIG_ENV_VAR`], then `appform.toml`
    /// in the working directory. Only the last may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        Self::load_resolved(&resolved, explicit)
    }

    /// Loads configuration from a resolved path.
    ///
    /// A missing file yields defaults only when `explicit` is false.
    fn load_resolved(resolved: &Path, explicit: bool) -> Result<Self, ConfigError> {
        validate_path(resolved)?;
        if !explicit && !resolved.exists() {
            debug!(path = %resolved.display(), "no config file, using defaults");
            let mut config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        debug!(path = %resolved.display(), "loaded config");
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Descriptor catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory of JSON descriptors.
    #[serde(default)]
    pub dir: Option<String>,
    /// Only list apps published to all users.
    #[serde(default)]
    pub public_only: bool,
    /// Per-descriptor size limit in bytes.
    #[serde(default = "default_max_descriptor_bytes")]
    pub max_descriptor_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            public_only: false,
            max_descriptor_bytes: default_max_descriptor_bytes(),
        }
    }
}

impl CatalogConfig {
    /// Validates catalog configuration.
    fn validate(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = &mut self.dir {
            validate_path_string("catalog.dir", dir)?;
            *dir = dir.trim().to_string();
        }
        if self.max_descriptor_bytes == 0 {
            return Err(ConfigError::Invalid(
                "catalog.max_descriptor_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_descriptor_bytes > MAX_DESCRIPTOR_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "catalog.max_descriptor_bytes exceeds {MAX_DESCRIPTOR_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Returns the catalog directory as a path.
    #[must_use]
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(PathBuf::from)
    }
}

/// Schema output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// Single-line human-readable output.
    Compact,
    /// Structured JSON lines.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Filter directives (`RUST_LOG` syntax); `RUST_LOG` overrides when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

impl LoggingConfig {
    /// Validates logging configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must be non-empty".to_string()));
        }
        if self.filter.len() > MAX_LOG_FILTER_LENGTH {
            return Err(ConfigError::Invalid("logging.filter exceeds max length".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default per-descriptor size limit.
pub(crate) const fn default_max_descriptor_bytes() -> usize {
    MAX_DESCRIPTOR_BYTES
}

/// Default pretty-print setting.
pub(crate) const fn default_pretty() -> bool {
    true
}

/// Default log filter.
pub(crate) fn default_log_filter() -> String {
    "info".to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the CLI flag, then `env_path`, then the
/// default file name.
///
/// The flag is true when the path was named explicitly.
fn resolve_path(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
