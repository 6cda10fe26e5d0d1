// crates/appform-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Global tracing subscriber setup for the appform CLI.
// Purpose: Route library diagnostics to stderr in the configured format.
// Dependencies: appform-config, tracing-subscriber
// ============================================================================

//! Logs always go to stderr so schema JSON on stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the configured filter; a malformed
//! `RUST_LOG` is an error rather than a silent fallback.

use std::env;
use std::env::VarError;

use appform_config::LogFormat;
use appform_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a filter is malformed or a subscriber
/// is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = resolve_filter(config, env::var(EnvFilter::DEFAULT_ENV))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    };
    result.map_err(|err| CliError::Logging(format!("tracing init failed: {err}")))
}

/// Returns the `RUST_LOG` filter when set, else the configured directives.
fn resolve_filter(
    config: &LoggingConfig,
    env_value: Result<String, VarError>,
) -> Result<EnvFilter, CliError> {
    match env_value {
        Ok(directives) => EnvFilter::try_new(&directives).map_err(|err| {
            CliError::Logging(format!("invalid {}: {err}", EnvFilter::DEFAULT_ENV))
        }),
        Err(VarError::NotPresent) => EnvFilter::try_new(&config.filter)
            .map_err(|err| CliError::Logging(format!("invalid logging.filter: {err}"))),
        Err(VarError::NotUnicode(_)) => Err(CliError::Logging(format!(
            "{} is not valid unicode",
            EnvFilter::DEFAULT_ENV
        ))),
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions use panic-based helpers for clarity."
    )]

    use std::env::VarError;

    use appform_config::LoggingConfig;

    use super::resolve_filter;
    use crate::CliError;

    #[test]
    fn unset_env_uses_configured_filter() {
        let config = LoggingConfig {
            filter: "warn,appform_core=debug".to_string(),
            ..LoggingConfig::default()
        };
        let filter = resolve_filter(&config, Err(VarError::NotPresent)).unwrap();
        assert!(filter.to_string().contains("appform_core=debug"));
    }

    #[test]
    fn env_filter_overrides_config() {
        let filter =
            resolve_filter(&LoggingConfig::default(), Ok("appform_cli=trace".to_string())).unwrap();
        assert!(filter.to_string().contains("appform_cli=trace"));
    }

    #[test]
    fn malformed_env_filter_is_reported() {
        let result = resolve_filter(&LoggingConfig::default(), Ok("appform_core=loud".to_string()));
        let Err(CliError::Logging(message)) = result else {
            panic!("expected malformed RUST_LOG to be rejected");
        };
        assert!(message.contains("invalid RUST_LOG"));
    }

    #[test]
    fn malformed_config_filter_is_reported() {
        let config = LoggingConfig {
            filter: "appform_core=loud".to_string(),
            ..LoggingConfig::default()
        };
        let result = resolve_filter(&config, Err(VarError::NotPresent));
        assert!(matches!(result, Err(CliError::Logging(_))));
    }
}
