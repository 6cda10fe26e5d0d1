// crates/appform-cli/src/main.rs
// ============================================================================
// Module: App Form CLI Entry Point
// Description: Command dispatcher for form-schema generation and app listing.
// Purpose: Drive the form-schema builder from descriptor files and catalogs.
// Dependencies: appform-config, appform-core, clap, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The `appform` CLI builds form schemas from descriptor files or catalog
//! ids, lists catalog apps, and checks `appform.toml`. Results go to stdout as
//! JSON; diagnostics go to stderr through `tracing`.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod logging;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use appform_config::AppformConfig;
use appform_config::ConfigError;
use appform_config::config_schema;
use appform_config::config_toml_example;
use appform_core::AppDescriptor;
use appform_core::AppRef;
use appform_core::AppsService;
use appform_core::CatalogError;
use appform_core::DescriptorError;
use appform_core::DirectoryCatalog;
use appform_core::ListOptions;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "appform", about = "Build job-submission form schemas from app descriptors.")]
struct Cli {
    /// Config file path (overrides `APPFORM_CONFIG`).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the form schema for an app.
    Schema(SchemaCommand),
    /// App catalog utilities.
    Apps {
        /// Selected apps subcommand.
        #[command(subcommand)]
        command: AppsCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `appform schema`.
#[derive(Args, Debug)]
struct SchemaCommand {
    /// Descriptor JSON file to build from.
    #[arg(long, value_name = "FILE", conflicts_with = "app_id", required_unless_present = "app_id")]
    descriptor: Option<PathBuf>,
    /// Catalog app id to resolve and build from.
    #[arg(long, value_name = "ID")]
    app_id: Option<String>,
    /// Descriptor directory (overrides `catalog.dir`).
    #[arg(long, value_name = "DIR")]
    catalog: Option<PathBuf>,
    /// Write the schema to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

/// Apps subcommands.
#[derive(Subcommand, Debug)]
enum AppsCommand {
    /// List catalog apps.
    List {
        /// Descriptor directory (overrides `catalog.dir`).
        #[arg(long, value_name = "DIR")]
        catalog: Option<PathBuf>,
        /// Only list apps published to all users.
        #[arg(long, conflicts_with = "all")]
        public_only: bool,
        /// List every app, overriding `catalog.public_only`.
        #[arg(long)]
        all: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the config file.
    Check,
    /// Print the config JSON schema.
    Schema,
    /// Print an example config file.
    Example,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Descriptor file failed to parse.
    #[error("{path}: {source}")]
    Descriptor {
        /// Descriptor file path.
        path: String,
        /// Parse failure.
        source: DescriptorError,
    },
    /// Invalid flag combination or missing setting.
    #[error("usage error: {0}")]
    Usage(String),
    /// Reading inputs or writing outputs failed.
    #[error("io error: {0}")]
    Io(String),
    /// JSON rendering failed.
    #[error("json error: {0}")]
    Json(String),
    /// Logging could not be initialized.
    #[error("logging error: {0}")]
    Logging(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = AppformConfig::load(cli.config.as_deref())
        .map_err(CliError::from)
        .and_then(|config| {
            logging::init_tracing(&config.logging)?;
            run(cli.command, &config, &mut std::io::stdout().lock())
        });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "appform: {err}");
    ExitCode::FAILURE
}

/// Executes a parsed command, writing results to `out`.
fn run(command: Commands, config: &AppformConfig, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Commands::Schema(args) => command_schema(args, config, out),
        Commands::Apps {
            command: AppsCommand::List {
                catalog,
                public_only,
                all,
            },
        } => {
            let options = ListOptions {
                public_only: !all && (public_only || config.catalog.public_only),
            };
            command_apps_list(catalog, options, config, out)
        }
        Commands::Config {
            command,
        } => command_config(&command, config, out),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Builds a form schema from a descriptor file or catalog id.
fn command_schema(
    args: SchemaCommand,
    config: &AppformConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let app = match (args.descriptor, args.app_id) {
        (Some(path), None) => AppRef::Descriptor(read_descriptor(&path, config)?),
        (None, Some(app_id)) => AppRef::Id(app_id),
        _ => {
            return Err(CliError::Usage(
                "exactly one of --descriptor or --app-id is required".to_string(),
            ));
        }
    };
    let schema = match app {
        AppRef::Descriptor(descriptor) => appform_core::build_form_schema(&descriptor),
        app_ref @ AppRef::Id(_) => {
            let service = AppsService::new(directory_catalog(args.catalog, config)?);
            service.form_schema(app_ref)?
        }
    };
    let pretty = config.output.pretty && !args.compact;
    match args.out {
        Some(path) => {
            let mut file = fs::File::create(&path)
                .map_err(|err| CliError::Io(format!("{}: {err}", path.display())))?;
            write_json(&mut file, &schema, pretty)?;
            info!(path = %path.display(), "wrote form schema");
            Ok(())
        }
        None => write_json(out, &schema, pretty),
    }
}

/// Lists catalog apps.
fn command_apps_list(
    catalog: Option<PathBuf>,
    options: ListOptions,
    config: &AppformConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let service = AppsService::new(directory_catalog(catalog, config)?);
    let apps = service.list(&options)?;
    write_json(out, &apps, config.output.pretty)
}

/// Runs a config subcommand.
fn command_config(
    command: &ConfigCommand,
    config: &AppformConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        ConfigCommand::Check => write_line(out, "config ok"),
        ConfigCommand::Schema => write_json(out, &config_schema(), config.output.pretty),
        ConfigCommand::Example => out
            .write_all(config_toml_example().as_bytes())
            .map_err(|err| CliError::Io(err.to_string())),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the directory catalog from the flag or the config.
fn directory_catalog(
    flag: Option<PathBuf>,
    config: &AppformConfig,
) -> Result<DirectoryCatalog, CliError> {
    let root = flag.or_else(|| config.catalog.dir_path()).ok_or_else(|| {
        CliError::Usage("no catalog directory; pass --catalog or set catalog.dir".to_string())
    })?;
    Ok(DirectoryCatalog::new(root).with_max_descriptor_bytes(config.catalog.max_descriptor_bytes))
}

/// Reads a descriptor file under the configured size limit.
fn read_descriptor(path: &Path, config: &AppformConfig) -> Result<AppDescriptor, CliError> {
    let display = path.display().to_string();
    let limit = config.catalog.max_descriptor_bytes;
    let metadata =
        fs::metadata(path).map_err(|err| CliError::Io(format!("{display}: {err}")))?;
    if !usize::try_from(metadata.len()).is_ok_and(|len| len <= limit) {
        return Err(CliError::Descriptor {
            path: display,
            source: DescriptorError::TooLarge {
                actual: usize::try_from(metadata.len()).unwrap_or(usize::MAX),
                limit,
            },
        });
    }
    let bytes = fs::read(path).map_err(|err| CliError::Io(format!("{display}: {err}")))?;
    AppDescriptor::from_json_slice_with_limit(&bytes, limit).map_err(|source| {
        CliError::Descriptor {
            path: display,
            source,
        }
    })
}

/// Writes a value as JSON followed by a newline.
fn write_json<T: Serialize + ?Sized>(
    out: &mut dyn Write,
    value: &T,
    pretty: bool,
) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|err| CliError::Json(err.to_string()))?;
    write_line(out, &text)
}

/// Writes one line to `out`.
fn write_line(out: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(out, "{line}").map_err(|err| CliError::Io(err.to_string()))
}
