// crates/appform-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builders for appform.toml.
// Purpose: Provide canonical validation schema for config artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for `appform.toml`. Defaults and
//! limits are taken from the config model so the two cannot drift.

use serde_json::Value;
use serde_json::json;

use crate::config::MAX_DESCRIPTOR_BYTES_LIMIT;
use crate::config::MAX_LOG_FILTER_LENGTH;
use crate::config::MAX_TOTAL_PATH_LENGTH;
use crate::config::default_log_filter;
use crate::config::default_max_descriptor_bytes;
use crate::config::default_pretty;

/// Returns the JSON schema for `appform.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "appform://schemas/config.schema.json",
        "title": "App Form Configuration",
        "description": "Configuration for the appform form-schema CLI.",
        "type": "object",
        "properties": {
            "catalog": catalog_config_schema(),
            "output": output_config_schema(),
            "logging": logging_config_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Schema for the catalog section.
fn catalog_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "dir": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_TOTAL_PATH_LENGTH,
                "pattern": "\\S",
                "description": "Directory of JSON app descriptors."
            },
            "public_only": {
                "type": "boolean",
                "default": false,
                "description": "Only list apps published to all users."
            },
            "max_descriptor_bytes": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_DESCRIPTOR_BYTES_LIMIT,
                "default": default_max_descriptor_bytes(),
                "description": "Per-descriptor size limit in bytes."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the output section.
fn output_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "pretty": {
                "type": "boolean",
                "default": default_pretty(),
                "description": "Pretty-print JSON output."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the logging section.
fn logging_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "format": {
                "type": "string",
                "enum": ["pretty", "compact", "json"],
                "default": "pretty",
                "description": "Log output format."
            },
            "filter": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_LOG_FILTER_LENGTH,
                "pattern": "\\S",
                "default": default_log_filter(),
                "description": "Filter directives in RUST_LOG syntax."
            }
        },
        "additionalProperties": false
    })
}
