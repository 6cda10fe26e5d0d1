//! Config artifact validation tests for appform-config.
// crates/appform-config/tests/config_artifacts.rs
// ============================================================================
// Module: Config Artifact Validation Tests
// Description: Validate config schema and example generators.
// Purpose: Prevent drift between config model and generated artifacts.
// Dependencies: appform-config, jsonschema, toml
// ============================================================================

use appform_config::AppformConfig;
use appform_config::config_schema;
use appform_config::config_toml_example;
use jsonschema::Draft;
use serde_json::json;

type TestResult = Result<(), String>;

#[test]
fn config_schema_accepts_minimal_and_example_configs() -> TestResult {
    let schema = config_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())?;

    if !validator.is_valid(&json!({})) {
        return Err("minimal config should be valid".to_string());
    }

    let toml_str = config_toml_example();
    let toml_value: toml::Value = toml::from_str(&toml_str).map_err(|err| err.to_string())?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| err.to_string())?;
    if !validator.is_valid(&json_value) {
        return Err("example config should validate".to_string());
    }
    Ok(())
}

#[test]
fn config_schema_rejects_unknown_sections_and_formats() -> TestResult {
    let schema = config_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())?;
    if validator.is_valid(&json!({ "server": {} })) {
        return Err("unknown section should be rejected".to_string());
    }
    if validator.is_valid(&json!({ "logging": { "format": "xml" } })) {
        return Err("unknown log format should be rejected".to_string());
    }
    Ok(())
}

#[test]
fn config_example_parses_and_validates() -> TestResult {
    let mut config: AppformConfig =
        toml::from_str(&config_toml_example()).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.catalog.dir.as_deref() != Some("apps") {
        return Err("example catalog dir drifted".to_string());
    }
    Ok(())
}

#[test]
fn config_schema_rejects_blank_strings_like_validate() -> TestResult {
    let schema = config_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())?;
    for (section, key) in [("catalog", "dir"), ("logging", "filter")] {
        let mut inner = serde_json::Map::new();
        inner.insert(key.to_string(), json!("   "));
        let mut blank = serde_json::Map::new();
        blank.insert(section.to_string(), serde_json::Value::Object(inner));
        let blank = serde_json::Value::Object(blank);
        if validator.is_valid(&blank) {
            return Err(format!("blank {section}.{key} should be rejected by the schema"));
        }
        let toml_str = format!("[{section}]\n{key} = \"   \"\n");
        let mut config: AppformConfig = toml::from_str(&toml_str).map_err(|err| err.to_string())?;
        if config.validate().is_ok() {
            return Err(format!("blank {section}.{key} should fail validation"));
        }
    }
    if !validator.is_valid(&json!({ "catalog": { "dir": " apps " } })) {
        return Err("padded catalog.dir should be accepted".to_string());
    }
    Ok(())
}
