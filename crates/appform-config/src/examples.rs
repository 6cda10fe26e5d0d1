// crates/appform-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! Canonical `appform.toml` example, kept in sync with the schema.

/// Returns a canonical example `appform.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[catalog]
dir = "apps"
public_only = false
max_descriptor_bytes = 1048576

[output]
pretty = true

[logging]
format = "pretty"
filter = "info,appform_core=debug"
"#,
    )
}
