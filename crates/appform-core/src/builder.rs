// crates/appform-core/src/builder.rs
// ============================================================================
// Module: Form-Schema Builder
// Description: Converts app descriptors into form-widget object schemas.
// Purpose: Provide the parameter-type mapping behind job-submission forms.
// Dependencies: serde_json, tracing, appform-core::descriptor, appform-core::schema
// ============================================================================

//! ## Overview
//! [`build_form_schema`] is a pure transformation. Every schema has a required
//! `name` field; a `parameters` group and an `inputs` group are added only
//! when the descriptor declares any. Parameter kinds map to field types as
//! follows:
//!
//! | kind             | field type | extra                              |
//! |------------------|------------|------------------------------------|
//! | `bool`, `flag`   | boolean    |                                    |
//! | `enumeration`    | string     | `enum` from the `enum_values` keys |
//! | `number`         | number     |                                    |
//! | anything else    | string     |                                    |
//!
//! Missing display metadata yields fields without title or description.
//! Fallbacks are logged at debug level and are never errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use tracing::debug;

use crate::descriptor::AppDescriptor;
use crate::descriptor::FieldDetails;
use crate::descriptor::InputSpec;
use crate::descriptor::Parameter;
use crate::descriptor::ParameterKind;
use crate::schema::FieldSchema;
use crate::schema::FieldType;
use crate::schema::FormSchema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Property key of the job name field.
pub const NAME_KEY: &str = "name";
/// Property key of the parameters group.
pub const PARAMETERS_KEY: &str = "parameters";
/// Property key of the inputs group.
pub const INPUTS_KEY: &str = "inputs";
/// Title of the job name field.
pub const NAME_TITLE: &str = "Job name";
/// Description of the job name field.
pub const NAME_DESCRIPTION: &str = "A recognizable name for this job";
/// Title of the parameters group.
pub const PARAMETERS_TITLE: &str = "Parameters";
/// Title of the inputs group.
pub const INPUTS_TITLE: &str = "Inputs";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the form schema for an application descriptor.
#[must_use]
pub fn build_form_schema(app: &AppDescriptor) -> FormSchema {
    let mut root = FieldSchema::object(None);
    root.insert_property(NAME_KEY, name_field());
    root.require(NAME_KEY);

    if !app.parameters.is_empty() {
        let mut group = FieldSchema::object(Some(PARAMETERS_TITLE));
        for param in &app.parameters {
            group.insert_property(param.id.clone(), parameter_field(param));
        }
        root.insert_property(PARAMETERS_KEY, group);
    }

    if !app.inputs.is_empty() {
        let mut group = FieldSchema::object(Some(INPUTS_TITLE));
        for input in &app.inputs {
            group.insert_property(input.id.clone(), input_field(input));
        }
        root.insert_property(INPUTS_KEY, group);
    }

    debug!(
        app_id = app.id.as_deref().unwrap_or(""),
        parameters = app.parameters.len(),
        inputs = app.inputs.len(),
        "built form schema"
    );
    FormSchema::from_root(root)
}

/// Returns the job name field.
fn name_field() -> FieldSchema {
    FieldSchema::new(FieldType::String)
        .with_text(Some(NAME_TITLE.to_string()), Some(NAME_DESCRIPTION.to_string()))
}

/// Derives the field for one parameter from its declared kind.
fn parameter_field(param: &Parameter) -> FieldSchema {
    let (title, description) = details_text(param.details.as_ref());
    let field = match param.kind() {
        ParameterKind::Bool | ParameterKind::Flag => FieldSchema::new(FieldType::Boolean),
        ParameterKind::Enumeration => {
            let entries = param.value.as_ref().and_then(|value| value.enum_values.as_deref());
            FieldSchema::new(FieldType::String).with_enum(enum_keys(&param.id, entries))
        }
        ParameterKind::Number => FieldSchema::new(FieldType::Number),
        ParameterKind::String => FieldSchema::new(FieldType::String),
        ParameterKind::Other(raw) => {
            debug!(param_id = %param.id, kind = %raw, "unknown parameter type, using string");
            FieldSchema::new(FieldType::String)
        }
    };
    field.with_text(title, description)
}

/// Derives the field for one input file.
fn input_field(input: &InputSpec) -> FieldSchema {
    let (title, description) = details_text(input.details.as_ref());
    FieldSchema::new(FieldType::String).with_text(title, description)
}

/// Copies label and description verbatim.
fn details_text(details: Option<&FieldDetails>) -> (Option<String>, Option<String>) {
    details.map_or((None, None), |details| (details.label.clone(), details.description.clone()))
}

/// Collects the first key of each `enum_values` entry, in order.
///
/// Entries that are not non-empty objects carry no value and are skipped.
fn enum_keys(param_id: &str, entries: Option<&[Value]>) -> Vec<String> {
    let Some(entries) = entries else {
        debug!(param_id, "enumeration without enum_values");
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let key = entry.as_object().and_then(|object| object.keys().next()).cloned();
            if key.is_none() {
                debug!(param_id, "skipping enum entry without a key");
            }
            key
        })
        .collect()
}

#[cfg(test)]
mod tests;
