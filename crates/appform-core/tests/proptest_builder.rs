// crates/appform-core/tests/proptest_builder.rs
// ============================================================================
// Module: Form-Schema Builder Property-Based Tests
// Description: Property tests for builder determinism and shape invariants.
// Purpose: Detect panics and ordering drift across arbitrary descriptors.
// ============================================================================

//! Property-based tests for form-schema builder invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use appform_core::AppDescriptor;
use appform_core::FieldDetails;
use appform_core::FieldType;
use appform_core::InputSpec;
use appform_core::Parameter;
use appform_core::ParameterKind;
use appform_core::ParameterValue;
use appform_core::build_form_schema;
use proptest::prelude::*;
use serde_json::Value;

fn kind_strategy() -> impl Strategy<Value = Option<ParameterKind>> {
    prop_oneof![
        Just(None),
        Just(Some(ParameterKind::Bool)),
        Just(Some(ParameterKind::Flag)),
        Just(Some(ParameterKind::Enumeration)),
        Just(Some(ParameterKind::Number)),
        Just(Some(ParameterKind::String)),
        "[a-z]{1,8}".prop_map(|raw| Some(ParameterKind::from(raw))),
    ]
}

fn details_strategy() -> impl Strategy<Value = Option<FieldDetails>> {
    prop::option::of((prop::option::of(".{0,12}"), prop::option::of(".{0,24}")).prop_map(
        |(label, description)| FieldDetails {
            label,
            description,
        },
    ))
}

fn enum_values_strategy() -> impl Strategy<Value = Option<Vec<Value>>> {
    prop::option::of(prop::collection::vec(
        "[a-z]{1,6}".prop_map(|key| {
            let mut entry = serde_json::Map::new();
            entry.insert(key, Value::from("label"));
            Value::Object(entry)
        }),
        0 .. 5,
    ))
}

fn parameter_strategy() -> impl Strategy<Value = Parameter> {
    ("[a-z]{1,6}", details_strategy(), kind_strategy(), enum_values_strategy()).prop_map(
        |(id, details, kind, enum_values)| Parameter {
            id,
            details,
            value: Some(ParameterValue {
                kind,
                enum_values,
            }),
        },
    )
}

fn input_strategy() -> impl Strategy<Value = InputSpec> {
    ("[a-z]{1,6}", details_strategy()).prop_map(|(id, details)| InputSpec {
        id,
        details,
    })
}

fn descriptor_strategy() -> impl Strategy<Value = AppDescriptor> {
    (
        prop::collection::vec(parameter_strategy(), 0 .. 8),
        prop::collection::vec(input_strategy(), 0 .. 6),
    )
        .prop_map(|(parameters, inputs)| AppDescriptor {
            parameters,
            inputs,
            ..AppDescriptor::default()
        })
}

/// Returns ids in first-seen order without duplicates.
fn unique_in_order<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

proptest! {
    #[test]
    fn build_is_deterministic(app in descriptor_strategy()) {
        prop_assert_eq!(build_form_schema(&app), build_form_schema(&app));
    }

    #[test]
    fn groups_present_iff_descriptor_lists_non_empty(app in descriptor_strategy()) {
        let schema = build_form_schema(&app);
        prop_assert_eq!(schema.parameters().is_some(), !app.parameters.is_empty());
        prop_assert_eq!(schema.inputs().is_some(), !app.inputs.is_empty());
        prop_assert_eq!(schema.name().map(|field| field.field_type), Some(FieldType::String));
    }

    #[test]
    fn property_keys_follow_descriptor_order(app in descriptor_strategy()) {
        let schema = build_form_schema(&app);
        if let Some(group) = schema.parameters() {
            let expected = unique_in_order(app.parameters.iter().map(|param| param.id.as_str()));
            prop_assert_eq!(group.property_keys(), expected);
        }
        if let Some(group) = schema.inputs() {
            let expected = unique_in_order(app.inputs.iter().map(|input| input.id.as_str()));
            prop_assert_eq!(group.property_keys(), expected);
        }
    }

    #[test]
    fn enum_present_iff_parameter_is_enumeration(app in descriptor_strategy()) {
        let schema = build_form_schema(&app);
        if let Some(group) = schema.parameters() {
            let mut checked: Vec<&str> = Vec::new();
            // Duplicate ids resolve to their last definition.
            for param in app.parameters.iter().rev() {
                if checked.contains(&param.id.as_str()) {
                    continue;
                }
                checked.push(param.id.as_str());
                let field = group.property(&param.id).unwrap();
                let is_enumeration = param.kind() == ParameterKind::Enumeration;
                prop_assert_eq!(field.enum_values.is_some(), is_enumeration);
                if is_enumeration {
                    prop_assert_eq!(field.field_type, FieldType::String);
                }
            }
        }
        if let Some(group) = schema.inputs() {
            for input in &app.inputs {
                let field = group.property(&input.id).unwrap();
                prop_assert_eq!(field.field_type, FieldType::String);
                prop_assert!(field.enum_values.is_none());
            }
        }
    }
}
