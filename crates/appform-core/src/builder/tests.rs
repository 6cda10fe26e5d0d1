// crates/appform-core/src/builder/tests.rs
// ============================================================================
// Module: Form-Schema Builder Unit Tests
// Description: Unit coverage for the parameter-type mapping.
// Purpose: Pin the field shape emitted for each parameter kind.
// Dependencies: appform-core, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

use serde_json::Value;
use serde_json::json;

use super::build_form_schema;
use super::enum_keys;
use crate::descriptor::AppDescriptor;
use crate::schema::FieldType;

fn descriptor(value: Value) -> AppDescriptor {
    serde_json::from_value(value).unwrap()
}

#[test]
fn kind_table_maps_every_known_type() {
    let app = descriptor(json!({
        "parameters": [
            { "id": "b", "value": { "type": "bool" } },
            { "id": "f", "value": { "type": "flag" } },
            { "id": "e", "value": { "type": "enumeration", "enum_values": [{ "x": "X" }] } },
            { "id": "n", "value": { "type": "number" } },
            { "id": "s", "value": { "type": "string" } }
        ]
    }));
    let schema = build_form_schema(&app);
    let params = schema.parameters().unwrap();
    let types: Vec<FieldType> =
        ["b", "f", "e", "n", "s"].iter().map(|key| params.property(key).unwrap().field_type).collect();
    assert_eq!(
        types,
        vec![
            FieldType::Boolean,
            FieldType::Boolean,
            FieldType::String,
            FieldType::Number,
            FieldType::String,
        ]
    );
    assert_eq!(params.property("e").unwrap().enum_values, Some(vec!["x".to_string()]));
    assert_eq!(params.property("s").unwrap().enum_values, None);
}

#[test]
fn enum_keys_take_first_key_and_skip_keyless_entries() {
    let entries = vec![json!({ "first": 1, "second": 2 }), json!({}), json!("bare"), json!({ "z": 0 })];
    assert_eq!(enum_keys("p", Some(entries.as_slice())), vec!["first".to_string(), "z".to_string()]);
    assert!(enum_keys("p", None).is_empty());
}

#[test]
fn enumeration_without_values_emits_empty_enum() {
    let app = descriptor(json!({
        "parameters": [{ "id": "mode", "value": { "type": "enumeration" } }]
    }));
    let schema = build_form_schema(&app);
    let field = schema.parameters().unwrap().property("mode").unwrap();
    assert_eq!(field.enum_values, Some(Vec::new()));
}

#[test]
fn missing_details_leave_title_and_description_unset() {
    let app = descriptor(json!({
        "parameters": [{ "id": "p", "value": { "type": "number" } }],
        "inputs": [{ "id": "i", "details": { "label": "Input" } }]
    }));
    let schema = build_form_schema(&app);
    let param = schema.parameters().unwrap().property("p").unwrap();
    assert_eq!(param.title, None);
    assert_eq!(param.description, None);
    let input = schema.inputs().unwrap().property("i").unwrap();
    assert_eq!(input.title.as_deref(), Some("Input"));
    assert_eq!(input.description, None);

    let value = schema.to_value().unwrap();
    assert_eq!(value["properties"]["parameters"]["properties"]["p"], json!({ "type": "number" }));
}

#[test]
fn duplicate_ids_keep_first_position_and_last_field() {
    let app = descriptor(json!({
        "parameters": [
            { "id": "a", "value": { "type": "number" } },
            { "id": "b" },
            { "id": "a", "value": { "type": "flag" } }
        ]
    }));
    let schema = build_form_schema(&app);
    let params = schema.parameters().unwrap();
    assert_eq!(params.property_keys(), vec!["a", "b"]);
    assert_eq!(params.property("a").unwrap().field_type, FieldType::Boolean);
}

#[test]
fn group_titles_and_required_name_are_emitted() {
    let app = descriptor(json!({
        "parameters": [{ "id": "p" }],
        "inputs": [{ "id": "i" }]
    }));
    let value = build_form_schema(&app).to_value().unwrap();
    assert_eq!(value["type"], "object");
    assert_eq!(value["required"], json!(["name"]));
    assert_eq!(value["properties"]["parameters"]["title"], "Parameters");
    assert_eq!(value["properties"]["parameters"]["type"], "object");
    assert_eq!(value["properties"]["inputs"]["title"], "Inputs");
}

#[test]
fn malformed_fields_degrade_to_plain_string_fields() {
    let app = descriptor(json!({
        "parameters": [
            { "id": "t", "value": { "type": 5 }, "details": { "label": 3, "description": "Help" } },
            { "id": "e", "value": { "type": "enumeration", "enum_values": { "a": "A" } } },
            { "id": "v", "value": [] }
        ]
    }));
    let schema = build_form_schema(&app);
    let params = schema.parameters().unwrap();
    assert_eq!(params.property_keys(), vec!["t", "e", "v"]);

    let typed = params.property("t").unwrap();
    assert_eq!(typed.field_type, FieldType::String);
    assert_eq!(typed.title, None);
    assert_eq!(typed.description.as_deref(), Some("Help"));
    assert_eq!(typed.enum_values, None);

    let enumeration = params.property("e").unwrap();
    assert_eq!(enumeration.field_type, FieldType::String);
    assert_eq!(enumeration.enum_values, Some(Vec::new()));

    assert_eq!(params.property("v").unwrap().field_type, FieldType::String);
}
