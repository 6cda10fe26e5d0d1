// crates/appform-core/src/schema.rs
// ============================================================================
// Module: Form Schemas
// Description: Typed object-schema tree consumed by form-rendering widgets.
// Purpose: Represent generated form schemas with stable property ordering.
// Dependencies: indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`FormSchema`] is a JSON-schema-like tree using the `type`, `title`,
//! `description`, `enum`, `properties`, and `required` keywords. Property
//! maps keep insertion order so generated forms list fields in the same order
//! as the descriptor they came from.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Field Types
// ============================================================================

/// Value type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Nested object with `properties`.
    Object,
    /// Free text or enumerated choice.
    String,
    /// Checkbox value.
    Boolean,
    /// Numeric value.
    Number,
}

// ============================================================================
// SECTION: Field Schema
// ============================================================================

/// Schema node describing one form field or a group of fields.
///
/// # Invariants
/// - `properties` is only populated for [`FieldType::Object`] nodes.
/// - `properties` iteration order equals insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed values, in display order.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Child fields keyed by property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, FieldSchema>>,
    /// Child property names that must be filled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl FieldSchema {
    /// Creates a leaf field of the given type with no metadata.
    #[must_use]
    pub const fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            title: None,
            description: None,
            enum_values: None,
            properties: None,
            required: None,
        }
    }

    /// Creates an empty object node with an optional title.
    #[must_use]
    pub fn object(title: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            properties: Some(IndexMap::new()),
            ..Self::new(FieldType::Object)
        }
    }

    /// Sets the title and description.
    #[must_use]
    pub fn with_text(mut self, title: Option<String>, description: Option<String>) -> Self {
        self.title = title;
        self.description = description;
        self
    }

    /// Sets the allowed values.
    #[must_use]
    pub fn with_enum(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Inserts a child property, keeping the position of an existing key.
    pub fn insert_property(&mut self, key: impl Into<String>, field: Self) {
        self.properties.get_or_insert_with(IndexMap::new).insert(key.into(), field);
    }

    /// Marks a child property as required.
    pub fn require(&mut self, key: impl Into<String>) {
        self.required.get_or_insert_with(Vec::new).push(key.into());
    }

    /// Returns the child property with the given key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Self> {
        self.properties.as_ref().and_then(|properties| properties.get(key))
    }

    /// Returns the child property keys in order.
    #[must_use]
    pub fn property_keys(&self) -> Vec<&str> {
        self.properties
            .as_ref()
            .map(|properties| properties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Form Schema
// ============================================================================

/// Root schema for a job-submission form.
///
/// # Invariants
/// - The root is an object with a required `name` string property.
/// - `parameters` and `inputs` are present only when the source descriptor has
///   at least one parameter or input respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSchema {
    /// Root object node.
    root: FieldSchema,
}

impl FormSchema {
    /// Wraps a root object node.
    #[must_use]
    pub(crate) const fn from_root(root: FieldSchema) -> Self {
        Self {
            root,
        }
    }

    /// Returns the root object node.
    #[must_use]
    pub const fn root(&self) -> &FieldSchema {
        &self.root
    }

    /// Returns the `name` field.
    #[must_use]
    pub fn name(&self) -> Option<&FieldSchema> {
        self.root.property("name")
    }

    /// Returns the `parameters` group, if present.
    #[must_use]
    pub fn parameters(&self) -> Option<&FieldSchema> {
        self.root.property("parameters")
    }

    /// Returns the `inputs` group, if present.
    #[must_use]
    pub fn inputs(&self) -> Option<&FieldSchema> {
        self.root.property("inputs")
    }

    /// Converts the schema into a JSON value with ordered object keys.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
