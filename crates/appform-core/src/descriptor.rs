// crates/appform-core/src/descriptor.rs
// ============================================================================
// Module: App Descriptors
// Description: Data model for job-submission application descriptors.
// Purpose: Parse catalog descriptors tolerantly into typed Rust values.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! An application descriptor lists the configurable parameters and required
//! input files of a runnable job template. Descriptors come from an external
//! catalog and are read-only here. Parsing is tolerant: unknown fields are
//! ignored, nested metadata is optional, and `null` parameter/input lists are
//! read as empty. Metadata fields of the wrong JSON type read as absent, and a
//! non-string `value.type` is kept as [`ParameterKind::Other`]. Only the JSON
//! syntax, the list shapes, and the presence of parameter/input ids can reject
//! a descriptor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum descriptor payload size accepted by [`AppDescriptor::from_json_slice`].
pub const MAX_DESCRIPTOR_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing descriptor payloads.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Payload exceeds the accepted size.
    #[error("descriptor exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge {
        /// Payload size in bytes.
        actual: usize,
        /// Size limit in bytes.
        limit: usize,
    },
    /// Payload is not a descriptor-shaped JSON document.
    #[error("descriptor json error: {0}")]
    Json(String),
}

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Application descriptor supplied by an app catalog.
///
/// # Invariants
/// - `parameters` and `inputs` keep catalog order; the builder relies on it.
/// - Parameter and input ids are assumed unique but not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Catalog identifier of the app.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable app name.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// App version string.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Whether the app is published to all users.
    #[serde(
        default,
        rename = "isPublic",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_public: Option<bool>,
    /// One-line app description.
    #[serde(
        default,
        rename = "shortDescription",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub short_description: Option<String>,
    /// Configurable job parameters, in catalog order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<Parameter>,
    /// Required input files, in catalog order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inputs: Vec<InputSpec>,
}

impl AppDescriptor {
    /// Parses a descriptor from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::TooLarge`] when `bytes` exceeds
    /// [`MAX_DESCRIPTOR_BYTES`] and [`DescriptorError::Json`] when the payload
    /// does not deserialize.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DescriptorError> {
        Self::from_json_slice_with_limit(bytes, MAX_DESCRIPTOR_BYTES)
    }

    /// Parses a descriptor from JSON bytes using a caller-supplied size limit.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when the payload is too large or malformed.
    pub fn from_json_slice_with_limit(bytes: &[u8], limit: usize) -> Result<Self, DescriptorError> {
        if bytes.len() > limit {
            return Err(DescriptorError::TooLarge {
                actual: bytes.len(),
                limit,
            });
        }
        serde_json::from_slice(bytes).map_err(|err| DescriptorError::Json(err.to_string()))
    }

    /// Returns the listing summary for this descriptor under `app_id`.
    #[must_use]
    pub fn summary(&self, app_id: impl Into<String>) -> AppSummary {
        AppSummary {
            id: app_id.into(),
            label: self.label.clone(),
            version: self.version.clone(),
            is_public: self.is_public.unwrap_or(false),
        }
    }
}

/// Listing entry for an app in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    /// Catalog identifier.
    pub id: String,
    /// Human-readable app name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// App version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Whether the app is published to all users.
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}

/// Configurable job parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter identifier; becomes the form property key.
    pub id: String,
    /// Display metadata.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldDetails>,
    /// Value type declaration.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<ParameterValue>,
}

impl Parameter {
    /// Returns the declared parameter kind, defaulting to [`ParameterKind::String`].
    #[must_use]
    pub fn kind(&self) -> ParameterKind {
        self.value.as_ref().and_then(|value| value.kind.clone()).unwrap_or(ParameterKind::String)
    }
}

/// Required input file declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Input identifier; becomes the form property key.
    pub id: String,
    /// Display metadata.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldDetails>,
}

/// Label and description shown next to a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetails {
    /// Short field label.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Longer help text.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameter value declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Declared value type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ParameterKind>,
    /// Allowed values for enumerations; each entry is a single-key mapping of
    /// value to display label.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

// ============================================================================
// SECTION: Parameter Kinds
// ============================================================================

/// Declared parameter value type.
///
/// Unrecognized type strings are kept verbatim in [`ParameterKind::Other`];
/// non-string type values are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum ParameterKind {
    /// `bool`
    Bool,
    /// `flag`
    Flag,
    /// `enumeration`
    Enumeration,
    /// `number`
    Number,
    /// `string`
    String,
    /// Any other type string.
    Other(String),
}

impl ParameterKind {
    /// Returns the raw type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Flag => "flag",
            Self::Enumeration => "enumeration",
            Self::Number => "number",
            Self::String => "string",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for ParameterKind {
    fn from(raw: &str) -> Self {
        match raw {
            "bool" => Self::Bool,
            "flag" => Self::Flag,
            "enumeration" => Self::Enumeration,
            "number" => Self::Number,
            "string" => Self::String,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ParameterKind {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Value> for ParameterKind {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(raw) => Self::from(raw),
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<ParameterKind> for String {
    fn from(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes an optional list, reading `null` as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes an optional field, reading a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}
