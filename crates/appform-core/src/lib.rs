// crates/appform-core/src/lib.rs
// ============================================================================
// Module: App Form Core Library
// Description: Descriptor model, form-schema builder, and app catalogs.
// Purpose: Turn job-submission app descriptors into form-widget schemas.
// Dependencies: indexmap, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! `appform-core` converts an application descriptor (configurable parameters
//! plus required input files) into an object-schema consumed by a dynamic
//! form-rendering widget. Building is pure and infallible: malformed or
//! partial descriptors degrade to string fields without titles rather than
//! failing.
//!
//! Descriptors are looked up by app id through the [`AppCatalog`] trait;
//! [`AppsService`] ties lookup and building together for callers.
//!
//! ## Index
//! - Building: [`build_form_schema`], [`FormSchema`], [`FieldSchema`]
//! - Descriptors: [`AppDescriptor`], [`Parameter`], [`InputSpec`], [`ParameterKind`]
//! - Lookup: [`AppCatalog`], [`InMemoryCatalog`], [`DirectoryCatalog`], [`AppsService`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builder;
pub mod catalog;
pub mod descriptor;
pub mod schema;
pub mod service;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::build_form_schema;
pub use catalog::AppCatalog;
pub use catalog::CatalogError;
pub use catalog::DirectoryCatalog;
pub use catalog::InMemoryCatalog;
pub use catalog::ListOptions;
pub use descriptor::AppDescriptor;
pub use descriptor::AppSummary;
pub use descriptor::DescriptorError;
pub use descriptor::FieldDetails;
pub use descriptor::InputSpec;
pub use descriptor::MAX_DESCRIPTOR_BYTES;
pub use descriptor::Parameter;
pub use descriptor::ParameterKind;
pub use descriptor::ParameterValue;
pub use schema::FieldSchema;
pub use schema::FieldType;
pub use schema::FormSchema;
pub use service::AppRef;
pub use service::AppsService;
