// crates/appform-config/src/lib.rs
// ============================================================================
// Module: App Form Config Library
// Description: Canonical config model, validation, and artifact generation.
// Purpose: Single source of truth for appform.toml semantics.
// Dependencies: appform-core, serde, toml
// ============================================================================

//! ## Overview
//! `appform-config` defines the configuration model for the `appform` CLI:
//! where descriptors are read from, how schemas are printed, and how logs are
//! formatted. Loading is strict and fail-closed; a JSON schema and an example
//! file are generated from the same model.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use schema::config_schema;
