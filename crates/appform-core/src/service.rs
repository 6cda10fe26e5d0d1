// crates/appform-core/src/service.rs
// ============================================================================
// Module: Apps Service
// Description: Catalog-backed app lookup and form-schema generation.
// Purpose: Give callers one explicitly constructed entry point per catalog.
// Dependencies: tracing, appform-core::builder, appform-core::catalog
// ============================================================================

//! ## Overview
//! [`AppsService`] wraps an [`AppCatalog`] and exposes listing, lookup, and
//! schema generation. Callers construct it with the catalog they want and pass
//! it around explicitly; there is no process-wide instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::info;

use crate::builder::build_form_schema;
use crate::catalog::AppCatalog;
use crate::catalog::CatalogError;
use crate::catalog::ListOptions;
use crate::descriptor::AppDescriptor;
use crate::descriptor::AppSummary;
use crate::schema::FormSchema;

// ============================================================================
// SECTION: App References
// ============================================================================

/// App to build a form for: a descriptor in hand, or an id to resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum AppRef {
    /// Descriptor already fetched by the caller.
    Descriptor(AppDescriptor),
    /// Catalog id to resolve first.
    Id(String),
}

impl From<AppDescriptor> for AppRef {
    fn from(descriptor: AppDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<&str> for AppRef {
    fn from(app_id: &str) -> Self {
        Self::Id(app_id.to_string())
    }
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Catalog-backed apps service.
#[derive(Debug, Clone)]
pub struct AppsService<C> {
    /// Descriptor source.
    catalog: C,
}

impl<C: AppCatalog> AppsService<C> {
    /// Creates a service over `catalog`.
    #[must_use]
    pub const fn new(catalog: C) -> Self {
        Self {
            catalog,
        }
    }

    /// Lists apps.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    pub fn list(&self, options: &ListOptions) -> Result<Vec<AppSummary>, CatalogError> {
        self.catalog.list(options)
    }

    /// Returns the descriptor for `app_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the app cannot be resolved.
    pub fn get(&self, app_id: &str) -> Result<AppDescriptor, CatalogError> {
        self.catalog.get(app_id)
    }

    /// Builds the form schema for an app, resolving ids through the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when an id cannot be resolved. Building
    /// itself never fails.
    pub fn form_schema(&self, app: impl Into<AppRef>) -> Result<FormSchema, CatalogError> {
        let descriptor = match app.into() {
            AppRef::Descriptor(descriptor) => descriptor,
            AppRef::Id(app_id) => {
                info!(app_id = %app_id, "resolving app descriptor");
                self.catalog.get(&app_id)?
            }
        };
        Ok(build_form_schema(&descriptor))
    }
}
