// crates/appform-core/src/catalog.rs
// ============================================================================
// Module: App Catalogs
// Description: Lookup of application descriptors by app id.
// Purpose: Resolve app ids before form-schema generation and list apps.
// Dependencies: std, thiserror, tracing, appform-core::descriptor
// ============================================================================

//! ## Overview
//! An [`AppCatalog`] resolves app ids to descriptors and lists available
//! apps. Two implementations ship here: [`InMemoryCatalog`] for embedding and
//! tests, and [`DirectoryCatalog`] which reads one JSON descriptor per file.
//! App ids are untrusted input and are validated before lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::descriptor::AppDescriptor;
use crate::descriptor::AppSummary;
use crate::descriptor::MAX_DESCRIPTOR_BYTES;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum app id length in bytes.
pub const MAX_APP_ID_LENGTH: usize = 256;

/// File extension of descriptor files in a [`DirectoryCatalog`].
const DESCRIPTOR_EXTENSION: &str = "json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by app catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// App id failed validation.
    #[error("invalid app id: {0}")]
    InvalidId(String),
    /// No app with the given id exists.
    #[error("app not found: {0}")]
    NotFound(String),
    /// Catalog storage could not be read.
    #[error("catalog io error: {0}")]
    Io(String),
    /// A stored descriptor could not be parsed.
    #[error("invalid descriptor {source_name}: {message}")]
    Descriptor {
        /// File or key the descriptor came from.
        source_name: String,
        /// Parse failure detail.
        message: String,
    },
}

// ============================================================================
// SECTION: Catalog Trait
// ============================================================================

/// Options for [`AppCatalog::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only list apps published to all users.
    pub public_only: bool,
}

/// Source of application descriptors.
pub trait AppCatalog {
    /// Returns the descriptor for `app_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the id is invalid, unknown, or its
    /// descriptor cannot be read.
    fn get(&self, app_id: &str) -> Result<AppDescriptor, CatalogError>;

    /// Lists apps ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be read.
    fn list(&self, options: &ListOptions) -> Result<Vec<AppSummary>, CatalogError>;
}

/// Validates an app id before lookup.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidId`] for empty, oversized, or
/// control-character ids.
pub fn validate_app_id(app_id: &str) -> Result<(), CatalogError> {
    if app_id.trim().is_empty() {
        return Err(CatalogError::InvalidId("app id must be non-empty".to_string()));
    }
    if app_id.len() > MAX_APP_ID_LENGTH {
        return Err(CatalogError::InvalidId(format!(
            "app id exceeds {MAX_APP_ID_LENGTH} bytes"
        )));
    }
    if app_id.chars().any(char::is_control) {
        return Err(CatalogError::InvalidId("app id contains control characters".to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: In-Memory Catalog
// ============================================================================

/// Catalog holding descriptors in memory, keyed by app id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    /// Descriptors keyed by app id.
    apps: BTreeMap<String, AppDescriptor>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor under `app_id`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] when `app_id` fails validation.
    pub fn insert(
        &mut self,
        app_id: impl Into<String>,
        descriptor: AppDescriptor,
    ) -> Result<(), CatalogError> {
        let app_id = app_id.into();
        validate_app_id(&app_id)?;
        self.apps.insert(app_id, descriptor);
        Ok(())
    }

    /// Inserts a descriptor under its own `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidId`] when the descriptor has no valid id.
    pub fn insert_descriptor(&mut self, descriptor: AppDescriptor) -> Result<(), CatalogError> {
        let app_id = descriptor
            .id
            .clone()
            .ok_or_else(|| CatalogError::InvalidId("descriptor has no id".to_string()))?;
        self.insert(app_id, descriptor)
    }

    /// Returns the number of stored apps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns true when the catalog holds no apps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl AppCatalog for InMemoryCatalog {
    fn get(&self, app_id: &str) -> Result<AppDescriptor, CatalogError> {
        validate_app_id(app_id)?;
        self.apps.get(app_id).cloned().ok_or_else(|| CatalogError::NotFound(app_id.to_string()))
    }

    fn list(&self, options: &ListOptions) -> Result<Vec<AppSummary>, CatalogError> {
        Ok(self
            .apps
            .iter()
            .map(|(app_id, descriptor)| descriptor.summary(app_id.as_str()))
            .filter(|summary| !options.public_only || summary.is_public)
            .collect())
    }
}

// ============================================================================
// SECTION: Directory Catalog
// ============================================================================

/// Catalog reading one JSON descriptor per file from a directory.
///
/// # Invariants
/// - A descriptor's app id is its `id` field, else the file stem.
/// - Files larger than `max_descriptor_bytes` are rejected, not truncated.
/// - A file that cannot be read or parsed only fails lookups of its own file
///   stem; listings and other lookups skip it.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    /// Directory holding `*.json` descriptors.
    root: PathBuf,
    /// Per-file size limit in bytes.
    max_descriptor_bytes: usize,
}

impl DirectoryCatalog {
    /// Creates a catalog over `root` with the default size limit.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_descriptor_bytes: MAX_DESCRIPTOR_BYTES,
        }
    }

    /// Overrides the per-file size limit.
    #[must_use]
    pub fn with_max_descriptor_bytes(mut self, max_descriptor_bytes: usize) -> Self {
        self.max_descriptor_bytes = max_descriptor_bytes;
        self
    }

    /// Loads every readable descriptor in the directory, keyed by app id.
    ///
    /// Files that cannot be read or parsed are skipped with a warning and
    /// recorded under their file stem.
    fn load_all(&self) -> Result<LoadedApps, CatalogError> {
        let entries = fs::read_dir(&self.root).map_err(|err| {
            CatalogError::Io(format!("{}: {err}", self.root.display()))
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| CatalogError::Io(err.to_string()))?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(DESCRIPTOR_EXTENSION)
            {
                paths.push(path);
            }
        }
        // Sorted so duplicate ids resolve the same way on every platform.
        paths.sort();
        let mut loaded = LoadedApps::default();
        for path in paths {
            let descriptor = match self.read_descriptor(&path) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable descriptor");
                    if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                        loaded.rejected.entry(stem.to_string()).or_insert(err);
                    }
                    continue;
                }
            };
            let Some(app_id) = descriptor_id(&path, &descriptor) else {
                warn!(path = %path.display(), "skipping descriptor without usable app id");
                continue;
            };
            if loaded.apps.contains_key(&app_id) {
                warn!(app_id = %app_id, path = %path.display(), "duplicate app id, keeping first");
                continue;
            }
            loaded.apps.insert(app_id, descriptor);
        }
        debug!(
            root = %self.root.display(),
            apps = loaded.apps.len(),
            rejected = loaded.rejected.len(),
            "loaded descriptor directory"
        );
        Ok(loaded)
    }

    /// Reads and parses one descriptor file.
    fn read_descriptor(&self, path: &Path) -> Result<AppDescriptor, CatalogError> {
        let source_name = path.display().to_string();
        let metadata =
            fs::metadata(path).map_err(|err| CatalogError::Io(format!("{source_name}: {err}")))?;
        if !usize::try_from(metadata.len()).is_ok_and(|len| len <= self.max_descriptor_bytes) {
            return Err(CatalogError::Descriptor {
                source_name,
                message: format!("file exceeds {} bytes", self.max_descriptor_bytes),
            });
        }
        let bytes =
            fs::read(path).map_err(|err| CatalogError::Io(format!("{source_name}: {err}")))?;
        AppDescriptor::from_json_slice_with_limit(&bytes, self.max_descriptor_bytes).map_err(
            |err| CatalogError::Descriptor {
                source_name,
                message: err.to_string(),
            },
        )
    }
}

impl AppCatalog for DirectoryCatalog {
    fn get(&self, app_id: &str) -> Result<AppDescriptor, CatalogError> {
        validate_app_id(app_id)?;
        let mut loaded = self.load_all()?;
        if let Some(descriptor) = loaded.apps.remove(app_id) {
            return Ok(descriptor);
        }
        Err(loaded
            .rejected
            .remove(app_id)
            .unwrap_or_else(|| CatalogError::NotFound(app_id.to_string())))
    }

    fn list(&self, options: &ListOptions) -> Result<Vec<AppSummary>, CatalogError> {
        Ok(self
            .load_all()?
            .apps
            .iter()
            .map(|(app_id, descriptor)| descriptor.summary(app_id.as_str()))
            .filter(|summary| !options.public_only || summary.is_public)
            .collect())
    }
}

/// Result of scanning a descriptor directory.
#[derive(Debug, Default)]
struct LoadedApps {
    /// Parsed descriptors keyed by app id.
    apps: BTreeMap<String, AppDescriptor>,
    /// Read or parse failures keyed by file stem.
    rejected: BTreeMap<String, CatalogError>,
}

/// Returns the app id of a descriptor file.
fn descriptor_id(path: &Path, descriptor: &AppDescriptor) -> Option<String> {
    let app_id = descriptor
        .id
        .clone()
        .or_else(|| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))?;
    validate_app_id(&app_id).ok().map(|()| app_id)
}
