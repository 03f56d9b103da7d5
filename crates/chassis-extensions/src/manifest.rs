//! Extension manifest parsing for `chassis_extension.toml` files.
//!
//! An extension manifest declares the package type, its version, free-form
//! metadata, and the module-resolution map. The canonical filename is
//! [`MANIFEST_FILENAME`](crate::MANIFEST_FILENAME).
//!
//! # Example TOML
//!
//! ```toml
//! [package]
//! type = "chassis-extension"
//! version = "0.1.0"
//!
//! [package.metadata]
//! extension-id = "blog"
//!
//! [modules]
//! "blog" = ["src", "lib"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{EXTENSION_ID_KEY, EXTENSION_TYPE};

/// Complete extension manifest loaded from `chassis_extension.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtensionManifest {
    /// Package identity and metadata.
    pub package: PackageSection,
    /// Module-resolution map: prefix to paths relative to the package root.
    #[serde(default)]
    pub modules: BTreeMap<String, Vec<String>>,
}

/// The `[package]` section of a manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Package type tag; only [`EXTENSION_TYPE`] packages are discovered.
    #[serde(rename = "type")]
    pub kind: String,
    /// Semver version string.
    pub version: String,
    /// Free-form metadata. Extensions must carry [`EXTENSION_ID_KEY`].
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ExtensionManifest {
    /// Parse an extension manifest from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and parse an extension manifest from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Whether the package declares the recognized extension type tag.
    pub fn is_extension(&self) -> bool {
        self.package.kind == EXTENSION_TYPE
    }

    /// The declared extension identifier, if present and non-empty.
    pub fn extension_id(&self) -> Option<&str> {
        self.package
            .metadata
            .get(EXTENSION_ID_KEY)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    fn validate(&self) -> Result<()> {
        semver::Version::parse(&self.package.version).map_err(|source| Error::InvalidVersion {
            version: self.package.version.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Source of parsed manifests, the seam between discovery and the on-disk
/// format.
///
/// Every load error is the recoverable invalid-manifest signal: discovery
/// skips the candidate and continues the scan.
pub trait ManifestProvider: Send + Sync {
    /// Load and validate the manifest at `path`.
    fn load(&self, path: &Path) -> Result<ExtensionManifest>;
}

/// Reads manifests from TOML files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlManifestProvider;

impl ManifestProvider for TomlManifestProvider {
    fn load(&self, path: &Path) -> Result<ExtensionManifest> {
        ExtensionManifest::from_path(path)
    }
}
