//! Best-effort discovery of extension packages under a root directory.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::manifest::ManifestProvider;
use crate::{EXTENSION_ID_KEY, MANIFEST_FILENAME};

/// Immutable description of a discovered extension package.
#[derive(Debug, Clone)]
pub struct ExtensionDescriptor {
    /// Extension identifier from the manifest metadata.
    pub identifier: String,
    /// Root directory of the package.
    pub path: PathBuf,
    /// Declared package version.
    pub version: String,
    /// Module-resolution map: prefix to paths relative to `path`.
    pub modules: BTreeMap<String, Vec<String>>,
}

/// A candidate that discovery passed over, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedManifest {
    /// Path of the manifest that was skipped.
    pub path: PathBuf,
    /// Human-readable skip reason.
    pub reason: String,
}

/// Outcome of a discovery scan: descriptors plus skip diagnostics.
#[derive(Debug, Default)]
pub struct Discovery {
    /// One descriptor per valid extension package, in scan order.
    pub descriptors: Vec<ExtensionDescriptor>,
    /// Candidates that were skipped.
    pub skipped: Vec<SkippedManifest>,
}

impl Discovery {
    fn skip(&mut self, path: PathBuf, reason: String) {
        warn!(manifest = %path.display(), reason = %reason, "skipping extension candidate");
        self.skipped.push(SkippedManifest { path, reason });
    }
}

/// Scans an extension root for manifest files and filters them down to
/// extension descriptors.
pub struct ExtensionFinder {
    provider: Arc<dyn ManifestProvider>,
}

impl ExtensionFinder {
    /// Create a finder backed by the given manifest source.
    pub fn new(provider: Arc<dyn ManifestProvider>) -> Self {
        Self { provider }
    }

    /// Walk `root` and produce descriptors for every valid extension
    /// package.
    ///
    /// Discovery is best-effort: a malformed manifest skips that candidate
    /// and the scan continues. Only failing to enumerate `root` itself is
    /// an error. When two packages declare the same identifier, the
    /// first-discovered one wins.
    pub fn discover(&self, root: &Path) -> Result<Discovery> {
        let mut discovery = Discovery::default();
        let mut seen = HashSet::new();

        for dir in package_dirs(root)? {
            let manifest_path = dir.join(MANIFEST_FILENAME);
            if !manifest_path.is_file() {
                continue;
            }

            let manifest = match self.provider.load(&manifest_path) {
                Ok(manifest) => manifest,
                Err(err) => {
                    discovery.skip(manifest_path, err.to_string());
                    continue;
                }
            };

            if !manifest.is_extension() {
                continue;
            }

            let Some(id) = manifest.extension_id() else {
                discovery.skip(
                    manifest_path,
                    format!("missing or empty '{EXTENSION_ID_KEY}' metadata"),
                );
                continue;
            };
            let identifier = id.to_string();

            if !seen.insert(identifier.clone()) {
                discovery.skip(
                    manifest_path,
                    format!("duplicate extension identifier '{identifier}'"),
                );
                continue;
            }

            discovery.descriptors.push(ExtensionDescriptor {
                identifier,
                path: dir,
                version: manifest.package.version.clone(),
                modules: manifest.modules,
            });
        }

        Ok(discovery)
    }
}

/// Candidate package directories: direct subdirectories of `root`, sorted
/// for deterministic first-wins semantics, hidden entries skipped.
fn package_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
