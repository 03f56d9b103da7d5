//! One-shot activation of discovered extensions.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::collection::ExtensionCollection;
use crate::error::{Error, Result};
use crate::extension::{Extension, ExtensionInfo};
use crate::finder::{ExtensionDescriptor, ExtensionFinder};
use crate::registry::ExtensionRegistry;
use crate::resolver::ModuleResolver;

/// Turns discovered descriptors into live, validated extension instances.
///
/// Activation runs at most once per loader. Every call after the first
/// returns the already-built collection without touching the filesystem
/// again. Discovery tolerates bad manifests; activation does not: a
/// descriptor whose identifier has no registered constructor, or whose
/// module map escapes its package root, halts startup.
pub struct ExtensionLoader {
    root: PathBuf,
    finder: ExtensionFinder,
    registry: ExtensionRegistry,
    resolver: Arc<dyn ModuleResolver>,
    activation: OnceLock<ExtensionCollection>,
}

impl ExtensionLoader {
    /// Create a loader over `root`.
    pub fn new(
        root: PathBuf,
        finder: ExtensionFinder,
        registry: ExtensionRegistry,
        resolver: Arc<dyn ModuleResolver>,
    ) -> Self {
        Self {
            root,
            finder,
            registry,
            resolver,
            activation: OnceLock::new(),
        }
    }

    /// Discover, validate, and construct all extensions.
    pub fn activate_extensions(&self) -> Result<&ExtensionCollection> {
        if let Some(extensions) = self.activation.get() {
            return Ok(extensions);
        }
        let extensions = self.build_collection()?;
        Ok(self.activation.get_or_init(|| extensions))
    }

    /// The collection built by activation, if it has run.
    pub fn extensions(&self) -> Option<&ExtensionCollection> {
        self.activation.get()
    }

    /// Active extensions in insertion order; empty before activation.
    pub fn active_extensions(&self) -> Vec<Arc<dyn Extension>> {
        self.activation
            .get()
            .map(ExtensionCollection::active)
            .unwrap_or_default()
    }

    /// Look up an extension by identifier, excluding inactive ones.
    ///
    /// Returns `Some` only when the extension exists and `is_active()`;
    /// unknown and inactive identifiers both yield `None`.
    pub fn extension(&self, name: &str) -> Option<Arc<dyn Extension>> {
        let extension = self.activation.get()?.get(name)?;
        extension.is_active().then_some(extension)
    }

    fn build_collection(&self) -> Result<ExtensionCollection> {
        let discovery = self.finder.discover(&self.root)?;
        let mut extensions = ExtensionCollection::new();

        for descriptor in discovery.descriptors {
            self.register_modules(&descriptor)?;

            let Some(ctor) = self.registry.get(&descriptor.identifier) else {
                return Err(Error::LoaderFailed {
                    extension: descriptor.identifier,
                    reason: "no registered constructor for this identifier".to_string(),
                });
            };

            extensions.add(ctor(ExtensionInfo {
                name: descriptor.identifier,
                path: descriptor.path,
                active: true,
            }));
        }

        info!(
            count = extensions.len(),
            skipped = discovery.skipped.len(),
            "extensions activated"
        );
        Ok(extensions)
    }

    /// Confine every module path to the extension's own root, then hand the
    /// mapping to the module resolver.
    fn register_modules(&self, descriptor: &ExtensionDescriptor) -> Result<()> {
        for (prefix, paths) in &descriptor.modules {
            let mut resolved = Vec::with_capacity(paths.len());
            for path in paths {
                let relative = Path::new(path);
                if relative.is_absolute()
                    || relative.components().any(|c| matches!(c, Component::ParentDir))
                {
                    return Err(Error::LoaderFailed {
                        extension: descriptor.identifier.clone(),
                        reason: format!("module path '{path}' escapes the extension root"),
                    });
                }
                resolved.push(descriptor.path.join(relative));
            }
            self.resolver.register_prefix(prefix, &resolved);
        }
        Ok(())
    }
}
