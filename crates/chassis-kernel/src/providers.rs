//! Core service providers registered by the kernel.

use std::path::PathBuf;
use std::sync::Arc;

use chassis_container::{Container, Error as ContainerError, ServiceProvider};
use chassis_extensions::{
    ExtensionFinder, ExtensionLoader, ExtensionRegistry, ManifestProvider, ModuleResolver,
    TomlManifestProvider,
};

use crate::kernel::{EXTENSION_DIR_PARAM, EXTENSION_LOADER_ID};

/// Wires the extension subsystem into the container.
///
/// Validates the extension root before any discovery runs and binds the
/// loader as a singleton under [`EXTENSION_LOADER_ID`].
pub struct ExtensionServiceProvider {
    registry: ExtensionRegistry,
    resolver: Arc<dyn ModuleResolver>,
    manifests: Arc<dyn ManifestProvider>,
}

impl ExtensionServiceProvider {
    /// Create the provider with the host's constructor registry and module
    /// resolver.
    pub fn new(registry: ExtensionRegistry, resolver: Arc<dyn ModuleResolver>) -> Self {
        Self {
            registry,
            resolver,
            manifests: Arc::new(TomlManifestProvider),
        }
    }

    /// Swap the manifest source, mainly for tests.
    pub fn with_manifest_provider(mut self, manifests: Arc<dyn ManifestProvider>) -> Self {
        self.manifests = manifests;
        self
    }
}

impl ServiceProvider for ExtensionServiceProvider {
    fn register(&self, container: &mut Container) -> chassis_container::Result<()> {
        let dir = container
            .get_parameter(EXTENSION_DIR_PARAM)?
            .as_str()
            .ok_or_else(|| {
                ContainerError::InvalidArgument(format!(
                    "parameter '{EXTENSION_DIR_PARAM}' must be a string path"
                ))
            })?
            .to_string();

        let root = PathBuf::from(&dir);
        if !root.is_dir() {
            return Err(ContainerError::InvalidArgument(format!(
                "extension root '{dir}' is not an existing directory"
            )));
        }

        let registry = self.registry.clone();
        let resolver = self.resolver.clone();
        let manifests = self.manifests.clone();
        container.singleton(EXTENSION_LOADER_ID, move |_| {
            Ok(ExtensionLoader::new(
                root.clone(),
                ExtensionFinder::new(manifests.clone()),
                registry.clone(),
                resolver.clone(),
            ))
        });

        Ok(())
    }
}
