//! Kernel composition sequence.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use chassis_container::{Container, ServiceProvider};
use chassis_extensions::ExtensionLoader;

use crate::application::Application;
use crate::error::{Error, Result};

/// Parameter holding the environment name.
pub const ENVIRONMENT_PARAM: &str = "kernel.environment";
/// Parameter holding the application root directory.
pub const ROOT_DIR_PARAM: &str = "kernel.root_dir";
/// Parameter holding the extension root directory.
pub const EXTENSION_DIR_PARAM: &str = "kernel.extension_dir";
/// Container id of the extension loader singleton.
pub const EXTENSION_LOADER_ID: &str = "extensions.loader";

/// Construction-time settings for the kernel.
#[derive(Debug, Clone)]
pub struct KernelSettings {
    /// Environment name (e.g. `dev`, `prod`).
    pub environment: String,
    /// Application root directory.
    pub root_dir: PathBuf,
    /// Directory scanned for extension packages.
    pub extension_dir: PathBuf,
}

/// Initializes and boots the application runtime.
///
/// The kernel owns the one container built for this process, registers the
/// host's ordered provider sequence, activates extensions, and runs the
/// boot hooks: providers first, then active extensions.
pub struct Kernel {
    container: Container,
    providers: Vec<Arc<dyn ServiceProvider>>,
    booted: bool,
}

impl Kernel {
    /// Build the container and seed the kernel parameters.
    ///
    /// `providers` is the host's ordered provider sequence; it is
    /// registered during [`boot`](Self::boot).
    pub fn new(settings: KernelSettings, providers: Vec<Arc<dyn ServiceProvider>>) -> Result<Self> {
        let container = Container::with_parameters([
            (ENVIRONMENT_PARAM, settings.environment),
            (ROOT_DIR_PARAM, settings.root_dir.display().to_string()),
            (EXTENSION_DIR_PARAM, settings.extension_dir.display().to_string()),
        ])?;

        Ok(Self {
            container,
            providers,
            booted: false,
        })
    }

    /// Construct and immediately boot a kernel.
    pub fn create(
        settings: KernelSettings,
        providers: Vec<Arc<dyn ServiceProvider>>,
    ) -> Result<Self> {
        let mut kernel = Self::new(settings, providers)?;
        kernel.boot()?;
        Ok(kernel)
    }

    /// Register providers, activate extensions, and run the boot hooks.
    ///
    /// Idempotent: every call after the first returns immediately. An error
    /// anywhere in the sequence aborts startup; nothing is retried.
    pub fn boot(&mut self) -> Result<()> {
        if self.booted {
            return Ok(());
        }

        for provider in self.providers.clone() {
            self.container.register(provider)?;
        }

        let loader: Arc<ExtensionLoader> = self.container.get(EXTENSION_LOADER_ID)?;
        let active = loader.activate_extensions()?.active();

        for extension in &active {
            extension.register(&mut self.container)?;
        }

        // Snapshot after extension registration so providers registered by
        // extensions get their boot hook too.
        for provider in self.container.providers() {
            provider.boot(&mut self.container)?;
        }
        for extension in &active {
            extension.boot(&mut self.container)?;
        }

        self.booted = true;
        info!(extensions = active.len(), "kernel booted");
        Ok(())
    }

    /// Whether [`boot`](Self::boot) has completed.
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// The kernel's container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable access to the kernel's container.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Resolve `id` as a runnable application.
    ///
    /// The resolved service must be of type `A`; anything else is an
    /// invalid-argument error naming the id and the expected type.
    pub fn create_application<A: Application>(&mut self, id: &str) -> Result<Arc<A>> {
        match self.container.get::<A>(id) {
            Ok(application) => Ok(application),
            Err(chassis_container::Error::TypeMismatch { id, expected }) => {
                Err(Error::InvalidArgument {
                    reason: format!(
                        "service '{id}' does not satisfy the application contract ({expected})"
                    ),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}
