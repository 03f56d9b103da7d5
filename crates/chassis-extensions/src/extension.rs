//! Extension contract implemented by discovered plugins.

use std::fmt;
use std::path::{Path, PathBuf};

use chassis_container::Container;

/// Construction-time identity handed to an extension constructor.
///
/// Implementors typically embed this struct and delegate the contract
/// accessors to it.
#[derive(Debug, Clone)]
pub struct ExtensionInfo {
    /// Extension identifier, unique within a collection.
    pub name: String,
    /// Root directory of the installed extension package.
    pub path: PathBuf,
    /// Whether the extension takes part in registration and boot.
    pub active: bool,
}

/// Capability set implemented by discovered plugins.
///
/// The container is always passed in explicitly; extensions hold no
/// container reference of their own.
pub trait Extension: Send + Sync + 'static {
    /// Unique extension identifier.
    fn name(&self) -> &str;

    /// Root directory of the extension package.
    fn path(&self) -> &Path;

    /// Inactive extensions are excluded from registration and boot.
    fn is_active(&self) -> bool;

    /// Populate the container with the extension's services.
    fn register(&self, _container: &mut Container) -> chassis_container::Result<()> {
        Ok(())
    }

    /// Boot-time side effects, run after every provider has booted.
    fn boot(&self, _container: &mut Container) -> chassis_container::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for dyn Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name())
            .field("path", &self.path())
            .field("active", &self.is_active())
            .finish()
    }
}
