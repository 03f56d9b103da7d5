//! Extension discovery and activation for the chassis runtime
//!
//! Extensions are independently packaged modules discovered on disk. Each
//! package root carries a [`MANIFEST_FILENAME`] manifest declaring the
//! package type, a version, free-form metadata, and a module-resolution
//! map. Discovery ([`ExtensionFinder`]) scans an extension root and filters
//! manifests down to descriptors; activation ([`ExtensionLoader`]) turns
//! descriptors into live, validated [`Extension`] instances exactly once
//! per process and wires their module paths into the runtime's resolver.
//!
//! Discovery is best-effort: a malformed manifest skips that candidate and
//! is reported through [`Discovery::skipped`]. Activation is strict: an
//! identifier without a registered constructor or a module path escaping
//! its package halts startup.

pub mod collection;
pub mod error;
pub mod extension;
pub mod finder;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod resolver;

/// The canonical filename for extension manifest files.
///
/// Extension packages must place a file with this name at their root so the
/// finder can discover and validate them.
pub const MANIFEST_FILENAME: &str = "chassis_extension.toml";

/// Package type tag that marks a manifest as a chassis extension.
pub const EXTENSION_TYPE: &str = "chassis-extension";

/// Metadata key carrying the extension identifier.
pub const EXTENSION_ID_KEY: &str = "extension-id";

pub use collection::ExtensionCollection;
pub use error::{Error, Result};
pub use extension::{Extension, ExtensionInfo};
pub use finder::{Discovery, ExtensionDescriptor, ExtensionFinder, SkippedManifest};
pub use loader::ExtensionLoader;
pub use manifest::{ExtensionManifest, ManifestProvider, PackageSection, TomlManifestProvider};
pub use registry::{ExtensionCtor, ExtensionRegistry};
pub use resolver::{ModulePathMap, ModuleResolver};
