//! Module-resolution registration seam.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Receives prefix-to-paths mappings for discovered extensions.
///
/// The runtime's module resolver is an external collaborator; the loader
/// only pushes validated mappings through this contract and never performs
/// module loading itself.
pub trait ModuleResolver: Send + Sync {
    /// Register filesystem paths for a module prefix.
    fn register_prefix(&self, prefix: &str, paths: &[PathBuf]);
}

/// In-memory prefix map, the default resolver implementation.
#[derive(Debug, Default)]
pub struct ModulePathMap {
    prefixes: RwLock<BTreeMap<String, Vec<PathBuf>>>,
}

impl ModulePathMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths registered for `prefix`, if any.
    pub fn paths_for(&self, prefix: &str) -> Option<Vec<PathBuf>> {
        let prefixes = self.prefixes.read().unwrap_or_else(|e| e.into_inner());
        prefixes.get(prefix).cloned()
    }

    /// All registered prefixes, sorted.
    pub fn prefixes(&self) -> Vec<String> {
        let prefixes = self.prefixes.read().unwrap_or_else(|e| e.into_inner());
        prefixes.keys().cloned().collect()
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        let prefixes = self.prefixes.read().unwrap_or_else(|e| e.into_inner());
        prefixes.len()
    }

    /// Whether no prefix has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModuleResolver for ModulePathMap {
    fn register_prefix(&self, prefix: &str, paths: &[PathBuf]) {
        let mut prefixes = self.prefixes.write().unwrap_or_else(|e| e.into_inner());
        prefixes.insert(prefix.to_string(), paths.to_vec());
    }
}
