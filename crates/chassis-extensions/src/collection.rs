//! Deduplicated, insertion-ordered set of extension instances.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::extension::Extension;

/// Identifier-keyed extension set that preserves insertion order.
///
/// The collection is the sole owner of its instances. `add` keeps the first
/// registration for an identifier and ignores later ones.
#[derive(Default)]
pub struct ExtensionCollection {
    extensions: HashMap<String, Arc<dyn Extension>>,
    order: Vec<String>,
}

impl fmt::Debug for ExtensionCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionCollection")
            .field("order", &self.order)
            .finish()
    }
}

impl ExtensionCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension; a no-op when the identifier is already present.
    pub fn add(&mut self, extension: Arc<dyn Extension>) {
        let name = extension.name().to_string();
        if self.extensions.contains_key(&name) {
            debug!(extension = %name, "duplicate extension identifier ignored");
            return;
        }
        self.order.push(name.clone());
        self.extensions.insert(name, extension);
    }

    /// Whether an extension with `name` is present.
    pub fn has(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Look up an extension by identifier.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Extension>> {
        self.extensions.get(name).cloned()
    }

    /// Like [`get`](Self::get), but a miss is [`Error::UnknownExtension`].
    pub fn require(&self, name: &str) -> Result<Arc<dyn Extension>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownExtension(name.to_string()))
    }

    /// All extensions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Extension>> {
        self.order.iter().filter_map(|name| self.extensions.get(name))
    }

    /// Active extensions in insertion order.
    pub fn active(&self) -> Vec<Arc<dyn Extension>> {
        self.iter().filter(|extension| extension.is_active()).cloned().collect()
    }

    /// Number of extensions in the collection.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
