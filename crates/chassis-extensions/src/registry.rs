//! Constructor registry mapping extension identifiers to typed constructors.

use std::collections::HashMap;
use std::sync::Arc;

use crate::extension::{Extension, ExtensionInfo};

/// Typed constructor for an extension instance.
///
/// The return-type bound is the conformance check: anything a constructor
/// produces satisfies the [`Extension`] capability set by construction.
pub type ExtensionCtor = fn(ExtensionInfo) -> Arc<dyn Extension>;

/// Map from extension identifier to its constructor.
///
/// Populated by the host before activation. The loader refuses descriptors
/// whose identifier has no registered constructor.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    ctors: HashMap<String, ExtensionCtor>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `identifier`, replacing any previous one.
    pub fn register(&mut self, identifier: impl Into<String>, ctor: ExtensionCtor) {
        self.ctors.insert(identifier.into(), ctor);
    }

    /// Look up the constructor for `identifier`.
    pub fn get(&self, identifier: &str) -> Option<ExtensionCtor> {
        self.ctors.get(identifier).copied()
    }

    /// Whether a constructor is registered for `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.ctors.contains_key(identifier)
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }
}
