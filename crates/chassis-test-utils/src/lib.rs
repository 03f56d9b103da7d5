//! Shared test utilities for the chassis workspace.

mod tree;

pub use tree::{CountingManifestProvider, ExtensionTree, manifest_toml};
