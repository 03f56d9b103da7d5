//! Tempdir-backed extension-root fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chassis_extensions::{
    ExtensionManifest, MANIFEST_FILENAME, ManifestProvider, TomlManifestProvider,
};
use tempfile::TempDir;

/// A temporary extension root populated with manifest fixtures.
pub struct ExtensionTree {
    dir: TempDir,
}

impl ExtensionTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create tempdir"),
        }
    }

    /// The extension root to point a finder or kernel at.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a well-formed extension manifest under `dir_name` and return
    /// the package directory.
    pub fn add_extension(
        &self,
        dir_name: &str,
        id: &str,
        version: &str,
        modules: &[(&str, &[&str])],
    ) -> PathBuf {
        self.add_raw(dir_name, &manifest_toml(id, version, modules))
    }

    /// Write arbitrary manifest content under `dir_name`.
    pub fn add_raw(&self, dir_name: &str, content: &str) -> PathBuf {
        let package_dir = self.root().join(dir_name);
        fs::create_dir_all(&package_dir).expect("create package dir");
        fs::write(package_dir.join(MANIFEST_FILENAME), content).expect("write manifest");
        package_dir
    }

    /// Create a directory without any manifest in it.
    pub fn add_empty_dir(&self, dir_name: &str) -> PathBuf {
        let package_dir = self.root().join(dir_name);
        fs::create_dir_all(&package_dir).expect("create dir");
        package_dir
    }

    /// Create a hidden directory containing an otherwise valid manifest.
    pub fn add_hidden(&self, dir_name: &str, id: &str) -> PathBuf {
        assert!(dir_name.starts_with('.'), "hidden fixture must start with a dot");
        self.add_extension(dir_name, id, "1.0.0", &[])
    }
}

impl Default for ExtensionTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a well-formed `chassis_extension.toml` document.
pub fn manifest_toml(id: &str, version: &str, modules: &[(&str, &[&str])]) -> String {
    let mut doc = format!(
        "[package]\ntype = \"chassis-extension\"\nversion = \"{version}\"\n\n\
         [package.metadata]\nextension-id = \"{id}\"\n"
    );
    if !modules.is_empty() {
        doc.push_str("\n[modules]\n");
        for (prefix, paths) in modules {
            let list = paths
                .iter()
                .map(|path| format!("\"{path}\""))
                .collect::<Vec<_>>()
                .join(", ");
            doc.push_str(&format!("\"{prefix}\" = [{list}]\n"));
        }
    }
    doc
}

/// A TOML-backed manifest provider that counts `load` calls, for asserting
/// that discovery runs exactly once.
#[derive(Debug, Default)]
pub struct CountingManifestProvider {
    inner: TomlManifestProvider,
    /// Number of `load` calls observed.
    pub loads: AtomicUsize,
}

impl CountingManifestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `load` calls observed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ManifestProvider for CountingManifestProvider {
    fn load(&self, path: &Path) -> chassis_extensions::Result<ExtensionManifest> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(path)
    }
}
