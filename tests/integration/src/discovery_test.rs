//! Discovery and activation pipeline over mixed-quality extension trees.

use std::path::Path;
use std::sync::Arc;

use chassis_extensions::{
    Extension, ExtensionFinder, ExtensionInfo, ExtensionLoader, ExtensionRegistry, ModulePathMap,
    TomlManifestProvider,
};
use chassis_test_utils::{CountingManifestProvider, ExtensionTree};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct MarkerExtension {
    info: ExtensionInfo,
}

impl Extension for MarkerExtension {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn path(&self) -> &Path {
        &self.info.path
    }

    fn is_active(&self) -> bool {
        self.info.active
    }
}

fn marker_ctor(info: ExtensionInfo) -> Arc<dyn Extension> {
    Arc::new(MarkerExtension { info })
}

fn registry_for(ids: &[&str]) -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    for id in ids {
        registry.register(*id, marker_ctor);
    }
    registry
}

#[test]
fn discovery_keeps_exactly_the_valid_candidate() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("good", "good", "1.2.3", &[]);
    tree.add_raw(
        "typed-but-anonymous",
        "[package]\ntype = \"chassis-extension\"\nversion = \"1.0.0\"\n",
    );
    tree.add_raw(
        "other-type",
        "[package]\ntype = \"chassis-theme\"\nversion = \"1.0.0\"\n",
    );

    let finder = ExtensionFinder::new(Arc::new(TomlManifestProvider));
    let discovery = finder.discover(tree.root()).unwrap();

    assert_eq!(discovery.descriptors.len(), 1);
    assert_eq!(discovery.descriptors[0].identifier, "good");
    assert_eq!(discovery.descriptors[0].version, "1.2.3");

    // The typed-but-anonymous candidate is diagnosed; the foreign package
    // type is not an extension candidate at all.
    assert_eq!(discovery.skipped.len(), 1);
    assert!(discovery.skipped[0].reason.contains("extension-id"));
}

#[test]
fn best_effort_scan_survives_broken_manifests() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_raw("broken", "not toml at all [[[");
    tree.add_extension("solid", "solid", "0.1.0", &[]);
    tree.add_extension("bad-version", "bad-version", "one.two", &[]);

    let finder = ExtensionFinder::new(Arc::new(TomlManifestProvider));
    let discovery = finder.discover(tree.root()).unwrap();

    let ids: Vec<&str> = discovery
        .descriptors
        .iter()
        .map(|d| d.identifier.as_str())
        .collect();
    assert_eq!(ids, vec!["solid"]);
    assert_eq!(discovery.skipped.len(), 2);
}

#[test]
fn duplicate_identifiers_keep_the_first_discovered_package() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("01-first", "blog", "1.0.0", &[]);
    tree.add_extension("02-second", "blog", "2.0.0", &[]);

    let loader = ExtensionLoader::new(
        tree.root().to_path_buf(),
        ExtensionFinder::new(Arc::new(TomlManifestProvider)),
        registry_for(&["blog"]),
        Arc::new(ModulePathMap::new()),
    );

    let extensions = loader.activate_extensions().unwrap();
    assert_eq!(extensions.len(), 1);
    assert_eq!(
        extensions.get("blog").unwrap().path(),
        tree.root().join("01-first")
    );
}

#[test]
fn activation_is_one_shot_per_loader() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("blog", "blog", "0.1.0", &[]);
    tree.add_extension("forum", "forum", "0.2.0", &[]);

    let manifests = Arc::new(CountingManifestProvider::new());
    let loader = ExtensionLoader::new(
        tree.root().to_path_buf(),
        ExtensionFinder::new(manifests.clone()),
        registry_for(&["blog", "forum"]),
        Arc::new(ModulePathMap::new()),
    );

    for _ in 0..3 {
        assert_eq!(loader.activate_extensions().unwrap().len(), 2);
    }

    // Two manifests read, once each, across three activation calls.
    assert_eq!(manifests.load_count(), 2);
}

#[test]
fn module_paths_escaping_the_package_are_fatal() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("sneaky", "sneaky", "0.1.0", &[("sneaky", &["../../etc"])]);

    let loader = ExtensionLoader::new(
        tree.root().to_path_buf(),
        ExtensionFinder::new(Arc::new(TomlManifestProvider)),
        registry_for(&["sneaky"]),
        Arc::new(ModulePathMap::new()),
    );

    let err = loader.activate_extensions().unwrap_err();
    assert!(matches!(
        err,
        chassis_extensions::Error::LoaderFailed { ref extension, .. } if extension == "sneaky"
    ));
}

#[test]
fn hidden_directories_are_not_scanned() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_hidden(".staging", "staged");
    tree.add_extension("live", "live", "1.0.0", &[]);

    let finder = ExtensionFinder::new(Arc::new(TomlManifestProvider));
    let discovery = finder.discover(tree.root()).unwrap();

    assert_eq!(discovery.descriptors.len(), 1);
    assert_eq!(discovery.descriptors[0].identifier, "live");
}
