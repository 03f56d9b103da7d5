//! End-to-end kernel composition: providers, discovery, activation, boot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chassis_container::Container;
use chassis_extensions::{
    Extension, ExtensionInfo, ExtensionLoader, ExtensionRegistry, ModulePathMap,
};
use chassis_kernel::{
    Application, Error, EXTENSION_LOADER_ID, ExtensionServiceProvider, Kernel, KernelSettings,
};
use chassis_test_utils::ExtensionTree;
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Test extension that registers a service and flips a boot marker.
struct BlogExtension {
    info: ExtensionInfo,
}

impl Extension for BlogExtension {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn path(&self) -> &Path {
        &self.info.path
    }

    fn is_active(&self) -> bool {
        self.info.active
    }

    fn register(&self, container: &mut Container) -> chassis_container::Result<()> {
        container.singleton("blog.posts", |_| Ok(vec!["hello".to_string()]));
        Ok(())
    }

    fn boot(&self, container: &mut Container) -> chassis_container::Result<()> {
        container.set("blog.booted", true);
        Ok(())
    }
}

fn blog_ctor(info: ExtensionInfo) -> Arc<dyn Extension> {
    Arc::new(BlogExtension { info })
}

fn blog_registry() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    registry.register("blog", blog_ctor);
    registry
}

fn settings(extension_dir: &Path) -> KernelSettings {
    KernelSettings {
        environment: "test".to_string(),
        root_dir: extension_dir.to_path_buf(),
        extension_dir: extension_dir.to_path_buf(),
    }
}

fn extension_provider(resolver: Arc<ModulePathMap>) -> Arc<ExtensionServiceProvider> {
    Arc::new(ExtensionServiceProvider::new(blog_registry(), resolver))
}

#[test]
fn full_boot_activates_only_the_valid_extension() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("blog", "blog", "0.1.0", &[("blog", &["src"])]);
    tree.add_raw(
        "no-id",
        "[package]\ntype = \"chassis-extension\"\nversion = \"1.0.0\"\n",
    );
    tree.add_raw(
        "theme",
        "[package]\ntype = \"chassis-theme\"\nversion = \"1.0.0\"\n",
    );

    let resolver = Arc::new(ModulePathMap::new());
    let mut kernel = Kernel::create(
        settings(tree.root()),
        vec![extension_provider(resolver.clone())],
    )
    .unwrap();

    // The extension registered its service and ran its boot hook.
    let posts = kernel.container_mut().get::<Vec<String>>("blog.posts").unwrap();
    assert_eq!(*posts, vec!["hello".to_string()]);
    assert!(kernel.container().has("blog.booted"));

    // Its module map went through the resolver, confined to the package.
    assert_eq!(
        resolver.paths_for("blog"),
        Some(vec![tree.root().join("blog/src")])
    );

    // Only the valid package became an extension.
    let loader = kernel
        .container_mut()
        .get::<ExtensionLoader>(EXTENSION_LOADER_ID)
        .unwrap();
    let extensions = loader.activate_extensions().unwrap();
    assert_eq!(extensions.len(), 1);
    assert!(extensions.has("blog"));
}

#[test]
fn boot_twice_is_a_no_op() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("blog", "blog", "0.1.0", &[]);

    let mut kernel = Kernel::create(
        settings(tree.root()),
        vec![extension_provider(Arc::new(ModulePathMap::new()))],
    )
    .unwrap();
    assert!(kernel.is_booted());

    // Rebooting neither errors nor re-registers services.
    kernel.boot().unwrap();
    assert!(kernel.is_booted());
}

#[test]
fn missing_extension_root_aborts_startup() {
    init_tracing();

    let mut kernel = Kernel::new(
        settings(&PathBuf::from("/nonexistent/extensions")),
        vec![extension_provider(Arc::new(ModulePathMap::new()))],
    )
    .unwrap();

    let err = kernel.boot().unwrap_err();
    assert!(matches!(
        err,
        Error::Container(chassis_container::Error::InvalidArgument(_))
    ));
    assert!(!kernel.is_booted());
}

#[test]
fn unknown_extension_identifier_aborts_startup() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("rogue", "rogue", "0.1.0", &[]);

    let mut kernel = Kernel::new(
        settings(tree.root()),
        vec![extension_provider(Arc::new(ModulePathMap::new()))],
    )
    .unwrap();

    let err = kernel.boot().unwrap_err();
    assert!(matches!(
        err,
        Error::Extensions(chassis_extensions::Error::LoaderFailed { ref extension, .. })
            if extension == "rogue"
    ));
}

#[test]
fn kernel_boot_reads_each_manifest_once() {
    init_tracing();

    let tree = ExtensionTree::new();
    tree.add_extension("blog", "blog", "0.1.0", &[]);

    let manifests = Arc::new(chassis_test_utils::CountingManifestProvider::new());
    let provider = ExtensionServiceProvider::new(blog_registry(), Arc::new(ModulePathMap::new()))
        .with_manifest_provider(manifests.clone());

    let mut kernel = Kernel::create(settings(tree.root()), vec![Arc::new(provider)]).unwrap();

    // Re-activating through the resolved loader is a no-op after boot.
    let loader = kernel
        .container_mut()
        .get::<ExtensionLoader>(EXTENSION_LOADER_ID)
        .unwrap();
    loader.activate_extensions().unwrap();
    loader.activate_extensions().unwrap();

    assert_eq!(manifests.load_count(), 1);
}

#[derive(Debug)]
struct ConsoleApp {
    name: String,
}

impl Application for ConsoleApp {
    fn run(&self) -> chassis_kernel::Result<()> {
        assert_eq!(self.name, "console");
        Ok(())
    }
}

#[test]
fn create_application_enforces_the_contract() {
    init_tracing();

    let tree = ExtensionTree::new();
    let mut kernel = Kernel::create(
        settings(tree.root()),
        vec![extension_provider(Arc::new(ModulePathMap::new()))],
    )
    .unwrap();

    kernel
        .container_mut()
        .singleton("app.console", |_| Ok(ConsoleApp { name: "console".to_string() }));
    kernel.container_mut().set("app.bogus", 42_u32);

    let app = kernel.create_application::<ConsoleApp>("app.console").unwrap();
    app.run().unwrap();

    let err = kernel.create_application::<ConsoleApp>("app.bogus").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = kernel.create_application::<ConsoleApp>("app.absent").unwrap_err();
    assert!(matches!(
        err,
        Error::Container(chassis_container::Error::ServiceNotFound(_))
    ));
}
