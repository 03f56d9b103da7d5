//! Composition root for the chassis runtime
//!
//! The [`Kernel`] builds the container, registers the host's service
//! providers in order, activates discovered extensions, runs the boot
//! hooks, and finally hands out runnable [`Application`]s resolved from the
//! container:
//!
//! ```text
//!        Kernel
//!          |
//!     +----+---------+
//!     |              |
//! chassis-container  chassis-extensions
//! ```

pub mod application;
pub mod error;
pub mod kernel;
pub mod providers;

pub use application::Application;
pub use error::{Error, Result};
pub use kernel::{
    ENVIRONMENT_PARAM, EXTENSION_DIR_PARAM, EXTENSION_LOADER_ID, Kernel, KernelSettings,
    ROOT_DIR_PARAM,
};
pub use providers::ExtensionServiceProvider;
