//! Dependency-injection container for the chassis runtime
//!
//! A [`Container`] is a registry of bindings: each identifier resolves to a
//! ready-made value, a factory invoked on every resolution, or a
//! singleton-wrapped factory whose first product is cached for the process
//! lifetime. Resolution is single-threaded and stack-scoped; re-entering an
//! identifier that is already being built is reported as a circular
//! dependency carrying the full chain.
//!
//! Containers are populated during a registration phase, usually by
//! [`ServiceProvider`]s, and resolved from afterwards. The container is
//! always passed explicitly; there is no ambient "current container"
//! global.
//!
//! # Example
//!
//! ```
//! use chassis_container::{Container, Result};
//!
//! struct Clock;
//!
//! fn example() -> Result<()> {
//!     let mut container = Container::new();
//!     container.singleton("clock", |_| Ok(Clock));
//!     let clock = container.get::<Clock>("clock")?;
//!     # let _ = clock;
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod container;
pub mod error;
pub mod provider;

pub use binding::{FactoryFn, ParameterValue, Service};
pub use container::Container;
pub use error::{Error, Result};
pub use provider::ServiceProvider;
