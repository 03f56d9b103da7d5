//! Service-provider protocol used to populate the container.

use std::any::TypeId;

use crate::container::Container;
use crate::error::Result;

/// A unit of registration logic that populates container bindings and
/// optionally runs boot-time side effects.
///
/// Providers are registered through [`Container::register`], which keeps at
/// most one instance per provider type: registering a second provider of a
/// type that is already known returns the stored instance without running
/// [`register`](Self::register) again.
pub trait ServiceProvider: Send + Sync + 'static {
    /// Populate the container with this provider's bindings.
    fn register(&self, container: &mut Container) -> Result<()>;

    /// Boot-time side effects, run after every provider has registered.
    fn boot(&self, _container: &mut Container) -> Result<()> {
        Ok(())
    }

    /// Type identity used by the container's once-per-type bookkeeping.
    fn type_key(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}
