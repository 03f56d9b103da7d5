//! Binding registry and resolution.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::binding::{Binding, FactoryFn, ParameterValue, Service};
use crate::error::{Error, Result};
use crate::provider::ServiceProvider;

/// Registry of service bindings with value, factory, and singleton-factory
/// lifetimes.
///
/// A container is built once per process (or per worker) during a
/// registration phase and resolved from afterwards. Factories receive
/// `&mut Container` so they can resolve their own dependencies; the build
/// stack tracks in-progress ids within a single `get` call tree and turns
/// re-entry into a [`Error::CircularDependency`] carrying the full chain.
///
/// Nothing prevents late registration, but a singleton that has already been
/// realized keeps winning for its id even after a rebind: resolution checks
/// realized values first.
#[derive(Default)]
pub struct Container {
    values: HashMap<String, Service>,
    bindings: HashMap<String, Binding>,
    parameters: HashMap<String, ParameterValue>,
    providers: HashMap<TypeId, Arc<dyn ServiceProvider>>,
    provider_order: Vec<Arc<dyn ServiceProvider>>,
    build_stack: Vec<String>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container pre-seeded with parameters.
    pub fn with_parameters<I, K, V>(parameters: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        let mut container = Self::new();
        container.set_parameters(parameters)?;
        Ok(container)
    }

    /// Store a factory binding for `id`.
    ///
    /// The factory is invoked with the container on every resolution; with
    /// `singleton` set, the first product is cached and reused. Rebinding an
    /// existing id overwrites the previous binding silently.
    pub fn bind<T, F>(&mut self, id: impl Into<String>, factory: F, singleton: bool)
    where
        T: Any + Send + Sync,
        F: Fn(&mut Container) -> Result<T> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.values.contains_key(&id) {
            // The realized value still wins at resolution time.
            warn!(id = %id, "rebinding an id that already has a realized value");
        } else if self.bindings.contains_key(&id) {
            debug!(id = %id, "overwriting existing binding");
        }
        let factory: Arc<FactoryFn> =
            Arc::new(move |container| factory(container).map(|value| Arc::new(value) as Service));
        self.bindings.insert(id, Binding::Factory { factory, singleton });
    }

    /// Store a singleton factory binding for `id`.
    pub fn singleton<T, F>(&mut self, id: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(&mut Container) -> Result<T> + Send + Sync + 'static,
    {
        self.bind(id, factory, true);
    }

    /// Store a ready-made value returned as-is on every resolution.
    pub fn bind_value<T: Any + Send + Sync>(&mut self, id: impl Into<String>, value: T) {
        self.bindings.insert(id.into(), Binding::Value(Arc::new(value)));
    }

    /// Store a pre-resolved singleton directly into the realized-value map.
    pub fn set<T: Any + Send + Sync>(&mut self, id: impl Into<String>, service: T) {
        self.values.insert(id.into(), Arc::new(service));
    }

    /// Resolve `id` and downcast the service to `T`.
    pub fn get<T: Any + Send + Sync>(&mut self, id: &str) -> Result<Arc<T>> {
        self.get_any(id)?.downcast::<T>().map_err(|_| Error::TypeMismatch {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Resolve `id` to the type-erased service value.
    ///
    /// Resolution order: realized values, then the binding map. Missing ids
    /// are [`Error::ServiceNotFound`]; factory re-entry on an id already on
    /// the build stack is [`Error::CircularDependency`].
    pub fn get_any(&mut self, id: &str) -> Result<Service> {
        if let Some(value) = self.values.get(id) {
            return Ok(value.clone());
        }

        let (factory, singleton) = match self.bindings.get(id) {
            None => return Err(Error::ServiceNotFound(id.to_string())),
            Some(Binding::Value(value)) => return Ok(value.clone()),
            Some(Binding::Factory { factory, singleton }) => (factory.clone(), *singleton),
        };

        if self.build_stack.iter().any(|entry| entry == id) {
            let mut chain = self.build_stack.clone();
            chain.push(id.to_string());
            return Err(Error::CircularDependency { chain });
        }

        self.build_stack.push(id.to_string());
        let produced = factory(self);
        self.build_stack.pop();
        let service = produced?;

        if singleton {
            self.values.insert(id.to_string(), service.clone());
        }

        Ok(service)
    }

    /// Whether a realized value or a binding exists for `id`.
    pub fn has(&self, id: &str) -> bool {
        self.values.contains_key(id) || self.bindings.contains_key(id)
    }

    /// Set a configuration parameter.
    ///
    /// Numeric-only names are rejected: a name like `"123"` or `"1.5"` is
    /// an [`Error::InvalidArgument`] at set-time.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Result<()> {
        let name = name.into();
        if is_numeric(&name) {
            return Err(Error::InvalidArgument(format!(
                "parameter name must not be numeric: '{name}'"
            )));
        }
        self.parameters.insert(name, value.into());
        Ok(())
    }

    /// Set several parameters at once.
    pub fn set_parameters<I, K, V>(&mut self, parameters: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        for (name, value) in parameters {
            self.set_parameter(name, value)?;
        }
        Ok(())
    }

    /// Look up a parameter; a missing name is [`Error::ParameterNotFound`].
    pub fn get_parameter(&self, name: &str) -> Result<&ParameterValue> {
        self.parameters
            .get(name)
            .ok_or_else(|| Error::ParameterNotFound(name.to_string()))
    }

    /// Whether a parameter with `name` has been set.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Register a service provider, at most once per provider type.
    ///
    /// Returns the stored instance: the one just registered, or the
    /// previously stored provider of the same type, in which case
    /// `register` is not invoked again.
    pub fn register(
        &mut self,
        provider: Arc<dyn ServiceProvider>,
    ) -> Result<Arc<dyn ServiceProvider>> {
        let key = provider.type_key();
        if let Some(existing) = self.providers.get(&key) {
            debug!("provider type already registered, returning stored instance");
            return Ok(existing.clone());
        }
        provider.register(self)?;
        self.providers.insert(key, provider.clone());
        self.provider_order.push(provider.clone());
        Ok(provider)
    }

    /// Registered providers, in registration order.
    pub fn providers(&self) -> Vec<Arc<dyn ServiceProvider>> {
        self.provider_order.clone()
    }
}

/// Mirrors the loose numeric-string check parameter names are guarded with:
/// `"123"` and `"1.5"` are numeric, `"1abc"` is not.
fn is_numeric(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        && name.parse::<f64>().is_ok()
}
