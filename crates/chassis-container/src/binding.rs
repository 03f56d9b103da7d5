//! Binding and parameter value model.

use std::any::Any;
use std::sync::Arc;

use crate::container::Container;
use crate::error::Result;

/// A type-erased service value handed out by the container.
pub type Service = Arc<dyn Any + Send + Sync>;

/// A service constructor invoked with the container so it can resolve its
/// own dependencies at construction time.
pub type FactoryFn = dyn Fn(&mut Container) -> Result<Service> + Send + Sync;

/// How an identifier resolves.
pub(crate) enum Binding {
    /// A ready-made object returned as-is on every resolution.
    Value(Service),
    /// A constructor invoked on resolution. With `singleton` set, the first
    /// product is cached into the realized-value map and reused.
    Factory {
        factory: Arc<FactoryFn>,
        singleton: bool,
    },
}

/// A scalar or list configuration value, stored independently of the
/// binding map.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    String(String),
    Int(i64),
    Float(f64),
    List(Vec<ParameterValue>),
}

impl ParameterValue {
    /// The string value, if this parameter is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// The integer value, if this parameter is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParameterValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float value, if this parameter is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParameterValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The list items, if this parameter is a list.
    pub fn as_list(&self) -> Option<&[ParameterValue]> {
        match self {
            ParameterValue::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<Vec<ParameterValue>> for ParameterValue {
    fn from(values: Vec<ParameterValue>) -> Self {
        ParameterValue::List(values)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::List(values.into_iter().map(ParameterValue::String).collect())
    }
}
