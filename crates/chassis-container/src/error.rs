/// Errors that can occur during container resolution and registration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No realized value or binding exists for the requested id.
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// Resolution re-entered an id that is already being built.
    ///
    /// The chain holds every id on the build stack in order, ending with
    /// the repeated id.
    #[error("circular dependency detected: {}", .chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    /// The requested parameter has not been set.
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    /// A name or configuration value failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The resolved service is not of the requested type.
    #[error("service '{id}' is not of type {expected}")]
    TypeMismatch { id: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
