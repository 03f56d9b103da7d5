/// Errors that can occur while composing and booting the runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolved service or configuration value failed validation.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Container error from chassis-container.
    #[error(transparent)]
    Container(#[from] chassis_container::Error),

    /// Extension error from chassis-extensions.
    #[error(transparent)]
    Extensions(#[from] chassis_extensions::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
