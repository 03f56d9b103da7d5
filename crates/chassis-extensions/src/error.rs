use std::path::PathBuf;

/// Errors that can occur in the extension subsystem.
///
/// Manifest conditions (`ManifestParse`, `ManifestNotFound`,
/// `InvalidVersion`, `Io`) are recoverable per candidate: discovery skips
/// the offending package and continues. `LoaderFailed` is fatal and
/// propagates out of activation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse extension manifest TOML.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Extension manifest file not found at the expected path.
    #[error("extension manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Invalid semver version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// An extension could not be activated: unknown constructor or unsafe
    /// module mapping.
    #[error("failed to load extension '{extension}': {reason}")]
    LoaderFailed { extension: String, reason: String },

    /// Extension not found in the collection.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// I/O error reading extension files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
