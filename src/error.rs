//! Error types for generation runs.

use thiserror::Error;

/// Errors that abort a generation run.
///
/// Malformed mapper declarations never surface here: they are excluded from
/// the pipeline before emission.
#[derive(Error, Debug)]
pub enum GenerateError {
    // Host-level errors
    #[error("Generated unit name collision: {name}")]
    UnitNameCollision { name: String },

    #[error("Generated companion type name collision: {name}")]
    CompanionNameCollision { name: String },

    #[error("Failed to render generated unit {unit}: {source}")]
    Render {
        unit: String,
        #[source]
        source: syn::Error,
    },

    // Input/output errors
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid Cargo manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
