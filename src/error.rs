//! Error types for Outrig operations.
//!
//! This module defines [`OutrigError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - [`OutrigError::PluginNotFound`] is an expected outcome while folding
//!   arguments into a plugin name and is never shown to the user
//! - Registry query failures are logged and fall back to local resolution
//! - Install and exec failures abort plugin dispatch and exit non-zero
//! - Use `anyhow::Error` (via `OutrigError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Outrig operations.
#[derive(Debug, Error)]
pub enum OutrigError {
    /// No executable exists for a candidate plugin name.
    #[error("Plugin not found: {name}")]
    PluginNotFound { name: String },

    /// The plugin registry could not be queried.
    #[error("Plugin registry query failed: {message}")]
    RegistryQuery { message: String },

    /// A registry-managed plugin could not be materialized locally.
    #[error("Failed to install plugin '{plugin}': {message}")]
    InstallFailed { plugin: String, message: String },

    /// The resolved plugin executable could not be started.
    #[error("Failed to execute plugin {path}: {source}")]
    ExecFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutrigError {
    /// Whether this error only means "no plugin by that name".
    ///
    /// The argument folder shrinks its window on these and surfaces
    /// everything else.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OutrigError::PluginNotFound { .. })
    }
}

/// Result type alias for Outrig operations.
pub type Result<T> = std::result::Result<T, OutrigError>;
