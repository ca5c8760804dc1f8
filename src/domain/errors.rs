// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur while aggregating and reading
//! configuration. All errors use `thiserror` for proper error handling and conversion.
//!
//! Building and updating a configuration never fails. Its read accessors surface
//! [`ConfigError::UnknownOption`], [`ConfigError::MissingKey`] and, for typed
//! extraction, [`ConfigError::TypeConversionError`]. The remaining variants come from
//! sources and resolvers, and the aggregator logs and drops them.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when resolving modules,
/// coercing values or accessing configuration entries. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking backwards
/// compatibility.
///
/// # Examples
///
/// ```
/// use modconfig::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::UnknownOption {
///         key: "DATABASE".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An option was read by name but was never established.
    #[error("Invalid option: {key}")]
    UnknownOption {
        /// The key that was requested
        key: String,
    },

    /// A subscript-style lookup was made for a key that is not stored.
    #[error("Missing configuration key: {key}")]
    MissingKey {
        /// The key that was requested
        key: String,
    },

    /// A value could not be converted into the type declared for its key.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A module path did not resolve to any known source.
    #[error("Invalid configuration module given: {path}")]
    ModuleNotFound {
        /// The module path that failed to resolve
        path: String,
    },

    /// An `env:` module descriptor pointed at an unset environment variable.
    #[error("Environment variable '{variable}' for module indirection is not set")]
    EnvIndirectionUnset {
        /// The name of the environment variable
        variable: String,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from any error and a target type name.
    pub fn conversion<E>(key: impl Into<String>, target_type: impl Into<String>, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ConfigError::TypeConversionError {
            key: key.into(),
            target_type: target_type.into(),
            source: err.into(),
        }
    }

    /// Returns `true` if the error means a requested key or module is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::UnknownOption { .. }
                | ConfigError::MissingKey { .. }
                | ConfigError::ModuleNotFound { .. }
        )
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
