// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Only the outer machinery produces errors: sources that cannot be read,
//! content that cannot be parsed, values that cannot be converted to a
//! requested type, and lookups of absent keys. Reference substitution never
//! errors — a reference that cannot be expanded degrades to literal text.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Marked `#[non_exhaustive]` so variants can be added without breaking
/// downstream matches.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested key was found neither in an override nor in the store.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
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

    /// A property source could not be opened or read.
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

    /// Source content could not be parsed.
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
    /// Creates a `TypeConversionError` from a `ParseIntError`.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a `TypeConversionError` from a `ParseFloatError`.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a `TypeConversionError` from a `ParseBoolError`.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_message() {
        let error = ConfigError::ConfigKeyNotFound {
            key: "db.host".to_string(),
        };
        assert_eq!(error.to_string(), "Configuration key not found: db.host");
    }

    #[test]
    fn source_error_message() {
        let error = ConfigError::SourceError {
            source_name: "properties-file".to_string(),
            message: "file vanished".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'properties-file' error: file vanished"
        );
    }

    #[test]
    fn parse_error_message() {
        let error = ConfigError::ParseError {
            message: "not a JSON object".to_string(),
            source: None,
        };
        assert!(error.to_string().contains("not a JSON object"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(ConfigError::from(io), ConfigError::IoError(_)));
    }

    #[test]
    fn conversion_helpers_name_the_target_type() {
        let int_err = "x".parse::<i32>().unwrap_err();
        let err = ConfigError::from_parse_int_error("k".to_string(), int_err);
        assert!(err.to_string().contains("integer"));

        let float_err = "x".parse::<f64>().unwrap_err();
        let err = ConfigError::from_parse_float_error("k".to_string(), float_err);
        assert!(err.to_string().contains("float"));

        let bool_err = "x".parse::<bool>().unwrap_err();
        let err = ConfigError::from_parse_bool_error("k".to_string(), bool_err);
        assert!(err.to_string().contains("boolean"));
    }
}
