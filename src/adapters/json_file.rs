// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file source adapter.
//!
//! Reads a JSON object (for example a desired-capabilities map) into
//! key/value pairs, flattening nested objects and arrays with dot notation.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{PropertyParser, PropertySource};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for a JSON configuration file (10MB).
const MAX_JSON_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parser converting a JSON object into flat key/value pairs.
///
/// Nested objects use dot notation, array elements are indexed, scalars are
/// stringified, and `null` becomes an empty string.
///
/// # Examples
///
/// ```rust
/// use refcfg::adapters::JsonParser;
/// use refcfg::ports::PropertyParser;
///
/// let parser = JsonParser::new();
/// let pairs = parser.parse(r#"{"database": {"host": "localhost", "port": 5432}}"#).unwrap();
/// assert!(pairs.contains(&("database.host".to_string(), "localhost".to_string())));
/// assert!(pairs.contains(&("database.port".to_string(), "5432".to_string())));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    /// Flattens a JSON value into dot-notation pairs.
    fn flatten_json(value: &serde_json::Value, prefix: &str, result: &mut Vec<(String, String)>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    Self::flatten_json(val, &new_prefix, result);
                }
            }
            serde_json::Value::Array(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    let new_prefix = format!("{}.{}", prefix, i);
                    Self::flatten_json(val, &new_prefix, result);
                }
            }
            serde_json::Value::String(s) => {
                result.push((prefix.to_string(), s.clone()));
            }
            serde_json::Value::Number(n) => {
                result.push((prefix.to_string(), n.to_string()));
            }
            serde_json::Value::Bool(b) => {
                result.push((prefix.to_string(), b.to_string()));
            }
            serde_json::Value::Null => {
                result.push((prefix.to_string(), String::new()));
            }
        }
    }
}

impl PropertyParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        if !value.is_object() {
            return Err(ConfigError::ParseError {
                message: "Top-level JSON value must be an object".to_string(),
                source: None,
            });
        }

        let mut result = Vec::new();
        Self::flatten_json(&value, "", &mut result);
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Property source adapter for JSON files.
///
/// # Examples
///
/// ```rust,no_run
/// use refcfg::adapters::JsonFileAdapter;
///
/// let adapter = JsonFileAdapter::from_file("/path/to/capabilities.json");
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    /// Path to the JSON file
    file_path: PathBuf,
    /// JSON parser
    parser: JsonParser,
}

impl JsonFileAdapter {
    /// Creates an adapter for a specific file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            parser: JsonParser::new(),
        }
    }

    /// Returns the path this adapter reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn display_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
    }
}

impl PropertySource for JsonFileAdapter {
    fn name(&self) -> &str {
        "json-file"
    }

    fn read(&self) -> Result<Vec<(ConfigKey, String)>> {
        let metadata = fs::metadata(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: "json-file".to_string(),
            message: format!("Failed to read file metadata: {}", self.display_name()),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_JSON_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "json-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_JSON_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: "json-file".to_string(),
            message: format!("Failed to read configuration file: {}", self.display_name()),
            source: Some(Box::new(e)),
        })?;

        Ok(self
            .parser
            .parse(&content)?
            .into_iter()
            .map(|(k, v)| (ConfigKey::from(k), v))
            .collect())
    }
}
