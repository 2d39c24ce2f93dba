// SPDX-License-Identifier: MIT OR Apache-2.0

//! Properties file source adapter.
//!
//! Reads line-oriented `key=value` files: one entry per line, `#`-prefixed
//! comment lines and blank lines ignored, keys and values trimmed of
//! surrounding whitespace. A line with no `=` imports the whole trimmed line
//! as a key with an empty value.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{PropertyParser, PropertySource};
use directories::ProjectDirs;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Maximum allowed size for a properties file (10MB).
const MAX_PROPERTIES_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parser for line-oriented `key=value` content.
///
/// # Examples
///
/// ```rust
/// use refcfg::adapters::PropertiesParser;
/// use refcfg::ports::PropertyParser;
///
/// let parser = PropertiesParser::new();
/// let pairs = parser.parse("# comment\napp.name = demo\n").unwrap();
/// assert_eq!(pairs, vec![("app.name".to_string(), "demo".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    /// Creates a new properties parser.
    pub fn new() -> Self {
        PropertiesParser
    }

    /// Parses a single line into a key/value pair.
    ///
    /// Returns `None` for blank lines and `#` comments. The value is
    /// everything after the first `=`; a line without `=` becomes a key with
    /// an empty value.
    pub fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        match line.split_once('=') {
            Some((key, value)) => Some((key.trim().to_string(), value.trim().to_string())),
            None => Some((line.to_string(), String::new())),
        }
    }
}

impl PropertyParser for PropertiesParser {
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>> {
        Ok(content.lines().filter_map(Self::parse_line).collect())
    }

    fn supported_extensions(&self) -> &[&str] {
        &["properties"]
    }
}

/// Property source adapter for properties files.
///
/// The adapter stores the path and reads the file on every
/// [`read`](PropertySource::read) call, so loading the same adapter again
/// picks up on-disk changes. Files larger than 10MB are rejected. When the
/// stream fails partway through, the pairs read so far are returned and the
/// failure is logged (the rest of that file's keys are simply absent).
///
/// # Examples
///
/// ```rust,no_run
/// use refcfg::adapters::PropertiesFileAdapter;
///
/// // A specific file
/// let adapter = PropertiesFileAdapter::from_file("/etc/myapp/config.properties");
///
/// // The OS-appropriate default location
/// let adapter = PropertiesFileAdapter::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesFileAdapter {
    /// Path to the properties file
    file_path: PathBuf,
}

impl PropertiesFileAdapter {
    /// Creates an adapter for a specific file path.
    ///
    /// The path is not touched until the source is read, so constructing an
    /// adapter for a file that does not (yet) exist is fine.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an adapter for `config.properties` in the OS-appropriate
    /// configuration directory for the given application.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.properties")
    }

    /// Creates an adapter for a custom file name in the OS-appropriate
    /// configuration directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "properties-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::from_file(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path this adapter reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn source_error(&self, message: String, err: std::io::Error) -> ConfigError {
        ConfigError::SourceError {
            source_name: "properties-file".to_string(),
            message,
            source: Some(Box::new(err)),
        }
    }

    fn display_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
    }
}

impl PropertySource for PropertiesFileAdapter {
    fn name(&self) -> &str {
        "properties-file"
    }

    fn read(&self) -> Result<Vec<(ConfigKey, String)>> {
        let metadata = fs::metadata(&self.file_path).map_err(|e| {
            self.source_error(
                format!("Failed to read file metadata: {}", self.display_name()),
                e,
            )
        })?;

        if metadata.len() > MAX_PROPERTIES_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "properties-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_PROPERTIES_FILE_SIZE
                ),
                source: None,
            });
        }

        let file = File::open(&self.file_path).map_err(|e| {
            self.source_error(
                format!("Failed to open configuration file: {}", self.display_name()),
                e,
            )
        })?;

        let mut pairs = Vec::new();
        for line in BufReader::new(file).lines() {
            match line {
                Ok(line) => {
                    if let Some((key, value)) = PropertiesParser::parse_line(&line) {
                        pairs.push((ConfigKey::from(key), value));
                    }
                }
                Err(e) => {
                    // Keep what was read; the remaining entries are absent.
                    tracing::warn!(
                        file = self.display_name(),
                        error = %e,
                        imported = pairs.len(),
                        "stream failed mid-read, importing partial content"
                    );
                    break;
                }
            }
        }

        Ok(pairs)
    }
}
