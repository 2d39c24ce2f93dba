// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory property source.
//!
//! Useful for defaults baked into an application, programmatic bulk imports,
//! and tests that want a source without touching the filesystem.

use crate::domain::{ConfigKey, Result};
use crate::ports::PropertySource;
use std::collections::HashMap;

/// A property source backed by an in-memory list of pairs.
///
/// Pairs keep their insertion order, so duplicate keys behave exactly as
/// they would coming from a file: the last occurrence wins at import.
///
/// # Examples
///
/// ```rust
/// use refcfg::adapters::MapSource;
/// use refcfg::ports::PropertySource;
///
/// let source = MapSource::new("defaults", vec![("app.name", "demo")])
///     .with_pair("app.label", "{app.name}-dev");
///
/// assert_eq!(source.read().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    pairs: Vec<(ConfigKey, String)>,
}

impl MapSource {
    /// Creates a source from a list of pairs.
    pub fn new<K, V>(name: impl Into<String>, pairs: Vec<(K, V)>) -> Self
    where
        K: Into<ConfigKey>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Creates an empty source.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pairs: Vec::new(),
        }
    }

    /// Creates a source from a map of pairs.
    pub fn from_map(name: impl Into<String>, map: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            pairs: map
                .into_iter()
                .map(|(k, v)| (ConfigKey::from(k), v))
                .collect(),
        }
    }

    /// Appends one pair, builder style.
    pub fn with_pair(mut self, key: impl Into<ConfigKey>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<(ConfigKey, String)>> {
        Ok(self.pairs.clone())
    }
}
