// SPDX-License-Identifier: MIT OR Apache-2.0

//! The property store: an ordered key/value table with eager reference
//! resolution.
//!
//! Every mutation of the table (an explicit [`PropertyStore::set`], a bulk
//! [`PropertyStore::load`] from a source, or a programmatic
//! [`PropertyStore::extend`]) ends with a full-table resolution pass: each
//! key's value is run through the [resolver](crate::domain::resolver) against
//! a snapshot of the table, and the expanded result replaces the stored
//! value. Reads therefore always see fully-expanded values, and the expanded
//! value becomes the raw baseline for the next mutation — the pre-expansion
//! text is not retained.

use crate::domain::resolver;
use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::PropertySource;
use std::collections::BTreeMap;

/// An ordered key→value table whose values are kept fully reference-expanded.
///
/// The store is a plain map plus an explicit resolution pass run by its own
/// mutation methods; it deliberately does not wrap or subclass a
/// general-purpose container's mutators. Mutation requires `&mut self`, so a
/// shared store needs external locking (see
/// [`ConfigService`](crate::service::ConfigService)).
///
/// # Examples
///
/// ```
/// use refcfg::domain::PropertyStore;
///
/// let mut store = PropertyStore::new();
/// store.set("A", "12345678");
/// store.set("B", "{A}90");
/// store.set("C", "{B} plus more");
///
/// assert_eq!(store.get_str("C").unwrap().as_str(), "1234567890 plus more");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    entries: BTreeMap<String, String>,
}

impl PropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Stores `value` under `key` and re-resolves the whole table.
    ///
    /// The newly-set text is taken verbatim as the key's raw value; the
    /// resolution pass then replaces every stored value (this one included)
    /// with its expanded form, since any key may reference the changed one.
    /// Returns the previously stored value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use refcfg::domain::PropertyStore;
    ///
    /// let mut store = PropertyStore::new();
    /// assert!(store.set("key", "first").is_none());
    /// let previous = store.set("key", "second").unwrap();
    /// assert_eq!(previous.as_str(), "first");
    /// ```
    pub fn set(&mut self, key: impl Into<ConfigKey>, value: impl Into<String>) -> Option<ConfigValue> {
        let previous = self
            .entries
            .insert(key.into().into_string(), value.into())
            .map(ConfigValue::new);
        self.resolve_all();
        previous
    }

    /// Bulk-imports every pair from `source`, then resolves the table once.
    ///
    /// Pairs are applied in source order; a key occurring more than once in
    /// the same source keeps its last value. Returns the number of imported
    /// pairs. A source that cannot be read propagates its error and leaves
    /// the table untouched.
    pub fn load(&mut self, source: &dyn PropertySource) -> Result<usize> {
        let pairs = source.read()?;
        let count = pairs.len();
        for (key, value) in pairs {
            self.entries.insert(key.into_string(), value);
        }
        self.resolve_all();
        tracing::debug!(source = source.name(), count, "imported property pairs");
        Ok(count)
    }

    /// Imports key/value pairs programmatically, then resolves the table once.
    ///
    /// # Examples
    ///
    /// ```
    /// use refcfg::domain::PropertyStore;
    ///
    /// let mut store = PropertyStore::new();
    /// store.extend([("name", "svc"), ("label", "{name}-prod")]);
    /// assert_eq!(store.get_str("label").unwrap().as_str(), "svc-prod");
    /// ```
    pub fn extend<K, V, I>(&mut self, pairs: I)
    where
        K: Into<ConfigKey>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.entries.insert(key.into().into_string(), value.into());
        }
        self.resolve_all();
    }

    /// Returns the current (already-resolved) value for `key`.
    pub fn get(&self, key: &ConfigKey) -> Option<ConfigValue> {
        self.entries.get(key.as_str()).map(|v| ConfigValue::from(v.as_str()))
    }

    /// Convenience form of [`get`](Self::get) taking a string slice.
    pub fn get_str(&self, key: &str) -> Option<ConfigValue> {
        self.entries.get(key).map(|v| ConfigValue::from(v.as_str()))
    }

    /// Returns `true` when the table holds a value for `key`.
    pub fn contains_key(&self, key: &ConfigKey) -> bool {
        self.entries.contains_key(key.as_str())
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys currently in the table, in order.
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.entries.keys().map(|k| ConfigKey::from(k.as_str())).collect()
    }

    /// Exports the full resolved table as a key→value mapping.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    /// Re-resolves every value in the table.
    ///
    /// Each key is resolved at depth 0 against a snapshot of the table taken
    /// at the start of the pass, so the pass observes consistent state and
    /// its outcome does not depend on iteration order.
    fn resolve_all(&mut self) {
        let snapshot = self.entries.clone();
        let lookup = |k: &str| snapshot.get(k).cloned();
        for (key, value) in self.entries.iter_mut() {
            if let Some(resolved) = resolver::resolve(key, 0, &lookup) {
                *value = resolved;
            }
        }
        tracing::trace!(entries = self.entries.len(), "re-resolved property table");
    }
}
