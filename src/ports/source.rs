// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property source trait definition.
//!
//! A property source is anything that can hand the store a batch of raw
//! key/value pairs: a properties file, a JSON capability map, an in-memory
//! table. The store pulls the whole batch at load time and resolves the
//! table once afterwards; sources are not queried per key.

use crate::domain::{ConfigKey, Result};

/// A trait for bulk property sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a service can hold them across
/// threads.
///
/// # Ordering
///
/// `read` returns pairs in source order. When the same key occurs more than
/// once, the importer keeps the last occurrence.
///
/// # Examples
///
/// ```rust
/// use refcfg::ports::PropertySource;
/// use refcfg::domain::{ConfigKey, Result};
///
/// struct FixedSource;
///
/// impl PropertySource for FixedSource {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn read(&self) -> Result<Vec<(ConfigKey, String)>> {
///         Ok(vec![(ConfigKey::from("app.name"), "demo".to_string())])
///     }
/// }
///
/// let source = FixedSource;
/// assert_eq!(source.read().unwrap().len(), 1);
/// ```
pub trait PropertySource: Send + Sync {
    /// Returns the name of this source, used in logging and error messages.
    ///
    /// Short descriptive identifiers work best: `"properties-file"`,
    /// `"json-file"`, `"map"`.
    fn name(&self) -> &str;

    /// Reads all raw key/value pairs from the source.
    ///
    /// Returns the pairs in source order, or an error when the source cannot
    /// be opened or read at all. A source that can be partially read may
    /// return the pairs it got and report the rest through the logging
    /// channel; import never half-applies a returned batch.
    fn read(&self) -> Result<Vec<(ConfigKey, String)>>;
}
