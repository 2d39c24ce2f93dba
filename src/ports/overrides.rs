// SPDX-License-Identifier: MIT OR Apache-2.0

//! Override source trait definition.
//!
//! An override source answers point lookups that take precedence over the
//! store: the service consults its override chain first and only falls back
//! to the resolved table when no override matches. Override values sit
//! outside the table, so they are returned verbatim and never take part in
//! reference expansion.

use crate::domain::{ConfigKey, ConfigValue};

/// A trait for precedence lookups consulted before the store.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use refcfg::ports::OverrideSource;
/// use refcfg::domain::{ConfigKey, ConfigValue};
///
/// struct Pinned;
///
/// impl OverrideSource for Pinned {
///     fn name(&self) -> &str {
///         "pinned"
///     }
///
///     fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
///         (key.as_str() == "mode").then(|| ConfigValue::from("test"))
///     }
/// }
///
/// let source = Pinned;
/// assert!(source.lookup(&ConfigKey::from("mode")).is_some());
/// assert!(source.lookup(&ConfigKey::from("other")).is_none());
/// ```
pub trait OverrideSource: Send + Sync {
    /// Returns the name of this override source, for logging.
    fn name(&self) -> &str;

    /// Returns the overriding value for `key`, or `None` when this source
    /// has no opinion and the next source (or the store) should be asked.
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue>;

    /// Convenience form of [`lookup`](Self::lookup) taking a string slice.
    fn lookup_str(&self, key: &str) -> Option<ConfigValue> {
        self.lookup(&ConfigKey::from(key))
    }
}
