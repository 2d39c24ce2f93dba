// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service implementation.
//!
//! The service composes a [`PropertyStore`] with an ordered chain of
//! override sources behind a lock. It is an explicit instance meant to be
//! constructed once (usually through the builder) and passed to whatever
//! needs configuration; there is no process-wide singleton.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, PropertyStore, Result};
use crate::ports::{OverrideSource, PropertySource};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Configuration service: override chain first, resolved store second.
///
/// Reads (`get`, `to_map`) take a shared lock on the store; mutations
/// (`set`, `load`) take the exclusive lock so the full-table resolution pass
/// runs over a consistent snapshot.
///
/// # Examples
///
/// ```rust
/// use refcfg::adapters::MapSource;
/// use refcfg::service::ConfigService;
///
/// # fn main() -> refcfg::domain::Result<()> {
/// let service = ConfigService::builder()
///     .with_source(Box::new(MapSource::new("defaults", vec![
///         ("db.host", "localhost"),
///         ("db.url", "postgres://{db.host}:5432"),
///     ])))
///     .build()?;
///
/// assert_eq!(service.get_str("db.url")?.as_str(), "postgres://localhost:5432");
/// # Ok(())
/// # }
/// ```
pub struct ConfigService {
    /// The resolved property table
    store: RwLock<PropertyStore>,
    /// Override sources, consulted in registration order before the store
    overrides: Vec<Box<dyn OverrideSource>>,
}

impl ConfigService {
    /// Creates an empty service with no overrides.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(PropertyStore::new()),
            overrides: Vec::new(),
        }
    }

    /// Creates a new service builder.
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    // A poisoned lock still guards a structurally intact table; recover the
    // guard instead of propagating the panic of an unrelated thread.
    fn read_store(&self) -> RwLockReadGuard<'_, PropertyStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, PropertyStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Retrieves the value for `key`.
    ///
    /// Override sources are consulted in registration order; the first one
    /// with an opinion wins and its value is returned verbatim. Otherwise
    /// the resolved store value is returned.
    pub fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        for source in &self.overrides {
            if let Some(value) = source.lookup(key) {
                tracing::trace!(key = %key, source = source.name(), "override hit");
                return Ok(value);
            }
        }

        self.read_store()
            .get(key)
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.as_str().to_string(),
            })
    }

    /// Convenience form of [`get`](Self::get) taking a string slice.
    pub fn get_str(&self, key: &str) -> Result<ConfigValue> {
        self.get(&ConfigKey::from(key))
    }

    /// Retrieves the value for `key`, or `default` when it is absent.
    pub fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    /// Returns `true` when `key` resolves through an override or the store.
    pub fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    /// Stores `value` under `key` and re-resolves the table.
    ///
    /// Returns the previously stored value, if any. The whole mutation,
    /// including the resolution pass, runs under the exclusive lock.
    pub fn set(&self, key: impl Into<ConfigKey>, value: impl Into<String>) -> Option<ConfigValue> {
        self.write_store().set(key, value)
    }

    /// Bulk-loads `source` into the store and re-resolves the table once.
    ///
    /// Returns the number of imported pairs. Unlike builder-time loading,
    /// errors are surfaced to the caller here.
    pub fn load(&self, source: &dyn PropertySource) -> Result<usize> {
        self.write_store().load(source)
    }

    /// Exports the full resolved table as a key→value mapping.
    ///
    /// Override sources are point lookups and are not merged in.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.read_store().to_map()
    }

    /// Appends an override source to the chain.
    pub fn add_override(&mut self, source: Box<dyn OverrideSource>) {
        self.overrides.push(source);
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`ConfigService`].
///
/// Sources are loaded in registration order when [`build`](Self::build)
/// runs; a source that fails to read is logged and skipped, so a missing
/// configuration file never takes the process down — its keys are simply
/// absent.
///
/// # Examples
///
/// ```rust,no_run
/// use refcfg::service::ConfigServiceBuilder;
///
/// # fn main() -> refcfg::domain::Result<()> {
/// let service = ConfigServiceBuilder::new()
///     .with_properties_file("/etc/myapp/config.properties")
///     .with_properties_dir("/etc/myapp/conf.d", ".properties")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigServiceBuilder {
    sources: Vec<Box<dyn PropertySource>>,
    overrides: Vec<Box<dyn OverrideSource>>,
}

impl ConfigServiceBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Adds a property source.
    pub fn with_source(mut self, source: Box<dyn PropertySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds a properties file source.
    pub fn with_properties_file(self, path: impl AsRef<std::path::Path>) -> Self {
        use crate::adapters::PropertiesFileAdapter;
        self.with_source(Box::new(PropertiesFileAdapter::from_file(path)))
    }

    /// Adds every file in `dir` whose name ends with `suffix` as a
    /// properties file source, in name order.
    ///
    /// An unreadable directory is logged and skipped.
    pub fn with_properties_dir(
        mut self,
        dir: impl AsRef<std::path::Path>,
        suffix: &str,
    ) -> Self {
        use crate::adapters::PropertiesFileAdapter;

        let dir = dir.as_ref();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot scan properties directory");
                return self;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(suffix))
            })
            .collect();
        paths.sort();

        for path in paths {
            self.sources
                .push(Box::new(PropertiesFileAdapter::from_file(path)));
        }
        self
    }

    /// Adds a JSON file source.
    #[cfg(feature = "json")]
    pub fn with_json_file(self, path: impl AsRef<std::path::Path>) -> Self {
        use crate::adapters::JsonFileAdapter;
        self.with_source(Box::new(JsonFileAdapter::from_file(path)))
    }

    /// Adds an override source to the chain.
    pub fn with_override(mut self, source: Box<dyn OverrideSource>) -> Self {
        self.overrides.push(source);
        self
    }

    /// Adds the environment as an override source.
    #[cfg(feature = "env")]
    pub fn with_env_override(self) -> Self {
        use crate::adapters::EnvOverride;
        self.with_override(Box::new(EnvOverride::new()))
    }

    /// Adds the environment as an override source, restricted to variables
    /// carrying `prefix`.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvOverride;
        self.with_override(Box::new(EnvOverride::with_prefix(prefix)))
    }

    /// Builds the service, loading every registered source.
    ///
    /// Sources load in registration order into one store; each load ends
    /// with a full-table resolution pass, so references may span sources
    /// regardless of which file defines the referenced key. A source that
    /// cannot be read is logged and skipped.
    pub fn build(self) -> Result<ConfigService> {
        let mut store = PropertyStore::new();

        for source in &self.sources {
            match store.load(source.as_ref()) {
                Ok(count) => {
                    tracing::debug!(source = source.name(), count, "loaded configuration source");
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        error = %e,
                        "configuration source ignored"
                    );
                }
            }
        }

        Ok(ConfigService {
            store: RwLock::new(store),
            overrides: self.overrides,
        })
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MapSource;

    struct FixedOverride {
        key: &'static str,
        value: &'static str,
    }

    impl OverrideSource for FixedOverride {
        fn name(&self) -> &str {
            "fixed"
        }

        fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
            (key.as_str() == self.key).then(|| ConfigValue::from(self.value))
        }
    }

    #[test]
    fn empty_service_misses_everything() {
        let service = ConfigService::new();
        assert!(matches!(
            service.get_str("anything").unwrap_err(),
            ConfigError::ConfigKeyNotFound { .. }
        ));
    }

    #[test]
    fn get_resolves_through_the_store() {
        let service = ConfigService::builder()
            .with_source(Box::new(MapSource::new(
                "defaults",
                vec![("a", "1"), ("b", "{a}2")],
            )))
            .build()
            .unwrap();

        assert_eq!(service.get_str("b").unwrap().as_str(), "12");
    }

    #[test]
    fn overrides_win_over_the_store() {
        let mut service = ConfigService::builder()
            .with_source(Box::new(MapSource::new("defaults", vec![("mode", "prod")])))
            .build()
            .unwrap();
        service.add_override(Box::new(FixedOverride {
            key: "mode",
            value: "test",
        }));

        assert_eq!(service.get_str("mode").unwrap().as_str(), "test");
    }

    #[test]
    fn override_chain_respects_registration_order() {
        let service = ConfigService::builder()
            .with_override(Box::new(FixedOverride {
                key: "k",
                value: "first",
            }))
            .with_override(Box::new(FixedOverride {
                key: "k",
                value: "second",
            }))
            .build()
            .unwrap();

        assert_eq!(service.get_str("k").unwrap().as_str(), "first");
    }

    #[test]
    fn overrides_only_shadow_their_own_key() {
        let mut service = ConfigService::builder()
            .with_source(Box::new(MapSource::new("defaults", vec![("other", "v")])))
            .build()
            .unwrap();
        service.add_override(Box::new(FixedOverride {
            key: "mode",
            value: "test",
        }));

        assert_eq!(service.get_str("other").unwrap().as_str(), "v");
    }

    #[test]
    fn set_mutates_and_re_resolves() {
        let service = ConfigService::new();
        assert!(service.set("A", "1").is_none());
        service.set("B", "{A}x");
        assert_eq!(service.get_str("B").unwrap().as_str(), "1x");

        let previous = service.set("A", "2").unwrap();
        assert_eq!(previous.as_str(), "1");
    }

    #[test]
    fn load_surfaces_errors() {
        use crate::adapters::PropertiesFileAdapter;

        let service = ConfigService::new();
        let missing = PropertiesFileAdapter::from_file("/nonexistent/x.properties");
        assert!(service.load(&missing).is_err());
    }

    #[test]
    fn builder_skips_unreadable_sources() {
        let service = ConfigService::builder()
            .with_properties_file("/nonexistent/a.properties")
            .with_source(Box::new(MapSource::new("defaults", vec![("k", "v")])))
            .build()
            .unwrap();

        // The broken file contributes nothing; the healthy source loads.
        assert_eq!(service.get_str("k").unwrap().as_str(), "v");
    }

    #[test]
    fn get_or_default_and_has() {
        let service = ConfigService::builder()
            .with_source(Box::new(MapSource::new("defaults", vec![("k", "v")])))
            .build()
            .unwrap();

        assert!(service.has(&ConfigKey::from("k")));
        assert!(!service.has(&ConfigKey::from("missing")));
        assert_eq!(
            service
                .get_or_default(&ConfigKey::from("missing"), "fallback")
                .as_str(),
            "fallback"
        );
    }

    #[test]
    fn to_map_exports_the_resolved_table() {
        let service = ConfigService::builder()
            .with_source(Box::new(MapSource::new(
                "defaults",
                vec![("name", "svc"), ("label", "{name}-prod")],
            )))
            .build()
            .unwrap();

        let map = service.to_map();
        assert_eq!(map.get("label"), Some(&"svc-prod".to_string()));
    }

    #[test]
    fn references_span_sources() {
        let service = ConfigService::builder()
            .with_source(Box::new(MapSource::new("base", vec![("host", "db1")])))
            .with_source(Box::new(MapSource::new(
                "derived",
                vec![("url", "{host}:5432")],
            )))
            .build()
            .unwrap();

        assert_eq!(service.get_str("url").unwrap().as_str(), "db1:5432");
    }
}
