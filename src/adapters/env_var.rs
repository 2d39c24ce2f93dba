// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable override adapter.
//!
//! Environment variables take precedence over stored values: the service
//! asks this adapter first and only falls back to the property table when
//! the corresponding variable is unset.

use crate::domain::{ConfigKey, ConfigValue};
use crate::ports::OverrideSource;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Override source backed by the process environment.
///
/// A configuration key is mapped to a variable name by uppercasing it and
/// replacing dots with underscores, with an optional prefix in front:
/// `database.host` becomes `DATABASE_HOST`, or `APP_DATABASE_HOST` with the
/// prefix `APP_`. Values are returned verbatim; they do not take part in
/// reference expansion.
///
/// The environment is snapshotted lazily on first lookup; call
/// [`refresh`](Self::refresh) to re-read it.
///
/// # Examples
///
/// ```rust
/// use refcfg::adapters::EnvOverride;
///
/// // All variables
/// let adapter = EnvOverride::new();
///
/// // Only variables starting with "APP_"
/// let adapter = EnvOverride::with_prefix("APP_");
/// ```
#[derive(Debug)]
pub struct EnvOverride {
    /// Optional prefix prepended to the mapped variable name
    prefix: Option<String>,
    /// Cached environment snapshot with interior mutability for thread-safe lazy loading
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl EnvOverride {
    /// Creates an override source over the whole environment.
    pub fn new() -> Self {
        Self {
            prefix: None,
            cache: RwLock::new(None),
        }
    }

    /// Creates an override source whose variable names carry `prefix`.
    ///
    /// Only keys mapping to a name starting with the prefix can match, which
    /// keeps unrelated environment variables from shadowing configuration.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            cache: RwLock::new(None),
        }
    }

    /// Creates an adapter with pre-populated values for testing.
    ///
    /// Keys are environment-style variable names (`DATABASE_HOST`), not
    /// configuration keys. No prefix is applied.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            cache: RwLock::new(Some(values)),
        }
    }

    /// Drops the cached snapshot so the next lookup re-reads the environment.
    pub fn refresh(&self) {
        let mut cache_guard = self.cache.write().unwrap();
        *cache_guard = None;
    }

    /// Maps a configuration key to the environment variable name consulted
    /// for it.
    fn env_name(&self, key: &str) -> String {
        let mapped = key.to_uppercase().replace('.', "_");
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, mapped),
            None => mapped,
        }
    }

    /// Loads the environment into a fresh snapshot.
    fn load(&self) -> HashMap<String, String> {
        let mut snapshot = HashMap::new();

        for (key, value) in env::vars() {
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    key_len = key.len(),
                    value_len = value.len(),
                    "skipping oversized environment variable"
                );
                continue;
            }

            if let Some(prefix) = &self.prefix {
                if !key.starts_with(prefix) {
                    continue;
                }
            }

            snapshot.insert(key, value);
        }

        tracing::debug!(
            count = snapshot.len(),
            prefix = ?self.prefix,
            "loaded environment snapshot"
        );

        snapshot
    }

    /// Gets the snapshot, loading it if necessary.
    fn get_cache(&self) -> HashMap<String, String> {
        {
            let cache_guard = self.cache.read().unwrap();
            if let Some(cache) = cache_guard.as_ref() {
                return cache.clone();
            }
        }

        let new_cache = self.load();

        {
            let mut cache_guard = self.cache.write().unwrap();
            *cache_guard = Some(new_cache.clone());
        }

        new_cache
    }
}

impl Default for EnvOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideSource for EnvOverride {
    fn name(&self) -> &str {
        "env"
    }

    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
        let cache = self.get_cache();
        cache
            .get(&self.env_name(key.as_str()))
            .map(|v| ConfigValue::from(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::OverrideSource;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn adapter_name() {
        assert_eq!(EnvOverride::new().name(), "env");
    }

    #[test]
    fn key_mapping_uppercases_and_replaces_dots() {
        let adapter = EnvOverride::new();
        assert_eq!(adapter.env_name("database.host"), "DATABASE_HOST");

        let prefixed = EnvOverride::with_prefix("APP_");
        assert_eq!(prefixed.env_name("database.host"), "APP_DATABASE_HOST");
    }

    #[test]
    fn lookup_finds_a_set_variable() {
        let mut guard = EnvGuard::new();
        guard.set("REFCFG_TEST_OVERRIDE_VAR", "from_env");

        let adapter = EnvOverride::new();
        let value = adapter.lookup_str("refcfg.test.override.var");
        assert_eq!(value.unwrap().as_str(), "from_env");
    }

    #[test]
    fn lookup_misses_an_unset_variable() {
        let adapter = EnvOverride::new();
        assert!(adapter.lookup_str("definitely.unset.variable.12345").is_none());
    }

    #[test]
    fn prefix_filters_other_variables() {
        let mut guard = EnvGuard::new();
        guard.set("RCFGP_DB_HOST", "localhost");
        guard.set("OTHER_VAR", "hidden");

        let adapter = EnvOverride::with_prefix("RCFGP_");
        assert_eq!(adapter.lookup_str("db.host").unwrap().as_str(), "localhost");
        // OTHER_VAR does not carry the prefix, so no key can reach it.
        assert!(adapter.lookup_str("other.var").is_none());
    }

    #[test]
    fn refresh_picks_up_changes() {
        let mut guard = EnvGuard::new();
        guard.set("RCFGR_VALUE", "initial");

        let adapter = EnvOverride::with_prefix("RCFGR_");
        assert_eq!(adapter.lookup_str("value").unwrap().as_str(), "initial");

        guard.set("RCFGR_VALUE", "updated");
        adapter.refresh();
        assert_eq!(adapter.lookup_str("value").unwrap().as_str(), "updated");
    }

    #[test]
    fn with_values_bypasses_the_environment() {
        let mut values = HashMap::new();
        values.insert("SERVICE_MODE".to_string(), "test".to_string());

        let adapter = EnvOverride::with_values(values);
        assert_eq!(adapter.lookup_str("service.mode").unwrap().as_str(), "test");
        assert!(adapter.lookup_str("service.other").is_none());
    }

    #[test]
    fn override_values_are_returned_verbatim() {
        let mut values = HashMap::new();
        values.insert("TEMPLATED".to_string(), "{not.expanded}".to_string());

        let adapter = EnvOverride::with_values(values);
        // References in override values are not touched by the resolver.
        assert_eq!(
            adapter.lookup_str("templated").unwrap().as_str(),
            "{not.expanded}"
        );
    }
}
