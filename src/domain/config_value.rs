// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! Values handed out by the store are plain strings whose references have
//! already been expanded. `ConfigValue` wraps that string and offers
//! conversions to the handful of types configuration consumers actually ask
//! for, including separator-split lists.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for a (resolved) configuration value.
///
/// # Examples
///
/// ```
/// use refcfg::domain::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), "42");
/// assert_eq!(value.as_i32("retries").unwrap(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Clones the value into a `String`.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Converts the value into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes, case-insensitively: `true`/`yes`/`1`/`on` and
    /// `false`/`no`/`0`/`off`. `key` is only used in the error message.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self.0.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => self
                .0
                .parse::<bool>()
                .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.0
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.0
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.0
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        self.0
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Splits the value on `sep` into a list of strings.
    ///
    /// Empty fields are preserved, including a trailing one, so
    /// `"a,,b,".as_list(",")` has four elements. An empty value yields a
    /// single empty element.
    ///
    /// # Examples
    ///
    /// ```
    /// use refcfg::domain::ConfigValue;
    ///
    /// let value = ConfigValue::from("alpha,beta,gamma");
    /// assert_eq!(value.as_list(","), vec!["alpha", "beta", "gamma"]);
    /// ```
    pub fn as_list(&self, sep: &str) -> Vec<String> {
        self.0.split(sep).map(String::from).collect()
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_accessors() {
        let value = ConfigValue::new("hello".to_string());
        assert_eq!(value.as_str(), "hello");
        assert_eq!(value.as_string(), "hello");
        assert_eq!(value.clone().into_string(), "hello");
        assert_eq!(format!("{}", value), "hello");
    }

    #[test]
    fn bool_conversion_accepts_aliases() {
        for s in ["true", "YES", "1", "on"] {
            assert!(ConfigValue::from(s).as_bool("k").unwrap());
        }
        for s in ["false", "No", "0", "OFF"] {
            assert!(!ConfigValue::from(s).as_bool("k").unwrap());
        }
    }

    #[test]
    fn bool_conversion_rejects_garbage() {
        let err = ConfigValue::from("maybe").as_bool("flag").unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
        assert!(err.to_string().contains("flag"));
    }

    #[test]
    fn integer_conversions() {
        let value = ConfigValue::from("42");
        assert_eq!(value.as_i32("k").unwrap(), 42);
        assert_eq!(value.as_i64("k").unwrap(), 42);
        assert_eq!(value.as_u64("k").unwrap(), 42);
        assert!(ConfigValue::from("-1").as_u64("k").is_err());
        assert!(ConfigValue::from("x").as_i32("k").is_err());
    }

    #[test]
    fn float_conversion() {
        let value = ConfigValue::from("3.14");
        assert!((value.as_f64("k").unwrap() - 3.14).abs() < 1e-10);
        assert!(ConfigValue::from("pi").as_f64("k").is_err());
    }

    #[test]
    fn list_preserves_empty_fields() {
        assert_eq!(
            ConfigValue::from("a,,b,").as_list(","),
            vec!["a", "", "b", ""]
        );
        assert_eq!(ConfigValue::from("").as_list(","), vec![""]);
        assert_eq!(ConfigValue::from("solo").as_list(","), vec!["solo"]);
    }
}
