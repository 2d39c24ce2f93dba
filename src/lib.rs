// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration store with recursive reference substitution.
//!
//! This crate provides a small configuration store whose values may reference
//! other keys with a `{name}` syntax. References are expanded eagerly: every
//! mutation of the store re-resolves the whole table, so reads always see
//! fully-expanded values. A table like
//!
//! ```text
//! A=12345678
//! B={A}90
//! C={B} plus more
//! ```
//!
//! yields `"1234567890 plus more"` for `C`. Expansion is bounded by a fixed
//! recursion depth; references that cannot be expanded (unknown key, missing
//! closing delimiter, depth exceeded) are left in the value as literal text
//! rather than reported as errors.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types, the substitution engine, and the store
//!   (`ConfigKey`, `ConfigValue`, `PropertyStore`, errors)
//! - **Ports**: Trait definitions for sources, parsers, and overrides
//!   (`PropertySource`, `PropertyParser`, `OverrideSource`)
//! - **Adapters**: Implementations for specific sources (properties files,
//!   JSON files, environment variables, in-memory maps)
//! - **Service**: The configuration service facade that composes a store with
//!   an override chain behind a lock
//!
//! # Feature Flags
//!
//! - `env`: Enable the environment variable override adapter (default)
//! - `json`: Enable the JSON file source adapter (default)
//!
//! # Quick Start
//!
//! ```rust
//! use refcfg::prelude::*;
//!
//! # fn main() -> refcfg::domain::Result<()> {
//! let service = ConfigService::builder()
//!     .with_source(Box::new(MapSource::new("defaults", vec![
//!         ("greeting.name", "world"),
//!         ("greeting.text", "hello, {greeting.name}!"),
//!     ])))
//!     .build()?;
//!
//! assert_eq!(service.get_str("greeting.text")?.as_str(), "hello, world!");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{ConfigError, ConfigKey, ConfigValue, PropertyStore, Result};
    pub use crate::ports::{OverrideSource, PropertyParser, PropertySource};
    pub use crate::service::{ConfigService, ConfigServiceBuilder};

    pub use crate::adapters::{MapSource, PropertiesFileAdapter, PropertiesParser};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvOverride;
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonFileAdapter;
}
