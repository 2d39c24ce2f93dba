// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing source and override implementations.
//!
//! This module contains concrete implementations of the ports: file-backed
//! and in-memory property sources, and the environment variable override.

#[cfg(feature = "env")]
pub mod env_var;
#[cfg(feature = "json")]
pub mod json_file;
pub mod memory;
pub mod properties_file;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvOverride;
#[cfg(feature = "json")]
pub use json_file::{JsonFileAdapter, JsonParser};
pub use memory::MapSource;
pub use properties_file::{PropertiesFileAdapter, PropertiesParser};
