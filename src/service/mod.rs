// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration service facade.
//!
//! This module contains the concrete [`ConfigService`], which composes the
//! domain store with override sources and locking, and its builder.

pub mod config_service;

// Re-export commonly used types
pub use config_service::{ConfigService, ConfigServiceBuilder};
