// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration aggregator.
//!
//! `Config` implements the `ConfigurationService` trait and is the main interface
//! for building and reading configuration values.

pub mod builder;
pub mod config;

// Re-export commonly used types
pub use builder::ConfigBuilder;
pub use config::{decode_json, identity, Config, Iter, Processor, UpdateOptions};
