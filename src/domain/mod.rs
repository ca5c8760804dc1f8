// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the keys, values, declared types and errors the aggregator
//! is built from. It knows nothing about where configuration comes from.

pub mod config_key;
pub mod config_map;
pub mod config_value;
pub mod descriptor;
pub mod errors;
pub mod service;
pub mod value_type;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_map::ConfigMap;
pub use config_value::ConfigValue;
pub use descriptor::ModuleDescriptor;
pub use errors::{ConfigError, Result};
pub use service::ConfigurationService;
pub use value_type::ValueType;
