// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration aggregation from fallback modules, keyword overrides and typed
//! environment variables.
//!
//! A [`Config`](service::Config) is built from three kinds of input, lowest
//! precedence first:
//!
//! 1. the first module in a fallback list that resolves (a compiled-in
//!    `StaticModule`, a YAML or JSON file, or an `env:NAME` pointer to either),
//! 2. keyword options given in code,
//! 3. environment variables, which only update keys that already exist.
//!
//! Each key's type is fixed the first time it is stored. Environment strings are
//! decoded as JSON when they parse and are then coerced into that type, so
//! `SOME_LIMIT=100` updates an integer and `DATABASE='{"host": "new.com"}'`
//! replaces a mapping. Values that can't be coerced are logged and ignored.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ValueType`,
//!   `ModuleDescriptor`, errors)
//! - **Ports**: Trait definitions (`ConfigSource`, `ModuleResolver`, `ConfigParser`)
//! - **Adapters**: Module sources, the environment snapshot, file parsers and the
//!   default resolver
//! - **Service**: The `Config` aggregator and its builder
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML module files (default). JSON module files are always
//!   available.
//!
//! # Quick Start
//!
//! ```rust
//! use modconfig::prelude::*;
//!
//! let defaults = StaticModule::new("example.production")
//!     .with("SECRET", "unsecure")
//!     .with("SOME_LIMIT", 42)
//!     .with("DATABASE", ConfigValue::map([("host", "db.com"), ("user", "guest")]));
//!
//! let config = Config::builder()
//!     .module(defaults)
//!     .option("API_KEY", "redefined")
//!     .env_source(EnvVarAdapter::with_values([
//!         ("SOME_LIMIT", "100"),
//!         ("DATABASE", "[1,2,3]"),
//!     ]))
//!     .build();
//!
//! assert_eq!(config["SOME_LIMIT"], ConfigValue::from(100));
//! // A list can't become a mapping; the module value stays.
//! assert_eq!(config["DATABASE"].as_map().unwrap()["host"], ConfigValue::from("db.com"));
//! assert_eq!(config.get_or("MISSING", true), ConfigValue::from(true));
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
    pub use crate::adapters::{EnvVarAdapter, FileModule, ModuleRegistry, StaticModule};
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigMap, ConfigValue, ConfigurationService, ModuleDescriptor, Result,
        ValueType,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, ModuleResolver, SourceEntry};
    pub use crate::service::{Config, ConfigBuilder, UpdateOptions};
}
