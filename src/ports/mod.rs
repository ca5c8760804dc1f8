// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the aggregator and the outside world: where module values come from,
//! how module paths resolve and how configuration files are parsed.

pub mod parser;
pub mod resolver;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use resolver::ModuleResolver;
pub use source::{ConfigSource, SourceEntry};
