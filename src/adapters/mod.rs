// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer: module sources (`StaticModule`, `FileModule`), the environment snapshot
//! (`EnvVarAdapter`), file parsers and the default `ModuleResolver`.

pub mod env_var;
pub mod file_module;
pub mod json_file;
pub mod registry;
pub mod static_module;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use env_var::EnvVarAdapter;
pub use file_module::FileModule;
pub use json_file::JsonParser;
pub use registry::ModuleRegistry;
pub use static_module::StaticModule;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
