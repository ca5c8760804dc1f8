// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use modconfig::adapters::{EnvVarAdapter, ModuleRegistry, StaticModule};
use modconfig::domain::{ConfigError, ConfigValue, Result, ValueType};
use modconfig::ports::{ConfigSource, SourceEntry};
use std::env;

/// The application defaults every example module starts from.
#[allow(dead_code)]
pub fn example_defaults() -> StaticModule {
    StaticModule::new("example.defaults")
        .with("ENV", "production")
        .with("SECRET", "unsecure")
        .with("API_KEY", "something")
        .with_typed("APP_DIR", ValueType::String, "/srv/app")
        .with("SOME_LIMIT", 42)
        .with(
            "DATABASE",
            ConfigValue::map([("host", "localhost"), ("user", "guest")]),
        )
        .with("_PRIVATE", "hidden")
}

/// Defaults with the test environment marker.
#[allow(dead_code)]
pub fn example_tests() -> StaticModule {
    let mut module = StaticModule::new("example.tests");
    for entry in example_defaults().entries().unwrap_or_default() {
        module = module.with_entry(entry);
    }
    module.with("ENV", "tests")
}

/// Defaults pointed at the production database.
#[allow(dead_code)]
pub fn example_production() -> StaticModule {
    let mut module = StaticModule::new("example.production");
    for entry in example_defaults().entries().unwrap_or_default() {
        module = module.with_entry(entry);
    }
    module.with(
        "DATABASE",
        ConfigValue::map([("host", "db.com"), ("user", "guest")]),
    )
}

/// A registry holding every example module.
#[allow(dead_code)]
pub fn example_registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .with_module(example_defaults())
        .with_module(example_tests())
        .with_module(example_production())
}

/// An environment with the given variables and nothing else.
#[allow(dead_code)]
pub fn fixed_env(vars: &[(&str, &str)]) -> EnvVarAdapter {
    EnvVarAdapter::with_values(vars.iter().copied())
}

/// A source whose entries can't be read.
#[allow(dead_code)]
pub struct FailingSource;

impl ConfigSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn entries(&self) -> Result<Vec<SourceEntry>> {
        Err(ConfigError::SourceError {
            source_name: "failing".to_string(),
            message: "unavailable".to_string(),
            source: None,
        })
    }
}

/// Helper to set and clean up environment variables.
///
/// Tests using it must pick variable names no other test uses, since the test
/// harness runs tests in parallel within one process.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
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
