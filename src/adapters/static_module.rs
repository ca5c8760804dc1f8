// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled-in configuration modules.
//!
//! A `StaticModule` is a constant table of defaults built in code. It is the
//! cheapest kind of module: resolution never touches the filesystem.

use crate::domain::{ConfigValue, ModuleDescriptor, Result, ValueType};
use crate::ports::{ConfigSource, SourceEntry};

/// A named table of default values built in code.
///
/// Entries keep insertion order. Setting the same name twice keeps the first
/// position and the last value.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::StaticModule;
/// use modconfig::domain::{ConfigValue, ValueType};
/// use modconfig::ports::ConfigSource;
///
/// let production = StaticModule::new("example.production")
///     .with("ENV", "production")
///     .with("SOME_LIMIT", 42)
///     .with("DATABASE", ConfigValue::map([("host", "db.com"), ("user", "guest")]))
///     .with_typed("APP_DIR", ValueType::String, "/srv/app");
///
/// assert_eq!(production.name(), "example.production");
/// assert_eq!(production.entries().unwrap().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct StaticModule {
    name: String,
    entries: Vec<SourceEntry>,
}

impl StaticModule {
    /// Creates an empty module with the given canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Adds a value whose type is inferred when it is first stored.
    pub fn with(self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.with_entry(SourceEntry::new(name, value))
    }

    /// Adds a value with an explicit type annotation.
    pub fn with_typed(
        self,
        name: impl Into<String>,
        declared_type: ValueType,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.with_entry(SourceEntry::typed(name, declared_type, value))
    }

    /// Adds a prepared entry.
    pub fn with_entry(mut self, entry: SourceEntry) -> Self {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the module has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<SourceEntry>> {
        Ok(self.entries.clone())
    }
}

impl From<StaticModule> for ModuleDescriptor {
    fn from(module: StaticModule) -> Self {
        ModuleDescriptor::source(module)
    }
}
