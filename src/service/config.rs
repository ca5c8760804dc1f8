// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration aggregator.
//!
//! `Config` owns an ordered store of uppercase keys and typed values. It is filled
//! from three kinds of input, lowest precedence first: a fallback list of modules,
//! keyword overrides, and the process environment. The first time a key is stored
//! its type is fixed, and every later update is coerced into that type or dropped
//! with a warning.

use crate::adapters::EnvVarAdapter;
use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, ConfigurationService, ModuleDescriptor, Result,
    ValueType,
};
use crate::ports::{ConfigSource, ModuleResolver};
use crate::service::builder::ConfigBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// A value preprocessing step run before coercion.
pub type Processor = fn(ConfigValue) -> ConfigValue;

/// Returns the value unchanged.
pub fn identity(value: ConfigValue) -> ConfigValue {
    value
}

/// Decodes string values as JSON, keeping the raw string when that fails.
///
/// This is the processor environment updates run through.
pub fn decode_json(value: ConfigValue) -> ConfigValue {
    match value {
        ConfigValue::String(raw) => ConfigValue::from_json_or_string(&raw),
        other => other,
    }
}

/// Options for a single [`Config::update_from_dict`] call.
///
/// # Examples
///
/// ```rust
/// use modconfig::domain::ValueType;
/// use modconfig::service::{decode_json, UpdateOptions};
///
/// let options = UpdateOptions::new()
///     .prefix("APP_")
///     .processor(decode_json)
///     .annotation("APP_RATIO", ValueType::Float);
/// assert!(options.exist_only);
/// ```
#[derive(Clone, Debug)]
pub struct UpdateOptions {
    /// Entries whose name doesn't start with this prefix are ignored. The prefix is
    /// stripped before the key is resolved.
    pub prefix: String,
    /// Only update keys that are already stored.
    pub exist_only: bool,
    /// Runs on every value before coercion.
    pub processor: Processor,
    /// Declared types by entry name, as given (before prefix stripping).
    pub annotations: HashMap<String, ValueType>,
}

impl UpdateOptions {
    /// Creates the default options: no prefix, update-only, identity processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets whether only existing keys are updated.
    pub fn exist_only(mut self, exist_only: bool) -> Self {
        self.exist_only = exist_only;
        self
    }

    /// Sets the value processor.
    pub fn processor(mut self, processor: Processor) -> Self {
        self.processor = processor;
        self
    }

    /// Declares the type of the entry called `name`.
    pub fn annotation(mut self, name: impl Into<String>, declared_type: ValueType) -> Self {
        self.annotations.insert(name.into(), declared_type);
        self
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            exist_only: true,
            processor: identity,
            annotations: HashMap::new(),
        }
    }
}

/// An aggregated configuration.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::{EnvVarAdapter, StaticModule};
/// use modconfig::domain::ConfigValue;
/// use modconfig::service::Config;
///
/// let defaults = StaticModule::new("example.production")
///     .with("SECRET", "unsecure")
///     .with("SOME_LIMIT", 42);
///
/// let config = Config::builder()
///     .module(defaults)
///     .option("API_KEY", "redefined")
///     .env_source(EnvVarAdapter::with_values([("SOME_LIMIT", "100")]))
///     .build();
///
/// assert_eq!(config["secret"], ConfigValue::from("unsecure"));
/// assert_eq!(config.get("SOME_LIMIT").unwrap().as_i64(), Some(100));
/// assert_eq!(config.get_or("MISSING", true), ConfigValue::from(true));
/// ```
pub struct Config {
    prefix: String,
    case_insensitive: bool,
    entries: Vec<(ConfigKey, ConfigValue)>,
    positions: HashMap<ConfigKey, usize>,
    types: HashMap<ConfigKey, ValueType>,
    resolver: Box<dyn ModuleResolver>,
    env: EnvVarAdapter,
}

impl Config {
    /// Creates a configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Builds a configuration from modules and keyword overrides, then merges the
    /// process environment.
    ///
    /// Shorthand for the builder with default settings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modconfig::domain::ConfigValue;
    /// use modconfig::service::Config;
    ///
    /// let config = Config::new(["unknown.module"], [("OPTION", 42)]);
    /// assert_eq!(config["OPTION"], ConfigValue::from(42));
    /// ```
    pub fn new<M, O, K, V>(modules: M, options: O) -> Self
    where
        M: IntoIterator,
        M::Item: Into<ModuleDescriptor>,
        O: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        ConfigBuilder::new().modules(modules).options(options).build()
    }

    /// Creates an empty configuration. Used by the builder.
    pub(crate) fn empty(
        prefix: String,
        case_insensitive: bool,
        resolver: Box<dyn ModuleResolver>,
        env: EnvVarAdapter,
    ) -> Self {
        Self {
            prefix,
            case_insensitive,
            entries: Vec::new(),
            positions: HashMap::new(),
            types: HashMap::new(),
            resolver,
            env,
        }
    }

    /// Returns the prefix environment variables must carry.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if update names are matched ignoring case.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is stored. The key is uppercased first.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the type fixed for `key`, if it is stored.
    pub fn declared_type(&self, key: &str) -> Option<ValueType> {
        self.types.get(&ConfigKey::from(key)).copied()
    }

    /// Retrieves the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` if the key is not stored.
    pub fn get(&self, key: &str) -> Result<&ConfigValue> {
        self.lookup(key).ok_or_else(|| ConfigError::UnknownOption {
            key: key.to_string(),
        })
    }

    /// Retrieves the value stored under `key`, or `default` if there is none.
    pub fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        match self.lookup(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Subscript lookup that reports a missing key as an error instead of
    /// panicking.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the key is not stored.
    pub fn try_index(&self, key: &str) -> Result<&ConfigValue> {
        self.lookup(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_uppercase(),
        })
    }

    /// Deserializes the value stored under `key` into any `serde` type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modconfig::domain::ConfigValue;
    /// use modconfig::service::Config;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Database {
    ///     host: String,
    ///     user: String,
    /// }
    ///
    /// let config = Config::builder()
    ///     .option("DATABASE", ConfigValue::map([("host", "db.com"), ("user", "guest")]))
    ///     .update_from_env(false)
    ///     .build();
    ///
    /// let db: Database = config.extract("database").unwrap();
    /// assert_eq!(db.host, "db.com");
    /// ```
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get(key)?.deserialize_into(key)
    }

    /// Iterates over stored pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&ConfigValue> {
        self.positions
            .get(key.to_uppercase().as_str())
            .map(|&i| &self.entries[i].1)
    }

    /// Strips `prefix` from `name`, ignoring case when the configuration does.
    fn strip_prefix<'a>(&self, name: &'a str, prefix: &str) -> Option<&'a str> {
        if prefix.is_empty() {
            return Some(name);
        }
        let head = name.get(..prefix.len())?;
        let matches = if self.case_insensitive {
            head.eq_ignore_ascii_case(prefix)
        } else {
            head == prefix
        };
        matches.then(|| &name[prefix.len()..])
    }

    /// Case-sensitive lookups of existing keys need the exact uppercase name;
    /// names that may create a key are always normalised.
    fn resolve_key(&self, name: &str, exist_only: bool) -> Option<ConfigKey> {
        if self.case_insensitive || !exist_only {
            ConfigKey::parse(name)
        } else {
            ConfigKey::parse_exact(name)
        }
    }

    fn store(&mut self, key: ConfigKey, value: ConfigValue, declared_type: ValueType) {
        match self.positions.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), value));
            }
        }
        self.types.entry(key).or_insert(declared_type);
    }

    /// Merges name/value pairs into the store.
    ///
    /// For each entry the prefix is stripped (entries without it are skipped),
    /// private and empty names are skipped, and the name is turned into a key. With
    /// `exist_only` set, keys that aren't stored yet are skipped. The value then
    /// runs through the processor and is coerced into the key's type; a key seen for
    /// the first time takes its type from `annotations` or else from the value.
    /// `Null` is stored as is. A value the type rejects is logged and dropped,
    /// leaving the previous value in place.
    ///
    /// Returns the number of values stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modconfig::domain::ConfigValue;
    /// use modconfig::service::{Config, UpdateOptions};
    ///
    /// let mut config = Config::builder().option("LIMIT", 10).update_from_env(false).build();
    ///
    /// let stored = config.update_from_dict(
    ///     [("limit", ConfigValue::from("25")), ("OTHER", ConfigValue::from(1))],
    ///     &UpdateOptions::new(),
    /// );
    /// assert_eq!(stored, 1);
    /// assert_eq!(config["LIMIT"], ConfigValue::from(25));
    /// assert!(!config.contains("OTHER"));
    /// ```
    pub fn update_from_dict<I, K, V>(&mut self, entries: I, options: &UpdateOptions) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        let mut stored = 0;

        for (name, value) in entries {
            let name = name.as_ref();
            let Some(stripped) = self.strip_prefix(name, &options.prefix) else {
                continue;
            };
            let Some(key) = self.resolve_key(stripped, options.exist_only) else {
                if !stripped.is_empty() {
                    tracing::trace!("Skipping configuration name {}", name);
                }
                continue;
            };

            let existing = self.types.get(&key).copied();
            if options.exist_only && existing.is_none() {
                continue;
            }

            let value = (options.processor)(value.into());
            let declared_type = existing
                .or_else(|| options.annotations.get(name).copied())
                .unwrap_or_else(|| ValueType::of(&value));

            match declared_type.coerce(key.as_str(), value) {
                Ok(value) => {
                    self.store(key, value, declared_type);
                    stored += 1;
                }
                Err(e) => {
                    tracing::warn!("Invalid configuration value given for {}: {}", key, e);
                }
            }
        }

        stored
    }

    /// Stores keyword overrides, adding keys that don't exist yet.
    ///
    /// Returns the number of values stored.
    pub fn update<I, K, V>(&mut self, options: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        self.update_from_dict(options, &UpdateOptions::new().exist_only(false))
    }

    /// Loads the first module that resolves, then stores keyword overrides.
    ///
    /// Returns the name of the module that was loaded, if any.
    pub fn update_with_modules<M, I, K, V>(&mut self, modules: M, options: I) -> Option<String>
    where
        M: IntoIterator,
        M::Item: Into<ModuleDescriptor>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        let name = self.update_from_modules(modules, false);
        self.update(options);
        name
    }

    /// Loads the first module in `modules` that resolves.
    ///
    /// Descriptors are tried left to right. One that fails (unknown path, unset
    /// `env:` variable, unreadable source) is logged and the next one is tried.
    /// The entries of the module that resolves are merged with
    /// [`update_from_dict`](Self::update_from_dict), their declared types serving as
    /// annotations.
    ///
    /// Returns the module's name, or `None` if nothing resolved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modconfig::adapters::{ModuleRegistry, StaticModule};
    /// use modconfig::service::Config;
    ///
    /// let registry = ModuleRegistry::new()
    ///     .with_module(StaticModule::new("example.tests").with("ENV", "tests"));
    /// let mut config = Config::builder().resolver(registry).update_from_env(false).build();
    ///
    /// let loaded = config.update_from_modules(["example.missing", "example.tests"], false);
    /// assert_eq!(loaded.as_deref(), Some("example.tests"));
    /// assert!(config.contains("ENV"));
    /// ```
    pub fn update_from_modules<M>(&mut self, modules: M, exist_only: bool) -> Option<String>
    where
        M: IntoIterator,
        M::Item: Into<ModuleDescriptor>,
    {
        for descriptor in modules {
            let descriptor: ModuleDescriptor = descriptor.into();
            let source = match self.resolve_module(&descriptor) {
                Ok(source) => source,
                Err(e) => {
                    tracing::debug!("Invalid configuration module given: {}: {}", descriptor, e);
                    continue;
                }
            };

            let entries = match source.entries() {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Failed to read configuration module {}: {}", source.name(), e);
                    continue;
                }
            };

            let mut options = UpdateOptions::new().exist_only(exist_only);
            let mut pairs = Vec::with_capacity(entries.len());
            for entry in entries {
                if let Some(declared_type) = entry.declared_type {
                    options.annotations.insert(entry.name.clone(), declared_type);
                }
                pairs.push((entry.name, entry.value));
            }

            let stored = self.update_from_dict(pairs, &options);
            tracing::debug!(
                "Loaded {} values from configuration module {}",
                stored,
                source.name()
            );
            return Some(source.name().to_string());
        }

        None
    }

    fn resolve_module(&self, descriptor: &ModuleDescriptor) -> Result<Arc<dyn ConfigSource>> {
        match descriptor {
            ModuleDescriptor::Source(source) => Ok(Arc::clone(source)),
            ModuleDescriptor::Path(path) => self.resolve_path(path),
            ModuleDescriptor::Env(variable) => {
                let path = self
                    .env
                    .get_str(variable)?
                    .and_then(|value| value.as_str().map(str::to_string))
                    .ok_or_else(|| ConfigError::EnvIndirectionUnset {
                        variable: variable.clone(),
                    })?;
                self.resolve_path(&path)
            }
        }
    }

    fn resolve_path(&self, path: &str) -> Result<Arc<dyn ConfigSource>> {
        if path.is_empty() {
            return Err(ConfigError::ModuleNotFound {
                path: String::new(),
            });
        }
        self.resolver.resolve(path)
    }

    /// Updates stored keys from the environment.
    ///
    /// Variable names must carry the configured prefix. Values are decoded as JSON
    /// when possible and coerced into the key's type. Variables that don't match a
    /// stored key are ignored.
    ///
    /// Returns the number of values stored.
    pub fn update_from_env(&mut self) -> usize {
        let entries = match self.env.entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read environment: {}", e);
                return 0;
            }
        };

        let options = UpdateOptions::new()
            .prefix(self.prefix.clone())
            .processor(decode_json);
        let stored =
            self.update_from_dict(entries.into_iter().map(|e| (e.name, e.value)), &options);
        tracing::debug!("Updated {} values from environment", stored);
        stored
    }
}

impl Index<&str> for Config {
    type Output = ConfigValue;

    /// # Panics
    ///
    /// Panics if the key is not stored. Use [`Config::try_index`] to handle that.
    fn index(&self, key: &str) -> &ConfigValue {
        match self.lookup(key) {
            Some(value) => value,
            None => panic!("Missing configuration key: {}", key.to_uppercase()),
        }
    }
}

impl ConfigurationService for Config {
    fn get(&self, key: &str) -> Result<&ConfigValue> {
        Config::get(self, key)
    }
}

/// Iterator over the stored pairs of a [`Config`], in insertion order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (ConfigKey, ConfigValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ConfigValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a str, &'a ConfigValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Config {{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                ConfigValue::String(s) => write!(f, "{:?}: {:?}", key.as_str(), s)?,
                other => write!(f, "{:?}: {}", key.as_str(), other)?,
            }
        }
        write!(f, "}}>")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
