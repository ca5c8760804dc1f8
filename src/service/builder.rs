// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for [`Config`].

use crate::adapters::{EnvVarAdapter, ModuleRegistry};
use crate::domain::{ConfigValue, ModuleDescriptor};
use crate::ports::ModuleResolver;
use crate::service::config::Config;

/// Builder for constructing a [`Config`].
///
/// Construction applies its inputs in precedence order, lowest first: the first
/// module that resolves, then keyword options, then the environment.
///
/// Unless told otherwise the builder resolves module paths against configuration
/// files in the current directory and reads the live process environment.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::{EnvVarAdapter, ModuleRegistry, StaticModule};
/// use modconfig::domain::ConfigValue;
/// use modconfig::service::Config;
///
/// let registry = ModuleRegistry::new()
///     .with_module(StaticModule::new("example.production").with("SECRET", "unsecure"));
///
/// let config = Config::builder()
///     .resolver(registry)
///     .module("env:APP_SETTINGS")
///     .module("example.production")
///     .option("OPTION", 42)
///     .prefix("APP_")
///     .env_source(EnvVarAdapter::with_values([("APP_SECRET", "from-env")]))
///     .build();
///
/// assert_eq!(config["SECRET"], ConfigValue::from("from-env"));
/// assert_eq!(config["OPTION"], ConfigValue::from(42));
/// ```
pub struct ConfigBuilder {
    modules: Vec<ModuleDescriptor>,
    options: Vec<(String, ConfigValue)>,
    prefix: String,
    update_from_env: bool,
    case_insensitive: bool,
    resolver: Option<Box<dyn ModuleResolver>>,
    env: Option<EnvVarAdapter>,
}

impl ConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            options: Vec::new(),
            prefix: String::new(),
            update_from_env: true,
            case_insensitive: true,
            resolver: None,
            env: None,
        }
    }

    /// Appends a module descriptor to the fallback list.
    pub fn module(mut self, descriptor: impl Into<ModuleDescriptor>) -> Self {
        self.modules.push(descriptor.into());
        self
    }

    /// Appends several module descriptors to the fallback list.
    pub fn modules<M>(mut self, descriptors: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<ModuleDescriptor>,
    {
        self.modules.extend(descriptors.into_iter().map(Into::into));
        self
    }

    /// Adds a keyword option.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Adds several keyword options.
    pub fn options<O, K, V>(mut self, options: O) -> Self
    where
        O: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the prefix environment variables must carry, e.g. `APP_`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets whether the environment is merged at construction. Defaults to `true`.
    pub fn update_from_env(mut self, enabled: bool) -> Self {
        self.update_from_env = enabled;
        self
    }

    /// Sets whether update names match keys ignoring case. Defaults to `true`.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Sets the resolver used for module paths.
    pub fn resolver<R: ModuleResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Sets the environment the configuration reads from.
    ///
    /// This covers both `env:` module indirection and environment updates.
    pub fn env_source(mut self, env: EnvVarAdapter) -> Self {
        self.env = Some(env);
        self
    }

    /// Builds the configuration.
    ///
    /// Never fails: modules that don't resolve and values that don't fit a key's
    /// type are logged and skipped.
    pub fn build(self) -> Config {
        let resolver = self
            .resolver
            .unwrap_or_else(|| Box::new(ModuleRegistry::new().with_search_path(".")));
        let env = self.env.unwrap_or_default();

        let mut config = Config::empty(self.prefix, self.case_insensitive, resolver, env);

        if !self.modules.is_empty() {
            config.update_from_modules(self.modules, false);
        }

        config.update(self.options);

        if self.update_from_env {
            config.update_from_env();
        }

        config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticModule;
    use crate::domain::ConfigError;

    fn production() -> StaticModule {
        StaticModule::new("example.production")
            .with("ENV", "production")
            .with("SOME_LIMIT", 42)
            .with("DATABASE", ConfigValue::map([("host", "db.com"), ("user", "guest")]))
    }

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new()
            .env_source(EnvVarAdapter::with_values(Vec::<(String, String)>::new()))
            .build();
        assert!(config.is_empty());
        assert_eq!(config.prefix(), "");
        assert!(config.is_case_insensitive());
    }

    #[test]
    fn test_builder_unknown_module_is_not_an_error() {
        let config = ConfigBuilder::new()
            .resolver(ModuleRegistry::new())
            .module("unknown")
            .update_from_env(false)
            .build();
        assert!(config.is_empty());
        assert!(matches!(config.get("UNKNOWN"), Err(ConfigError::UnknownOption { .. })));
    }

    #[test]
    fn test_builder_precedence() {
        let config = ConfigBuilder::new()
            .module(production())
            .option("SOME_LIMIT", 50)
            .option("ENV", "staging")
            .env_source(EnvVarAdapter::with_values([("SOME_LIMIT", "100")]))
            .build();

        assert_eq!(config["ENV"], ConfigValue::from("staging"));
        assert_eq!(config["SOME_LIMIT"], ConfigValue::from(100));
    }

    #[test]
    fn test_builder_env_merge_disabled() {
        let config = ConfigBuilder::new()
            .module(production())
            .env_source(EnvVarAdapter::with_values([("SOME_LIMIT", "100")]))
            .update_from_env(false)
            .build();
        assert_eq!(config["SOME_LIMIT"], ConfigValue::from(42));
    }

    #[test]
    fn test_builder_env_never_adds_keys() {
        let config = ConfigBuilder::new()
            .option("OPTION", 42)
            .env_source(EnvVarAdapter::with_values([("NEW_KEY", "1")]))
            .build();
        assert_eq!(config.len(), 1);
        assert!(!config.contains("NEW_KEY"));
    }

    #[test]
    fn test_builder_prefix() {
        let config = ConfigBuilder::new()
            .module(production())
            .prefix("APP_")
            .env_source(EnvVarAdapter::with_values([
                ("APP_ENV", "tests"),
                ("SOME_LIMIT", "100"),
            ]))
            .build();
        assert_eq!(config.prefix(), "APP_");
        assert_eq!(config["ENV"], ConfigValue::from("tests"));
        assert_eq!(config["SOME_LIMIT"], ConfigValue::from(42));
    }

    #[test]
    fn test_builder_modules_fallback() {
        let registry = ModuleRegistry::new().with_module(production());
        let config = ConfigBuilder::new()
            .resolver(registry)
            .modules(["example.missing", "env:UNSET_SETTINGS", "example.production"])
            .env_source(EnvVarAdapter::with_values(Vec::<(String, String)>::new()))
            .build();
        assert_eq!(config["ENV"], ConfigValue::from("production"));
    }

    #[test]
    fn test_builder_options_iterator() {
        let config = ConfigBuilder::new()
            .options([("A", 1), ("B", 2)])
            .update_from_env(false)
            .build();
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_builder_case_sensitive_env() {
        let config = ConfigBuilder::new()
            .option("VAR1", "old")
            .case_insensitive(false)
            .env_source(EnvVarAdapter::with_values([("var1", "new")]))
            .build();
        assert_eq!(config["VAR1"], ConfigValue::from("old"));
    }
}
