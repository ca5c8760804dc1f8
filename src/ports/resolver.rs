// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module resolver trait definition.
//!
//! A resolver turns a module path such as `example.production` into a live
//! [`ConfigSource`]. It plays the part an import system plays for dynamic languages.

use crate::domain::Result;
use crate::ports::ConfigSource;
use std::sync::Arc;

/// A trait for resolving module paths into configuration sources.
///
/// Resolution failures are expected: the aggregator tries each descriptor in turn
/// and only the first one that resolves is used. Return
/// [`ConfigError::ModuleNotFound`](crate::domain::ConfigError::ModuleNotFound) for
/// paths the resolver doesn't know.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::StaticModule;
/// use modconfig::domain::{ConfigError, Result};
/// use modconfig::ports::{ConfigSource, ModuleResolver};
/// use std::sync::Arc;
///
/// struct OnlyDefaults;
///
/// impl ModuleResolver for OnlyDefaults {
///     fn resolve(&self, path: &str) -> Result<Arc<dyn ConfigSource>> {
///         if path == "app.defaults" {
///             Ok(Arc::new(StaticModule::new("app.defaults").with("DEBUG", false)))
///         } else {
///             Err(ConfigError::ModuleNotFound { path: path.to_string() })
///         }
///     }
/// }
///
/// assert!(OnlyDefaults.resolve("app.defaults").is_ok());
/// assert!(OnlyDefaults.resolve("app.other").is_err());
/// ```
pub trait ModuleResolver: Send + Sync {
    /// Resolves `path` into a source.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<dyn ConfigSource>)` - The module was found
    /// * `Err(ConfigError)` - The module doesn't exist or failed to load
    fn resolve(&self, path: &str) -> Result<Arc<dyn ConfigSource>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use crate::ports::SourceEntry;

    struct Named(&'static str);

    impl ConfigSource for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn entries(&self) -> Result<Vec<SourceEntry>> {
            Ok(Vec::new())
        }
    }

    struct SingleResolver;

    impl ModuleResolver for SingleResolver {
        fn resolve(&self, path: &str) -> Result<Arc<dyn ConfigSource>> {
            match path {
                "known" => Ok(Arc::new(Named("known"))),
                _ => Err(ConfigError::ModuleNotFound {
                    path: path.to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_resolve_known() {
        let source = SingleResolver.resolve("known").unwrap();
        assert_eq!(source.name(), "known");
    }

    #[test]
    fn test_resolve_unknown() {
        let result = SingleResolver.resolve("unknown");
        assert!(matches!(result, Err(ConfigError::ModuleNotFound { .. })));
    }

    #[test]
    fn test_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ModuleResolver>>();
    }
}
