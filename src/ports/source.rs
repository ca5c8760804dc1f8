// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port every module-like source
//! of configuration implements. A source yields an ordered list of
//! `(name, value, declared type)` triples; the aggregator decides which of them
//! become configuration keys.

use crate::domain::{ConfigValue, Result, ValueType};

/// One named value offered by a source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceEntry {
    /// The raw name as the source spells it (not yet uppercased or filtered).
    pub name: String,
    /// The value.
    pub value: ConfigValue,
    /// An explicit type annotation, if the source declares one.
    pub declared_type: Option<ValueType>,
}

impl SourceEntry {
    /// Creates an entry without a declared type.
    pub fn new(name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            declared_type: None,
        }
    }

    /// Creates an entry with a declared type.
    pub fn typed(name: impl Into<String>, declared_type: ValueType, value: impl Into<ConfigValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            declared_type: Some(declared_type),
        }
    }
}

/// A trait for configuration sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so sources can be shared through
/// `Arc<dyn ConfigSource>` by module descriptors and resolvers.
///
/// # Examples
///
/// ```rust
/// use modconfig::ports::{ConfigSource, SourceEntry};
/// use modconfig::domain::Result;
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "app.defaults"
///     }
///
///     fn entries(&self) -> Result<Vec<SourceEntry>> {
///         Ok(vec![SourceEntry::new("SOME_LIMIT", 42)])
///     }
/// }
///
/// let source = Defaults;
/// assert_eq!(source.get_str("SOME_LIMIT").unwrap().unwrap().as_i64(), Some(42));
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the canonical name of this source.
    ///
    /// For module-like sources this is the module path that
    /// `update_from_modules` reports back to the caller.
    fn name(&self) -> &str;

    /// Returns every entry this source offers, in source order.
    fn entries(&self) -> Result<Vec<SourceEntry>>;

    /// Retrieves the value of a single entry by its exact name.
    fn get_str(&self, name: &str) -> Result<Option<ConfigValue>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    struct TestSource {
        name: String,
        fail: bool,
    }

    impl ConfigSource for TestSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn entries(&self) -> Result<Vec<SourceEntry>> {
            if self.fail {
                return Err(ConfigError::SourceError {
                    source_name: self.name.clone(),
                    message: "unavailable".to_string(),
                    source: None,
                });
            }
            Ok(vec![
                SourceEntry::new("ENV", "tests"),
                SourceEntry::typed("APP_DIR", ValueType::String, "/srv/app"),
            ])
        }
    }

    #[test]
    fn test_config_source_name() {
        let source = TestSource {
            name: "example.tests".to_string(),
            fail: false,
        };
        assert_eq!(source.name(), "example.tests");
    }

    #[test]
    fn test_entries_keep_order_and_types() {
        let source = TestSource {
            name: "example.tests".to_string(),
            fail: false,
        };
        let entries = source.entries().unwrap();
        assert_eq!(entries[0].name, "ENV");
        assert_eq!(entries[0].declared_type, None);
        assert_eq!(entries[1].declared_type, Some(ValueType::String));
    }

    #[test]
    fn test_get_str() {
        let source = TestSource {
            name: "example.tests".to_string(),
            fail: false,
        };
        assert_eq!(
            source.get_str("ENV").unwrap(),
            Some(ConfigValue::from("tests"))
        );
        assert_eq!(source.get_str("env").unwrap(), None);
    }

    #[test]
    fn test_get_str_propagates_errors() {
        let source = TestSource {
            name: "broken".to_string(),
            fail: true,
        };
        assert!(source.get_str("ENV").is_err());
    }

    #[test]
    fn test_config_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConfigSource>>();
    }
}
