// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the read-only interface
//! application code can depend on instead of the concrete aggregator.

use crate::domain::{ConfigValue, Result};

/// Read access to an aggregated configuration.
///
/// Keys are looked up case-insensitively by uppercasing the requested name.
///
/// # Examples
///
/// ```rust
/// use modconfig::domain::{ConfigError, ConfigValue, ConfigurationService, Result};
///
/// struct Fixed(ConfigValue);
///
/// impl ConfigurationService for Fixed {
///     fn get(&self, key: &str) -> Result<&ConfigValue> {
///         if key.eq_ignore_ascii_case("option") {
///             Ok(&self.0)
///         } else {
///             Err(ConfigError::UnknownOption { key: key.to_uppercase() })
///         }
///     }
/// }
///
/// let service = Fixed(ConfigValue::from(42));
/// assert!(service.has("option"));
/// assert_eq!(service.get_or_default("missing", ConfigValue::from(true)), ConfigValue::from(true));
/// ```
pub trait ConfigurationService {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(&ConfigValue)` - The stored value
    /// * `Err(ConfigError::UnknownOption)` - The key was never established
    fn get(&self, key: &str) -> Result<&ConfigValue>;

    /// Retrieves the value stored under `key`, or `default` if there is none.
    fn get_or_default(&self, key: &str, default: ConfigValue) -> ConfigValue {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Checks whether `key` is stored.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    struct TestConfigService {
        value: ConfigValue,
    }

    impl ConfigurationService for TestConfigService {
        fn get(&self, key: &str) -> Result<&ConfigValue> {
            if key.to_uppercase() == "TEST_KEY" {
                Ok(&self.value)
            } else {
                Err(ConfigError::UnknownOption {
                    key: key.to_uppercase(),
                })
            }
        }
    }

    #[test]
    fn test_service_get() {
        let service = TestConfigService {
            value: ConfigValue::from("test_value"),
        };
        assert_eq!(service.get("test_key").unwrap().as_str(), Some("test_value"));
    }

    #[test]
    fn test_service_get_or_default_found() {
        let service = TestConfigService {
            value: ConfigValue::from("test_value"),
        };
        let value = service.get_or_default("TEST_KEY", ConfigValue::from("default"));
        assert_eq!(value, ConfigValue::from("test_value"));
    }

    #[test]
    fn test_service_get_or_default_missing() {
        let service = TestConfigService {
            value: ConfigValue::from("test_value"),
        };
        let value = service.get_or_default("OTHER", ConfigValue::from("default"));
        assert_eq!(value, ConfigValue::from("default"));
    }

    #[test]
    fn test_service_has() {
        let service = TestConfigService {
            value: ConfigValue::Null,
        };
        assert!(service.has("test_key"));
        assert!(!service.has("other_key"));
    }
}
