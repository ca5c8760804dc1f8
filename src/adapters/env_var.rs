// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides an adapter that snapshots the process environment as a flat
//! string-to-string mapping. Prefix handling, key matching and JSON decoding are the
//! aggregator's job; the adapter only reads.

use crate::domain::{ConfigValue, Result};
use crate::ports::{ConfigSource, SourceEntry};
use std::collections::BTreeMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Source adapter for environment variables.
///
/// By default the adapter reads the live process environment each time its
/// entries are requested. [`EnvVarAdapter::with_values`] pins a fixed set of
/// variables instead, which keeps tests away from the real environment.
///
/// Entries are always `ConfigValue::String`. Variables whose name or value is not
/// valid unicode are skipped, as are oversized ones.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::EnvVarAdapter;
/// use modconfig::ports::ConfigSource;
/// use std::collections::BTreeMap;
///
/// // Read the real environment
/// let adapter = EnvVarAdapter::new();
///
/// // Or a fixed snapshot
/// let adapter = EnvVarAdapter::with_values(BTreeMap::from([
///     ("API_KEY".to_string(), "prod_key".to_string()),
/// ]));
/// assert_eq!(adapter.entries().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Fixed variables; `None` reads the process environment.
    values: Option<BTreeMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the live process environment.
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an adapter over a fixed set of variables.
    ///
    /// **Note**: This method is primarily intended for testing. Use `new()` for
    /// normal usage.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Some(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns `true` if this adapter reads the live process environment.
    pub fn is_live(&self) -> bool {
        self.values.is_none()
    }

    /// Reads the current process environment.
    fn load(&self) -> Vec<SourceEntry> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (key, value) in env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                skipped += 1;
                continue;
            };

            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                skipped += 1;
                continue;
            }

            entries.push(SourceEntry::new(key, ConfigValue::from(value)));
        }

        tracing::debug!(
            "Loaded {} environment variables ({} skipped)",
            entries.len(),
            skipped
        );

        entries
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn entries(&self) -> Result<Vec<SourceEntry>> {
        match &self.values {
            Some(values) => Ok(values
                .iter()
                .map(|(k, v)| SourceEntry::new(k.as_str(), v.as_str()))
                .collect()),
            None => Ok(self.load()),
        }
    }

    fn get_str(&self, name: &str) -> Result<Option<ConfigValue>> {
        match &self.values {
            Some(values) => Ok(values.get(name).map(|v| ConfigValue::from(v.as_str()))),
            None => Ok(env::var(name).ok().map(ConfigValue::from)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
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

    #[test]
    fn test_env_adapter_name() {
        let adapter = EnvVarAdapter::new();
        assert_eq!(adapter.name(), "env");
        assert!(adapter.is_live());
    }

    #[test]
    fn test_env_adapter_reads_process_environment() {
        let mut guard = EnvGuard::new();
        guard.set("MODCONFIG_ENV_ADAPTER_READ", "test_value");

        let adapter = EnvVarAdapter::new();
        let entries = adapter.entries().unwrap();
        let entry = entries
            .iter()
            .find(|e| e.name == "MODCONFIG_ENV_ADAPTER_READ")
            .unwrap();

        assert_eq!(entry.value, ConfigValue::from("test_value"));
        assert_eq!(entry.declared_type, None);
    }

    #[test]
    fn test_env_adapter_sees_later_changes() {
        let mut guard = EnvGuard::new();
        guard.set("MODCONFIG_ENV_ADAPTER_LIVE", "initial");

        let adapter = EnvVarAdapter::new();
        assert_eq!(
            adapter.get_str("MODCONFIG_ENV_ADAPTER_LIVE").unwrap(),
            Some(ConfigValue::from("initial"))
        );

        guard.set("MODCONFIG_ENV_ADAPTER_LIVE", "updated");
        assert_eq!(
            adapter.get_str("MODCONFIG_ENV_ADAPTER_LIVE").unwrap(),
            Some(ConfigValue::from("updated"))
        );
    }

    #[test]
    fn test_env_adapter_get_nonexistent() {
        let adapter = EnvVarAdapter::new();
        let value = adapter.get_str("MODCONFIG_NONEXISTENT_VAR_12345").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_env_adapter_skips_oversized_values() {
        let mut guard = EnvGuard::new();
        let huge = "x".repeat(MAX_ENV_VALUE_LEN + 1);
        guard.set("MODCONFIG_ENV_ADAPTER_HUGE", &huge);

        let adapter = EnvVarAdapter::new();
        let entries = adapter.entries().unwrap();
        assert!(!entries.iter().any(|e| e.name == "MODCONFIG_ENV_ADAPTER_HUGE"));
    }

    #[test]
    fn test_env_adapter_with_values() {
        let adapter = EnvVarAdapter::with_values([("DATABASE", "[1,2,3]"), ("API_KEY", "k")]);
        assert!(!adapter.is_live());

        let entries = adapter.entries().unwrap();
        assert_eq!(entries.len(), 2);
        // Values stay raw strings; decoding happens in the aggregator.
        assert_eq!(
            adapter.get_str("DATABASE").unwrap(),
            Some(ConfigValue::from("[1,2,3]"))
        );
        assert_eq!(adapter.get_str("database").unwrap(), None);
    }

    #[test]
    fn test_env_adapter_default_is_live() {
        assert!(EnvVarAdapter::default().is_live());
    }
}
