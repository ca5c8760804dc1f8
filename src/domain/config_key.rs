// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype for type-safe key handling.
//!
//! Stored configuration keys are always uppercase, non-empty and never start with an
//! underscore. `ConfigKey` carries that invariant so the aggregator can't store a
//! private or lowercase name by accident.

use std::borrow::Borrow;
use std::fmt;

/// A type-safe wrapper for configuration keys.
///
/// Converting any string into a `ConfigKey` with `From` uppercases it, which is what
/// read accessors use to look a key up. Names that are about to be *stored* go
/// through [`ConfigKey::parse`] or [`ConfigKey::parse_exact`], which additionally
/// reject empty and underscore-prefixed names.
///
/// # Examples
///
/// ```
/// use modconfig::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database");
/// assert_eq!(key.as_str(), "DATABASE");
///
/// assert!(ConfigKey::parse("_private").is_none());
/// assert_eq!(ConfigKey::parse("api_key").unwrap().as_str(), "API_KEY");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Normalises a candidate name into a storable key, ignoring its case.
    ///
    /// Returns `None` for empty names and names starting with `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modconfig::domain::config_key::ConfigKey;
    ///
    /// assert_eq!(ConfigKey::parse("var1").unwrap().as_str(), "VAR1");
    /// assert!(ConfigKey::parse("").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        if Self::is_public_name(name) {
            Some(ConfigKey(name.to_uppercase()))
        } else {
            None
        }
    }

    /// Accepts a candidate name only if it already is a valid uppercase key.
    ///
    /// Used when a case-sensitive aggregator looks up existing keys: `var1` is not
    /// the same option as `VAR1` and never matches it.
    ///
    /// # Examples
    ///
    /// ```
    /// use modconfig::domain::config_key::ConfigKey;
    ///
    /// assert!(ConfigKey::parse_exact("VAR1").is_some());
    /// assert!(ConfigKey::parse_exact("var1").is_none());
    /// ```
    pub fn parse_exact(name: &str) -> Option<Self> {
        if Self::is_public_name(name) && name.to_uppercase() == name {
            Some(ConfigKey(name.to_string()))
        } else {
            None
        }
    }

    /// Returns `true` if `name` is non-empty and does not start with `_`.
    pub fn is_public_name(name: &str) -> bool {
        !name.is_empty() && !name.starts_with('_')
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s.to_uppercase())
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_uppercase())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
