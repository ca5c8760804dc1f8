// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insertion-ordered mapping used for `ConfigValue::Map`.

use crate::domain::config_value::ConfigValue;
use std::collections::HashMap;
use std::ops::Index;

/// A string-keyed mapping that keeps entries in insertion order.
///
/// Inserting an existing key replaces its value in place. Equality ignores order,
/// so two mappings with the same entries compare equal.
///
/// # Examples
///
/// ```
/// use modconfig::domain::{ConfigMap, ConfigValue};
///
/// let mut db = ConfigMap::new();
/// db.insert("user", "guest");
/// db.insert("host", "db.com");
/// assert_eq!(db.keys().collect::<Vec<_>>(), vec!["user", "host"]);
/// assert_eq!(db["host"], ConfigValue::from("db.com"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigMap {
    entries: Vec<(String, ConfigValue)>,
    positions: HashMap<String, usize>,
}

impl ConfigMap {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Inserts a value, returning the previous one if the key was present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        let key = key.into();
        let value = value.into();
        match self.positions.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &ConfigValue> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for ConfigMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Index<&str> for ConfigMap {
    type Output = ConfigValue;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &ConfigValue {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key '{}'", key),
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> Extend<(K, V)> for ConfigMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ConfigMap::new();
        map.extend(iter);
        map
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = std::vec::IntoIter<(String, ConfigValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`ConfigMap`].
pub struct Iter<'a>(std::slice::Iter<'a, (String, ConfigValue)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a ConfigValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
