// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type.
//!
//! This module provides the `ConfigValue` tagged variant that every source produces
//! and the aggregator stores. Values arriving from the environment start life as
//! strings and are decoded with [`ConfigValue::from_json_or_string`] before they are
//! coerced into a key's declared type.

use crate::domain::config_map::ConfigMap;
use crate::domain::errors::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A typed configuration value.
///
/// # Examples
///
/// ```
/// use modconfig::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i64(), Some(42));
///
/// let decoded = ConfigValue::from_json_or_string("[1, 2, 3]");
/// assert_eq!(decoded.as_list().map(|l| l.len()), Some(3));
///
/// let raw = ConfigValue::from_json_or_string("prod_key");
/// assert_eq!(raw.as_str(), Some("prod_key"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ConfigValue {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Boolean(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit float.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A mapping from string keys to values, in insertion order.
    Map(ConfigMap),
}

impl ConfigValue {
    /// Creates a `Bytes` value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ConfigValue::Bytes(bytes.into())
    }

    /// Creates a `List` value from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConfigValue>,
    {
        ConfigValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a `Map` value from key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use modconfig::domain::config_value::ConfigValue;
    ///
    /// let db = ConfigValue::map([("host", "localhost"), ("user", "guest")]);
    /// assert_eq!(db.as_map().unwrap()["host"].as_str(), Some("localhost"));
    /// ```
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        ConfigValue::Map(entries.into_iter().collect())
    }

    /// Decodes `raw` as JSON, falling back to the literal string.
    ///
    /// This is how environment variables carry numbers, booleans, lists and
    /// objects. An integer too large for `Integer` keeps its exact digits as a
    /// `String`.
    pub fn from_json_or_string(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            // serde_json reads integers beyond u64 as f64.
            Ok(serde_json::Value::Number(n))
                if n.is_f64() && is_integer_literal(raw.trim()) =>
            {
                ConfigValue::String(raw.trim().to_string())
            }
            Ok(json) => ConfigValue::from(json),
            Err(_) => ConfigValue::String(raw.to_string()),
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is a `Float` or an `Integer`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(n) => Some(*n),
            ConfigValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the bytes if this is `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ConfigValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// A short name of the variant, used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Bytes(_) => "bytes",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Deserializes the value into any `serde` type.
    ///
    /// `key` is only used to build the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modconfig::domain::config_value::ConfigValue;
    /// use std::collections::HashMap;
    ///
    /// let db = ConfigValue::map([("host", "db.com"), ("user", "guest")]);
    /// let parsed: HashMap<String, String> = db.deserialize_into("DATABASE").unwrap();
    /// assert_eq!(parsed["host"], "db.com");
    /// ```
    pub fn deserialize_into<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let json = serde_json::to_value(self)
            .map_err(|e| ConfigError::conversion(key, std::any::type_name::<T>(), e))?;
        serde_json::from_value(json)
            .map_err(|e| ConfigError::conversion(key, std::any::type_name::<T>(), e))
    }

    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl From<serde_json::Value> for ConfigValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None if n.is_u64() => ConfigValue::String(n.to_string()),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<u32> for ConfigValue {
    fn from(n: u32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Map(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Boolean(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(n) => serializer.serialize_i64(*n),
            ConfigValue::Float(n) => serializer.serialize_f64(*n),
            ConfigValue::String(s) => serializer.serialize_str(s),
            // A sequence of integers keeps bytes representable in JSON and YAML.
            ConfigValue::Bytes(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for b in bytes {
                    seq.serialize_element(b)?;
                }
                seq.end()
            }
            ConfigValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(ConfigValue::from)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{:?}", n),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            ConfigValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.write_nested(f)?;
                }
                write!(f, "]")
            }
            ConfigValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: ", k)?;
                    v.write_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_json_object() {
        let value = ConfigValue::from_json_or_string(r#"{"host": "new.com", "user": "admin"}"#);
        let map = value.as_map().unwrap();
        assert_eq!(map["host"], ConfigValue::from("new.com"));
        assert_eq!(map["user"], ConfigValue::from("admin"));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(ConfigValue::from_json_or_string("100"), ConfigValue::Integer(100));
        assert_eq!(ConfigValue::from_json_or_string("2.5"), ConfigValue::Float(2.5));
        assert_eq!(ConfigValue::from_json_or_string("true"), ConfigValue::Boolean(true));
        assert_eq!(ConfigValue::from_json_or_string("null"), ConfigValue::Null);
        assert_eq!(
            ConfigValue::from_json_or_string("\"quoted\""),
            ConfigValue::from("quoted")
        );
    }

    #[test]
    fn test_from_json_falls_back_to_raw() {
        assert_eq!(
            ConfigValue::from_json_or_string("prod_key"),
            ConfigValue::from("prod_key")
        );
        assert_eq!(
            ConfigValue::from_json_or_string("{broken"),
            ConfigValue::from("{broken")
        );
        assert_eq!(ConfigValue::from_json_or_string(""), ConfigValue::from(""));
    }

    #[test]
    fn test_integer_beyond_i64_keeps_digits() {
        assert_eq!(
            ConfigValue::from_json_or_string("18446744073709551615"),
            ConfigValue::from("18446744073709551615")
        );
        assert_eq!(
            ConfigValue::from_json_or_string("98765432109876543210"),
            ConfigValue::from("98765432109876543210")
        );
        assert_eq!(
            ConfigValue::from_json_or_string(" -98765432109876543210 "),
            ConfigValue::from("-98765432109876543210")
        );
        assert_eq!(ConfigValue::from_json_or_string("1e3"), ConfigValue::Float(1000.0));
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let value = ConfigValue::from_json_or_string(r#"{"user": "admin", "host": "new.com"}"#);
        let keys: Vec<_> = value.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["user", "host"]);
    }

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(ConfigValue::from("x").as_str(), Some("x"));
        assert_eq!(ConfigValue::from(1).as_str(), None);
        assert_eq!(ConfigValue::from(3).as_f64(), Some(3.0));
        assert_eq!(ConfigValue::from(false).as_bool(), Some(false));
        assert_eq!(ConfigValue::bytes("ab").as_bytes(), Some(&b"ab"[..]));
        assert!(ConfigValue::Null.is_null());
        assert!(ConfigValue::list([1, 2]).as_list().is_some());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(ConfigValue::from(None::<i64>), ConfigValue::Null);
        assert_eq!(ConfigValue::from(Some("x")), ConfigValue::from("x"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ConfigValue::Null.kind(), "null");
        assert_eq!(ConfigValue::map([("a", 1)]).kind(), "map");
        assert_eq!(ConfigValue::bytes(vec![1u8]).kind(), "bytes");
    }

    #[test]
    fn test_deserialize_into_struct_like_map() {
        let db = ConfigValue::map([("host", "db.com"), ("user", "guest")]);
        let parsed: HashMap<String, String> = db.deserialize_into("DATABASE").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["user"], "guest");
    }

    #[test]
    fn test_deserialize_into_wrong_type() {
        let value = ConfigValue::from("not a number");
        let result: Result<u16> = value.deserialize_into("PORT");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::TypeConversionError { .. }
        ));
    }

    #[test]
    fn test_serialize_bytes_as_sequence() {
        let json = serde_json::to_string(&ConfigValue::bytes(vec![1u8, 2, 255])).unwrap();
        assert_eq!(json, "[1,2,255]");
    }

    #[test]
    fn test_deserialize_from_json_text() {
        let value: ConfigValue = serde_json::from_str(r#"{"a": [1, "b", null]}"#).unwrap();
        let expected = ConfigValue::map([(
            "a",
            ConfigValue::list([ConfigValue::from(1), ConfigValue::from("b"), ConfigValue::Null]),
        )]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfigValue::from("plain").to_string(), "plain");
        assert_eq!(ConfigValue::from(1.0).to_string(), "1.0");
        assert_eq!(ConfigValue::bytes("hi\n").to_string(), "b\"hi\\n\"");
        assert_eq!(
            ConfigValue::list([ConfigValue::from("a"), ConfigValue::from(2)]).to_string(),
            "[\"a\", 2]"
        );
        assert_eq!(
            ConfigValue::map([("host", "localhost")]).to_string(),
            "{\"host\": \"localhost\"}"
        );
    }
}
