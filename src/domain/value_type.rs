// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declared value types and checked coercion.
//!
//! Every stored key has a `ValueType` fixed the first time the key is introduced.
//! Later updates are pushed through [`ValueType::coerce`], which either produces a
//! value of the declared variant or fails without touching anything.

use crate::domain::config_map::ConfigMap;
use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The declared type of a configuration key.
///
/// # Examples
///
/// ```
/// use modconfig::domain::{ConfigValue, ValueType};
///
/// let limit = ValueType::Integer.coerce("SOME_LIMIT", ConfigValue::from("100")).unwrap();
/// assert_eq!(limit, ConfigValue::Integer(100));
///
/// assert!(ValueType::Map.coerce("DATABASE", ConfigValue::list([1, 2, 3])).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 string.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean.
    Boolean,
    /// Raw bytes.
    Bytes,
    /// Ordered list.
    List,
    /// String-keyed mapping.
    Map,
    /// No declared type; values are stored verbatim.
    Any,
}

impl ValueType {
    /// Infers the declared type from a key's first value.
    ///
    /// `Null` has no type of its own, so a key first seen as `Null` is untyped.
    pub fn of(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Null => ValueType::Any,
            ConfigValue::Boolean(_) => ValueType::Boolean,
            ConfigValue::Integer(_) => ValueType::Integer,
            ConfigValue::Float(_) => ValueType::Float,
            ConfigValue::String(_) => ValueType::String,
            ConfigValue::Bytes(_) => ValueType::Bytes,
            ConfigValue::List(_) => ValueType::List,
            ConfigValue::Map(_) => ValueType::Map,
        }
    }

    /// The canonical lowercase name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Bytes => "bytes",
            ValueType::List => "list",
            ValueType::Map => "map",
            ValueType::Any => "any",
        }
    }

    /// Converts `value` into this type.
    ///
    /// `Null` passes through every type unchanged. `key` is only used to build the
    /// error on failure.
    pub fn coerce(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        if value.is_null() {
            return Ok(value);
        }
        match self {
            ValueType::Any => Ok(value),
            ValueType::String => self.to_string_value(key, value),
            ValueType::Integer => self.to_integer(key, value),
            ValueType::Float => self.to_float(key, value),
            ValueType::Boolean => self.to_boolean(key, value),
            ValueType::Bytes => self.to_bytes(key, value),
            ValueType::List => self.to_list(key, value),
            ValueType::Map => self.to_map(key, value),
        }
    }

    fn reject(&self, key: &str, value: &ConfigValue) -> ConfigError {
        ConfigError::conversion(
            key,
            self.name(),
            format!("cannot convert {} value '{}'", value.kind(), value),
        )
    }

    fn to_string_value(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::String(_) => Ok(value),
            ConfigValue::Boolean(_) | ConfigValue::Integer(_) | ConfigValue::Float(_) => {
                Ok(ConfigValue::String(value.to_string()))
            }
            ConfigValue::Bytes(bytes) => String::from_utf8(bytes)
                .map(ConfigValue::String)
                .map_err(|e| ConfigError::conversion(key, self.name(), e)),
            ConfigValue::List(_) | ConfigValue::Map(_) => serde_json::to_string(&value)
                .map(ConfigValue::String)
                .map_err(|e| ConfigError::conversion(key, self.name(), e)),
            ConfigValue::Null => Ok(value),
        }
    }

    fn to_integer(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::Integer(_) => Ok(value),
            ConfigValue::Boolean(b) => Ok(ConfigValue::Integer(i64::from(b))),
            // Only integral floats inside the i64 range convert without loss.
            ConfigValue::Float(n)
                if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 =>
            {
                Ok(ConfigValue::Integer(n as i64))
            }
            ConfigValue::String(ref s) => s
                .trim()
                .parse::<i64>()
                .map(ConfigValue::Integer)
                .map_err(|e| ConfigError::conversion(key, self.name(), e)),
            other => Err(self.reject(key, &other)),
        }
    }

    fn to_float(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::Float(_) => Ok(value),
            ConfigValue::Integer(n) => Ok(ConfigValue::Float(n as f64)),
            ConfigValue::Boolean(b) => Ok(ConfigValue::Float(if b { 1.0 } else { 0.0 })),
            ConfigValue::String(ref s) => s
                .trim()
                .parse::<f64>()
                .map(ConfigValue::Float)
                .map_err(|e| ConfigError::conversion(key, self.name(), e)),
            other => Err(self.reject(key, &other)),
        }
    }

    fn to_boolean(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::Boolean(_) => Ok(value),
            ConfigValue::Integer(n) => Ok(ConfigValue::Boolean(n != 0)),
            ConfigValue::Float(n) => Ok(ConfigValue::Boolean(n != 0.0)),
            ConfigValue::String(ref s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(ConfigValue::Boolean(true)),
                "false" | "no" | "0" | "off" => Ok(ConfigValue::Boolean(false)),
                _ => Err(self.reject(key, &value)),
            },
            other => Err(self.reject(key, &other)),
        }
    }

    fn to_bytes(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::Bytes(_) => Ok(value),
            ConfigValue::String(s) => Ok(ConfigValue::Bytes(s.into_bytes())),
            ConfigValue::List(ref items) => items
                .iter()
                .map(|item| match item {
                    ConfigValue::Integer(n) => u8::try_from(*n).ok(),
                    _ => None,
                })
                .collect::<Option<Vec<u8>>>()
                .map(ConfigValue::Bytes)
                .ok_or_else(|| self.reject(key, &value)),
            other => Err(self.reject(key, &other)),
        }
    }

    fn to_list(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::List(_) => Ok(value),
            ConfigValue::Bytes(bytes) => Ok(ConfigValue::List(
                bytes
                    .into_iter()
                    .map(|b| ConfigValue::Integer(i64::from(b)))
                    .collect(),
            )),
            other => Err(self.reject(key, &other)),
        }
    }

    fn to_map(&self, key: &str, value: ConfigValue) -> Result<ConfigValue> {
        match value {
            ConfigValue::Map(_) => Ok(value),
            // A list of [key, value] pairs, the only non-mapping shape with a
            // natural mapping reading.
            ConfigValue::List(ref items) => items
                .iter()
                .map(|item| match item.as_list() {
                    Some([ConfigValue::String(k), v]) => Some((k.clone(), v.clone())),
                    _ => None,
                })
                .collect::<Option<ConfigMap>>()
                .map(ConfigValue::Map)
                .ok_or_else(|| self.reject(key, &value)),
            other => Err(self.reject(key, &other)),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ValueType {
    type Err = ConfigError;

    /// Parses a type name as written in a module's `__annotations__` table.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "str" | "string" => Ok(ValueType::String),
            "int" | "integer" | "i64" => Ok(ValueType::Integer),
            "float" | "f64" | "number" => Ok(ValueType::Float),
            "bool" | "boolean" => Ok(ValueType::Boolean),
            "bytes" => Ok(ValueType::Bytes),
            "list" | "array" | "seq" | "sequence" => Ok(ValueType::List),
            "dict" | "map" | "mapping" | "object" => Ok(ValueType::Map),
            "any" | "untyped" => Ok(ValueType::Any),
            other => Err(ConfigError::ParseError {
                message: format!("Unknown value type: {}", other),
                source: None,
            }),
        }
    }
}
