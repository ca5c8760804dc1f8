// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration file parser.

use crate::adapters::file_module::entries_from_pairs;
use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::{ConfigParser, SourceEntry};

/// JSON parser implementation.
///
/// The document must be an object. Key order is preserved.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::JsonParser;
/// use modconfig::ports::ConfigParser;
///
/// let entries = JsonParser::new()
///     .parse(r#"{"SECRET": "unsecure", "SOME_LIMIT": 42}"#)
///     .unwrap();
/// assert_eq!(entries[1].name, "SOME_LIMIT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Vec<SourceEntry>> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_json::Value::Object(map) => {
                entries_from_pairs(map.into_iter().map(|(k, v)| (k, ConfigValue::from(v))))
            }
            other => Err(ConfigError::ParseError {
                message: format!("Expected a JSON object at the top level, found {}", other),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
