// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file parser.
//!
//! This module converts YAML documents into module entries. Only the top level is
//! split into entries; nested mappings and sequences stay whole as
//! `ConfigValue::Map` and `ConfigValue::List`.

use crate::adapters::file_module::entries_from_pairs;
use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::{ConfigParser, SourceEntry};

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::YamlParser;
/// use modconfig::domain::ConfigValue;
/// use modconfig::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml_content = "DATABASE:\n  host: localhost\n  port: 5432";
/// let entries = parser.parse(yaml_content).unwrap();
/// assert_eq!(entries[0].name, "DATABASE");
/// assert_eq!(entries[0].value.as_map().unwrap()["port"], ConfigValue::from(5432));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Converts a YAML value into a configuration value.
    fn convert(value: serde_yaml::Value) -> Result<ConfigValue> {
        match value {
            serde_yaml::Value::Null => Ok(ConfigValue::Null),
            serde_yaml::Value::Bool(b) => Ok(ConfigValue::Boolean(b)),
            serde_yaml::Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_yaml::Value::String(s) => Ok(ConfigValue::String(s)),
            serde_yaml::Value::Sequence(seq) => seq
                .into_iter()
                .map(Self::convert)
                .collect::<Result<Vec<_>>>()
                .map(ConfigValue::List),
            serde_yaml::Value::Mapping(map) => {
                let mut result = ConfigMap::new();
                for (key, val) in map {
                    result.insert(Self::key_string(&key)?, Self::convert(val)?);
                }
                Ok(ConfigValue::Map(result))
            }
            // Tags carry no meaning here; keep the tagged value.
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value),
        }
    }

    /// Mapping keys must be scalars.
    fn key_string(key: &serde_yaml::Value) -> Result<String> {
        match key {
            serde_yaml::Value::String(s) => Ok(s.clone()),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            serde_yaml::Value::Bool(b) => Ok(b.to_string()),
            serde_yaml::Value::Null => Ok("null".to_string()),
            serde_yaml::Value::Tagged(tagged) => Self::key_string(&tagged.value),
            _ => Err(ConfigError::ParseError {
                message: "YAML mapping keys must be scalars".to_string(),
                source: None,
            }),
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Vec<SourceEntry>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            // An empty document is an empty module.
            serde_yaml::Value::Null => Ok(Vec::new()),
            serde_yaml::Value::Mapping(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, val) in map {
                    pairs.push((Self::key_string(&key)?, Self::convert(val)?));
                }
                entries_from_pairs(pairs)
            }
            _ => Err(ConfigError::ParseError {
                message: "Expected a YAML mapping at the top level".to_string(),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueType;

    #[test]
    fn test_yaml_parser_simple() {
        let parser = YamlParser::new();
        let entries = parser.parse("SECRET: unsecure").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "SECRET");
        assert_eq!(entries[0].value, ConfigValue::from("unsecure"));
    }

    #[test]
    fn test_yaml_parser_nested() {
        let parser = YamlParser::new();
        let yaml = r#"
DATABASE:
  host: localhost
  port: 5432
"#;
        let entries = parser.parse(yaml).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].value,
            ConfigValue::map([
                ("host", ConfigValue::from("localhost")),
                ("port", ConfigValue::from(5432)),
            ])
        );
    }

    #[test]
    fn test_yaml_parser_array() {
        let parser = YamlParser::new();
        let yaml = r#"
SERVERS:
  - host1
  - host2
  - host3
"#;
        let entries = parser.parse(yaml).unwrap();
        assert_eq!(
            entries[0].value,
            ConfigValue::list(["host1", "host2", "host3"])
        );
    }

    #[test]
    fn test_yaml_parser_scalar_types() {
        let parser = YamlParser::new();
        let yaml = r#"
ENABLED: true
RATIO: 0.5
LIMIT: 42
NOTHING: ~
"#;
        let entries = parser.parse(yaml).unwrap();
        let values: Vec<_> = entries.into_iter().map(|e| e.value).collect();
        assert_eq!(
            values,
            vec![
                ConfigValue::from(true),
                ConfigValue::from(0.5),
                ConfigValue::from(42),
                ConfigValue::Null,
            ]
        );
    }

    #[test]
    fn test_yaml_parser_keeps_file_order() {
        let parser = YamlParser::new();
        let entries = parser.parse("ZETA: 1\nALPHA: 2\nMID: 3\n").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn test_yaml_parser_keeps_nested_order() {
        let parser = YamlParser::new();
        let entries = parser.parse("DATABASE:\n  user: guest\n  host: db.com\n").unwrap();
        let keys: Vec<_> = entries[0].value.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["user", "host"]);
    }

    #[test]
    fn test_yaml_parser_non_string_nested_keys() {
        let parser = YamlParser::new();
        let entries = parser.parse("PORTS:\n  80: http\n  443: https\n").unwrap();
        let map = entries[0].value.as_map().unwrap();
        assert_eq!(map["80"], ConfigValue::from("http"));
        assert_eq!(map["443"], ConfigValue::from("https"));
    }

    #[test]
    fn test_yaml_parser_tagged_value() {
        let parser = YamlParser::new();
        let entries = parser.parse("LEVEL: !custom debug\n").unwrap();
        assert_eq!(entries[0].value, ConfigValue::from("debug"));
    }

    #[test]
    fn test_yaml_parser_annotations() {
        let parser = YamlParser::new();
        let yaml = r#"
APP_DIR: /srv/app
SOME_LIMIT: 42
__annotations__:
  APP_DIR: str
  SOME_LIMIT: float
"#;
        let entries = parser.parse(yaml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].declared_type, Some(ValueType::String));
        assert_eq!(entries[1].declared_type, Some(ValueType::Float));
    }

    #[test]
    fn test_yaml_parser_empty_document() {
        let parser = YamlParser::new();
        assert!(parser.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_parser_rejects_top_level_sequence() {
        let parser = YamlParser::new();
        let result = parser.parse("- a\n- b\n");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlParser::new();
        let yaml = "key: [unclosed";
        let result = parser.parse(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_supported_extensions() {
        let parser = YamlParser::new();
        assert_eq!(parser.supported_extensions(), &["yaml", "yml"]);
    }
}
