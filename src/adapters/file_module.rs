// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured configuration files used as modules.
//!
//! A `FileModule` reads a YAML or JSON file whose top level is a mapping and
//! offers each top-level key as a module entry. The parser is picked from the file
//! extension.

use crate::adapters::JsonParser;
#[cfg(feature = "yaml")]
use crate::adapters::YamlParser;
use crate::domain::{ConfigError, ConfigValue, ModuleDescriptor, Result, ValueType};
use crate::ports::{ConfigParser, ConfigSource, SourceEntry};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for configuration files (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Name of the top-level table that declares entry types.
pub const ANNOTATIONS_KEY: &str = "__annotations__";

/// Returns the parsers available with the enabled features.
pub fn parsers() -> Vec<Box<dyn ConfigParser>> {
    let mut parsers: Vec<Box<dyn ConfigParser>> = Vec::new();
    #[cfg(feature = "yaml")]
    parsers.push(Box::new(YamlParser::new()));
    parsers.push(Box::new(JsonParser::new()));
    parsers
}

/// Returns every file extension some enabled parser supports, in preference order.
pub fn supported_extensions() -> Vec<String> {
    parsers()
        .iter()
        .flat_map(|p| p.supported_extensions().iter().map(|e| e.to_string()))
        .collect()
}

fn parser_for(path: &Path) -> Option<Box<dyn ConfigParser>> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    parsers()
        .into_iter()
        .find(|p| p.supported_extensions().contains(&extension.as_str()))
}

/// Turns the top-level pairs of a parsed file into module entries.
///
/// The `__annotations__` pair is consumed: each of its `name: type` items sets the
/// declared type of the entry with that name. Annotations naming unknown types
/// fail the whole file.
pub(crate) fn entries_from_pairs<I>(pairs: I) -> Result<Vec<SourceEntry>>
where
    I: IntoIterator<Item = (String, ConfigValue)>,
{
    let mut entries = Vec::new();
    let mut annotations = None;

    for (name, value) in pairs {
        if name == ANNOTATIONS_KEY {
            annotations = Some(value);
        } else {
            entries.push(SourceEntry::new(name, value));
        }
    }

    let Some(annotations) = annotations else {
        return Ok(entries);
    };
    let ConfigValue::Map(annotations) = annotations else {
        return Err(ConfigError::ParseError {
            message: format!("{} must be a mapping of name to type", ANNOTATIONS_KEY),
            source: None,
        });
    };

    for (name, type_name) in annotations {
        let declared = match type_name.as_str() {
            Some(type_name) => type_name.parse::<ValueType>().unwrap_or_else(|_| {
                tracing::debug!(
                    "Unsupported annotation '{}' for {}, storing values verbatim",
                    type_name,
                    name
                );
                ValueType::Any
            }),
            None => {
                return Err(ConfigError::ParseError {
                    message: format!("Annotation for '{}' must be a type name", name),
                    source: None,
                })
            }
        };
        if let Some(entry) = entries.iter_mut().find(|e| e.name == name) {
            entry.declared_type = Some(declared);
        }
    }

    Ok(entries)
}

/// A configuration file read as a module.
///
/// # Examples
///
/// ```rust,no_run
/// use modconfig::adapters::FileModule;
/// use modconfig::ports::ConfigSource;
///
/// let module = FileModule::from_file("config/production.yaml").unwrap();
/// assert_eq!(module.name(), "production");
/// ```
#[derive(Debug, Clone)]
pub struct FileModule {
    name: String,
    file_path: PathBuf,
    entries: Vec<SourceEntry>,
}

impl FileModule {
    /// Loads a module from a file, naming it after the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Self::from_file_named(name, path)
    }

    /// Loads a module from a file under an explicit canonical name.
    pub fn from_file_named<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let display_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
            .to_string();

        let parser = parser_for(&file_path).ok_or_else(|| ConfigError::SourceError {
            source_name: "file-module".to_string(),
            message: format!("Unsupported configuration file type: {}", display_name),
            source: None,
        })?;

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| ConfigError::SourceError {
                source_name: "file-module".to_string(),
                message: format!("Invalid or inaccessible path: {}", display_name),
                source: Some(Box::new(e)),
            })?;

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: "file-module".to_string(),
            message: format!("Failed to read file metadata: {}", display_name),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "file-module".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: "file-module".to_string(),
            message: format!("Failed to read configuration file: {}", display_name),
            source: Some(Box::new(e)),
        })?;

        let entries = parser.parse(&content)?;

        tracing::debug!(
            "Loaded {} entries from configuration file {}",
            entries.len(),
            canonical_path.display()
        );

        Ok(Self {
            name: name.into(),
            file_path: canonical_path,
            entries,
        })
    }

    /// Returns the canonical path of the file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for FileModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<SourceEntry>> {
        Ok(self.entries.clone())
    }
}

impl From<FileModule> for ModuleDescriptor {
    fn from(module: FileModule) -> Self {
        ModuleDescriptor::source(module)
    }
}
