// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the text of a
//! structured configuration file into the entries of a module.

use crate::domain::Result;
use crate::ports::SourceEntry;

/// A trait for parsing configuration files into module entries.
///
/// The top level of a file must be a mapping. Each top-level key becomes one
/// entry, in file order. Nested structures are *not* flattened: a nested mapping
/// is a single `Map` value, matching how module-level dictionaries behave.
///
/// A top-level `__annotations__` mapping of entry name to type name, if present,
/// sets the `declared_type` of the named entries.
///
/// # Examples
///
/// ```rust
/// use modconfig::ports::{ConfigParser, SourceEntry};
/// use modconfig::domain::Result;
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<Vec<SourceEntry>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| SourceEntry::new(k.trim(), v.trim()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["env"]
///     }
/// }
///
/// let entries = KeyValueParser.parse("SECRET = unsecure").unwrap();
/// assert_eq!(entries[0].name, "SECRET");
/// ```
pub trait ConfigParser {
    /// Parses configuration content into ordered entries.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SourceEntry>)` - The top-level entries
    /// * `Err(ConfigError)` - The content is malformed or not a mapping
    fn parse(&self, content: &str) -> Result<Vec<SourceEntry>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];
}
