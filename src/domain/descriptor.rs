// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module descriptors.
//!
//! A descriptor names a source of default configuration values: a live source
//! object, a module path for a [`ModuleResolver`](crate::ports::ModuleResolver), or
//! an `env:NAME` pointer whose target variable holds the module path.

use crate::ports::ConfigSource;
use std::fmt;
use std::sync::Arc;

/// Marker that turns a descriptor string into an environment indirection.
const ENV_MARKER: &str = "env:";

/// Identifies a source of default configuration values.
///
/// # Examples
///
/// ```
/// use modconfig::domain::ModuleDescriptor;
///
/// let direct = ModuleDescriptor::from("example.production");
/// assert!(matches!(direct, ModuleDescriptor::Path(ref p) if p == "example.production"));
///
/// let indirect = ModuleDescriptor::from("ENV:APP_SETTINGS");
/// assert!(matches!(indirect, ModuleDescriptor::Env(ref v) if v == "APP_SETTINGS"));
/// ```
#[derive(Clone)]
pub enum ModuleDescriptor {
    /// An already constructed source.
    Source(Arc<dyn ConfigSource>),
    /// A module path handed to the resolver.
    Path(String),
    /// The name of an environment variable holding a module path.
    Env(String),
}

impl ModuleDescriptor {
    /// Wraps a source object.
    pub fn source<S: ConfigSource + 'static>(source: S) -> Self {
        ModuleDescriptor::Source(Arc::new(source))
    }
}

impl From<&str> for ModuleDescriptor {
    fn from(s: &str) -> Self {
        match s.get(..ENV_MARKER.len()) {
            Some(marker) if marker.eq_ignore_ascii_case(ENV_MARKER) => {
                ModuleDescriptor::Env(s[ENV_MARKER.len()..].to_string())
            }
            _ => ModuleDescriptor::Path(s.to_string()),
        }
    }
}

impl From<String> for ModuleDescriptor {
    fn from(s: String) -> Self {
        ModuleDescriptor::from(s.as_str())
    }
}

impl From<Arc<dyn ConfigSource>> for ModuleDescriptor {
    fn from(source: Arc<dyn ConfigSource>) -> Self {
        ModuleDescriptor::Source(source)
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleDescriptor::Source(source) => {
                f.debug_tuple("Source").field(&source.name()).finish()
            }
            ModuleDescriptor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ModuleDescriptor::Env(var) => f.debug_tuple("Env").field(var).finish(),
        }
    }
}

impl fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleDescriptor::Source(source) => write!(f, "{}", source.name()),
            ModuleDescriptor::Path(path) => write!(f, "{}", path),
            ModuleDescriptor::Env(var) => write!(f, "{}{}", ENV_MARKER, var),
        }
    }
}
