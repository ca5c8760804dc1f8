// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default module resolver.
//!
//! The registry answers module paths from two places, in order: modules registered
//! in code, then configuration files found under a list of search directories. A
//! dotted path `a.b.c` maps to `<dir>/a/b/c.<ext>` for every extension an enabled
//! parser supports.

use crate::adapters::file_module::supported_extensions;
use crate::adapters::{FileModule, StaticModule};
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigSource, ModuleResolver};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves module paths to registered modules and configuration files.
///
/// # Examples
///
/// ```rust
/// use modconfig::adapters::{ModuleRegistry, StaticModule};
/// use modconfig::ports::ModuleResolver;
///
/// let registry = ModuleRegistry::new()
///     .with_module(StaticModule::new("example.production").with("ENV", "production"))
///     .with_search_path("/etc/myapp");
///
/// let module = registry.resolve("example.production").unwrap();
/// assert_eq!(module.name(), "example.production");
/// assert!(registry.resolve("example.missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn ConfigSource>>,
    search_paths: Vec<PathBuf>,
}

impl ModuleRegistry {
    /// Creates an empty registry. Nothing resolves until modules or search paths
    /// are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled-in module under its own name.
    pub fn with_module(mut self, module: StaticModule) -> Self {
        self.register(Arc::new(module));
        self
    }

    /// Registers any source under its own name.
    pub fn register(&mut self, source: Arc<dyn ConfigSource>) {
        self.modules.insert(source.name().to_string(), source);
    }

    /// Adds a directory searched for configuration files.
    ///
    /// Directories are searched in the order they were added.
    pub fn with_search_path<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Adds the OS-appropriate configuration directory of an application.
    ///
    /// This uses the `directories` crate, so on Linux `("myapp", "com.example")`
    /// searches `~/.config/myapp`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceError` if no home directory can be determined.
    pub fn with_default_search_path(self, app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "module-registry".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;
        Ok(self.with_search_path(proj_dirs.config_dir()))
    }

    /// Returns the search directories.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Returns the names of the registered modules, sorted.
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Finds the file a module path maps to under `dir`.
    fn find_file(dir: &Path, path: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = path.split('.').collect();
        // Reject anything that could escape the search directory.
        if segments
            .iter()
            .any(|s| s.is_empty() || s.contains('/') || s.contains('\\'))
        {
            return None;
        }

        let base = segments.iter().fold(dir.to_path_buf(), |p, s| p.join(s));
        supported_extensions()
            .into_iter()
            .map(|ext| base.with_extension(ext))
            .find(|candidate| candidate.is_file())
    }
}

impl ModuleResolver for ModuleRegistry {
    fn resolve(&self, path: &str) -> Result<Arc<dyn ConfigSource>> {
        if let Some(module) = self.modules.get(path) {
            return Ok(Arc::clone(module));
        }

        for dir in &self.search_paths {
            if let Some(file) = Self::find_file(dir, path) {
                tracing::debug!("Module {} found at {}", path, file.display());
                let module = FileModule::from_file_named(path, file)?;
                return Ok(Arc::new(module));
            }
        }

        Err(ConfigError::ModuleNotFound {
            path: path.to_string(),
        })
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.module_names())
            .field("search_paths", &self.search_paths)
            .finish()
    }
}
