//! JSON-backed reflection registry
//!
//! The registry is a directory holding one `<dotted.module.name>.json` file
//! per module, each describing a [`ModuleInfo`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ModuleInfo;

/// Errors that can occur when loading a module from the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry file describes module '{found}'")]
    NameMismatch { found: String },
}

/// A directory of reflected module descriptions
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    /// Open a registry rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The registry directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the description of `module`
    #[must_use]
    pub fn path_for(&self, module: &str) -> PathBuf {
        self.root.join(format!("{module}.json"))
    }

    /// Load the description of `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes a different module.
    pub fn load(&self, module: &str) -> Result<ModuleInfo, RegistryError> {
        let content = std::fs::read_to_string(self.path_for(module))?;
        Self::parse(module, &content)
    }

    /// Parse a module description from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or names another module.
    pub fn parse(module: &str, content: &str) -> Result<ModuleInfo, RegistryError> {
        let info: ModuleInfo = serde_json::from_str(content)?;
        if info.name != module {
            return Err(RegistryError::NameMismatch { found: info.name });
        }
        Ok(info)
    }
}
