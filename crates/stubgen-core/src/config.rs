//! Generator configuration (`stubgen.toml`)
//!
//! ```toml
//! registry = "target/stubgen"
//! metadata = ["__author__", "__version__"]
//! formatter = ["python", "-m", "ruff", "format"]
//!
//! [types]
//! "Foo" = "pkg.sub.Foo"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StubError, StubResult};
use crate::mapping::TypeMappingTable;

/// Configuration file name looked up in the working directory
pub const FILE_NAME: &str = "stubgen.toml";

/// Default registry directory
const DEFAULT_REGISTRY: &str = "target/stubgen";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubConfig {
    /// Directory holding the reflected module descriptions
    pub registry: PathBuf,
    /// Module attributes emitted as metadata constants
    pub metadata: Vec<String>,
    /// Command run on the written stub when formatting is requested
    pub formatter: Vec<String>,
    /// Extra or overriding type-mapping entries
    pub types: BTreeMap<String, String>,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            registry: PathBuf::from(DEFAULT_REGISTRY),
            metadata: vec!["__author__".to_string(), "__version__".to_string()],
            formatter: ["python", "-m", "ruff", "format"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            types: BTreeMap::new(),
        }
    }
}

impl StubConfig {
    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn load(path: &Path) -> StubResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|source| StubError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `stubgen.toml` from `dir` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn discover(dir: &Path) -> StubResult<Self> {
        let path = dir.join(FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// The built-in type mapping extended with the configured entries
    #[must_use]
    pub fn mapping_table(&self) -> TypeMappingTable {
        let mut table = TypeMappingTable::builtin();
        table.extend(self.types.clone());
        table
    }
}
