//! Generator facade
//!
//! Runs the whole pipeline for one reflected module:
//! describe, build the document, render it.

use tracing::info;

use crate::config::StubConfig;
use crate::diagnostics::Diagnostics;
use crate::emit::StubEmitter;
use crate::error::StubResult;
use crate::mapping::TypeMappingTable;
use crate::reflect::ModuleInfo;
use crate::stub::{Describer, StubBuilder};

/// Output of a generator run
#[derive(Debug, Clone)]
pub struct Generated {
    /// Rendered stub text
    pub text: String,
    /// Warnings recorded during the run
    pub diagnostics: Diagnostics,
}

/// Stub generator
#[derive(Debug, Clone)]
pub struct Generator {
    table: TypeMappingTable,
    metadata: Vec<String>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::from_config(&StubConfig::default())
    }
}

impl Generator {
    /// Create a generator with the built-in type mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from a configuration
    #[must_use]
    pub fn from_config(config: &StubConfig) -> Self {
        Self {
            table: config.mapping_table(),
            metadata: config.metadata.clone(),
        }
    }

    /// Generate the stub of a reflected module.
    ///
    /// # Errors
    ///
    /// Returns an error on the first fatal problem: an unparseable documented
    /// type or an annotation repeated on one member.
    pub fn generate(&self, module: &ModuleInfo) -> StubResult<Generated> {
        info!(module = %module.name, members = module.members.len(), "generating stub");
        let (descriptor, diagnostics) =
            Describer::new(&self.table, &module.name, &self.metadata).describe(module)?;
        let document = StubBuilder::build(&descriptor);
        let text = StubEmitter::emit(&document);
        info!(
            module = %module.name,
            classes = descriptor.classes.len(),
            functions = descriptor.functions.len(),
            warnings = diagnostics.len(),
            "stub generated"
        );
        Ok(Generated { text, diagnostics })
    }
}
