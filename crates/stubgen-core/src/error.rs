//! Fatal errors

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::reflect::RegistryError;

/// Errors that abort stub generation
#[derive(Error, Debug)]
pub enum StubError {
    /// A documented type string does not follow the type grammar
    #[error("cannot parse documented type of {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    /// A field line that may appear once appears several times
    #[error("multiple {tag} annotations found for {path}")]
    AmbiguousAnnotation { path: String, tag: &'static str },

    #[error("cannot load module '{module}' from the registry: {source}")]
    Registry {
        module: String,
        #[source]
        source: RegistryError,
    },

    #[error("invalid configuration file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The external formatter failed after the stub was written
    #[error("formatter `{command}` failed: {reason}")]
    Formatter { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generator operations
pub type StubResult<T> = Result<T, StubError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TypeParser;

    #[test]
    fn parse_error_names_member_path() {
        let source = TypeParser::parse_raw("list[int").unwrap_err();
        let err = StubError::Parse {
            path: "anise.astro.Orbit.at_epoch".into(),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("cannot parse documented type of anise.astro.Orbit.at_epoch"));
        assert!(message.contains("unclosed bracket"));
    }

    #[test]
    fn ambiguous_annotation_message() {
        let err = StubError::AmbiguousAnnotation {
            path: "anise.astro.Frame.mu_km3_s2".into(),
            tag: ":rtype:",
        };
        assert_eq!(
            err.to_string(),
            "multiple :rtype: annotations found for anise.astro.Frame.mu_km3_s2"
        );
    }
}
