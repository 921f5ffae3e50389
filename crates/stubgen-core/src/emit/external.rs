//! External formatter
//!
//! Runs a formatting command on an already written stub file, e.g.
//! `python -m ruff format <file>`.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::{StubError, StubResult};

/// A formatting command applied to a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFormatter {
    program: String,
    args: Vec<String>,
}

impl ExternalFormatter {
    /// Build a formatter from a command line. Returns `None` for an empty command.
    #[must_use]
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// The command line, for messages
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the formatter on `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Formatter`] if the command cannot be spawned or
    /// exits unsuccessfully. The file is left as it was written.
    pub fn run(&self, path: &Path) -> StubResult<()> {
        info!(command = %self.command_line(), path = %path.display(), "running formatter");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| self.failure(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(self.failure(format!("exited with {status}")))
        }
    }

    fn failure(&self, reason: String) -> StubError {
        StubError::Formatter {
            command: self.command_line(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn command_line() {
        let formatter =
            ExternalFormatter::from_command(&command(&["python", "-m", "ruff", "format"])).unwrap();
        assert_eq!(formatter.command_line(), "python -m ruff format");
        assert!(ExternalFormatter::from_command(&[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn successful_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stub.pyi");
        std::fs::write(&path, "import typing\n").unwrap();
        let formatter = ExternalFormatter::from_command(&command(&["true"])).unwrap();
        formatter.run(&path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_keeps_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stub.pyi");
        std::fs::write(&path, "import typing\n").unwrap();
        let formatter = ExternalFormatter::from_command(&command(&["false"])).unwrap();
        let err = formatter.run(&path).unwrap_err();
        assert!(matches!(err, StubError::Formatter { ref command, .. } if command == "false"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "import typing\n");
    }

    #[test]
    fn missing_program() {
        let formatter =
            ExternalFormatter::from_command(&command(&["stubgen-formatter-that-does-not-exist"]))
                .unwrap();
        let err = formatter.run(Path::new("stub.pyi")).unwrap_err();
        assert!(matches!(err, StubError::Formatter { .. }));
    }
}
