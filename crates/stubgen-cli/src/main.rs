//! Stubgen CLI - generate Python type stubs from reflected modules

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stubgen_core::{ExternalFormatter, Generator, Registry, StubConfig, StubError};

/// Output path meaning standard output
const STDOUT: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "stubgen")]
#[command(version = stubgen_core::VERSION)]
#[command(about = "Generate Python type stubs from reflected modules", long_about = None)]
struct Cli {
    /// Dotted name of the module to stub (e.g. "anise.astro")
    module: String,

    /// Stub file to write, or "-" for standard output
    out: PathBuf,

    /// Run the configured formatter on the written stub
    #[arg(long)]
    ruff: bool,

    /// Registry directory (overrides the configuration)
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Configuration file (defaults to ./stubgen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every documented member
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn writes_to_stdout(&self) -> bool {
        self.out.as_os_str() == STDOUT
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.ruff && cli.writes_to_stdout() {
        bail!("--ruff needs a stub file to format and cannot be used with '-'");
    }

    let config = load_config(cli.config.as_deref())?;
    let registry = Registry::new(cli.registry.clone().unwrap_or_else(|| config.registry.clone()));
    info!("Loading module '{}' from {}", cli.module, registry.root().display());

    let module = registry
        .load(&cli.module)
        .map_err(|source| StubError::Registry {
            module: cli.module.clone(),
            source,
        })?;

    let generated = Generator::from_config(&config).generate(&module)?;
    let warnings = generated.diagnostics.len();

    if cli.writes_to_stdout() {
        print!("{}", generated.text);
    } else {
        stubgen_core::write_stub(&cli.out, &generated.text)
            .with_context(|| format!("Failed to write stub to '{}'", cli.out.display()))?;

        if cli.ruff {
            let Some(formatter) = ExternalFormatter::from_command(&config.formatter) else {
                bail!("no formatter command configured");
            };
            formatter.run(&cli.out)?;
        }
        eprintln!("Wrote {}", cli.out.display());
    }

    if warnings > 0 {
        eprintln!(
            "{warnings} warning{} while generating '{}'",
            if warnings == 1 { "" } else { "s" },
            cli.module
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StubConfig> {
    match path {
        Some(path) => StubConfig::load(path)
            .with_context(|| format!("Failed to load configuration '{}'", path.display())),
        None => {
            let dir = std::env::current_dir().context("Failed to read the working directory")?;
            Ok(StubConfig::discover(&dir)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FRAME_MODULE: &str = r#"{
        "name": "anise.astro",
        "members": [{
            "name": "Frame",
            "kind": "class",
            "members": [{
                "name": "__init__",
                "kind": "routine",
                "doc": ":type naif_id: int\n:rtype: Frame",
                "signature": { "parameters": [{ "name": "naif_id" }] }
            }]
        }]
    }"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stubgen").chain(args.iter().copied())).unwrap()
    }

    fn registry() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("anise.astro.json"), FRAME_MODULE).unwrap();
        dir
    }

    #[test]
    fn parse_arguments() {
        let cli = cli(&["anise.astro", "astro.pyi", "--ruff", "-v"]);
        assert_eq!(cli.module, "anise.astro");
        assert!(cli.ruff);
        assert_eq!(cli.log_level(), "debug");
        assert!(!cli.writes_to_stdout());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["stubgen", "anise", "-", "-v", "-q"]).is_err());
    }

    #[test]
    fn stdout_cannot_be_formatted() {
        let err = run(&cli(&["anise.astro", "-", "--ruff"])).unwrap_err();
        assert!(err.to_string().contains("--ruff"));
    }

    #[test]
    fn writes_stub_file() {
        let registry = registry();
        let out = TempDir::new().unwrap();
        let path = out.path().join("astro.pyi");
        let registry_arg = registry.path().to_str().unwrap();
        let out_arg = path.to_str().unwrap();

        run(&cli(&["anise.astro", out_arg, "--registry", registry_arg])).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("def __init__(self, naif_id: int) -> Frame: ..."));
    }

    #[test]
    fn missing_module_names_it() {
        let registry = registry();
        let registry_arg = registry.path().to_str().unwrap();
        let err = run(&cli(&["anise.time", "-", "--registry", registry_arg])).unwrap_err();
        assert!(err.to_string().contains("anise.time"));
    }

    #[test]
    #[cfg(unix)]
    fn failing_formatter_keeps_the_stub() {
        let registry = registry();
        let out = TempDir::new().unwrap();
        let config = out.path().join("stubgen.toml");
        std::fs::write(&config, "formatter = [\"false\"]").unwrap();
        let path = out.path().join("astro.pyi");

        let err = run(&cli(&[
            "anise.astro",
            path.to_str().unwrap(),
            "--ruff",
            "--registry",
            registry.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("false"));
        assert!(path.exists());
    }
}
