//! mkversion - build metadata header generator
//!
//! ```text
//! mkversion manifest.uuid manifest VERSION > VERSION.h
//! ```
//!
//! Reads the check-in identifier, the check-in manifest and the release
//! version, and writes `#define` constants for them to stdout. Diagnostics go
//! to stderr; every failure exits with status 1 and writes nothing to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};

use mkversion_core::config::{FORMAT_ENV, STRICT_DATE_ENV};
use mkversion_core::{compiler_identity, generate, InputPaths, OutputFormat, PipelineConfig};

#[derive(Parser)]
#[command(name = "mkversion")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a C header of build constants from check-in metadata", long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Fail when the manifest has no date record instead of omitting the date constants
    #[arg(long, env = STRICT_DATE_ENV)]
    strict_date: bool,

    /// Output format: `header` (#define lines) or `json`
    #[arg(long, env = FORMAT_ENV, default_value = "header")]
    format: OutputFormat,

    /// manifest.uuid, manifest and VERSION, in that order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg0| arg0.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mkversion".to_string())
}

fn run(cli: Cli) -> Result<()> {
    let inputs = InputPaths::from_args(&program_name(), cli.files)?;
    let config = PipelineConfig {
        strict_date: cli.strict_date,
        format: cli.format,
    };
    debug!(?inputs, ?config, "generating header");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    generate(&inputs, &config, compiler_identity(), &mut out)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    mkversion_core::init_tracing(cli.json, level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
