//! CLI module for the Rotate compiler
//!
//! `rotate <file.vr>` loads, lexes and parses one source file. Debug flags print the token stream (`--lex`) or the
//! parsed tree (`--ast`), write an org-mode compilation log (`--log`), or time the run (`--timer`).
//!
//! ## Modules
//!
//! - `loader` - Source file validation and reading
//! - `compile` - The load → lex → parse pipeline and its stats
//! - `dump` - Org-mode compilation log
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod compile;
pub mod dump;
pub mod loader;

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rotate_syntax::diagnostics::{DiagnosticSink, Palette, WriterSink};

use crate::version::ROTATE_VERSION;
use compile::{CompileFailure, CompileOptions, FancySink};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<CompileFailure> for CliError {
    fn from(failure: CompileFailure) -> Self {
        let message = match &failure.detail {
            Some(detail) => format!("error: {detail}\n{failure}"),
            None => failure.to_string(),
        };
        CliError::failure(message)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Rotate programming language compiler
#[derive(Parser, Debug)]
#[command(name = "rotate")]
#[command(version = ROTATE_VERSION, disable_version_flag = true)]
#[command(about = "The Rotate programming language compiler", long_about = None)]
pub struct Cli {
    /// Source file to compile (`.vr`)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Stop after lexing and print the token stream
    #[arg(long = "lex", conflicts_with = "ast")]
    pub lex: bool,

    /// Print the parsed program as S-expressions
    #[arg(long = "ast")]
    pub ast: bool,

    /// Write an org-mode compilation log
    #[arg(long = "log")]
    pub log: bool,

    /// Log destination (default: output.org)
    #[arg(long = "log-file", value_name = "PATH", requires = "log")]
    pub log_file: Option<PathBuf>,

    /// Print token count, throughput and elapsed time
    #[arg(long = "timer")]
    pub timer: bool,

    /// Render diagnostics with source snippets and labels
    #[arg(long = "fancy")]
    pub fancy: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    /// Resolve flags into pipeline options.
    pub fn options(&self) -> CompileOptions {
        let log_file = self
            .log
            .then(|| self.log_file.clone().unwrap_or_else(|| PathBuf::from(dump::DEFAULT_LOG_FILE)));
        CompileOptions {
            path: self.file.clone(),
            lex_only: self.lex,
            print_ast: self.ast,
            log_file,
            timer: self.timer,
            fancy: self.fancy,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = cli.options();
    let mut sink = diagnostic_sink(options.fancy);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = compile::compile(&options, sink.as_mut(), &mut out)?;

    if options.timer {
        out.write_all(stats.timer_report().as_bytes())
            .map_err(|e| CliError::failure(format!("error: cannot write output: {e}")))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Pick the diagnostic renderer: miette for `--fancy`, the plain report otherwise (colored on a terminal).
fn diagnostic_sink(fancy: bool) -> Box<dyn DiagnosticSink> {
    if fancy {
        return Box::new(FancySink::stderr());
    }
    let palette = if io::stderr().is_terminal() {
        Palette::ansi()
    } else {
        Palette::plain()
    };
    Box::new(WriterSink::stderr(palette))
}
