//! The compile pipeline: load → lex → parse → (optional) org-mode log.
//!
//! [`compile`] never prints diagnostics itself. Lexer and parser errors go to the caller's [`DiagnosticSink`], and
//! the returned [`CompileFailure`] only names the stage that failed.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rotate_syntax::ast::Program;
use rotate_syntax::diagnostics::{CompileError, DiagnosticSink};
use rotate_syntax::lexer::{self, Token};
use rotate_syntax::parser::Parser;
use rotate_syntax::printer;
use rotate_syntax::source::SourceFile;
use thiserror::Error;

use super::dump;
use super::loader;

/// What one invocation should do, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileOptions {
    pub path: PathBuf,
    /// Stop after lexing and print the token listing.
    pub lex_only: bool,
    /// Print the parsed program as S-expressions.
    pub print_ast: bool,
    /// Write the org-mode log here.
    pub log_file: Option<PathBuf>,
    pub timer: bool,
    pub fancy: bool,
}

/// Pipeline stage, used to say where a compilation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FileRead,
    Lexer,
    Parser,
    Logger,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FileRead => "FILE READ",
            Stage::Lexer => "LEXER",
            Stage::Parser => "PARSER",
            Stage::Logger => "LOGGER",
        };
        f.write_str(name)
    }
}

/// Numbers reported by `--timer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileStats {
    /// Source size in bytes.
    pub file_size: usize,
    /// Tokens including the trailing end-of-input token.
    pub token_count: usize,
    pub declaration_count: usize,
    pub elapsed: Duration,
}

impl CompileStats {
    /// Source throughput in megabytes (10^6 bytes) per second.
    pub fn throughput_mb_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.file_size as f64 / 1_000_000.0 / secs
    }

    /// The `--timer` report, one line each for token count, rate and time.
    pub fn timer_report(&self) -> String {
        format!(
            "[INFO] : {} Tokens\n[RATE] : {:.3} mb/sec\n[TIME] : {:.5} sec\n",
            self.token_count,
            self.throughput_mb_per_sec(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// A compilation that stopped early.
///
/// Lexer and parser details were already handed to the sink; `detail` carries everything else (load and log I/O
/// errors).
#[derive(Debug, Error)]
#[error("Compilation failed at stage: {stage}")]
pub struct CompileFailure {
    pub stage: Stage,
    pub detail: Option<String>,
}

impl CompileFailure {
    fn at(stage: Stage) -> Self {
        Self { stage, detail: None }
    }

    fn with_detail(stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: Some(detail.into()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Run the pipeline for one file.
///
/// Program output (`--lex` listing, `--ast` tree) goes to `out`; diagnostics go to `sink`.
///
/// ## Errors
///
/// Returns the stage that failed. The org-mode log is still written when parsing fails, without declarations.
#[tracing::instrument(skip_all, fields(path = %options.path.display()))]
pub fn compile(
    options: &CompileOptions,
    sink: &mut dyn DiagnosticSink,
    out: &mut dyn Write,
) -> Result<CompileStats, CompileFailure> {
    let started = Instant::now();

    let file = loader::read_source(&options.path)
        .map_err(|e| CompileFailure::with_detail(Stage::FileRead, e.to_string()))?;

    let tokens = match lexer::lex(&file.contents) {
        Ok(tokens) => tokens,
        Err(e) => {
            sink.report(&file, &e);
            return Err(CompileFailure::at(Stage::Lexer));
        }
    };

    if options.lex_only {
        write_token_listing(out, &file.contents, &tokens).map_err(output_failure(Stage::Lexer))?;
        write_log(options, &file, &tokens, None)?;
        return Ok(collect_stats(&file, &tokens, 0, started));
    }

    let mut parser = Parser::new(&file.contents, &tokens);
    if parser.run().is_err() {
        parser.report(&file, sink);
        write_log(options, &file, &tokens, None)?;
        return Err(CompileFailure::at(Stage::Parser));
    }
    let program = parser.take_program().unwrap_or_default();

    if options.print_ast {
        let rendered = printer::render_program(&file.contents, &program);
        writeln!(out, "{rendered}").map_err(output_failure(Stage::Parser))?;
    }

    write_log(options, &file, &tokens, Some(&program))?;

    let stats = collect_stats(&file, &tokens, program.declarations.len(), started);
    tracing::debug!(
        tokens = stats.token_count,
        declarations = stats.declaration_count,
        elapsed_us = stats.elapsed.as_micros() as u64,
        "compiled"
    );
    Ok(stats)
}

/// One token per line: line, byte range, kind, and the escaped lexeme.
pub fn write_token_listing(out: &mut dyn Write, source: &str, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(
            out,
            "{:>4} | {:>6}..{:<6} | {:<11} | {}",
            token.line,
            token.span.start,
            token.span.end,
            token.kind.name(),
            dump::escape(token.lexeme(source))
        )?;
    }
    Ok(())
}

fn write_log(
    options: &CompileOptions,
    file: &SourceFile,
    tokens: &[Token],
    program: Option<&Program>,
) -> Result<(), CompileFailure> {
    let Some(path) = &options.log_file else {
        return Ok(());
    };
    if tokens.len() > dump::MAX_LOG_TOKENS {
        tracing::warn!(tokens = tokens.len(), "file too large to show complete log, skipping");
        return Ok(());
    }

    let result = create_log(path).and_then(|mut writer| {
        dump::write_org(&mut writer, file, tokens, program, &timestamp())?;
        writer.flush()
    });
    result.map_err(|e| {
        CompileFailure::with_detail(Stage::Logger, format!("cannot write `{}`: {e}", path.display()))
    })?;
    tracing::info!(path = %path.display(), "wrote compilation log");
    Ok(())
}

fn create_log(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

fn output_failure(stage: Stage) -> impl Fn(io::Error) -> CompileFailure {
    move |e| CompileFailure::with_detail(stage, format!("cannot write output: {e}"))
}

fn collect_stats(file: &SourceFile, tokens: &[Token], declaration_count: usize, started: Instant) -> CompileStats {
    CompileStats {
        file_size: file.len(),
        token_count: tokens.len(),
        declaration_count,
        elapsed: started.elapsed(),
    }
}

/// Seconds since the Unix epoch; there is no calendar dependency.
fn timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("@{secs} (unix time)")
}

// ============================================================================
// miette rendering
// ============================================================================

/// Renders diagnostics with miette's graphical report handler (`--fancy`).
pub struct FancySink<W: Write> {
    writer: W,
}

impl<W: Write> FancySink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl FancySink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> DiagnosticSink for FancySink<W> {
    fn report(&mut self, file: &SourceFile, error: &CompileError) {
        let report = render_fancy(file, error);
        if let Err(e) = writeln!(self.writer, "{report}") {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
    }
}

/// A miette report for `error`, with `file` attached as its source.
pub fn render_fancy(file: &SourceFile, error: &CompileError) -> String {
    let source = miette::NamedSource::new(&file.name, file.contents.clone());
    let report = miette::Report::new(error.clone()).with_source_code(source);
    format!("{report:?}")
}
