//! Diagnostics and error reporting for Rotate.
//!
//! Every failure in the syntax frontend is a single [`CompileError`]: a categorical [`ErrorKind`] (lexical or
//! parse), a specific message, the byte span of the offending token, and its 1-based line and column.
//!
//! Rendering is separate from detection:
//! - [`format_error`] / [`format_error_with`] produce the plain text report
//!   (`file:line:col`, message, source line, caret, advice).
//! - [`DiagnosticSink`] is the injection point used by drivers; [`Collector`] keeps errors in memory and
//!   [`WriterSink`] renders into any `io::Write`.
//! - [`CompileError`] implements [`miette::Diagnostic`], so drivers can also hand it to miette's graphical handler.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::ast::Span;
use crate::source::SourceFile;

// ============================================================================
// Error kinds
// ============================================================================

/// Lexical failures. Any of these aborts the pipeline before parsing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated character literal")]
    UnterminatedChar,
    #[error("Invalid character literal")]
    InvalidCharLiteral,
}

impl LexErrorKind {
    /// Remediation hint shown under the report.
    pub fn advice(&self) -> &'static str {
        match self {
            LexErrorKind::UnexpectedCharacter(_) => "Remove the character or move it inside a string literal",
            LexErrorKind::UnterminatedString => "Close the string with a matching `\"`",
            LexErrorKind::UnterminatedChar => "Close the character literal with a matching `'`",
            LexErrorKind::InvalidCharLiteral => "Character literals hold exactly one byte, e.g. 'a' or '\\n'",
        }
    }
}

/// Parse failures.
///
/// ## Notes
/// - `EmptyParameterList`, `ExpectedDeclaration`, and `OutOfMemory` are part of the catalogue but never raised by
///   the parser: `fn f() {}` is legal, the director reports unknown leading tokens as `UnexpectedToken`, and
///   allocation failure aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Expected identifier")]
    ExpectedIdentifier,
    #[error("Expected expression")]
    ExpectedExpression,
    #[error("Expected type")]
    ExpectedType,
    #[error("Expected statement")]
    ExpectedStatement,
    #[error("Expected declaration")]
    ExpectedDeclaration,
    #[error("Unmatched parenthesis")]
    UnmatchedParen,
    #[error("Unmatched brace")]
    UnmatchedBrace,
    #[error("Unmatched bracket")]
    UnmatchedBracket,
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("Duplicate parameter name")]
    DuplicateParameter,
    #[error("Empty parameter list not allowed")]
    EmptyParameterList,
    #[error("Invalid function signature")]
    InvalidFunctionSignature,
    #[error("Invalid struct field")]
    InvalidStructField,
    #[error("Invalid enum member")]
    InvalidEnumMember,
    #[error("Out of memory")]
    OutOfMemory,
}

impl ParseErrorKind {
    /// Remediation hint shown under the report.
    pub fn advice(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken => "Check the syntax and remove or replace the unexpected token",
            ParseErrorKind::ExpectedIdentifier => "Provide a valid identifier name",
            ParseErrorKind::ExpectedExpression => "Add a valid expression",
            ParseErrorKind::ExpectedType => "Specify a valid type",
            ParseErrorKind::ExpectedStatement => "Add a valid statement",
            ParseErrorKind::ExpectedDeclaration => "Add a valid declaration",
            ParseErrorKind::UnmatchedParen => "Ensure all parentheses are properly matched",
            ParseErrorKind::UnmatchedBrace => "Ensure all braces are properly matched",
            ParseErrorKind::UnmatchedBracket => "Ensure all brackets are properly matched",
            ParseErrorKind::InvalidAssignmentTarget => "Only variables and fields can be assigned to",
            ParseErrorKind::DuplicateParameter => "Use unique parameter names",
            ParseErrorKind::EmptyParameterList => "Remove empty parameter list or add parameters",
            ParseErrorKind::InvalidFunctionSignature => "Check function syntax: name :: fn(params) return_type",
            ParseErrorKind::InvalidStructField => "Fields must have name: type format",
            ParseErrorKind::InvalidEnumMember => "Enum members must be valid identifiers",
            ParseErrorKind::OutOfMemory => "The compiler needs more memory",
        }
    }
}

/// Which stage failed, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Lex(#[from] LexErrorKind),
    #[error(transparent)]
    Parse(#[from] ParseErrorKind),
}

impl ErrorKind {
    pub fn advice(&self) -> &'static str {
        match self {
            ErrorKind::Lex(kind) => kind.advice(),
            ErrorKind::Parse(kind) => kind.advice(),
        }
    }

    /// Diagnostic code, e.g. for miette's `code` slot.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Lex(_) => "rotate::lexer",
            ErrorKind::Parse(_) => "rotate::parser",
        }
    }
}

// ============================================================================
// CompileError
// ============================================================================

/// A compile-time error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in bytes from the start of the line.
    pub column: usize,
}

impl CompileError {
    /// Build an error at `span`, deriving line and column from `source`.
    pub fn new(kind: impl Into<ErrorKind>, message: impl Into<String>, span: Span, source: &str) -> Self {
        let (line, column, _) = line_info(source, span.start);
        Self {
            kind: kind.into(),
            message: message.into(),
            span,
            line,
            column,
        }
    }

    pub fn advice(&self) -> &'static str {
        self.kind.advice()
    }

    /// The parse error kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self.kind {
            ErrorKind::Parse(kind) => Some(kind),
            ErrorKind::Lex(_) => None,
        }
    }

    /// The lexical error kind, if this is a lexical error.
    pub fn lex_kind(&self) -> Option<LexErrorKind> {
        match self.kind {
            ErrorKind::Lex(kind) => Some(kind),
            ErrorKind::Parse(_) => None,
        }
    }
}

impl miette::Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.advice()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = miette::SourceSpan::from((self.span.start, self.span.len()));
        let label = miette::LabeledSpan::new_with_span(Some(self.message.clone()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Terminal styling for rendered reports.
///
/// Passed explicitly to the renderer; there is no global color state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bold: &'static str,
    pub red: &'static str,
    pub blue: &'static str,
    pub yellow: &'static str,
    pub reset: &'static str,
}

impl Palette {
    /// No escape codes.
    pub const fn plain() -> Self {
        Self {
            bold: "",
            red: "",
            blue: "",
            yellow: "",
            reset: "",
        }
    }

    /// ANSI colors.
    pub const fn ansi() -> Self {
        Self {
            bold: "\x1b[1m",
            red: "\x1b[91m",
            blue: "\x1b[94m",
            yellow: "\x1b[93m",
            reset: "\x1b[0m",
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

/// Render an error without colors.
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    format_error_with(&Palette::plain(), file_name, source, error)
}

/// Render an error as a multi-line report:
///
/// ```text
///  > main.vr:1:7: error: Unmatched parenthesis: expected `)` after parameters, found `{`
///   1 | fn f( { }
///     |       ^
///  > Advice: Ensure all parentheses are properly matched
/// ```
///
/// The source excerpt is omitted when the error line is empty.
pub fn format_error_with(palette: &Palette, file_name: &str, source: &str, error: &CompileError) -> String {
    let Palette {
        bold,
        red,
        blue,
        yellow,
        reset,
    } = *palette;
    let (_, _, line_text) = line_info(source, error.span.start);
    let line_text = line_text.trim_end_matches('\r');

    let mut out = format!(
        " > {bold}{file_name}:{}:{}: {red}error: {blue}{error}{reset}\n",
        error.line, error.column
    );

    if !line_text.is_empty() {
        let gutter = error.line.to_string();
        let pad = " ".repeat(gutter.len());
        let indent = error.column.saturating_sub(1);
        let underline = error
            .span
            .len()
            .min(line_text.len().saturating_sub(indent))
            .max(1);

        out.push_str(&format!("  {yellow}{gutter}{reset} | {line_text}\n"));
        out.push_str(&format!(
            "  {yellow}{pad}{reset} | {}{red}{}{reset}\n",
            " ".repeat(indent),
            "^".repeat(underline)
        ));
    }

    out.push_str(&format!(" > Advice: {}\n", error.advice()));
    out
}

/// Get line number, column number, and line text for a byte offset.
///
/// Line and column are 1-based; the column counts bytes from the start of the line.
pub fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line_num = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);

    let line_end = source.as_bytes()[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |i| line_start + i);

    let line_text = source.get(line_start..line_end).unwrap_or("");
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for structured diagnostics.
///
/// Drivers pick the sink; the lexer and parser only return errors.
pub trait DiagnosticSink {
    fn report(&mut self, file: &SourceFile, error: &CompileError);
}

/// Keeps every reported diagnostic in memory.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Vec<CompileError>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_inner(self) -> Vec<CompileError> {
        self.diagnostics
    }
}

impl DiagnosticSink for Collector {
    fn report(&mut self, _file: &SourceFile, error: &CompileError) {
        self.diagnostics.push(error.clone());
    }
}

/// Renders each diagnostic with [`format_error_with`] into a writer.
#[derive(Debug)]
pub struct WriterSink<W: io::Write> {
    writer: W,
    palette: Palette,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W, palette: Palette) -> Self {
        Self { writer, palette }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to the process's stderr.
    pub fn stderr(palette: Palette) -> Self {
        Self::new(io::stderr(), palette)
    }
}

impl<W: io::Write> DiagnosticSink for WriterSink<W> {
    fn report(&mut self, file: &SourceFile, error: &CompileError) {
        let rendered = format_error_with(&self.palette, &file.name, &file.contents, error);
        if let Err(e) = self.writer.write_all(rendered.as_bytes()) {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
    }
}
