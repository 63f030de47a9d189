/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its run/teardown API, and the top-level declaration loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type ParseResult<T> = Result<T, CompileError>;

/// Deepest allowed nesting of expressions, statements and types.
///
/// Each level costs several stack frames, so this stays well under what a 2 MiB thread stack can hold.
pub const MAX_NESTING: usize = 64;

/// Parser state.
///
/// ## Notes
/// - Reads past the end of the token slice yield `eot`, a zero-length `Eot` token positioned at the end of the
///   source, so grammar rules compare against it instead of bounds-checking.
/// - After [`Parser::run`] the parser holds either the program or the error, never both.
pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    eot: Token,
    program: Option<Program>,
    error: Option<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `source`: The text the tokens were produced from; identifiers and literals are resolved against it.
    /// - `tokens`: Token stream produced by `rotate_syntax::lexer`.
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        let last_line = tokens.last().map_or(1, |t| t.line);
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            eot: Token::eot(source.len(), last_line),
            program: None,
            error: None,
        }
    }

    /// Parse the whole token stream.
    ///
    /// On success the program is available through [`Parser::program`] / [`Parser::take_program`]; on failure the
    /// error is kept in [`Parser::error`] and also returned.
    ///
    /// ## Errors
    /// Returns the first parse error.
    pub fn run(&mut self) -> Result<(), CompileError> {
        self.pos = 0;
        self.depth = 0;
        self.program = None;
        self.error = None;

        match self.program_rule() {
            Ok(program) => {
                tracing::debug!(declarations = program.declarations.len(), "parsed program");
                self.program = Some(program);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(line = e.line, column = e.column, "parse failed");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// The parsed program, if [`Parser::run`] succeeded and it has not been taken.
    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// The recorded parse error, if any.
    pub fn error(&self) -> Option<&CompileError> {
        self.error.as_ref()
    }

    /// Move the program out of the parser. A second call returns `None`.
    pub fn take_program(&mut self) -> Option<Program> {
        self.program.take()
    }

    /// Send the recorded error (if any) to `sink`.
    pub fn report(&self, file: &SourceFile, sink: &mut dyn DiagnosticSink) {
        if let Some(error) = &self.error {
            sink.report(file, error);
        }
    }

    /// The declaration loop: skip terminators, stop at end of input, otherwise parse one declaration.
    fn program_rule(&mut self) -> ParseResult<Program> {
        let mut declarations = Vec::new();

        loop {
            self.skip_terminators();
            if self.is_at_end() {
                break;
            }
            declarations.push(self.declaration()?);
        }

        Ok(Program { declarations })
    }
}
