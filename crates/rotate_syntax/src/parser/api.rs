/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `source`: The text the tokens were lexed from.
/// - `tokens`: Token stream produced by `rotate_syntax::lexer`.
///
/// ## Errors
/// Returns the first [`CompileError`] encountered.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(source: &str, tokens: &[Token]) -> Result<Program, CompileError> {
    let mut parser = Parser::new(source, tokens);
    parser.run()?;
    Ok(parser.take_program().unwrap_or_default())
}
