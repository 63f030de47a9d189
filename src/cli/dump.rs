//! Org-mode compilation log.
//!
//! Writes a human-readable record of one compilation: meta data, the source, every token, and a one-line summary per
//! top-level declaration. The writer only reads the source, tokens, and program.

use std::io::{self, Write};

use rotate_syntax::ast::{Declaration, Program};
use rotate_syntax::lexer::Token;
use rotate_syntax::source::SourceFile;

/// Default output path for `--log`.
pub const DEFAULT_LOG_FILE: &str = "output.org";

/// Token streams longer than this are not dumped.
pub const MAX_LOG_TOKENS: usize = 0x10_0000;

/// Write the full org-mode log for one compilation.
///
/// `program` is `None` when parsing did not produce a tree; the declaration section then reports that nothing was
/// found instead of failing.
pub fn write_org<W: Write>(
    out: &mut W,
    file: &SourceFile,
    tokens: &[Token],
    program: Option<&Program>,
    generated_at: &str,
) -> io::Result<()> {
    writeln!(out, "#+TITLE: COMPILATION LOG")?;
    writeln!(out, "#+OPTIONS: toc:nil num:nil")?;
    writeln!(out, "#+AUTHOR: Rotate compiler")?;
    writeln!(out, "#+DATE: {generated_at}")?;
    writeln!(out)?;

    writeln!(out, "** Meta")?;
    writeln!(out, "- filename: ={}=", file.name)?;
    writeln!(out, "- file length(chars): {} chars", file.len())?;
    writeln!(out, "- time: {generated_at}")?;
    writeln!(out, "- number of tokens: {}", tokens.len())?;
    writeln!(out)?;

    writeln!(out, "** FILE")?;
    writeln!(out, "#+begin_src cpp")?;
    write!(out, "{}", file.contents)?;
    if !file.contents.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, "#+end_src")?;
    writeln!(out)?;

    write_tokens(out, &file.contents, tokens)?;
    writeln!(out)?;

    writeln!(out, "** Parser Abstract Syntax Tree")?;
    writeln!(out, "*** Declarations")?;
    writeln!(out, "#+begin_src")?;
    write_declarations(out, &file.contents, program)?;
    writeln!(out, "#+end_src")?;
    writeln!(out)?;

    writeln!(out, "** TODO TYPECHECKER")?;
    Ok(())
}

fn write_tokens<W: Write>(out: &mut W, source: &str, tokens: &[Token]) -> io::Result<()> {
    writeln!(out, "** TOKENS")?;
    writeln!(out, "#+begin_src")?;
    for (n, token) in tokens.iter().enumerate() {
        writeln!(
            out,
            "[TOKEN]: n: {n}, idx: {}, line: {}, len: {}, type: {}, val: `{}`",
            token.offset(),
            token.line,
            token.len(),
            token.kind.name(),
            escape(token.lexeme(source)),
        )?;
    }
    writeln!(out, "#+end_src")
}

fn write_declarations<W: Write>(out: &mut W, source: &str, program: Option<&Program>) -> io::Result<()> {
    let declarations = program.map(|p| p.declarations.as_slice()).unwrap_or_default();
    if declarations.is_empty() {
        return writeln!(out, "No AST declarations found");
    }

    for (n, decl) in declarations.iter().enumerate() {
        match &decl.node {
            Declaration::Import(import) => {
                let module = import.module_path.string_value(source).unwrap_or_default();
                match import.alias {
                    Some(alias) => writeln!(
                        out,
                        "[IMPORT]: n: {n}, alias: `{}`, module: `{module}`",
                        alias.lexeme(source)
                    )?,
                    None => writeln!(out, "[IMPORT]: n: {n}, module: `{module}`")?,
                }
            }
            Declaration::Function(func) => writeln!(
                out,
                "[FUNCTION]: n: {n}, name: `{}`, params: {}",
                func.name.lexeme(source),
                func.params.len()
            )?,
            Declaration::Variable(var) => writeln!(
                out,
                "[VARIABLE]: n: {n}, name: `{}`, constant: {}",
                var.name.lexeme(source),
                if var.is_constant { "yes" } else { "no" }
            )?,
            Declaration::Struct(decl) => writeln!(
                out,
                "[STRUCT]: n: {n}, name: `{}`, fields: {}",
                decl.name.lexeme(source),
                decl.fields.len()
            )?,
            Declaration::Enum(decl) => writeln!(
                out,
                "[ENUM]: n: {n}, name: `{}`, members: {}",
                decl.name.lexeme(source),
                decl.members.len()
            )?,
        }
    }
    Ok(())
}

/// Keep each token on one line of the log.
pub(crate) fn escape(lexeme: &str) -> String {
    lexeme.replace('\n', "\\n").replace('\t', "\\t")
}
