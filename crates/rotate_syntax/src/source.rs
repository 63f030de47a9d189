//! Source buffers.
//!
//! A [`SourceFile`] is the immutable input of the lexer: the file's display name plus its full text. Loading,
//! extension checks, and size limits belong to the caller (see the `rotate` CLI loader); this type only holds text
//! that already passed those checks.

/// An immutable, named view of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Length of the contents in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Return the text of a 1-based line, without its newline.
    ///
    /// Returns `None` when `line` is `0` or past the last line.
    pub fn line_text(&self, line: usize) -> Option<&str> {
        line.checked_sub(1).and_then(|idx| self.contents.split('\n').nth(idx))
    }
}
