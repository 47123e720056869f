//! The classified token stream consumed by the builder.
//!
//! Lexing raw file text into tokens is an upstream responsibility; this crate
//! only defines the shape it consumes.

use serde::Serialize;

/// The closed set of token classifications the builder dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// The spec-level heading line.
    SpecHeading,
    /// A scenario heading line.
    ScenarioHeading,
    /// A step line (scenario step or leading context step).
    Step,
    /// A comment line.
    Comment,
    /// The header row of a table.
    TableHeader,
    /// A value row of a table.
    TableRow,
    /// A tag line.
    Tag,
}

/// One classified token from the upstream lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The primary text value (heading text, raw step text, comment text).
    pub value: String,
    /// Positional string arguments; used by table-header, table-row and tag
    /// tokens (cell values / tag names).
    pub args: Vec<String>,
    pub line_no: usize,
    /// The raw line as it appeared in the source file.
    pub line_text: String,
    /// Lexer hint that an inline table follows this token.
    pub has_inline_table: bool,
}

impl Token {
    /// A token whose raw line text equals its value, with no arguments.
    pub fn new(kind: TokenKind, value: impl Into<String>, line_no: usize) -> Self {
        let value = value.into();
        Self {
            kind,
            line_text: value.clone(),
            value,
            args: Vec::new(),
            line_no,
            has_inline_table: false,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_line_text(mut self, line_text: impl Into<String>) -> Self {
        self.line_text = line_text.into();
        self
    }

    pub fn with_inline_table(mut self) -> Self {
        self.has_inline_table = true;
        self
    }
}
