//! Token types for the `Logo` lexer.
//!
//! The lexer produces:
//! - **Word**: identifiers and command names, original case preserved
//!   (the parser lowercases for keyword comparison)
//! - **Number**: numeric constants; `-2` is a single negative literal when
//!   the `-` is immediately followed by a digit
//! - **Str**: quoted atoms (`"word`) and delimited literals (`"a b"`)
//! - **Param**: `:name` parameter references
//! - Brackets, parens, operators, newlines, and a final `Eof`

use tortuga_graphics::types::Scalar;

// ---------------------------------------------------------------------------
// Source position
// ---------------------------------------------------------------------------

/// A 1-based line/column position of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind and value of the token.
    pub kind: TokenKind,
    /// Source location of the first character.
    pub pos: Pos,
}

/// The kind and payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word: command name, keyword, or procedure name.
    Word(String),
    /// A numeric constant.
    Number(Scalar),
    /// A quoted atom or delimited text literal.
    Str(String),
    /// A `:name` parameter reference (without the colon).
    Param(String),
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// One of `+ - * / % = < > <= >= <>`.
    Operator(String),
    /// A line break. Statements are not newline-terminated; the parser
    /// skips these between statements.
    Newline,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is a word token with the given (lowercased)
    /// name.
    #[must_use]
    pub fn is_word(&self, name: &str) -> bool {
        matches!(self, Self::Word(w) if w.eq_ignore_ascii_case(name))
    }

    /// Returns `true` if this is an operator token with the given spelling.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        matches!(self, Self::Operator(o) if o == op)
    }

    /// Returns `true` if this is end-of-input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Short human-readable description for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Word(w) => format!("word `{w}`"),
            Self::Number(n) => format!("number `{n}`"),
            Self::Str(s) => format!("text `\"{s}`"),
            Self::Param(p) => format!("parameter `:{p}`"),
            Self::LBracket => "`[`".into(),
            Self::RBracket => "`]`".into(),
            Self::LParen => "`(`".into(),
            Self::RParen => "`)`".into(),
            Self::Operator(op) => format!("operator `{op}`"),
            Self::Newline => "end of line".into(),
            Self::Eof => "end of input".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
