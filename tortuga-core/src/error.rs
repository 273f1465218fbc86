//! Error types for the `Logo` lexer, parser, and evaluator.

use std::fmt;

use crate::token::Pos;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced anywhere in the interpreter pipeline.
///
/// The language has no user-visible error handling: any error halts the
/// run. The embedding program keeps access to the turtle state and output
/// buffer accumulated up to the failure point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoError {
    /// What category of thing went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Source location, when known (always present for lex/parse errors).
    pub pos: Option<Pos>,
}

impl LogoError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: None,
        }
    }

    /// Attach a source position.
    #[must_use]
    pub const fn with_pos(mut self, pos: Pos) -> Self {
        self.pos = Some(pos);
        self
    }
}

impl fmt::Display for LogoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(pos) = self.pos {
            write!(f, " at {pos}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for LogoError {}

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character in the source text.
    Lexical,
    /// Unexpected token, unclosed bracket, keyword misused in expression
    /// position, missing operand, missing `end`.
    Parse,
    /// Wrong value shape for an operator or built-in.
    Type,
    /// Wrong argument count for a user procedure.
    Arity,
    /// Undefined variable or procedure.
    Name,
    /// Division by zero, out-of-bounds item access.
    Arithmetic,
    /// `stop` or `output` outside any procedure.
    Control,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical error"),
            Self::Parse => write!(f, "parse error"),
            Self::Type => write!(f, "type error"),
            Self::Arity => write!(f, "arity error"),
            Self::Name => write!(f, "name error"),
            Self::Arithmetic => write!(f, "arithmetic error"),
            Self::Control => write!(f, "control error"),
        }
    }
}

/// Convenience type alias for results using [`LogoError`].
pub type LogoResult<T> = Result<T, LogoError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
