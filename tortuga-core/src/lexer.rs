//! Lexer for `Logo` source text.
//!
//! # Token production rules
//!
//! | Input          | Token produced                                   |
//! |----------------|--------------------------------------------------|
//! | `forward`, `sq?` | `Word` (original case preserved)               |
//! | `42`, `3.14`, `-2` | `Number` (`-` merges only when a digit follows) |
//! | `"red`         | `Str("red")` — atom form, no closing quote       |
//! | `"a b\"c"`     | `Str("a b\"c")` — delimited form, `\` escapes    |
//! | `:size`        | `Param("size")`                                  |
//! | `<= >= <>`     | two-character `Operator`s                        |
//! | `; comment`    | skipped to end of line                           |
//! | line break     | `Newline`                                        |
//! | end of input   | `Eof`                                            |
//!
//! The negative-literal rule is resolved purely by lookahead: `-` directly
//! followed by a digit is absorbed into the number, so `3 - 2` subtracts
//! but `3 -2` is two numbers. This is the grammar's principal footgun and
//! parse errors call it out (see the parser).

use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::token::{Pos, Token, TokenKind};

/// Whether a byte may appear inside a word (after the leading letter).
const fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'?' | b'!')
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// Lexer over `Logo` source text.
pub struct Lexer {
    /// Source bytes (owned).
    src: Vec<u8>,
    /// Current byte position.
    pos: usize,
    /// Current 1-based line.
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            src: source.as_bytes().to_vec(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Lex an entire source string into a token vector terminated by `Eof`.
    pub fn tokenize(source: &str) -> LogoResult<Vec<Token>> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind.is_eof();
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> LogoResult<Token> {
        self.skip_blanks_and_comments();

        let pos = self.cur_pos();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos,
            });
        };

        let kind = match c {
            b'\n' => {
                self.bump();
                TokenKind::Newline
            }
            b'0'..=b'9' => self.scan_number(false),
            b'-' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => {
                self.bump();
                self.scan_number(true)
            }
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'"' => self.scan_quoted(pos)?,
            b':' => self.scan_param(pos)?,
            b'+' | b'-' | b'*' | b'/' | b'%' | b'=' => {
                self.bump();
                TokenKind::Operator((c as char).to_string())
            }
            b'<' | b'>' => self.scan_comparison(c),
            c if c.is_ascii_alphabetic() => self.scan_word(),
            other => {
                return Err(LogoError::new(
                    ErrorKind::Lexical,
                    format!("unrecognized character `{}`", other as char),
                )
                .with_pos(pos));
            }
        };

        Ok(Token { kind, pos })
    }

    // -- internal helpers --

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    /// Consume one byte, maintaining line/column bookkeeping.
    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn cur_pos(&self) -> Pos {
        let column = u32::try_from(self.pos - self.line_start + 1).unwrap_or(u32::MAX);
        Pos::new(self.line, column)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// Skip spaces, tabs, carriage returns, and `;`-comments. Newlines are
    /// tokens and are left in place (a comment runs up to, not through,
    /// its terminating newline).
    fn skip_blanks_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' => {
                    self.bump();
                }
                b';' => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan a number. The optional leading `-` has already been consumed
    /// when `negative` is set; the current byte is a digit.
    fn scan_number(&mut self, negative: bool) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        // A fractional part needs a digit after the dot, otherwise the dot
        // is left for the next token (and rejected there).
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }

        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("0");
        let value: f64 = text.parse().unwrap_or(0.0);
        TokenKind::Number(if negative { -value } else { value })
    }

    /// Scan a `"` form. A quote directly followed by a letter or underscore
    /// is an atom with no closing quote, terminated by the first non-word
    /// character. Anything else opens a delimited literal ended by the next
    /// `"`, with `\` escaping the following character.
    fn scan_quoted(&mut self, pos: Pos) -> LogoResult<TokenKind> {
        self.bump(); // opening '"'

        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_')
        {
            let start = self.pos;
            while self.peek().is_some_and(is_word_char) {
                self.bump();
            }
            let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
            return Ok(TokenKind::Str(text));
        }

        let mut text = Vec::new();
        loop {
            match self.bump() {
                Some(b'"') => break,
                Some(b'\\') => {
                    if let Some(escaped) = self.bump() {
                        text.push(escaped);
                    }
                }
                Some(c) => text.push(c),
                None => {
                    return Err(LogoError::new(
                        ErrorKind::Lexical,
                        "unterminated text literal",
                    )
                    .with_pos(pos));
                }
            }
        }
        Ok(TokenKind::Str(String::from_utf8_lossy(&text).into_owned()))
    }

    /// Scan a `:name` parameter reference. The name must start with a
    /// letter.
    fn scan_param(&mut self, pos: Pos) -> LogoResult<TokenKind> {
        self.bump(); // ':'

        if !self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(
                LogoError::new(ErrorKind::Lexical, "expected a name after `:`").with_pos(pos),
            );
        }

        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        Ok(TokenKind::Param(text))
    }

    /// Scan `<`, `>`, `<=`, `>=`, or `<>`.
    fn scan_comparison(&mut self, first: u8) -> TokenKind {
        self.bump();
        let two = match (first, self.peek()) {
            (b'<', Some(b'=')) => Some("<="),
            (b'>', Some(b'=')) => Some(">="),
            (b'<', Some(b'>')) => Some("<>"),
            _ => None,
        };
        if let Some(op) = two {
            self.bump();
            TokenKind::Operator(op.into())
        } else {
            TokenKind::Operator((first as char).to_string())
        }
    }

    /// Scan a word. The current byte is a letter; the word continues over
    /// alphanumerics and `- _ ? !`, original case preserved.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.bump();
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        TokenKind::Word(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input)
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn word(w: &str) -> TokenKind {
        TokenKind::Word(w.into())
    }

    fn op(o: &str) -> TokenKind {
        TokenKind::Operator(o.into())
    }

    // -- whitespace and comments --

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("forward 10 ; draw the first side\nright 90"),
            vec![
                word("forward"),
                TokenKind::Number(10.0),
                TokenKind::Newline,
                word("right"),
                TokenKind::Number(90.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn newline_is_a_token() {
        assert_eq!(
            kinds("a\n\nb"),
            vec![
                word("a"),
                TokenKind::Newline,
                TokenKind::Newline,
                word("b"),
                TokenKind::Eof,
            ]
        );
    }

    // -- numbers --

    #[test]
    fn integer_and_decimal() {
        assert_eq!(
            kinds("42 3.14"),
            vec![TokenKind::Number(42.0), TokenKind::Number(3.14), TokenKind::Eof]
        );
    }

    #[test]
    fn negative_literal_absorbs_minus() {
        // `-` immediately followed by a digit is part of the number.
        assert_eq!(
            kinds("-2"),
            vec![TokenKind::Number(-2.0), TokenKind::Eof]
        );
    }

    #[test]
    fn spaced_minus_is_an_operator() {
        assert_eq!(
            kinds("3 - 2"),
            vec![
                TokenKind::Number(3.0),
                op("-"),
                TokenKind::Number(2.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unspaced_minus_yields_two_numbers() {
        // The deliberate Logo footgun: `3 -2` is NOT a subtraction.
        assert_eq!(
            kinds("3 -2"),
            vec![TokenKind::Number(3.0), TokenKind::Number(-2.0), TokenKind::Eof]
        );
    }

    #[test]
    fn trailing_dot_is_not_a_fraction() {
        // `3.` is the number 3; the dot is then unrecognizable.
        let err = Lexer::tokenize("3.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    // -- words --

    #[test]
    fn word_preserves_case() {
        assert_eq!(kinds("ForWard"), vec![word("ForWard"), TokenKind::Eof]);
    }

    #[test]
    fn word_punctuation() {
        assert_eq!(
            kinds("pendown? my-proc x_1 go!"),
            vec![
                word("pendown?"),
                word("my-proc"),
                word("x_1"),
                word("go!"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn word_followed_by_bracket() {
        assert_eq!(
            kinds("repeat 4[x]"),
            vec![
                word("repeat"),
                TokenKind::Number(4.0),
                TokenKind::LBracket,
                word("x"),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    // -- parameters --

    #[test]
    fn parameter_reference() {
        assert_eq!(
            kinds(":size"),
            vec![TokenKind::Param("size".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn parameter_needs_a_name() {
        let err = Lexer::tokenize(": x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn parameter_absorbs_dashes() {
        // `:n-1` is the single parameter `n-1` (write `:n - 1` to subtract).
        assert_eq!(
            kinds(":n-1"),
            vec![TokenKind::Param("n-1".into()), TokenKind::Eof]
        );
    }

    // -- quoted forms --

    #[test]
    fn quoted_atom_has_no_closing_quote() {
        assert_eq!(
            kinds("\"red \"blue"),
            vec![
                TokenKind::Str("red".into()),
                TokenKind::Str("blue".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn quoted_atom_ends_at_non_word_character() {
        assert_eq!(
            kinds("\"red]"),
            vec![TokenKind::Str("red".into()), TokenKind::RBracket, TokenKind::Eof]
        );
    }

    #[test]
    fn delimited_literal_with_spaces() {
        assert_eq!(
            kinds("\" hello world\""),
            vec![TokenKind::Str(" hello world".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn delimited_literal_escapes() {
        assert_eq!(
            kinds(r#"" a \"quoted\" word""#),
            vec![TokenKind::Str(" a \"quoted\" word".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn empty_delimited_literal() {
        assert_eq!(
            kinds("\"\""),
            vec![TokenKind::Str(String::new()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_literal_is_an_error() {
        let err = Lexer::tokenize("\" oops").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert!(err.message.contains("unterminated"), "got: {}", err.message);
    }

    // -- operators --

    #[test]
    fn comparison_operators() {
        assert_eq!(
            kinds("< > <= >= <> ="),
            vec![op("<"), op(">"), op("<="), op(">="), op("<>"), op("="), TokenKind::Eof]
        );
    }

    #[test]
    fn arithmetic_operators() {
        assert_eq!(
            kinds("1 + 2 * 3 / 4 % 5"),
            vec![
                TokenKind::Number(1.0),
                op("+"),
                TokenKind::Number(2.0),
                op("*"),
                TokenKind::Number(3.0),
                op("/"),
                TokenKind::Number(4.0),
                op("%"),
                TokenKind::Number(5.0),
                TokenKind::Eof,
            ]
        );
    }

    // -- positions --

    #[test]
    fn positions_are_one_based() {
        let tokens = Lexer::tokenize("fd 10\n  rt 90").unwrap();
        assert_eq!(tokens[0].pos, Pos::new(1, 1)); // fd
        assert_eq!(tokens[1].pos, Pos::new(1, 4)); // 10
        assert_eq!(tokens[2].pos, Pos::new(1, 6)); // newline
        assert_eq!(tokens[3].pos, Pos::new(2, 3)); // rt
        assert_eq!(tokens[4].pos, Pos::new(2, 6)); // 90
    }

    #[test]
    fn error_position_points_at_the_character() {
        let err = Lexer::tokenize("forward 10\n  @").unwrap_err();
        assert_eq!(err.pos, Some(Pos::new(2, 3)));
    }

    // -- combined --

    #[test]
    fn realistic_statement() {
        assert_eq!(
            kinds("to sq :n repeat 4 [forward :n right 90] end"),
            vec![
                word("to"),
                word("sq"),
                TokenKind::Param("n".into()),
                word("repeat"),
                TokenKind::Number(4.0),
                TokenKind::LBracket,
                word("forward"),
                TokenKind::Param("n".into()),
                word("right"),
                TokenKind::Number(90.0),
                TokenKind::RBracket,
                word("end"),
                TokenKind::Eof,
            ]
        );
    }
}
