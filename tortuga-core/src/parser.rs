//! Recursive-descent parser for `Logo` programs.
//!
//! Statements are dispatched on their leading word (lowercased and
//! alias-resolved); everything else is a user procedure call. Statements
//! have no terminator: a statement ends when its argument count is
//! satisfied, which is why argument collection is *greedy* — a call
//! consumes argument expressions for as long as the next token can start
//! an expression, and stops at the next command word. The same
//! [`starts_expression`] predicate drives statement-level calls,
//! expression-level calls, and the variadic `list` built-in.
//!
//! # Expression grammar, lowest to highest precedence
//!
//! | level          | operators            | associativity |
//! |----------------|----------------------|---------------|
//! | or             | `or`                 | left          |
//! | and            | `and`                | left          |
//! | comparison     | `= < > <= >= <>`     | non-chained   |
//! | additive       | `+ -`                | left          |
//! | multiplicative | `* / %`              | left          |
//! | unary          | prefix `-`, `not`    | right         |
//! | primary        | literals, `:name`, `(...)`, `[...]`, calls | |

use crate::ast::{BinOp, Builtin, Expr, ListItem, MoveKind, Reporter, Stmt, UnaryOp};
use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::lexer::Lexer;
use crate::token::{Pos, Token, TokenKind};

/// Lex and parse a source text into a list of top-level statements.
pub fn parse_program(source: &str) -> LogoResult<Vec<Stmt>> {
    let tokens = Lexer::tokenize(source)?;
    Parser::new(tokens).program()
}

/// Resolve the short command aliases to their canonical names.
fn resolve_alias(name: &str) -> &str {
    match name {
        "fd" => "forward",
        "bk" => "back",
        "rt" => "right",
        "lt" => "left",
        "pu" => "penup",
        "pd" => "pendown",
        "pc" => "pencolor",
        "ps" => "pensize",
        "cs" => "clearscreen",
        "ht" => "hideturtle",
        "st" => "showturtle",
        "seth" => "setheading",
        "bf" => "butfirst",
        "bl" => "butlast",
        "op" => "output",
        other => other,
    }
}

/// Words that introduce statements or glue expressions together; none of
/// them may open an expression.
fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "forward"
            | "back"
            | "right"
            | "left"
            | "penup"
            | "pendown"
            | "pencolor"
            | "pensize"
            | "home"
            | "setxy"
            | "setx"
            | "sety"
            | "setheading"
            | "circle"
            | "arc"
            | "clearscreen"
            | "hideturtle"
            | "showturtle"
            | "repeat"
            | "while"
            | "for"
            | "if"
            | "ifelse"
            | "to"
            | "end"
            | "stop"
            | "output"
            | "make"
            | "local"
            | "print"
            | "type"
            | "show"
            | "and"
            | "or"
            | "not"
    )
}

/// Whether a token can begin an expression. Shared by statement-level
/// argument collection, expression-level user calls, and `list`.
///
/// A `-` operator is included to permit a leading negation; a bare word
/// is *not*, which is what terminates one call's arguments at the next
/// command.
fn starts_expression(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Number(_)
        | TokenKind::Str(_)
        | TokenKind::Param(_)
        | TokenKind::LBracket
        | TokenKind::LParen => true,
        TokenKind::Operator(op) => op == "-",
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Recursive-descent parser over a token stream.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Set while parsing a `to ... end` body; nested definitions are
    /// rejected.
    in_define: bool,
}

impl Parser {
    /// Create a parser over a token vector (terminated by `Eof`).
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            in_define: false,
        }
    }

    /// Parse a whole program.
    pub fn program(mut self) -> LogoResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            if self.peek().is_eof() {
                return Ok(stmts);
            }
            stmts.push(self.parse_statement()?);
        }
    }

    // -- token cursor --

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_pos(&self) -> Pos {
        self.tokens[self.pos].pos
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), TokenKind::Newline) {
            self.advance();
        }
    }

    fn error(&self, message: impl Into<String>) -> LogoError {
        LogoError::new(ErrorKind::Parse, message).with_pos(self.peek_pos())
    }

    // -- statements --

    fn parse_statement(&mut self) -> LogoResult<Stmt> {
        let TokenKind::Word(raw) = self.peek() else {
            return Err(self.statement_start_error());
        };
        let name = resolve_alias(&raw.to_lowercase()).to_owned();
        let pos = self.peek_pos();
        self.advance();

        match name.as_str() {
            "forward" => Ok(Stmt::Move(MoveKind::Forward, self.parse_expr()?)),
            "back" => Ok(Stmt::Move(MoveKind::Back, self.parse_expr()?)),
            "right" => Ok(Stmt::Move(MoveKind::Right, self.parse_expr()?)),
            "left" => Ok(Stmt::Move(MoveKind::Left, self.parse_expr()?)),
            "penup" => Ok(Stmt::PenUp),
            "pendown" => Ok(Stmt::PenDown),
            "pencolor" => Ok(Stmt::PenColor(self.parse_expr()?)),
            "pensize" => Ok(Stmt::PenSize(self.parse_expr()?)),
            "home" => Ok(Stmt::Home),
            "setxy" => {
                let x = self.parse_expr()?;
                let y = self.parse_expr()?;
                Ok(Stmt::SetXY(x, y))
            }
            "setx" => Ok(Stmt::SetX(self.parse_expr()?)),
            "sety" => Ok(Stmt::SetY(self.parse_expr()?)),
            "setheading" => Ok(Stmt::SetHeading(self.parse_expr()?)),
            "circle" => Ok(Stmt::Circle(self.parse_expr()?)),
            "arc" => {
                let angle = self.parse_expr()?;
                let radius = self.parse_expr()?;
                Ok(Stmt::Arc(angle, radius))
            }
            "clearscreen" => Ok(Stmt::ClearScreen),
            "hideturtle" => Ok(Stmt::HideTurtle),
            "showturtle" => Ok(Stmt::ShowTurtle),
            "repeat" => {
                let count = self.parse_expr()?;
                let body = self.parse_block()?;
                Ok(Stmt::Repeat(count, body))
            }
            "while" => {
                let cond = self.parse_condition_block()?;
                let body = self.parse_block()?;
                Ok(Stmt::While(cond, body))
            }
            "for" => self.parse_for(),
            "if" => {
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                Ok(Stmt::If(cond, body))
            }
            "ifelse" => {
                let cond = self.parse_expr()?;
                let then_block = self.parse_block()?;
                let else_block = self.parse_block()?;
                Ok(Stmt::IfElse(cond, then_block, else_block))
            }
            "to" => self.parse_define(pos),
            "end" => Err(LogoError::new(
                ErrorKind::Parse,
                "`end` outside of a procedure definition",
            )
            .with_pos(pos)),
            "stop" => Ok(Stmt::Stop),
            "output" => Ok(Stmt::Output(self.parse_expr()?)),
            "make" => {
                let var = self.expect_quoted_name("make")?;
                Ok(Stmt::Make(var, self.parse_expr()?))
            }
            "local" => Ok(Stmt::Local(self.expect_quoted_name("local")?)),
            "print" => Ok(Stmt::Print(self.parse_expr()?)),
            "type" => Ok(Stmt::Type(self.parse_expr()?)),
            "show" => Ok(Stmt::Show(self.parse_expr()?)),
            _ => {
                // Only `and`/`or`/`not` remain reserved at this point;
                // everything else is a user procedure call.
                if is_reserved_word(&name) {
                    return Err(LogoError::new(
                        ErrorKind::Parse,
                        format!("keyword `{name}` cannot start a statement"),
                    )
                    .with_pos(pos));
                }
                Ok(Stmt::Call {
                    name,
                    args: self.collect_args()?,
                })
            }
        }
    }

    /// Error for a statement that does not begin with a word. Calls out
    /// the negative-literal footgun when that is the likely cause.
    fn statement_start_error(&self) -> LogoError {
        let found = self.peek().describe();
        let hint = match self.peek() {
            TokenKind::Number(n) if *n < 0.0 => format!(
                " (note: `{n}` is a negative literal because `-` touches the \
                 digit; write `- {}` to subtract)",
                -n
            ),
            _ => String::new(),
        };
        self.error(format!("expected a command word, found {found}{hint}"))
    }

    /// Expect the quoted-atom name after `make`, `local`, or `for`.
    fn expect_quoted_name(&mut self, command: &str) -> LogoResult<String> {
        if let TokenKind::Str(name) = self.peek() {
            let name = name.to_lowercase();
            self.advance();
            Ok(name)
        } else {
            Err(self.error(format!(
                "`{command}` expects a quoted name like `\"x`, found {}",
                self.peek().describe()
            )))
        }
    }

    /// `for "VAR START END (STEP)? [BODY]` — the step is present exactly
    /// when the token after END is not `[`.
    fn parse_for(&mut self) -> LogoResult<Stmt> {
        let var = self.expect_quoted_name("for")?;
        let start = self.parse_expr()?;
        let end = self.parse_expr()?;
        self.skip_newlines();
        let step = if matches!(self.peek(), TokenKind::LBracket) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let body = self.parse_block()?;
        Ok(Stmt::For {
            var,
            start,
            end,
            step,
            body,
        })
    }

    /// `to NAME :P1 :P2 ... BODY end`
    fn parse_define(&mut self, to_pos: Pos) -> LogoResult<Stmt> {
        if self.in_define {
            return Err(LogoError::new(
                ErrorKind::Parse,
                "procedure definitions cannot be nested",
            )
            .with_pos(to_pos));
        }

        let TokenKind::Word(raw) = self.peek() else {
            return Err(self.error(format!(
                "`to` expects a procedure name, found {}",
                self.peek().describe()
            )));
        };
        let name = raw.to_lowercase();
        self.advance();

        let mut params = Vec::new();
        while let TokenKind::Param(p) = self.peek() {
            params.push(p.to_lowercase());
            self.advance();
        }

        self.in_define = true;
        let body = self.parse_define_body(to_pos);
        self.in_define = false;
        Ok(Stmt::Define {
            name,
            params,
            body: body?,
        })
    }

    /// Statements up to the matching top-level `end`.
    fn parse_define_body(&mut self, to_pos: Pos) -> LogoResult<Vec<Stmt>> {
        let mut body = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                TokenKind::Word(w) if w.eq_ignore_ascii_case("end") => {
                    self.advance();
                    return Ok(body);
                }
                TokenKind::Eof => {
                    return Err(LogoError::new(
                        ErrorKind::Parse,
                        "procedure definition is missing its `end`",
                    )
                    .with_pos(to_pos));
                }
                _ => body.push(self.parse_statement()?),
            }
        }
    }

    /// A `[...]` statement block.
    fn parse_block(&mut self) -> LogoResult<Vec<Stmt>> {
        self.skip_newlines();
        let open = self.peek_pos();
        if !matches!(self.peek(), TokenKind::LBracket) {
            return Err(self.error(format!(
                "expected a `[...]` block, found {}",
                self.peek().describe()
            )));
        }
        self.advance();

        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(stmts);
                }
                TokenKind::Eof => {
                    return Err(
                        LogoError::new(ErrorKind::Parse, "unclosed `[` block").with_pos(open)
                    );
                }
                _ => stmts.push(self.parse_statement()?),
            }
        }
    }

    /// A `[...]` wrapping a single expression (the `while` condition).
    fn parse_condition_block(&mut self) -> LogoResult<Expr> {
        self.skip_newlines();
        if !matches!(self.peek(), TokenKind::LBracket) {
            return Err(self.error(format!(
                "`while` expects a `[condition]` block, found {}",
                self.peek().describe()
            )));
        }
        self.advance();
        self.skip_newlines();
        let cond = self.parse_expr()?;
        self.skip_newlines();
        if !matches!(self.peek(), TokenKind::RBracket) {
            return Err(self.error(format!(
                "expected `]` after the condition, found {}",
                self.peek().describe()
            )));
        }
        self.advance();
        Ok(cond)
    }

    /// Greedily collect call arguments while the next token can start an
    /// expression.
    fn collect_args(&mut self) -> LogoResult<Vec<Expr>> {
        let mut args = Vec::new();
        while starts_expression(self.peek()) {
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }

    // -- expressions --

    fn parse_expr(&mut self) -> LogoResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> LogoResult<Expr> {
        let mut lhs = self.parse_and()?;
        while self.peek().is_word("or") {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> LogoResult<Expr> {
        let mut lhs = self.parse_comparison()?;
        while self.peek().is_word("and") {
            self.advance();
            let rhs = self.parse_comparison()?;
            lhs = Expr::Binary(BinOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Comparisons do not chain: `a < b < c` is a parse error at the
    /// second `<` (it surfaces wherever the leftover operator lands).
    fn parse_comparison(&mut self) -> LogoResult<Expr> {
        let lhs = self.parse_additive()?;
        let op = match self.peek() {
            TokenKind::Operator(op) => match op.as_str() {
                "=" => Some(BinOp::Eq),
                "<>" => Some(BinOp::Ne),
                "<" => Some(BinOp::Lt),
                ">" => Some(BinOp::Gt),
                "<=" => Some(BinOp::Le),
                ">=" => Some(BinOp::Ge),
                _ => None,
            },
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let rhs = self.parse_additive()?;
            return Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> LogoResult<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Operator(op) if op == "+" => BinOp::Add,
                TokenKind::Operator(op) if op == "-" => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_multiplicative(&mut self) -> LogoResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Operator(op) if op == "*" => BinOp::Mul,
                TokenKind::Operator(op) if op == "/" => BinOp::Div,
                TokenKind::Operator(op) if op == "%" => BinOp::Rem,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_unary(&mut self) -> LogoResult<Expr> {
        if self.peek().is_operator("-") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryOp::Neg, Box::new(operand)));
        }
        if self.peek().is_word("not") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryOp::Not, Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> LogoResult<Expr> {
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::Text(s))
            }
            TokenKind::Param(p) => {
                self.advance();
                Ok(Expr::Var(p.to_lowercase()))
            }
            TokenKind::LParen => {
                let open = self.peek_pos();
                self.advance();
                let inner = self.parse_expr()?;
                if !matches!(self.peek(), TokenKind::RParen) {
                    return Err(LogoError::new(ErrorKind::Parse, "unclosed `(`").with_pos(open));
                }
                self.advance();
                Ok(inner)
            }
            TokenKind::LBracket => Ok(Expr::ListLit(self.parse_list_items()?)),
            TokenKind::Word(w) => self.parse_word_expr(&w),
            other => Err(self.error(format!(
                "expected an expression, found {}",
                other.describe()
            ))),
        }
    }

    /// A word in expression position: a state reporter, a built-in
    /// function of fixed arity, or a user function call with greedy
    /// arguments. Statement keywords are rejected here.
    fn parse_word_expr(&mut self, raw: &str) -> LogoResult<Expr> {
        let pos = self.peek_pos();
        let name = resolve_alias(&raw.to_lowercase()).to_owned();
        self.advance();

        match name.as_str() {
            "xcor" => return Ok(Expr::Reporter(Reporter::Xcor)),
            "ycor" => return Ok(Expr::Reporter(Reporter::Ycor)),
            "heading" => return Ok(Expr::Reporter(Reporter::Heading)),
            "pendown?" => return Ok(Expr::Reporter(Reporter::PenDownP)),
            _ => {}
        }

        if let Some(builtin) = Builtin::from_name(&name) {
            let args = match builtin.arity() {
                // `list` collects greedily like a call.
                None => self.collect_args()?,
                Some(n) => {
                    let mut args = Vec::with_capacity(n);
                    for _ in 0..n {
                        args.push(self.parse_expr()?);
                    }
                    // `atan` takes an optional second argument.
                    if builtin == Builtin::Atan && starts_expression(self.peek()) {
                        args.push(self.parse_expr()?);
                    }
                    args
                }
            };
            return Ok(Expr::Builtin(builtin, args));
        }

        if is_reserved_word(&name) {
            return Err(LogoError::new(
                ErrorKind::Parse,
                format!("keyword `{name}` cannot appear in an expression"),
            )
            .with_pos(pos));
        }

        Ok(Expr::Call {
            name,
            args: self.collect_args()?,
        })
    }

    /// Items of a `[...]` list literal. The current token is the `[`.
    fn parse_list_items(&mut self) -> LogoResult<Vec<ListItem>> {
        let open = self.peek_pos();
        self.advance(); // '['

        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek().clone() {
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(items);
                }
                TokenKind::Eof => {
                    return Err(
                        LogoError::new(ErrorKind::Parse, "unclosed `[` list").with_pos(open)
                    );
                }
                TokenKind::Number(n) => {
                    self.advance();
                    items.push(ListItem::Number(n));
                }
                TokenKind::Word(w) => {
                    self.advance();
                    items.push(ListItem::Word(w));
                }
                TokenKind::Param(p) => {
                    self.advance();
                    items.push(ListItem::Param(p.to_lowercase()));
                }
                TokenKind::LBracket => {
                    items.push(ListItem::List(self.parse_list_items()?));
                }
                other => {
                    return Err(self.error(format!(
                        "{} cannot appear inside a list",
                        other.describe()
                    )));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
