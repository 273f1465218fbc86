//! Abstract syntax tree for `Logo` programs.
//!
//! A program is a list of statements. Statement and expression nodes are
//! closed enums; the evaluator dispatches by case. Names stored in nodes
//! (procedure names, variable names) are already lowercased by the parser.

use tortuga_graphics::types::Scalar;

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Direction of a movement or rotation statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Forward,
    Back,
    Right,
    Left,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `forward`/`back`/`right`/`left` with a distance or angle.
    Move(MoveKind, Expr),
    /// `penup`
    PenUp,
    /// `pendown`
    PenDown,
    /// `pencolor EXPR`
    PenColor(Expr),
    /// `pensize EXPR`
    PenSize(Expr),
    /// `home`
    Home,
    /// `setxy X Y`
    SetXY(Expr, Expr),
    /// `setx X`
    SetX(Expr),
    /// `sety Y`
    SetY(Expr),
    /// `setheading DEG`
    SetHeading(Expr),
    /// `circle RADIUS`
    Circle(Expr),
    /// `arc ANGLE RADIUS`
    Arc(Expr, Expr),
    /// `clearscreen`
    ClearScreen,
    /// `hideturtle`
    HideTurtle,
    /// `showturtle`
    ShowTurtle,
    /// `repeat COUNT [BODY]`
    Repeat(Expr, Vec<Stmt>),
    /// `while [COND] [BODY]` — the condition re-evaluates each iteration.
    While(Expr, Vec<Stmt>),
    /// `for "VAR START END (STEP)? [BODY]`
    For {
        var: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },
    /// `if COND [BODY]`
    If(Expr, Vec<Stmt>),
    /// `ifelse COND [THEN] [ELSE]`
    IfElse(Expr, Vec<Stmt>, Vec<Stmt>),
    /// `to NAME :P1 ... BODY end`
    Define {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// `stop`
    Stop,
    /// `output EXPR`
    Output(Expr),
    /// `make "VAR EXPR`
    Make(String, Expr),
    /// `local "VAR`
    Local(String),
    /// `print EXPR`
    Print(Expr),
    /// `type EXPR`
    Type(Expr),
    /// `show EXPR`
    Show(Expr),
    /// A user procedure call with greedily collected arguments.
    Call { name: String, args: Vec<Expr> },
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinOp {
    /// Spelling for error messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Prefix `-`.
    Neg,
    /// `not`.
    Not,
}

/// A zero-argument turtle state reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporter {
    Xcor,
    Ycor,
    Heading,
    /// `pendown?`
    PenDownP,
}

/// A built-in function usable in expression position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    // one argument
    Sqrt,
    Abs,
    Int,
    Round,
    Sin,
    Cos,
    Tan,
    First,
    Last,
    ButFirst,
    ButLast,
    Count,
    Thing,
    Random,
    // one or two arguments
    Atan,
    // two arguments
    Sum,
    Difference,
    Product,
    Quotient,
    Remainder,
    Power,
    Item,
    Word,
    Towards,
    Fput,
    Lput,
    Sentence,
    // variadic (greedy)
    List,
}

impl Builtin {
    /// Look up a built-in by its (lowercased, alias-resolved) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "int" => Self::Int,
            "round" => Self::Round,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "first" => Self::First,
            "last" => Self::Last,
            "butfirst" => Self::ButFirst,
            "butlast" => Self::ButLast,
            "count" => Self::Count,
            "thing" => Self::Thing,
            "random" => Self::Random,
            "atan" => Self::Atan,
            "sum" => Self::Sum,
            "difference" => Self::Difference,
            "product" => Self::Product,
            "quotient" => Self::Quotient,
            "remainder" => Self::Remainder,
            "power" => Self::Power,
            "item" => Self::Item,
            "word" => Self::Word,
            "towards" => Self::Towards,
            "fput" => Self::Fput,
            "lput" => Self::Lput,
            "sentence" => Self::Sentence,
            "list" => Self::List,
            _ => return None,
        })
    }

    /// The name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Int => "int",
            Self::Round => "round",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::First => "first",
            Self::Last => "last",
            Self::ButFirst => "butfirst",
            Self::ButLast => "butlast",
            Self::Count => "count",
            Self::Thing => "thing",
            Self::Random => "random",
            Self::Atan => "atan",
            Self::Sum => "sum",
            Self::Difference => "difference",
            Self::Product => "product",
            Self::Quotient => "quotient",
            Self::Remainder => "remainder",
            Self::Power => "power",
            Self::Item => "item",
            Self::Word => "word",
            Self::Towards => "towards",
            Self::Fput => "fput",
            Self::Lput => "lput",
            Self::Sentence => "sentence",
            Self::List => "list",
        }
    }

    /// Fixed argument count, or `None` for the greedy `list` form.
    /// `atan` reports 1 but accepts an optional second argument.
    #[must_use]
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::List => None,
            Self::Sqrt
            | Self::Abs
            | Self::Int
            | Self::Round
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::First
            | Self::Last
            | Self::ButFirst
            | Self::ButLast
            | Self::Count
            | Self::Thing
            | Self::Random
            | Self::Atan => Some(1),
            Self::Sum
            | Self::Difference
            | Self::Product
            | Self::Quotient
            | Self::Remainder
            | Self::Power
            | Self::Item
            | Self::Word
            | Self::Towards
            | Self::Fput
            | Self::Lput
            | Self::Sentence => Some(2),
        }
    }
}

/// An item of a `[...]` list literal.
///
/// Words inside a list are text atoms, not variable references; parameter
/// references are the one construct evaluated at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Number(Scalar),
    Word(String),
    Param(String),
    List(Vec<ListItem>),
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number(Scalar),
    /// A text literal (`"word` or `"text with spaces"`).
    Text(String),
    /// A `[...]` list literal.
    ListLit(Vec<ListItem>),
    /// A `:name` parameter/variable reference.
    Var(String),
    /// Prefix `-` or `not`.
    Unary(UnaryOp, Box<Expr>),
    /// A binary arithmetic, comparison, or logic operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// A turtle state reporter.
    Reporter(Reporter),
    /// A built-in function call.
    Builtin(Builtin, Vec<Expr>),
    /// A user procedure call expected to `output` a value.
    Call { name: String, args: Vec<Expr> },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        assert_eq!(Builtin::from_name("sqrt"), Some(Builtin::Sqrt));
        assert_eq!(Builtin::from_name("sentence"), Some(Builtin::Sentence));
        assert_eq!(Builtin::from_name("nope"), None);
    }

    #[test]
    fn builtin_arity() {
        assert_eq!(Builtin::Sqrt.arity(), Some(1));
        assert_eq!(Builtin::Item.arity(), Some(2));
        assert_eq!(Builtin::List.arity(), None);
    }

    #[test]
    fn builtin_names_round_trip() {
        for name in ["sqrt", "butfirst", "quotient", "lput", "list"] {
            let b = Builtin::from_name(name).unwrap();
            assert_eq!(b.name(), name);
        }
    }
}
