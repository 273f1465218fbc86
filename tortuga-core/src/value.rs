//! Runtime values for the `Logo` evaluator.
//!
//! Every expression evaluates to a [`Value`]: a number, a text atom
//! ("word" in `Logo` terms), or a list. There is no separate boolean
//! type — comparisons and logic produce the text atoms `true` and
//! `false`, and truthiness is defined over all three variants.

use std::rc::Rc;

use tortuga_graphics::types::Scalar;

/// A `Logo` runtime value.
///
/// Text and lists are reference-counted: the interpreter is strictly
/// single-threaded, so `Rc` suffices and cloning a value is cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number.
    Number(Scalar),
    /// An immutable text atom.
    Text(Rc<str>),
    /// An ordered sequence of values, possibly nested.
    List(Rc<[Value]>),
}

impl Value {
    /// A text value.
    #[must_use]
    pub fn text(s: impl AsRef<str>) -> Self {
        Self::Text(Rc::from(s.as_ref()))
    }

    /// A list value.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Rc::from(items))
    }

    /// The boolean text atoms `true` / `false`.
    #[must_use]
    pub fn truth(b: bool) -> Self {
        Self::text(if b { "true" } else { "false" })
    }

    /// Truthiness: everything is true except the text atoms `false` and
    /// the empty word, the number 0, and the empty list.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !(s.is_empty() || &**s == "false"),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// The value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "word",
            Self::List(_) => "list",
        }
    }

    /// Try to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<Scalar> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Try to extract a text atom.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Try to extract a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// The display form used by `print` and `type`: numbers in the host's
    /// natural formatting, text atoms bare, lists space-separated inside
    /// brackets.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => format!("{n}"),
            Self::Text(s) => s.to_string(),
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Self::display).collect();
                format!("[{}]", inner.join(" "))
            }
        }
    }

    /// The machine-readable form used by `show`: a top-level text atom is
    /// quoted (`"word`); lists keep their brackets with bare items, so a
    /// nested list prints as `[a [b c]]`.
    #[must_use]
    pub fn show_form(&self) -> String {
        match self {
            Self::Text(s) => format!("\"{s}"),
            other => other.display(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
