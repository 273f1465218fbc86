//! Built-in functions usable in expression position.
//!
//! Math functions work in degrees. The sequence functions (`first`,
//! `last`, `butfirst`, `butlast`, `count`, `item`) accept a word
//! (character-wise) or a list; numbers are rejected. Errors name the
//! offending built-in.

use tortuga_graphics::math::{
    atan2_deg, cos_deg, heading_towards, next_fraction, sin_deg, tan_deg,
};

use crate::ast::{Builtin, Expr};
use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::value::Value;

use super::Interpreter;

impl Interpreter {
    /// Evaluate a built-in call. The parser guarantees the argument
    /// count (except `atan`, which may have one or two).
    pub(crate) fn eval_builtin(&mut self, builtin: Builtin, args: &[Expr]) -> LogoResult<Value> {
        let values = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<LogoResult<Vec<_>>>()?;

        match builtin {
            // -- math, one argument --
            Builtin::Sqrt => {
                let n = number(&values[0], builtin)?;
                if n < 0.0 {
                    return Err(arith(builtin, "of a negative number"));
                }
                Ok(Value::Number(n.sqrt()))
            }
            Builtin::Abs => Ok(Value::Number(number(&values[0], builtin)?.abs())),
            Builtin::Int => Ok(Value::Number(number(&values[0], builtin)?.trunc())),
            Builtin::Round => Ok(Value::Number(number(&values[0], builtin)?.round())),
            Builtin::Sin => Ok(Value::Number(sin_deg(number(&values[0], builtin)?))),
            Builtin::Cos => Ok(Value::Number(cos_deg(number(&values[0], builtin)?))),
            Builtin::Tan => Ok(Value::Number(tan_deg(number(&values[0], builtin)?))),

            // `atan x` is the arc tangent of x; `atan x y` is the
            // two-argument arctan(y/x) form. Both in degrees.
            Builtin::Atan => {
                let x = number(&values[0], builtin)?;
                if let Some(second) = values.get(1) {
                    let y = number(second, builtin)?;
                    Ok(Value::Number(atan2_deg(y, x)))
                } else {
                    Ok(Value::Number(x.atan().to_degrees()))
                }
            }

            Builtin::Random => {
                let n = number(&values[0], builtin)?.floor();
                if n <= 0.0 {
                    return Err(arith(builtin, "expects a positive bound"));
                }
                Ok(Value::Number(
                    (next_fraction(&mut self.random_seed) * n).floor(),
                ))
            }

            // -- math, two arguments --
            Builtin::Sum => binary_number(&values, builtin, |a, b| Ok(a + b)),
            Builtin::Difference => binary_number(&values, builtin, |a, b| Ok(a - b)),
            Builtin::Product => binary_number(&values, builtin, |a, b| Ok(a * b)),
            Builtin::Quotient => binary_number(&values, builtin, |a, b| {
                if b == 0.0 {
                    Err(arith(builtin, "division by zero"))
                } else {
                    Ok(a / b)
                }
            }),
            Builtin::Remainder => binary_number(&values, builtin, |a, b| {
                if b == 0.0 {
                    Err(arith(builtin, "division by zero"))
                } else {
                    Ok(a % b)
                }
            }),
            Builtin::Power => binary_number(&values, builtin, |a, b| Ok(a.powf(b))),

            // -- turtle geometry --
            Builtin::Towards => {
                let x = number(&values[0], builtin)?;
                let y = number(&values[1], builtin)?;
                Ok(Value::Number(heading_towards(
                    self.turtle.x,
                    self.turtle.y,
                    x,
                    y,
                )))
            }

            // -- sequences --
            Builtin::First => match sequence(&values[0], builtin)? {
                Seq::Text(s) => s
                    .chars()
                    .next()
                    .map(|c| Value::text(c.to_string()))
                    .ok_or_else(|| arith(builtin, "of an empty word")),
                Seq::List(items) => items
                    .first()
                    .cloned()
                    .ok_or_else(|| arith(builtin, "of an empty list")),
            },
            Builtin::Last => match sequence(&values[0], builtin)? {
                Seq::Text(s) => s
                    .chars()
                    .last()
                    .map(|c| Value::text(c.to_string()))
                    .ok_or_else(|| arith(builtin, "of an empty word")),
                Seq::List(items) => items
                    .last()
                    .cloned()
                    .ok_or_else(|| arith(builtin, "of an empty list")),
            },
            Builtin::ButFirst => match sequence(&values[0], builtin)? {
                Seq::Text(s) => {
                    let mut chars = s.chars();
                    if chars.next().is_none() {
                        return Err(arith(builtin, "of an empty word"));
                    }
                    Ok(Value::text(chars.as_str()))
                }
                Seq::List(items) => {
                    if items.is_empty() {
                        return Err(arith(builtin, "of an empty list"));
                    }
                    Ok(Value::list(items[1..].to_vec()))
                }
            },
            Builtin::ButLast => match sequence(&values[0], builtin)? {
                Seq::Text(s) => {
                    if s.is_empty() {
                        return Err(arith(builtin, "of an empty word"));
                    }
                    let cut = s.chars().last().map_or(0, char::len_utf8);
                    Ok(Value::text(&s[..s.len() - cut]))
                }
                Seq::List(items) => {
                    if items.is_empty() {
                        return Err(arith(builtin, "of an empty list"));
                    }
                    Ok(Value::list(items[..items.len() - 1].to_vec()))
                }
            },
            Builtin::Count => {
                let len = match sequence(&values[0], builtin)? {
                    Seq::Text(s) => s.chars().count(),
                    Seq::List(items) => items.len(),
                };
                #[expect(clippy::cast_precision_loss, reason = "sequence lengths are small")]
                let len = len as f64;
                Ok(Value::Number(len))
            }
            Builtin::Item => {
                let index = number(&values[0], builtin)?.floor();
                match sequence(&values[1], builtin)? {
                    Seq::Text(s) => {
                        let picked = index_sequence(index, s.chars().count(), builtin)
                            .and_then(|i| s.chars().nth(i).ok_or_else(|| oob(builtin, index)))?;
                        Ok(Value::text(picked.to_string()))
                    }
                    Seq::List(items) => {
                        let i = index_sequence(index, items.len(), builtin)?;
                        Ok(items[i].clone())
                    }
                }
            }

            // -- construction --
            Builtin::Word => {
                let text = format!("{}{}", values[0].display(), values[1].display());
                Ok(Value::text(text))
            }
            Builtin::Fput => {
                let Some(items) = values[1].as_list() else {
                    return Err(type_error(builtin, "expects a list as its second input"));
                };
                let mut out = Vec::with_capacity(items.len() + 1);
                out.push(values[0].clone());
                out.extend_from_slice(items);
                Ok(Value::list(out))
            }
            Builtin::Lput => {
                let Some(items) = values[1].as_list() else {
                    return Err(type_error(builtin, "expects a list as its second input"));
                };
                let mut out = items.to_vec();
                out.push(values[0].clone());
                Ok(Value::list(out))
            }
            // Each non-list input is wrapped as a one-element list before
            // the concatenation.
            Builtin::Sentence => {
                let mut out = Vec::new();
                for value in values {
                    match value {
                        Value::List(items) => out.extend_from_slice(&items),
                        other => out.push(other),
                    }
                }
                Ok(Value::list(out))
            }
            Builtin::List => Ok(Value::list(values)),

            // -- variables --
            Builtin::Thing => {
                let Some(name) = values[0].as_text() else {
                    return Err(type_error(builtin, "expects a variable name word"));
                };
                self.lookup_var(&name.to_lowercase())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A borrowed view of a sequence operand.
enum Seq<'a> {
    Text(&'a str),
    List(&'a [Value]),
}

fn sequence(value: &Value, builtin: Builtin) -> LogoResult<Seq<'_>> {
    match value {
        Value::Text(s) => Ok(Seq::Text(s.as_ref())),
        Value::List(items) => Ok(Seq::List(items.as_ref())),
        Value::Number(_) => Err(type_error(builtin, "expects a word or list, got a number")),
    }
}

fn number(value: &Value, builtin: Builtin) -> LogoResult<f64> {
    value.as_number().ok_or_else(|| {
        type_error(
            builtin,
            &format!("expects a number, got a {}", value.type_name()),
        )
    })
}

fn binary_number(
    values: &[Value],
    builtin: Builtin,
    op: impl FnOnce(f64, f64) -> LogoResult<f64>,
) -> LogoResult<Value> {
    let a = number(&values[0], builtin)?;
    let b = number(&values[1], builtin)?;
    Ok(Value::Number(op(a, b)?))
}

/// Check a 1-based index against a sequence length.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "the index is bounds-checked against the sequence length"
)]
fn index_sequence(index: f64, len: usize, builtin: Builtin) -> LogoResult<usize> {
    if index < 1.0 || index > len as f64 {
        return Err(oob(builtin, index));
    }
    Ok(index as usize - 1)
}

fn oob(builtin: Builtin, index: f64) -> LogoError {
    arith(builtin, &format!("index {index} is out of bounds"))
}

fn arith(builtin: Builtin, detail: &str) -> LogoError {
    LogoError::new(
        ErrorKind::Arithmetic,
        format!("`{}` {detail}", builtin.name()),
    )
}

fn type_error(builtin: Builtin, detail: &str) -> LogoError {
    LogoError::new(ErrorKind::Type, format!("`{}` {detail}", builtin.name()))
}
