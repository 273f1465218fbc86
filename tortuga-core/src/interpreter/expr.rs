//! Expression evaluation.
//!
//! Operators are dispatched by value case with explicit type errors; the
//! comparison and logic operators produce the text atoms `true`/`false`
//! rather than a separate boolean type.

use crate::ast::{BinOp, Expr, ListItem, Reporter, UnaryOp};
use crate::env::Binding;
use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::value::Value;

use super::Interpreter;

impl Interpreter {
    /// Evaluate an expression to a value.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> LogoResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Text(s) => Ok(Value::text(s)),
            Expr::ListLit(items) => self.eval_list_literal(items),
            Expr::Var(name) => self.lookup_var(name),
            Expr::Unary(op, operand) => self.eval_unary(*op, operand),
            Expr::Binary(op, lhs, rhs) => self.eval_binary(*op, lhs, rhs),
            Expr::Reporter(reporter) => Ok(match reporter {
                Reporter::Xcor => Value::Number(self.turtle.x),
                Reporter::Ycor => Value::Number(self.turtle.y),
                Reporter::Heading => Value::Number(self.turtle.heading),
                Reporter::PenDownP => Value::truth(self.turtle.pen_down),
            }),
            Expr::Builtin(builtin, args) => self.eval_builtin(*builtin, args),
            Expr::Call { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<LogoResult<Vec<_>>>()?;
                match self.invoke(name, values)? {
                    Some(value) => Ok(value),
                    None => Err(LogoError::new(
                        ErrorKind::Type,
                        format!("procedure `{name}` did not output a value"),
                    )),
                }
            }
        }
    }

    /// Evaluate an expression that must be a number, naming the consumer
    /// in the error.
    pub(crate) fn eval_number(&mut self, expr: &Expr, what: &str) -> LogoResult<f64> {
        let value = self.eval_expr(expr)?;
        value.as_number().ok_or_else(|| {
            LogoError::new(
                ErrorKind::Type,
                format!("`{what}` expects a number, got a {}", value.type_name()),
            )
        })
    }

    /// Look up a `:name` reference.
    pub(crate) fn lookup_var(&self, name: &str) -> LogoResult<Value> {
        match self.env.lookup(name) {
            Binding::Value(value) => Ok(value.clone()),
            Binding::Unset => Err(LogoError::new(
                ErrorKind::Name,
                format!("`:{name}` has no value"),
            )),
            Binding::Missing => Err(LogoError::new(
                ErrorKind::Name,
                format!("`:{name}` is undefined"),
            )),
        }
    }

    /// Build a list literal. Words are text atoms; parameter references
    /// are the one construct resolved at construction time.
    fn eval_list_literal(&mut self, items: &[ListItem]) -> LogoResult<Value> {
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(match item {
                ListItem::Number(n) => Value::Number(*n),
                ListItem::Word(w) => Value::text(w),
                ListItem::Param(p) => self.lookup_var(p)?,
                ListItem::List(inner) => self.eval_list_literal(inner)?,
            });
        }
        Ok(Value::list(values))
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> LogoResult<Value> {
        match op {
            UnaryOp::Neg => {
                let n = self.eval_number(operand, "-")?;
                Ok(Value::Number(-n))
            }
            UnaryOp::Not => {
                let value = self.eval_expr(operand)?;
                Ok(Value::truth(!value.truthy()))
            }
        }
    }

    fn eval_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> LogoResult<Value> {
        let lhs = self.eval_expr(lhs)?;
        let rhs = self.eval_expr(rhs)?;

        match op {
            // Equality is deep and works on every value shape.
            BinOp::Eq => Ok(Value::truth(lhs == rhs)),
            BinOp::Ne => Ok(Value::truth(lhs != rhs)),

            // Logic operates on truthiness; both operands evaluate.
            BinOp::And => Ok(Value::truth(lhs.truthy() && rhs.truthy())),
            BinOp::Or => Ok(Value::truth(lhs.truthy() || rhs.truthy())),

            // Everything else requires numbers.
            _ => {
                let x = expect_number(&lhs, op)?;
                let y = expect_number(&rhs, op)?;
                match op {
                    BinOp::Add => Ok(Value::Number(x + y)),
                    BinOp::Sub => Ok(Value::Number(x - y)),
                    BinOp::Mul => Ok(Value::Number(x * y)),
                    BinOp::Div => {
                        if y == 0.0 {
                            return Err(LogoError::new(
                                ErrorKind::Arithmetic,
                                "division by zero",
                            ));
                        }
                        Ok(Value::Number(x / y))
                    }
                    // `%` keeps the sign of the dividend.
                    BinOp::Rem => {
                        if y == 0.0 {
                            return Err(LogoError::new(
                                ErrorKind::Arithmetic,
                                "division by zero in `%`",
                            ));
                        }
                        Ok(Value::Number(x % y))
                    }
                    BinOp::Lt => Ok(Value::truth(x < y)),
                    BinOp::Gt => Ok(Value::truth(x > y)),
                    BinOp::Le => Ok(Value::truth(x <= y)),
                    BinOp::Ge => Ok(Value::truth(x >= y)),
                    BinOp::Eq | BinOp::Ne | BinOp::And | BinOp::Or => unreachable!(),
                }
            }
        }
    }
}

fn expect_number(value: &Value, op: BinOp) -> LogoResult<f64> {
    value.as_number().ok_or_else(|| {
        LogoError::new(
            ErrorKind::Type,
            format!(
                "`{}` expects numbers, got a {}",
                op.symbol(),
                value.type_name()
            ),
        )
    })
}
