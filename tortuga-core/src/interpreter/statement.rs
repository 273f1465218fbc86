//! Statement execution.
//!
//! Implements the statement dispatcher and the control-flow machinery:
//! loops propagate a [`Flow`] signal outward, while procedure invocation
//! is the one place that absorbs it. Every frame pushed here is popped on
//! every exit path, errors included (the pop happens before `?`).

use tracing::trace;

use crate::ast::{Expr, MoveKind, Stmt};
use crate::env::Procedure;
use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::value::Value;

use super::{Flow, Interpreter};

impl Interpreter {
    /// Execute a block, stopping at the first non-normal flow.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> LogoResult<Flow> {
        for stmt in stmts {
            let flow = self.exec_stmt(stmt)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute one statement.
    #[expect(clippy::too_many_lines, reason = "flat dispatch over every statement kind")]
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> LogoResult<Flow> {
        match stmt {
            Stmt::Move(kind, amount) => {
                let name = match kind {
                    MoveKind::Forward => "forward",
                    MoveKind::Back => "back",
                    MoveKind::Right => "right",
                    MoveKind::Left => "left",
                };
                let amount = self.eval_number(amount, name)?;
                match kind {
                    MoveKind::Forward => self.turtle.forward(amount),
                    MoveKind::Back => self.turtle.back(amount),
                    MoveKind::Right => self.turtle.right(amount),
                    MoveKind::Left => self.turtle.left(amount),
                }
                Ok(Flow::Normal)
            }
            Stmt::PenUp => {
                self.turtle.pen_down = false;
                Ok(Flow::Normal)
            }
            Stmt::PenDown => {
                self.turtle.pen_down = true;
                Ok(Flow::Normal)
            }
            Stmt::PenColor(color) => {
                let color = match self.eval_expr(color)? {
                    Value::Text(s) => s.to_string(),
                    Value::Number(n) => format!("{n}"),
                    Value::List(_) => {
                        return Err(LogoError::new(
                            ErrorKind::Type,
                            "`pencolor` expects a color word, got a list",
                        ));
                    }
                };
                self.turtle.pen_color = color;
                Ok(Flow::Normal)
            }
            Stmt::PenSize(size) => {
                self.turtle.pen_size = self.eval_number(size, "pensize")?;
                Ok(Flow::Normal)
            }
            Stmt::Home => {
                self.turtle.home();
                Ok(Flow::Normal)
            }
            Stmt::SetXY(x, y) => {
                let x = self.eval_number(x, "setxy")?;
                let y = self.eval_number(y, "setxy")?;
                self.turtle.move_to(x, y);
                Ok(Flow::Normal)
            }
            Stmt::SetX(x) => {
                let x = self.eval_number(x, "setx")?;
                let y = self.turtle.y;
                self.turtle.move_to(x, y);
                Ok(Flow::Normal)
            }
            Stmt::SetY(y) => {
                let y = self.eval_number(y, "sety")?;
                let x = self.turtle.x;
                self.turtle.move_to(x, y);
                Ok(Flow::Normal)
            }
            Stmt::SetHeading(deg) => {
                let deg = self.eval_number(deg, "setheading")?;
                self.turtle.set_heading(deg);
                Ok(Flow::Normal)
            }
            Stmt::Circle(radius) => {
                let radius = self.eval_number(radius, "circle")?;
                self.turtle.circle(radius);
                Ok(Flow::Normal)
            }
            Stmt::Arc(angle, radius) => {
                let angle = self.eval_number(angle, "arc")?;
                let radius = self.eval_number(radius, "arc")?;
                self.turtle.arc(angle, radius);
                Ok(Flow::Normal)
            }
            Stmt::ClearScreen => {
                self.turtle.clear_screen();
                Ok(Flow::Normal)
            }
            Stmt::HideTurtle => {
                self.turtle.visible = false;
                Ok(Flow::Normal)
            }
            Stmt::ShowTurtle => {
                self.turtle.visible = true;
                Ok(Flow::Normal)
            }
            Stmt::Repeat(count, body) => self.exec_repeat(count, body),
            Stmt::While(cond, body) => self.exec_while(cond, body),
            Stmt::For {
                var,
                start,
                end,
                step,
                body,
            } => self.exec_for(var, start, end, step.as_ref(), body),
            Stmt::If(cond, body) => {
                if self.eval_expr(cond)?.truthy() {
                    return self.exec_block(body);
                }
                Ok(Flow::Normal)
            }
            Stmt::IfElse(cond, then_block, else_block) => {
                if self.eval_expr(cond)?.truthy() {
                    self.exec_block(then_block)
                } else {
                    self.exec_block(else_block)
                }
            }
            Stmt::Define { name, params, body } => {
                trace!(name, params = params.len(), "defining procedure");
                self.procs.define(Procedure {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                });
                Ok(Flow::Normal)
            }
            Stmt::Stop => Ok(Flow::Stop),
            Stmt::Output(expr) => {
                let value = self.eval_expr(expr)?;
                Ok(Flow::Output(value))
            }
            Stmt::Make(name, expr) => {
                let value = self.eval_expr(expr)?;
                self.env.assign(name, value);
                Ok(Flow::Normal)
            }
            Stmt::Local(name) => {
                self.env.declare_local(name);
                Ok(Flow::Normal)
            }
            Stmt::Print(expr) => {
                let text = self.eval_expr(expr)?.display();
                self.emit(text, true);
                Ok(Flow::Normal)
            }
            Stmt::Type(expr) => {
                let text = self.eval_expr(expr)?.display();
                self.emit(text, false);
                Ok(Flow::Normal)
            }
            Stmt::Show(expr) => {
                let text = self.eval_expr(expr)?.show_form();
                self.emit(text, true);
                Ok(Flow::Normal)
            }
            Stmt::Call { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<LogoResult<Vec<_>>>()?;
                // A returned value in statement position is discarded.
                self.invoke(name, values)?;
                Ok(Flow::Normal)
            }
        }
    }

    // -- loops --

    /// `repeat n [body]`: the body runs `floor(n)` times (never for a
    /// negative count) in the current environment.
    fn exec_repeat(&mut self, count: &Expr, body: &[Stmt]) -> LogoResult<Flow> {
        let count = self.eval_number(count, "repeat")?;
        let times = to_iteration_count(count);
        for _ in 0..times {
            let flow = self.exec_block(body)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// `while [cond] [body]`: the condition re-evaluates before every
    /// iteration.
    fn exec_while(&mut self, cond: &Expr, body: &[Stmt]) -> LogoResult<Flow> {
        while self.eval_expr(cond)?.truthy() {
            let flow = self.exec_block(body)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// `for "v start end (step)? [body]`: a fresh frame binds the loop
    /// variable; both endpoints are inclusive and a step whose sign
    /// disagrees with `end - start` runs zero iterations.
    fn exec_for(
        &mut self,
        var: &str,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
    ) -> LogoResult<Flow> {
        let start = self.eval_number(start, "for")?;
        let end = self.eval_number(end, "for")?;
        let step = match step {
            Some(step) => self.eval_number(step, "for")?,
            None => 1.0,
        };
        if step == 0.0 {
            return Err(LogoError::new(
                ErrorKind::Arithmetic,
                "`for` step must not be zero",
            ));
        }

        self.env.push_frame();
        let result = self.run_for_body(var, start, end, step, body);
        self.env.pop_frame();
        result
    }

    fn run_for_body(
        &mut self,
        var: &str,
        start: f64,
        end: f64,
        step: f64,
        body: &[Stmt],
    ) -> LogoResult<Flow> {
        let mut current = start;
        while (step > 0.0 && current <= end) || (step < 0.0 && current >= end) {
            self.env.bind(var, Value::Number(current));
            let flow = self.exec_block(body)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
            current += step;
        }
        Ok(Flow::Normal)
    }

    // -- procedure invocation --

    /// Call a user procedure: resolve by name, check arity, run the body
    /// in a fresh frame whose parent is the global environment.
    ///
    /// Returns the `output` value, or `None` when the body ran to
    /// completion or ended with `stop`. The frame is popped on every exit
    /// path, errors included.
    pub(crate) fn invoke(&mut self, name: &str, args: Vec<Value>) -> LogoResult<Option<Value>> {
        let Some(proc) = self.procs.get(name) else {
            return Err(LogoError::new(
                ErrorKind::Name,
                format!("there is no procedure named `{name}`"),
            ));
        };
        if args.len() != proc.params.len() {
            return Err(LogoError::new(
                ErrorKind::Arity,
                format!(
                    "`{name}` expects {} input(s), got {}",
                    proc.params.len(),
                    args.len()
                ),
            ));
        }

        trace!(name, inputs = args.len(), "invoking procedure");
        self.env.push_boundary_frame();
        for (param, value) in proc.params.iter().zip(args) {
            self.env.bind(param, value);
        }
        let result = self.exec_block(&proc.body);
        self.env.pop_frame();

        match result? {
            Flow::Normal | Flow::Stop => Ok(None),
            Flow::Output(value) => Ok(Some(value)),
        }
    }
}

/// Clamp a repeat count to a non-negative whole number of iterations.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped non-negative and floored before the cast"
)]
fn to_iteration_count(n: f64) -> u64 {
    n.max(0.0).floor() as u64
}
