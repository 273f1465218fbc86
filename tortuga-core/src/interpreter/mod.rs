//! The `Logo` evaluator.
//!
//! Walks the AST against an environment chain and a shared turtle,
//! strictly sequentially. The submodules split the work the same way the
//! statements/expressions split in the grammar:
//!
//! - `statement`: statement dispatch, control flow, procedure invocation
//! - `expr`: expression evaluation and operators
//! - `builtins`: math/sequence/word built-in functions and reporters
//!
//! # Non-local return
//!
//! `stop` and `output` are not errors; they travel as a [`Flow`] signal
//! that unwinds loops and blocks inside the current procedure and is
//! caught exactly at the procedure boundary. A signal that reaches the
//! top level is a `Control` error.

mod builtins;
mod expr;
mod statement;
#[cfg(test)]
mod tests;

use tortuga_graphics::turtle::Turtle;
use tracing::debug;

use crate::env::{Environment, ProcTable};
use crate::error::{ErrorKind, LogoError, LogoResult};
use crate::parser::parse_program;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

/// Result of executing a statement or block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// `stop`: leave the current procedure with no value.
    Stop,
    /// `output`: leave the current procedure with a value.
    Output(Value),
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// The `Logo` interpreter.
pub struct Interpreter {
    /// Variable environment chain.
    pub(crate) env: Environment,
    /// User procedure table.
    pub(crate) procs: ProcTable,
    /// The shared turtle.
    pub(crate) turtle: Turtle,
    /// Ordered record of textual emissions (no line terminators).
    output: Vec<String>,
    /// Mirror emissions to stdout with the exact terminator rules
    /// (`print`/`show` end the line, `type` does not). Off by default so
    /// embedding programs and tests stay quiet.
    pub echo: bool,
    /// Seed for `random`. Public so embedders can fix it for
    /// reproducible drawings.
    pub random_seed: u64,
}

impl Interpreter {
    /// A fresh interpreter with an empty environment and a home turtle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            procs: ProcTable::new(),
            turtle: Turtle::new(),
            output: Vec::new(),
            echo: false,
            random_seed: 0,
        }
    }

    /// Parse and execute a program for its effects.
    ///
    /// On error the turtle state and output buffer accumulated so far
    /// remain accessible.
    pub fn run(&mut self, source: &str) -> LogoResult<()> {
        let program = parse_program(source)?;
        debug!(statements = program.len(), "running program");

        for stmt in &program {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                Flow::Stop => {
                    return Err(LogoError::new(
                        ErrorKind::Control,
                        "`stop` used outside a procedure",
                    ));
                }
                Flow::Output(_) => {
                    return Err(LogoError::new(
                        ErrorKind::Control,
                        "`output` used outside a procedure",
                    ));
                }
            }
        }

        debug!(
            segments = self.turtle.lines.len(),
            emissions = self.output.len(),
            "program finished"
        );
        Ok(())
    }

    /// The final turtle state and recorded segments, read-only.
    #[must_use]
    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    /// The ordered output buffer, one entry per `print`/`type`/`show`.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Record one textual emission, mirroring to stdout when echoing.
    pub(crate) fn emit(&mut self, text: String, terminate_line: bool) {
        if self.echo {
            if terminate_line {
                println!("{text}");
            } else {
                use std::io::Write;
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
        }
        self.output.push(text);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
