//! Variable environments and the procedure table.
//!
//! The environment is a stack of frames. A frame is pushed by a procedure
//! invocation or a `for` loop and popped when it finishes — on every exit
//! path, including errors. Procedure frames are *boundary* frames: name
//! lookup from inside one skips straight from it to the global frame, so
//! procedures never see their caller's locals (lexical scoping with a
//! global top).
//!
//! Binding rules:
//! - `make` assigns into the nearest frame on the lookup chain that
//!   already binds the name, and only creates a binding in the current
//!   frame when the name is undefined everywhere.
//! - `local` always creates an unset binding in the current frame,
//!   shadowing any outer binding.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Procedures
// ---------------------------------------------------------------------------

/// A user-defined procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    /// Lowercased name.
    pub name: String,
    /// Ordered parameter names.
    pub params: Vec<String>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

/// The process-wide procedure table, keyed by lowercase name.
///
/// Procedures live for the interpreter's lifetime; redefinition replaces
/// the previous body (last `to` wins).
#[derive(Debug, Default)]
pub struct ProcTable {
    procs: HashMap<String, Rc<Procedure>>,
}

impl ProcTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a procedure.
    pub fn define(&mut self, proc: Procedure) {
        self.procs.insert(proc.name.clone(), Rc::new(proc));
    }

    /// Look up a procedure by lowercase name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Procedure>> {
        self.procs.get(name).cloned()
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Result of a variable lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding<'a> {
    /// The name is bound to a value.
    Value(&'a Value),
    /// The name was declared with `local` but never assigned.
    Unset,
    /// The name is not bound anywhere on the lookup chain.
    Missing,
}

/// One layer of the environment chain.
#[derive(Debug)]
struct Frame {
    vars: HashMap<String, Option<Value>>,
    /// Boundary frames (procedure invocations) chain to the global frame
    /// instead of the frame below them.
    boundary: bool,
}

/// The environment chain.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// A fresh environment containing only the global frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                vars: HashMap::new(),
                boundary: false,
            }],
        }
    }

    /// Push a block-scope frame (`for` loops) chaining to the current one.
    pub fn push_frame(&mut self) {
        self.frames.push(Frame {
            vars: HashMap::new(),
            boundary: false,
        });
    }

    /// Push a procedure frame chaining directly to the global frame.
    pub fn push_boundary_frame(&mut self) {
        self.frames.push(Frame {
            vars: HashMap::new(),
            boundary: true,
        });
    }

    /// Pop the innermost frame. The global frame is never popped.
    pub fn pop_frame(&mut self) {
        debug_assert!(self.frames.len() > 1, "attempted to pop the global frame");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of frames, global included. Used to assert the push/pop
    /// discipline in tests.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frame indices on the lookup chain, innermost first.
    fn chain(&self) -> Chain {
        Chain {
            next: Some(self.frames.len() - 1),
            frames: &self.frames,
        }
    }

    /// Look up a name, innermost frame first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Binding<'_> {
        for i in self.chain() {
            match self.frames[i].vars.get(name) {
                Some(Some(value)) => return Binding::Value(value),
                Some(None) => return Binding::Unset,
                None => {}
            }
        }
        Binding::Missing
    }

    /// `make` semantics: assign into the nearest enclosing frame that
    /// already binds the name, creating a binding in the current frame
    /// only if the name is undefined on the whole chain.
    pub fn assign(&mut self, name: &str, value: Value) {
        let target = self
            .chain()
            .find(|&i| self.frames[i].vars.contains_key(name))
            .unwrap_or(self.frames.len() - 1);
        self.frames[target].vars.insert(name.to_owned(), Some(value));
    }

    /// `local` semantics: an unset binding in the current frame.
    pub fn declare_local(&mut self, name: &str) {
        let top = self.frames.len() - 1;
        self.frames[top].vars.insert(name.to_owned(), None);
    }

    /// Bind a name in the current frame unconditionally (procedure
    /// parameters, `for` loop variables).
    pub fn bind(&mut self, name: &str, value: Value) {
        let top = self.frames.len() - 1;
        self.frames[top].vars.insert(name.to_owned(), Some(value));
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the frame indices visible from the innermost frame.
struct Chain<'a> {
    next: Option<usize>,
    frames: &'a [Frame],
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let i = self.next?;
        self.next = if i == 0 {
            None
        } else if self.frames[i].boundary {
            Some(0)
        } else {
            Some(i - 1)
        };
        Some(i)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
