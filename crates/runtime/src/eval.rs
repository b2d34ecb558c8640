//! The tree-walking evaluator: `eval`/`apply`/`evlis`, and the closure and
//! macro invocation protocols built on top of environments and the arena.
//!
//! Special forms (`if`, `lambda`, `let`, ...) are not special-cased in
//! `eval` at all — they are primitives like any other, bound in the global
//! environment to a `PRIM` value whose body happens to receive its
//! arguments unevaluated. `eval` only ever does two things: look a symbol
//! up, or apply an operator to an argument list.

use crate::arena::Arena;
use crate::env::{assoc, pair};
use crate::error::{ErrorCode, EvalResult, Signal};
use crate::primitives::{self, PrimFn};
use crate::reader::{InputSource, PendingSource, ReadError, Reader};
use lisp_core::{Repr, Tag, Value};
use std::io::Write;

/// Owns the arena, the global environment, and the two external
/// collaborators (a character source and a write sink) that the core is
/// otherwise deliberately ignorant of.
pub struct Interpreter {
    pub arena: Arena,
    pub global_env: Value,
    /// `t`, bound to itself in the global environment at bootstrap — the
    /// canonical non-nil truth value primitives like `<` and `eq?` return.
    pub t: Value,
    /// 0 = off, 1 = log after every step, 2 = also wait for a keypress.
    pub trace: u8,
    /// Incremented on `catch` entry, decremented on every exit path;
    /// exists so the handler-snapshot invariant has something to assert.
    pub handler_depth: u32,
    prims: Vec<(&'static str, PrimFn)>,
    pub(crate) input: Box<dyn InputSource>,
    pub(crate) output: Box<dyn Write>,
    /// A byte peeked by one `read` primitive call but not consumed,
    /// carried over to the next call (each call builds a fresh `Reader`).
    pub(crate) pending_byte: Option<u8>,
}

impl Interpreter {
    pub fn new(mut arena: Arena, input: Box<dyn InputSource>, output: Box<dyn Write>) -> Self {
        let prims = primitives::table();
        let mut global_env = Value::nil();
        for (index, (name, _)) in prims.iter().enumerate() {
            let sym = arena.atom(name).expect("bootstrap atoms fit in a fresh arena");
            global_env = pair(&mut arena, sym, Value::prim(index), global_env)
                .expect("bootstrap bindings fit in a fresh arena");
        }
        let t = arena.atom("t").expect("bootstrap atoms fit in a fresh arena");
        global_env = pair(&mut arena, t, t, global_env).expect("bootstrap bindings fit in a fresh arena");

        Interpreter {
            arena,
            global_env,
            t,
            trace: 0,
            handler_depth: 0,
            prims,
            input,
            output,
            pending_byte: None,
        }
    }

    pub fn prim_names(&self) -> Vec<&'static str> {
        self.prims.iter().map(|(name, _)| *name).collect()
    }

    pub fn input(&mut self) -> &mut dyn InputSource {
        &mut *self.input
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    pub fn truthy_value(&self, cond: bool) -> Value {
        if cond { self.t } else { Value::nil() }
    }

    /// Read one top-level expression from the interpreter's character
    /// source, threading any carried-over lookahead byte through a fresh
    /// `Reader`. Shared by the `read` primitive and the REPL driver.
    pub fn read_top_level(&mut self) -> Result<Option<Value>, ReadError> {
        let mut pending = self.pending_byte.take();
        let result = {
            let mut source = PendingSource::new(&mut pending, self.input.as_mut());
            let mut reader = Reader::new(&mut source);
            let result = reader.read_expr(&mut self.arena);
            pending = reader.take_lookahead().or(pending);
            result
        };
        self.pending_byte = pending;
        result
    }

    /// `step`: one dispatch decision. Atoms look themselves up; pairs apply
    /// their head to their tail; everything else is self-evaluating.
    pub fn eval(&mut self, expr: Value, env: Value) -> EvalResult {
        if self.trace > 0 {
            self.log_trace_step(expr, env)?;
        }
        match expr.decode() {
            Repr::Atom(_) => assoc(&self.arena, expr, env),
            Repr::Cons(_) => {
                let f = self.eval(self.arena.car(expr)?, env)?;
                let args = self.arena.cdr(expr)?;
                self.apply(f, args, env)
            }
            _ => Ok(expr),
        }
    }

    fn log_trace_step(&mut self, expr: Value, _env: Value) -> Result<(), Signal> {
        let names = self.prim_names();
        let mut buf = Vec::new();
        crate::printer::print_value(&self.arena, &names, expr, &mut buf).ok();
        tracing::trace!(step = %String::from_utf8_lossy(&buf), "eval step");
        if self.trace >= 2 {
            self.input.next_byte();
        }
        Ok(())
    }

    pub fn apply(&mut self, f: Value, args: Value, env: Value) -> EvalResult {
        match f.decode() {
            Repr::Prim(i) => {
                let (_, body) = self.prims[i];
                body(self, args, env)
            }
            Repr::Clos(_) => self.apply_closure(f, args, env),
            Repr::Macr(_) => self.apply_macro(f, args, env),
            _ => Err(Signal::Error(ErrorCode::InvFunType)),
        }
    }

    /// `((params . body) . captured_env)`; `NIL` captured env means "use
    /// the global environment that is current at call time".
    fn apply_closure(&mut self, clos: Value, args: Value, caller_env: Value) -> EvalResult {
        let inner = self.arena.car(clos)?;
        let captured_env = self.arena.cdr(clos)?;
        let params = self.arena.car(inner)?;
        let body = self.arena.cdr(inner)?;

        let call_env = if captured_env.is_nil() { self.global_env } else { captured_env };
        let evaluated_args = self.evlis(args, caller_env)?;
        let call_env = crate::env::bind(&mut self.arena, params, evaluated_args, call_env)?;
        self.eval(body, call_env)
    }

    /// `(params . body)`; unevaluated args bound in the global env, body
    /// evaluated there to get an expansion, expansion evaluated in the
    /// caller's env.
    fn apply_macro(&mut self, macr: Value, args: Value, caller_env: Value) -> EvalResult {
        let params = self.arena.car(macr)?;
        let body = self.arena.cdr(macr)?;
        let expand_env = crate::env::bind(&mut self.arena, params, args, self.global_env)?;
        let expansion = self.eval(body, expand_env)?;
        self.eval(expansion, caller_env)
    }

    /// Evaluate each element of a (possibly improper) list left-to-right.
    /// An atom tail is looked up and spliced as the final cdr, matching
    /// the rest-arg reading used by `bind`.
    pub fn evlis(&mut self, list: Value, env: Value) -> EvalResult {
        match list.tag() {
            Tag::Nil => Ok(Value::nil()),
            Tag::Cons => {
                let head = self.eval(self.arena.car(list)?, env)?;
                let rest = self.evlis(self.arena.cdr(list)?, env)?;
                Ok(self.arena.cons(head, rest)?)
            }
            _ => self.eval(list, env),
        }
    }
}
