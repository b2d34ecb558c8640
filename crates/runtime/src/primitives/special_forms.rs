//! Binding forms, quotation, and the two value-constructing forms that
//! build closures and macros. None of these are "special" to `apply` —
//! they are primitives like any other, just ones that choose not to
//! evaluate (some of) their arguments.

use super::arg1;
use crate::env::{find_entry, pair};
use crate::error::EvalResult;
use crate::eval::Interpreter;
use lisp_core::{Tag, Value};

pub fn eval(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let once = interp.eval(arg1(&interp.arena, args)?, env)?;
    interp.eval(once, env)
}

pub fn quote(interp: &mut Interpreter, args: Value, _env: Value) -> EvalResult {
    arg1(&interp.arena, args)
}

/// `(params body)`: captures `env` unless `env` is the global environment,
/// in which case `NIL` is stored, meaning "whatever the global env is at
/// call time" — the sentinel that lets forward/mutual recursion work.
pub fn lambda(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let params = arg1(&interp.arena, args)?;
    let body = interp.arena.car(interp.arena.cdr(args)?)?;
    let captured = if env.identical(interp.global_env) { Value::nil() } else { env };
    let inner = interp.arena.cons(params, body)?;
    let cell = interp.arena.alloc_pair(inner, captured)?;
    Ok(Value::clos(cell))
}

/// `(params body)`: unlike closures, macros never capture lexical scope.
pub fn macro_(interp: &mut Interpreter, args: Value, _env: Value) -> EvalResult {
    let params = arg1(&interp.arena, args)?;
    let body = interp.arena.car(interp.arena.cdr(args)?)?;
    let cell = interp.arena.alloc_pair(params, body)?;
    Ok(Value::macr(cell))
}

/// `(name expr)`: binds `name` (unevaluated) to `expr`'s value at the
/// front of the global environment.
pub fn define(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let name = arg1(&interp.arena, args)?;
    let value = interp.eval(interp.arena.car(interp.arena.cdr(args)?)?, env)?;
    interp.global_env = pair(&mut interp.arena, name, value, interp.global_env)?;
    Ok(name)
}

/// `(name expr)`: walks `env` for `name`'s existing binding and overwrites
/// its value cell in place.
pub fn setq(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let name = arg1(&interp.arena, args)?;
    let value = interp.eval(interp.arena.car(interp.arena.cdr(args)?)?, env)?;
    let entry = find_entry(&interp.arena, name, env)?;
    interp.arena.set_cdr(entry, value)?;
    Ok(value)
}

pub fn assoc_prim(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let sym = interp.eval(arg1(&interp.arena, args)?, env)?;
    let target_env = interp.eval(interp.arena.car(interp.arena.cdr(args)?)?, env)?;
    crate::env::assoc(&interp.arena, sym, target_env)
}

pub fn env_prim(_interp: &mut Interpreter, _args: Value, env: Value) -> EvalResult {
    Ok(env)
}

/// Every `let` family form is `(bindings body)`: `bindings` is a list of
/// `(name expr)` pairs, `body` the single trailing expression.
fn bindings_and_body(arena: &crate::arena::Arena, args: Value) -> Result<(Value, Value), crate::error::Signal> {
    let bindings = arena.car(args)?;
    let body = arena.car(arena.cdr(args)?)?;
    Ok((bindings, body))
}

/// Bindings see the outer environment only; all right-hand sides are
/// evaluated before any of them is bound, then the environment is
/// extended with every binding at once.
pub fn let_(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let (bindings, body) = bindings_and_body(&interp.arena, args)?;
    let mut pending = Vec::new();
    let mut cursor = bindings;
    while cursor.tag() == Tag::Cons {
        let binding = interp.arena.car(cursor)?;
        let name = interp.arena.car(binding)?;
        let rhs = interp.arena.car(interp.arena.cdr(binding)?)?;
        pending.push((name, interp.eval(rhs, env)?));
        cursor = interp.arena.cdr(cursor)?;
    }
    let mut new_env = env;
    for (name, value) in pending {
        new_env = pair(&mut interp.arena, name, value, new_env)?;
    }
    interp.eval(body, new_env)
}

/// Each binding's right-hand side sees every binding before it.
pub fn let_star(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let (bindings, body) = bindings_and_body(&interp.arena, args)?;
    let mut new_env = env;
    let mut cursor = bindings;
    while cursor.tag() == Tag::Cons {
        let binding = interp.arena.car(cursor)?;
        let name = interp.arena.car(binding)?;
        let rhs = interp.arena.car(interp.arena.cdr(binding)?)?;
        let value = interp.eval(rhs, new_env)?;
        new_env = pair(&mut interp.arena, name, value, new_env)?;
        cursor = interp.arena.cdr(cursor)?;
    }
    interp.eval(body, new_env)
}

/// Every name is pre-bound to `NIL` so bindings can refer to each other
/// (and themselves), then each binding cell is mutated in place with its
/// evaluated right-hand side, in order.
pub fn letrec_star(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let (bindings, body) = bindings_and_body(&interp.arena, args)?;
    let mut new_env = env;
    let mut entries = Vec::new();
    let mut cursor = bindings;
    while cursor.tag() == Tag::Cons {
        let binding = interp.arena.car(cursor)?;
        let name = interp.arena.car(binding)?;
        new_env = pair(&mut interp.arena, name, Value::nil(), new_env)?;
        entries.push((interp.arena.car(new_env)?, binding));
        cursor = interp.arena.cdr(cursor)?;
    }
    for (entry, binding) in entries {
        let rhs = interp.arena.car(interp.arena.cdr(binding)?)?;
        let value = interp.eval(rhs, new_env)?;
        interp.arena.set_cdr(entry, value)?;
    }
    interp.eval(body, new_env)
}
