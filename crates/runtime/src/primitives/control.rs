//! Boolean logic, conditionals, and non-local control transfer.

use super::{arg1, arg2};
use crate::error::{EvalResult, Signal};
use crate::eval::Interpreter;
use lisp_core::{Tag, Value};

pub fn eq(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let a = interp.eval(arg1(&interp.arena, args)?, env)?;
    let b = interp.eval(arg2(&interp.arena, args)?, env)?;
    Ok(interp.truthy_value(a.identical(b)))
}

pub fn not(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let v = interp.eval(arg1(&interp.arena, args)?, env)?;
    Ok(interp.truthy_value(v.is_nil()))
}

/// First argument that evaluates non-nil, else `NIL`. Lazy: later
/// arguments are never evaluated once one is truthy.
pub fn or(interp: &mut Interpreter, mut args: Value, env: Value) -> EvalResult {
    while args.tag() == Tag::Cons {
        let v = interp.eval(interp.arena.car(args)?, env)?;
        if v.is_truthy() {
            return Ok(v);
        }
        args = interp.arena.cdr(args)?;
    }
    Ok(Value::nil())
}

/// Last argument, if every one evaluates non-nil; `NIL` the moment one
/// doesn't.
pub fn and(interp: &mut Interpreter, mut args: Value, env: Value) -> EvalResult {
    let mut last = interp.t;
    while args.tag() == Tag::Cons {
        let v = interp.eval(interp.arena.car(args)?, env)?;
        if !v.is_truthy() {
            return Ok(Value::nil());
        }
        last = v;
        args = interp.arena.cdr(args)?;
    }
    Ok(last)
}

/// `((test body) (test body) ...)`; the first clause whose test is
/// non-nil has its body evaluated and returned.
pub fn cond(interp: &mut Interpreter, mut clauses: Value, env: Value) -> EvalResult {
    while clauses.tag() == Tag::Cons {
        let clause = interp.arena.car(clauses)?;
        let test = interp.arena.car(clause)?;
        if interp.eval(test, env)?.is_truthy() {
            let body = interp.arena.car(interp.arena.cdr(clause)?)?;
            return interp.eval(body, env);
        }
        clauses = interp.arena.cdr(clauses)?;
    }
    Ok(Value::nil())
}

/// `(test then [else])`.
pub fn if_(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let test = interp.eval(arg1(&interp.arena, args)?, env)?;
    let rest = interp.arena.cdr(args)?;
    let then = interp.arena.car(rest)?;
    if test.is_truthy() {
        return interp.eval(then, env);
    }
    let else_branch = interp.arena.cdr(rest)?;
    if else_branch.is_nil() {
        Ok(Value::nil())
    } else {
        interp.eval(interp.arena.car(else_branch)?, env)
    }
}

/// `(catch expr)`: evaluate `expr` under a fresh handler snapshot. An
/// internal error or a `throw` unwinds to here as `(ERR . n)`; the
/// handler-depth counter is restored on every exit path.
pub fn catch(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let expr = arg1(&interp.arena, args)?;
    interp.handler_depth += 1;
    let result = interp.eval(expr, env);
    interp.handler_depth -= 1;
    match result {
        Ok(v) => Ok(v),
        Err(signal) => {
            let err_atom = interp.arena.atom("ERR")?;
            Ok(interp.arena.cons(err_atom, Value::num(signal.code() as f64))?)
        }
    }
}

pub fn throw(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let code = interp.eval(arg1(&interp.arena, args)?, env)?;
    Err(Signal::Throw(super::num(code) as i64))
}

/// `(trace n)`: `0` off, `1` log each step, `2` also wait for a keypress.
/// The mode argument is a literal, never evaluated.
pub fn trace(interp: &mut Interpreter, args: Value, _env: Value) -> EvalResult {
    let mode = arg1(&interp.arena, args)?;
    let previous = interp.trace;
    interp.trace = super::num(mode) as u8;
    Ok(Value::num(previous as f64))
}
