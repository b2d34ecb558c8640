//! Numeric primitives: the four left-folding operators, `int`, and `<`.

use super::num;
use crate::error::EvalResult;
use crate::eval::Interpreter;
use lisp_core::{Tag, Value};

/// Evaluate every element of `args` and fold `f` over them, seeded with the
/// first element, left to right.
fn fold(interp: &mut Interpreter, args: Value, env: Value, f: impl Fn(f64, f64) -> f64) -> EvalResult {
    let evaluated = interp.evlis(args, env)?;
    let mut acc = num(interp.arena.car(evaluated)?);
    let mut rest = interp.arena.cdr(evaluated)?;
    while rest.tag() == Tag::Cons {
        acc = f(acc, num(interp.arena.car(rest)?));
        rest = interp.arena.cdr(rest)?;
    }
    Ok(Value::num(acc))
}

pub fn add(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    fold(interp, args, env, |a, b| a + b)
}

pub fn mul(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    fold(interp, args, env, |a, b| a * b)
}

pub fn sub(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    fold(interp, args, env, |a, b| a - b)
}

pub fn div(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    fold(interp, args, env, |a, b| a / b)
}

pub fn int(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let v = interp.eval(super::arg1(&interp.arena, args)?, env)?;
    let n = num(v);
    Ok(Value::num(if n.abs() < 1e9 { n.trunc() } else { n }))
}

pub fn lt(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let a = interp.eval(super::arg1(&interp.arena, args)?, env)?;
    let b = interp.eval(super::arg2(&interp.arena, args)?, env)?;
    Ok(interp.truthy_value(num(a) - num(b) < 0.0))
}
