//! Environments: association lists of `(symbol . value)`, extended by
//! consing a new entry onto the front. Nothing here is specific to the
//! evaluator; `pair`/`assoc`/`bind` are the three primitive operations
//! every binding form (`let`, `lambda`, `define`, ...) is built from.

use crate::arena::Arena;
use crate::error::{ErrorCode, Signal};
use lisp_core::{Tag, Value};

/// Extend `env` with a new `(name . value)` entry at the front.
pub fn pair(arena: &mut Arena, name: Value, value: Value, env: Value) -> Result<Value, Signal> {
    let entry = arena.cons(name, value)?;
    Ok(arena.cons(entry, env)?)
}

/// Look up `sym` in `env`, walking front-to-back. Symbols compare `eq?`
/// (interning guarantees equal names share a value), so this is a raw bit
/// comparison, not a string compare.
pub fn assoc(arena: &Arena, sym: Value, mut env: Value) -> Result<Value, Signal> {
    while env.tag() == Tag::Cons {
        let entry = arena.car(env)?;
        if arena.car(entry)?.identical(sym) {
            return Ok(arena.cdr(entry)?);
        }
        env = arena.cdr(env)?;
    }
    Err(Signal::Error(ErrorCode::SymNotFound))
}

/// Find the `(name . value)` entry cell for `sym`, for `setq` to mutate in
/// place. Distinct from `assoc` because `setq` needs the cons cell itself,
/// not just its current value.
pub fn find_entry(arena: &Arena, sym: Value, mut env: Value) -> Result<Value, Signal> {
    while env.tag() == Tag::Cons {
        let entry = arena.car(env)?;
        if arena.car(entry)?.identical(sym) {
            return Ok(entry);
        }
        env = arena.cdr(env)?;
    }
    Err(Signal::Error(ErrorCode::SymNotFound))
}

/// Bind `params` against `args`, extending `env`:
/// - `NIL` params: no bindings.
/// - `(p . rest)` params: bind `p` to `car(args)`, recurse on the rest.
/// - an atom: bind it to the whole `args` list (rest-arg).
pub fn bind(arena: &mut Arena, params: Value, args: Value, env: Value) -> Result<Value, Signal> {
    match params.tag() {
        Tag::Nil => Ok(env),
        Tag::Cons => {
            let p = arena.car(params)?;
            let rest_params = arena.cdr(params)?;
            let a = arena.car(args)?;
            let rest_args = arena.cdr(args)?;
            let env = pair(arena, p, a, env)?;
            bind(arena, rest_params, rest_args, env)
        }
        _ => pair(arena, params, args, env),
    }
}
