//! The built-in function table.
//!
//! Every primitive has the same signature and decides for itself whether
//! to evaluate its arguments — `eval::apply` never special-cases a name.
//! Grouped by concern into one file per family, the way the evaluator
//! itself is split from the arena it runs on.

mod arithmetic;
mod control;
mod io;
mod pairs;
mod special_forms;

use crate::arena::Arena;
use crate::error::Signal;
use crate::eval::Interpreter;
use lisp_core::Value;

pub type PrimFn = fn(&mut Interpreter, Value, Value) -> crate::error::EvalResult;

/// The first argument cell of an args list (`args[0]`).
pub(crate) fn arg1(arena: &Arena, args: Value) -> Result<Value, Signal> {
    Ok(arena.car(args)?)
}

/// The second argument cell of an args list (`args[1]`).
pub(crate) fn arg2(arena: &Arena, args: Value) -> Result<Value, Signal> {
    Ok(arena.car(arena.cdr(args)?)?)
}

/// Dereference `v` to an `f64` as the original, type-unchecked reference
/// implementation does: a value that is not actually numeric reinterprets
/// its raw word, rather than signaling a type error the spec never names.
pub(crate) fn num(v: Value) -> f64 {
    v.as_num().unwrap_or_else(|| f64::from_bits(v.raw()))
}

/// `(name . PrimFn)` for every primitive, in table order; index into this
/// is what a `PRIM(i)` value's payload means.
pub fn table() -> Vec<(&'static str, PrimFn)> {
    vec![
        ("eval", special_forms::eval),
        ("quote", special_forms::quote),
        ("cons", pairs::cons),
        ("car", pairs::car),
        ("cdr", pairs::cdr),
        ("+", arithmetic::add),
        ("-", arithmetic::sub),
        ("*", arithmetic::mul),
        ("/", arithmetic::div),
        ("int", arithmetic::int),
        ("<", arithmetic::lt),
        ("eq?", control::eq),
        ("or", control::or),
        ("and", control::and),
        ("not", control::not),
        ("cond", control::cond),
        ("if", control::if_),
        ("let*", special_forms::let_star),
        ("let", special_forms::let_),
        ("letrec*", special_forms::letrec_star),
        ("lambda", special_forms::lambda),
        ("macro", special_forms::macro_),
        ("define", special_forms::define),
        ("assoc", special_forms::assoc_prim),
        ("env", special_forms::env_prim),
        ("setq", special_forms::setq),
        ("set-car!", pairs::set_car),
        ("set-cdr!", pairs::set_cdr),
        ("read", io::read),
        ("print", io::print),
        ("println", io::println),
        ("catch", control::catch),
        ("throw", control::throw),
        ("trace", control::trace),
    ]
}
