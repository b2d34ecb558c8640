//! Character-source and write-sink primitives. The only primitives that
//! touch the interpreter's external collaborators.

use crate::error::EvalResult;
use crate::eval::Interpreter;
use lisp_core::{Tag, Value};

/// Reads one expression from the interpreter's character source. `()` on
/// a source that has nothing left to give right now.
pub fn read(interp: &mut Interpreter, _args: Value, _env: Value) -> EvalResult {
    let result = interp.read_top_level();
    match result {
        Ok(Some(v)) => Ok(v),
        // EOF or a syntax error both mean "nothing usable right now" to
        // a primitive that, unlike the REPL driver, has no prompt to
        // re-issue or malformed-input diagnostic to print.
        Ok(None) => Ok(Value::nil()),
        Err(crate::reader::ReadError::Eval(signal)) => Err(signal),
        Err(_) => Ok(Value::nil()),
    }
}

pub fn print(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    write_args(interp, args, env, false)
}

pub fn println(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    write_args(interp, args, env, true)
}

fn write_args(interp: &mut Interpreter, mut args: Value, env: Value, newline: bool) -> EvalResult {
    let mut last = Value::nil();
    while args.tag() == Tag::Cons {
        let v = interp.eval(interp.arena.car(args)?, env)?;
        let names = interp.prim_names();
        crate::printer::print_value(&interp.arena, &names, v, interp.output.as_mut())
            .expect("writing to the output sink does not fail");
        last = v;
        args = interp.arena.cdr(args)?;
    }
    if newline {
        writeln!(interp.output.as_mut()).expect("writing to the output sink does not fail");
    }
    Ok(last)
}
