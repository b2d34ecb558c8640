//! Pair construction, projection, and in-place mutation.

use super::{arg1, arg2};
use crate::error::EvalResult;
use crate::eval::Interpreter;
use lisp_core::Value;

pub fn cons(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let a = interp.eval(arg1(&interp.arena, args)?, env)?;
    let b = interp.eval(arg2(&interp.arena, args)?, env)?;
    Ok(interp.arena.cons(a, b)?)
}

pub fn car(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let p = interp.eval(arg1(&interp.arena, args)?, env)?;
    Ok(interp.arena.car(p)?)
}

pub fn cdr(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let p = interp.eval(arg1(&interp.arena, args)?, env)?;
    Ok(interp.arena.cdr(p)?)
}

pub fn set_car(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let p = interp.eval(arg1(&interp.arena, args)?, env)?;
    let v = interp.eval(arg2(&interp.arena, args)?, env)?;
    interp.arena.set_car(p, v)?;
    Ok(p)
}

pub fn set_cdr(interp: &mut Interpreter, args: Value, env: Value) -> EvalResult {
    let p = interp.eval(arg1(&interp.arena, args)?, env)?;
    let v = interp.eval(arg2(&interp.arena, args)?, env)?;
    interp.arena.set_cdr(p, v)?;
    Ok(p)
}

#[cfg(test)]
mod tests {
    use crate::arena::{Arena, DEFAULT_NCELLS};
    use crate::eval::Interpreter;
    use crate::reader::{EmptySource, Reader, SliceSource};

    fn eval_str(src: &str) -> String {
        let arena = Arena::new(DEFAULT_NCELLS);
        let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
        let mut source = SliceSource::new(src);
        let mut reader = Reader::new(&mut source);
        let mut last = String::new();
        while let Some(expr) = reader.read_expr(&mut interp.arena).unwrap() {
            let v = interp.eval(expr, interp.global_env).unwrap();
            let names = interp.prim_names();
            let mut out = Vec::new();
            crate::printer::print_value(&interp.arena, &names, v, &mut out).unwrap();
            last = String::from_utf8(out).unwrap();
        }
        last
    }

    #[test]
    fn cons_car_cdr_round_trip() {
        assert_eq!(eval_str("(car (cons 1 2))"), "1");
        assert_eq!(eval_str("(cdr (cons 1 2))"), "2");
    }

    #[test]
    fn set_car_and_set_cdr_mutate_in_place() {
        assert_eq!(
            eval_str("(define p (cons 1 2)) (set-car! p 9) (set-cdr! p 8) p"),
            "(9 . 8)"
        );
    }
}
