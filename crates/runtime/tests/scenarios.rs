//! Black-box scenarios driving the public `Interpreter` API the way the
//! REPL driver does, rather than poking at arena internals.

use lisp_runtime::{Arena, DEFAULT_NCELLS, EmptySource, Interpreter, Reader, SliceSource};

/// Evaluates every top-level form in `src` in order and returns the
/// printed representation of the last one.
fn eval_last(src: &str) -> String {
    let arena = Arena::new(DEFAULT_NCELLS);
    let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
    let mut source = SliceSource::new(src);
    let mut reader = Reader::new(&mut source);
    let mut last = String::new();
    while let Some(expr) = reader.read_expr(&mut interp.arena).unwrap() {
        let v = interp.eval(expr, interp.global_env).unwrap();
        last = print(&interp, v);
    }
    last
}

fn print(interp: &Interpreter, v: lisp_runtime::Value) -> String {
    let names = interp.prim_names();
    let mut out = Vec::new();
    lisp_runtime::printer::print_value(&interp.arena, &names, v, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn scenario_1_addition_folds_over_all_arguments() {
    assert_eq!(eval_last("(+ 1 2 3)"), "6");
}

#[test]
fn scenario_2_forward_referenced_factorial() {
    let src = "(define fact (lambda (n) (if (< n 2) 1 (* n (fact (- n 1)))))) (fact 5)";
    assert_eq!(eval_last(src), "120");
}

#[test]
fn scenario_3_let_star_dependent_bindings() {
    assert_eq!(eval_last("(let* ((x 3) (y (+ x 4))) y)"), "7");
}

#[test]
fn scenario_4_catch_of_throw_yields_err_pair() {
    assert_eq!(eval_last("(catch (throw 42))"), "(ERR . 42)");
}

#[test]
fn scenario_5_set_car_and_set_cdr_mutate_in_place() {
    let src = "(define p (cons 1 2)) (set-car! p 9) (set-cdr! p 8) p";
    assert_eq!(eval_last(src), "(9 . 8)");
}

#[test]
fn scenario_6_rest_arg_lambda_captures_the_whole_arg_list() {
    assert_eq!(eval_last("((lambda args args) 1 2 3)"), "(1 2 3)");
}

#[test]
fn law_car_cons_and_cdr_cons_are_identity_projections() {
    assert_eq!(eval_last("(car (cons 1 2))"), "1");
    assert_eq!(eval_last("(cdr (cons 1 2))"), "2");
}

#[test]
fn law_eval_of_quote_returns_the_literal_unevaluated() {
    assert_eq!(eval_last("(eval (quote 5))"), "5");
}

#[test]
fn law_double_negation_round_trips_truthiness() {
    assert_eq!(eval_last("(not (not 5))"), "t");
    assert_eq!(eval_last("(not (not ()))"), "()");
}

#[test]
fn law_let_star_with_independent_bindings_matches_let() {
    assert_eq!(eval_last("(let* ((x 3) (y 4)) (+ x y))"), eval_last("(let ((x 3) (y 4)) (+ x y))"));
}

#[test]
fn law_printing_then_reading_a_proper_list_round_trips() {
    let arena = Arena::new(DEFAULT_NCELLS);
    let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
    let mut source = SliceSource::new("(1 2 (3 . 4) five)");
    let mut reader = Reader::new(&mut source);
    let original = reader.read_expr(&mut interp.arena).unwrap().unwrap();
    let printed = print(&interp, original);

    let mut round_trip_source = SliceSource::new(&printed);
    let mut round_trip_reader = Reader::new(&mut round_trip_source);
    let read_back = round_trip_reader.read_expr(&mut interp.arena).unwrap().unwrap();
    assert_eq!(print(&interp, read_back), printed);
}

#[test]
fn invariant_atom_interning_is_identity_preserving_across_many_calls() {
    assert_eq!(eval_last("(eq? (quote abc) (quote abc))"), "t");
}

#[test]
fn invariant_reclamation_preserves_globally_reachable_bindings() {
    let arena = Arena::new(DEFAULT_NCELLS);
    let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
    let mut source = SliceSource::new("(define x 41) (define y (+ x 1))");
    let mut reader = Reader::new(&mut source);
    while let Some(expr) = reader.read_expr(&mut interp.arena).unwrap() {
        interp.eval(expr, interp.global_env).unwrap();
    }

    lisp_runtime::reclaim::reclaim(&mut interp.arena, interp.global_env);

    let mut check_source = SliceSource::new("y");
    let mut check_reader = Reader::new(&mut check_source);
    let expr = check_reader.read_expr(&mut interp.arena).unwrap().unwrap();
    let v = interp.eval(expr, interp.global_env).unwrap();
    assert_eq!(print(&interp, v), "42");
}

#[test]
fn invariant_catch_restores_handler_depth_on_both_success_and_throw() {
    let arena = Arena::new(DEFAULT_NCELLS);
    let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
    let before = interp.handler_depth;

    let mut source = SliceSource::new("(catch (throw 1)) (catch 99)");
    let mut reader = Reader::new(&mut source);
    while let Some(expr) = reader.read_expr(&mut interp.arena).unwrap() {
        interp.eval(expr, interp.global_env).unwrap();
        assert_eq!(interp.handler_depth, before);
    }
}

#[test]
fn undefined_symbol_surfaces_as_an_uncaught_error_rather_than_a_panic() {
    let arena = Arena::new(DEFAULT_NCELLS);
    let mut interp = Interpreter::new(arena, Box::new(EmptySource), Box::new(Vec::new()));
    let mut source = SliceSource::new("never-bound-anywhere");
    let mut reader = Reader::new(&mut source);
    let expr = reader.read_expr(&mut interp.arena).unwrap().unwrap();
    let err = interp.eval(expr, interp.global_env).unwrap_err();
    assert_eq!(err.code(), 2);
}
