//! The S-expression printer.
//!
//! `print_value` never allocates a full string up front; it writes
//! directly to whatever sink the caller hands it (the REPL's stdout, a
//! `Vec<u8>` in tests, ...).

use crate::arena::Arena;
use lisp_core::{Repr, Value};
use std::io::{self, Write};

pub fn print_value(arena: &Arena, prim_names: &[&str], v: Value, out: &mut dyn Write) -> io::Result<()> {
    match v.decode() {
        Repr::Nil => write!(out, "()"),
        Repr::Atom(offset) => write!(out, "{}", arena.heap_str_at(offset)),
        Repr::Prim(i) => write!(out, "<{}>", prim_names.get(i).copied().unwrap_or("?")),
        Repr::Clos(i) => write!(out, "{{{i}}}"),
        Repr::Macr(i) => write!(out, "{{{i}}}"),
        Repr::Num(n) => write!(out, "{}", format_number(n)),
        Repr::Cons(_) => print_cons(arena, prim_names, v, out),
    }
}

fn print_cons(arena: &Arena, prim_names: &[&str], mut v: Value, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "(")?;
    let mut first = true;
    loop {
        match v.decode() {
            Repr::Nil => break,
            Repr::Cons(i) => {
                if !first {
                    write!(out, " ")?;
                }
                first = false;
                let car = arena.read_cell(i + 1);
                print_value(arena, prim_names, car, out)?;
                v = arena.read_cell(i);
            }
            _ => {
                write!(out, " . ")?;
                print_value(arena, prim_names, v, out)?;
                break;
            }
        }
    }
    write!(out, ")")
}

/// `%.10lg`-equivalent: up to 10 significant digits, fixed or scientific
/// notation chosen the way `printf("%g", ...)` chooses it, trailing zeros
/// stripped. Bit-exact round-trip with the C reference is not required.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n < 0.0 { "-inf".to_string() } else { "inf".to_string() };
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }

    const SIG: i32 = 10;
    let sci = format!("{:.*e}", (SIG - 1) as usize, n);
    let (mantissa, exp_str) = sci.split_once('e').expect("Rust's {:e} always has an e");
    let exp: i32 = exp_str.parse().expect("exponent is always a valid integer");

    if !(-4..SIG).contains(&exp) {
        format!("{}e{}", strip_trailing_zeros(mantissa), exp)
    } else {
        let decimals = (SIG - 1 - exp).max(0) as usize;
        let fixed = format!("{n:.decimals$}");
        strip_trailing_zeros(&fixed)
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0');
    trimmed.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DEFAULT_NCELLS;

    fn render(v: Value) -> String {
        let arena = Arena::new(DEFAULT_NCELLS);
        let mut out = Vec::new();
        print_value(&arena, &[], v, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn nil_prints_as_empty_list() {
        assert_eq!(render(Value::nil()), "()");
    }

    #[test]
    fn integers_print_without_trailing_zeros() {
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(3.5), "3.5");
    }

    #[test]
    fn cons_pair_prints_dotted() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let p = arena.cons(Value::num(9.0), Value::num(8.0)).unwrap();
        let mut out = Vec::new();
        print_value(&arena, &[], p, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(9 . 8)");
    }

    #[test]
    fn proper_list_prints_without_dot() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let tail = arena.cons(Value::num(2.0), Value::nil()).unwrap();
        let list = arena.cons(Value::num(1.0), tail).unwrap();
        let mut out = Vec::new();
        print_value(&arena, &[], list, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(1 2)");
    }
}
