//! Symbol interning: linear scan over the arena's name heap.
//!
//! Kept as a thin extension of `Arena` rather than its own data structure,
//! because the heap it scans *is* the arena's upward cursor region — there
//! is no separate table to own.

use crate::arena::Arena;
use crate::error::ErrorCode;
use lisp_core::Value;

impl Arena {
    /// Intern `name`, returning the same `Value` every time it is called
    /// with an equal string (so interned symbols compare `eq?`).
    pub fn atom(&mut self, name: &str) -> Result<Value, ErrorCode> {
        let mut offset = 0;
        while offset < self.heap_top() {
            let candidate = self.heap_str_at(offset);
            if candidate == name {
                return Ok(Value::atom(offset));
            }
            offset += candidate.len() + 1;
        }
        let offset = self.heap_append(name)?;
        Ok(Value::atom(offset))
    }

    /// The textual name behind an `ATOM` value's payload offset.
    pub fn atom_name(&self, atom: Value) -> &str {
        match atom.decode() {
            lisp_core::Repr::Atom(offset) => self.heap_str_at(offset),
            _ => panic!("atom_name called on a non-atom value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DEFAULT_NCELLS;

    #[test]
    fn interning_the_same_name_twice_gives_identical_values() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let a = arena.atom("foo").unwrap();
        let b = arena.atom("foo").unwrap();
        assert!(a.identical(b));
    }

    #[test]
    fn distinct_names_intern_to_distinct_atoms() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let a = arena.atom("foo").unwrap();
        let b = arena.atom("bar").unwrap();
        assert!(!a.identical(b));
        assert_eq!(arena.atom_name(a), "foo");
        assert_eq!(arena.atom_name(b), "bar");
    }
}
