//! Between-REPL-iteration compaction.
//!
//! Every pair cell created while evaluating one top-level form — argument
//! lists, temporary closures, `let` frames — becomes garbage the instant
//! that form's value is printed, *except* whatever `define` has linked
//! into the global environment. Rather than trace the live set, the
//! reclaimer exploits the fact that the global env is always the
//! stack-deepest thing still reachable: reset `stack_top` to its cell
//! index and the rest of the stack region is, by construction, garbage.

use crate::arena::Arena;
use lisp_core::{Repr, Value};

/// Reset the arena to the state reachable from `global_env`, truncating
/// both the pair stack and the symbol-name heap. Must only be called
/// between top-level evaluations, never while one is in flight.
pub fn reclaim(arena: &mut Arena, global_env: Value) {
    let new_stack_top = global_env.cell_index().expect("global env is always a CONS");
    let cells_freed = new_stack_top.saturating_sub(arena.stack_top());
    arena.set_stack_top(new_stack_top);

    let mut max_reachable: Option<usize> = None;
    for index in new_stack_top..arena.ncells() {
        if let Repr::Atom(offset) = arena.read_cell(index).decode() {
            max_reachable = Some(max_reachable.map_or(offset, |m| m.max(offset)));
        }
    }

    let old_heap_top = arena.heap_top();
    let new_heap_top = match max_reachable {
        Some(offset) => offset + arena.heap_name_len(offset) + 1,
        None => 0,
    };
    arena.set_heap_top(new_heap_top);

    tracing::debug!(
        cells_freed,
        bytes_freed = old_heap_top.saturating_sub(new_heap_top),
        "reclaimed arena between top-level forms"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DEFAULT_NCELLS;
    use crate::env::pair;

    #[test]
    fn reclaim_resets_stack_to_global_env_and_truncates_heap() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let x = arena.atom("x").unwrap();
        let global = pair(&mut arena, x, Value::num(1.0), Value::nil()).unwrap();

        // garbage created "during" a top-level form, below the global env.
        let garbage_sym = arena.atom("scratch-garbage").unwrap();
        let _garbage = pair(&mut arena, garbage_sym, Value::num(2.0), Value::nil()).unwrap();

        let stack_top_before_reclaim = arena.stack_top();
        assert!(stack_top_before_reclaim < global.cell_index().unwrap());

        reclaim(&mut arena, global);

        assert_eq!(arena.stack_top(), global.cell_index().unwrap());
        assert_eq!(arena.atom_name(x), "x");
        // the garbage atom's name is no longer reachable, so the heap
        // should not still claim to extend all the way to it.
        assert!(arena.heap_top() < old_heap_top_with_garbage(&arena, garbage_sym));
    }

    fn old_heap_top_with_garbage(arena: &Arena, garbage_sym: Value) -> usize {
        match garbage_sym.decode() {
            Repr::Atom(offset) => offset + arena.heap_name_len(offset) + 1,
            _ => unreachable!(),
        }
    }

    #[test]
    fn globally_reachable_expressions_are_unaffected_by_reclamation() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let x = arena.atom("x").unwrap();
        let global = pair(&mut arena, x, Value::num(42.0), Value::nil()).unwrap();
        reclaim(&mut arena, global);
        assert_eq!(crate::env::assoc(&arena, x, global).unwrap().as_num(), Some(42.0));
    }
}
