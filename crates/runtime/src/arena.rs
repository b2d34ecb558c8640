//! The shared arena: an upward-growing symbol-name heap and a
//! downward-growing cons/closure stack packed into one fixed byte buffer.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │ symbol names (growing up) →          ← (growing down) pair cells  │
//! └───────────────────────────────────────────────────────────────────┘
//! byte 0                          heap_top          stack_top·8   NCELLS·8
//! ```
//!
//! `heap_top` is a byte offset; `stack_top` is a cell index (8 bytes per
//! cell) counting down from `NCELLS`. The two cursors share one bound:
//! `heap_top <= stack_top * 8`. Every allocation — interning a name,
//! consing a pair — rechecks it and signals `OUT_OF_MEMORY` on violation.

use crate::error::ErrorCode;
use lisp_core::Value;

/// Default cell count, matching the reference implementation's working
/// size for an interactive session; overridable via `LISP_NCELLS` (see the
/// REPL crate).
pub const DEFAULT_NCELLS: usize = 4096;

pub struct Arena {
    cells: Vec<u8>,
    ncells: usize,
    heap_top: usize,
    stack_top: usize,
}

impl Arena {
    pub fn new(ncells: usize) -> Self {
        Arena {
            cells: vec![0u8; ncells * 8],
            ncells,
            heap_top: 0,
            stack_top: ncells,
        }
    }

    pub fn ncells(&self) -> usize {
        self.ncells
    }

    pub fn heap_top(&self) -> usize {
        self.heap_top
    }

    pub fn stack_top(&self) -> usize {
        self.stack_top
    }

    /// Cells still available between the two cursors, the quantity the
    /// REPL prompt reports.
    pub fn free_cells(&self) -> usize {
        self.stack_top.saturating_sub(self.heap_top.div_ceil(8))
    }

    fn in_bounds(&self) -> bool {
        self.heap_top <= self.stack_top * 8
    }

    pub fn read_cell(&self, index: usize) -> Value {
        let start = index * 8;
        let bytes: [u8; 8] = self.cells[start..start + 8].try_into().unwrap();
        Value::from_raw(u64::from_le_bytes(bytes))
    }

    fn write_cell(&mut self, index: usize, value: Value) {
        let start = index * 8;
        self.cells[start..start + 8].copy_from_slice(&value.raw().to_le_bytes());
    }

    /// Low-level pair allocation shared by `cons`, closure construction and
    /// macro construction — they differ only in how the resulting cell
    /// index is tagged.
    pub fn alloc_pair(&mut self, car: Value, cdr: Value) -> Result<usize, ErrorCode> {
        let new_top = self.stack_top.checked_sub(2).ok_or(ErrorCode::OutOfMemory)?;
        if self.heap_top > new_top * 8 {
            return Err(ErrorCode::OutOfMemory);
        }
        self.stack_top = new_top;
        self.write_cell(new_top, cdr);
        self.write_cell(new_top + 1, car);
        Ok(new_top)
    }

    pub fn cons(&mut self, car: Value, cdr: Value) -> Result<Value, ErrorCode> {
        self.alloc_pair(car, cdr).map(Value::cons)
    }

    pub fn car(&self, p: Value) -> Result<Value, ErrorCode> {
        let i = p.cell_index().ok_or(ErrorCode::InvCarOrCdr)?;
        Ok(self.read_cell(i + 1))
    }

    pub fn cdr(&self, p: Value) -> Result<Value, ErrorCode> {
        let i = p.cell_index().ok_or(ErrorCode::InvCarOrCdr)?;
        Ok(self.read_cell(i))
    }

    pub fn set_car(&mut self, p: Value, v: Value) -> Result<(), ErrorCode> {
        if !p.is_cons() {
            return Err(ErrorCode::InvCarOrCdr);
        }
        let i = p.cell_index().ok_or(ErrorCode::InvCarOrCdr)?;
        self.write_cell(i + 1, v);
        Ok(())
    }

    pub fn set_cdr(&mut self, p: Value, v: Value) -> Result<(), ErrorCode> {
        if !p.is_cons() {
            return Err(ErrorCode::InvCarOrCdr);
        }
        let i = p.cell_index().ok_or(ErrorCode::InvCarOrCdr)?;
        self.write_cell(i, v);
        Ok(())
    }

    // -- symbol heap, used only by `Interner` (see interner.rs) --

    pub(crate) fn heap_str_at(&self, offset: usize) -> &str {
        let bytes = &self.cells[offset..];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        std::str::from_utf8(&bytes[..end]).expect("symbol names are ASCII/UTF-8")
    }

    pub(crate) fn heap_name_len(&self, offset: usize) -> usize {
        self.heap_str_at(offset).len()
    }

    pub(crate) fn heap_append(&mut self, name: &str) -> Result<usize, ErrorCode> {
        let offset = self.heap_top;
        let end = offset + name.len() + 1;
        if end > self.cells.len() {
            return Err(ErrorCode::OutOfMemory);
        }
        self.cells[offset..offset + name.len()].copy_from_slice(name.as_bytes());
        self.cells[offset + name.len()] = 0;
        self.heap_top = end;
        if !self.in_bounds() {
            // roll back: the name would overrun the live stack region.
            self.heap_top = offset;
            return Err(ErrorCode::OutOfMemory);
        }
        Ok(offset)
    }

    // -- reclamation (see reclaim.rs) --

    pub(crate) fn set_stack_top(&mut self, stack_top: usize) {
        self.stack_top = stack_top;
    }

    pub(crate) fn set_heap_top(&mut self, heap_top: usize) {
        self.heap_top = heap_top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_then_car_cdr_round_trip() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let x = Value::num(1.0);
        let y = Value::num(2.0);
        let p = arena.cons(x, y).unwrap();
        assert!(arena.car(p).unwrap().identical(x));
        assert!(arena.cdr(p).unwrap().identical(y));
    }

    #[test]
    fn car_of_non_pair_is_an_error() {
        let arena = Arena::new(DEFAULT_NCELLS);
        assert_eq!(arena.car(Value::num(1.0)), Err(ErrorCode::InvCarOrCdr));
        assert_eq!(arena.car(Value::nil()), Err(ErrorCode::InvCarOrCdr));
    }

    #[test]
    fn set_car_set_cdr_mutate_in_place() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let p = arena.cons(Value::num(1.0), Value::num(2.0)).unwrap();
        arena.set_car(p, Value::num(9.0)).unwrap();
        arena.set_cdr(p, Value::num(8.0)).unwrap();
        assert_eq!(arena.car(p).unwrap().as_num(), Some(9.0));
        assert_eq!(arena.cdr(p).unwrap().as_num(), Some(8.0));
    }

    #[test]
    fn exhausting_the_stack_is_out_of_memory() {
        let mut arena = Arena::new(2);
        arena.cons(Value::num(1.0), Value::num(2.0)).unwrap();
        let err = arena.cons(Value::num(1.0), Value::num(2.0)).unwrap_err();
        assert_eq!(err, ErrorCode::OutOfMemory);
    }

    #[test]
    fn heap_and_stack_share_the_oom_bound() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        assert!(arena.heap_append("a-long-enough-name-to-matter").is_ok());
        assert!(arena.heap_top() <= arena.stack_top() * 8);
    }
}
