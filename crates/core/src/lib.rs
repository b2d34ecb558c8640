//! Lisp Core: the tagged value representation shared by the evaluator.
//!
//! This crate provides the language-agnostic piece of the interpreter: a
//! single 64-bit `Value` that is either a binary64 number or one of five
//! tagged references (atom, primitive, cons cell, closure, macro) into an
//! arena owned by `lisp-runtime`. `Value` itself knows nothing about the
//! arena's layout; it only knows how to encode and decode its own bits.
//!
//! # Modules
//!
//! - `value`: the NaN-boxed `Value` type, its tags, and `eq?` semantics.

pub mod value;

pub use value::{Repr, Tag, Value};
