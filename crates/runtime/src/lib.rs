//! The evaluator: arena, environments, reader/printer, primitives and the
//! tree-walking `eval` loop built on top of them.
//!
//! Nothing here knows about files, terminals, or command-line flags — that
//! is the REPL crate's job. This crate exposes [`Interpreter`], a single
//! entry point that owns an [`Arena`] and a global environment and can be
//! driven by anything that can supply an [`InputSource`] and a `Write` sink.

pub mod arena;
pub mod env;
pub mod error;
pub mod eval;
pub mod interner;
pub mod primitives;
pub mod printer;
pub mod reader;
pub mod reclaim;

pub use arena::{Arena, DEFAULT_NCELLS};
pub use error::{ErrorCode, EvalResult, Signal};
pub use eval::Interpreter;
pub use lisp_core::Value;
pub use reader::{EmptySource, InputSource, ReadError, Reader, SliceSource};
