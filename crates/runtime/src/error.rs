//! Error codes and the non-local transfer signal they travel as.
//!
//! The reference implementation raises these via `setjmp`/`longjmp`. The
//! idiomatic Rust reading of "save/restore the current handler pointer" is
//! ordinary `Result` propagation: every internal failure becomes an `Err`
//! that bubbles out through `?` until a `catch` frame (or the REPL's
//! top-level handler) intercepts it. No thread-local or global handler
//! stack is needed; the call stack itself is the snapshot.

use std::fmt;

/// The four error kinds the core can signal internally. User code raises
/// arbitrary codes via `throw`, which is why `Signal::Throw` carries a
/// plain `i64` rather than another `ErrorCode` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvCarOrCdr = 1,
    SymNotFound = 2,
    InvFunType = 3,
    OutOfMemory = 6,
}

impl ErrorCode {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::InvCarOrCdr => "INV_CAR_OR_CDR",
            ErrorCode::SymNotFound => "SYM_NOT_FOUND",
            ErrorCode::InvFunType => "INV_FUN_TYPE",
            ErrorCode::OutOfMemory => "OUT_OF_MEMORY",
        };
        write!(f, "{name}")
    }
}

/// A non-local transfer in flight: either an internal error or a user
/// `throw`. Every one of these is an integer code at the `catch` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Error(ErrorCode),
    Throw(i64),
}

impl Signal {
    pub fn code(self) -> i64 {
        match self {
            Signal::Error(e) => e.code(),
            Signal::Throw(n) => n,
        }
    }
}

impl From<ErrorCode> for Signal {
    fn from(e: ErrorCode) -> Self {
        Signal::Error(e)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Error(e) => write!(f, "{e}"),
            Signal::Throw(n) => write!(f, "{n}"),
        }
    }
}

/// Result type threaded through the whole evaluator.
pub type EvalResult = Result<crate::Value, Signal>;
