//! S-expression tokenizer and parser.
//!
//! The reader only knows how to pull bytes from an [`InputSource`] — it has
//! no idea whether those bytes come from a prelude file or an interactive
//! line editor. That split lives entirely in the REPL crate; see the
//! external-interfaces section of the spec for why.

use crate::arena::Arena;
use crate::error::Signal;
use lisp_core::Value;
use std::fmt;

/// A byte-at-a-time source of input. A file source yields `None` at EOF;
/// an interactive source yields `None` when a line is exhausted and more
/// must be requested (the REPL driver handles re-prompting).
pub trait InputSource {
    fn next_byte(&mut self) -> Option<u8>;
}

/// Reads bytes from an in-memory buffer. Used by tests and by anything
/// that already has the whole program as a string.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(s: &'a str) -> Self {
        SliceSource { bytes: s.as_bytes(), pos: 0 }
    }
}

impl InputSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// A reader that never has input; `read` and trace-mode single-stepping
/// degrade gracefully against it.
pub struct EmptySource;

impl InputSource for EmptySource {
    fn next_byte(&mut self) -> Option<u8> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadError {
    /// End of input before any token was read — the caller should stop,
    /// not report a syntax error.
    Eof,
    UnexpectedCloseParen,
    MissingCloseParen,
    BadDottedPair,
    Eval(Signal),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Eof => write!(f, "unexpected end of input"),
            ReadError::UnexpectedCloseParen => write!(f, "unexpected )"),
            ReadError::MissingCloseParen => write!(f, "missing )"),
            ReadError::BadDottedPair => write!(f, "malformed dotted pair"),
            ReadError::Eval(s) => write!(f, "ERR {}", s.code()),
        }
    }
}

impl From<Signal> for ReadError {
    fn from(s: Signal) -> Self {
        ReadError::Eval(s)
    }
}

impl From<crate::error::ErrorCode> for ReadError {
    fn from(e: crate::error::ErrorCode) -> Self {
        ReadError::Eval(Signal::Error(e))
    }
}

/// Wraps an [`InputSource`] together with a byte a previous, now-dropped
/// `Reader` peeked but never consumed. Lets a caller build a fresh
/// `Reader` per top-level read without losing a byte of lookahead across
/// calls (used by the `read` primitive and the REPL driver alike).
pub struct PendingSource<'a> {
    byte: &'a mut Option<u8>,
    inner: &'a mut dyn InputSource,
}

impl<'a> PendingSource<'a> {
    pub fn new(byte: &'a mut Option<u8>, inner: &'a mut dyn InputSource) -> Self {
        PendingSource { byte, inner }
    }
}

impl InputSource for PendingSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        self.byte.take().or_else(|| self.inner.next_byte())
    }
}

enum Token {
    Open,
    Close,
    Quote,
    Dot,
    Atom(String),
}

pub struct Reader<'s> {
    source: &'s mut dyn InputSource,
    lookahead: Option<u8>,
}

impl<'s> Reader<'s> {
    pub fn new(source: &'s mut dyn InputSource) -> Self {
        Reader { source, lookahead: None }
    }

    /// Hand back a byte this reader peeked but never consumed, so a caller
    /// that creates a fresh `Reader` per call (the `read` primitive) does
    /// not lose it between invocations.
    pub(crate) fn take_lookahead(&mut self) -> Option<u8> {
        self.lookahead.take()
    }

    fn peek(&mut self) -> Option<u8> {
        if self.lookahead.is_none() {
            self.lookahead = self.source.next_byte();
        }
        self.lookahead
    }

    fn advance(&mut self) -> Option<u8> {
        match self.lookahead.take() {
            Some(b) => Some(b),
            None => self.source.next_byte(),
        }
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b <= b' ' && b > 0 => {
                    self.advance();
                }
                Some(b';') => {
                    while let Some(b) = self.peek() {
                        self.advance();
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_ws_and_comments();
        match self.peek()? {
            b'(' => {
                self.advance();
                Some(Token::Open)
            }
            b')' => {
                self.advance();
                Some(Token::Close)
            }
            b'\'' => {
                self.advance();
                Some(Token::Quote)
            }
            _ => {
                let mut buf = String::new();
                while let Some(b) = self.peek() {
                    if b <= b' ' || b == b'(' || b == b')' {
                        break;
                    }
                    buf.push(b as char);
                    self.advance();
                }
                if buf == "." { Some(Token::Dot) } else { Some(Token::Atom(buf)) }
            }
        }
    }

    /// Read one top-level expression. `Ok(None)` means input was exhausted
    /// before any token appeared (a clean place to stop, not an error).
    pub fn read_expr(&mut self, arena: &mut Arena) -> Result<Option<Value>, ReadError> {
        match self.next_token() {
            None => Ok(None),
            Some(tok) => self.parse(tok, arena).map(Some),
        }
    }

    fn parse(&mut self, tok: Token, arena: &mut Arena) -> Result<Value, ReadError> {
        match tok {
            Token::Open => self.parse_list(arena),
            Token::Close => Err(ReadError::UnexpectedCloseParen),
            Token::Dot => Err(ReadError::BadDottedPair),
            Token::Quote => {
                let inner = self.require_expr(arena)?;
                let quote = arena.atom("quote")?;
                let tail = arena.cons(inner, Value::nil())?;
                Ok(arena.cons(quote, tail)?)
            }
            Token::Atom(s) => Ok(parse_atom(&s, arena)?),
        }
    }

    fn require_expr(&mut self, arena: &mut Arena) -> Result<Value, ReadError> {
        match self.next_token() {
            None => Err(ReadError::Eof),
            Some(tok) => self.parse(tok, arena),
        }
    }

    fn parse_list(&mut self, arena: &mut Arena) -> Result<Value, ReadError> {
        match self.next_token() {
            None => Err(ReadError::MissingCloseParen),
            Some(Token::Close) => Ok(Value::nil()),
            Some(Token::Dot) => {
                let tail = self.require_expr(arena)?;
                match self.next_token() {
                    Some(Token::Close) => Ok(tail),
                    _ => Err(ReadError::MissingCloseParen),
                }
            }
            Some(tok) => {
                let head = self.parse(tok, arena)?;
                let rest = self.parse_list(arena)?;
                Ok(arena.cons(head, rest)?)
            }
        }
    }
}

fn parse_atom(token: &str, arena: &mut Arena) -> Result<Value, Signal> {
    match token.parse::<f64>() {
        Ok(n) if is_pure_number_token(token) => Ok(Value::num(n)),
        _ => Ok(arena.atom(token)?),
    }
}

/// Rust's `f64::parse` accepts spellings (`inf`, `NaN`, `1e`...) that would
/// surprise a reader built around `scanf("%lg%n")` consuming the whole
/// token. Restrict to the digit/sign/dot/exponent alphabet `%lg` accepts.
fn is_pure_number_token(token: &str) -> bool {
    let mut chars = token.chars().peekable();
    if matches!(chars.peek(), Some('+') | Some('-')) {
        chars.next();
    }
    let mut saw_digit = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        chars.next();
        saw_digit = true;
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            saw_digit = true;
        }
    }
    if !saw_digit {
        return false;
    }
    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut saw_exp_digit = false;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            saw_exp_digit = true;
        }
        if !saw_exp_digit {
            return false;
        }
    }
    chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DEFAULT_NCELLS;
    use crate::printer::print_value;

    fn read_one(src: &str) -> (Arena, Value) {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let mut source = SliceSource::new(src);
        let mut reader = Reader::new(&mut source);
        let v = reader.read_expr(&mut arena).unwrap().unwrap();
        (arena, v)
    }

    fn print_to_string(arena: &Arena, v: Value) -> String {
        let mut out = Vec::new();
        print_value(arena, &[], v, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reads_a_number() {
        let (_arena, v) = read_one("42");
        assert_eq!(v.as_num(), Some(42.0));
    }

    #[test]
    fn reads_a_symbol_not_a_number() {
        let (arena, v) = read_one("eq?");
        assert!(v.is_atom());
        assert_eq!(arena.atom_name(v), "eq?");
    }

    #[test]
    fn reads_a_list() {
        let (arena, v) = read_one("(+ 1 2)");
        assert_eq!(print_to_string(&arena, v), "(+ 1 2)");
    }

    #[test]
    fn reads_a_dotted_pair() {
        let (arena, v) = read_one("(1 . 2)");
        assert_eq!(print_to_string(&arena, v), "(1 . 2)");
    }

    #[test]
    fn quote_shorthand_expands() {
        let (arena, v) = read_one("'x");
        assert_eq!(print_to_string(&arena, v), "(quote x)");
    }

    #[test]
    fn comment_is_skipped() {
        let (_arena, v) = read_one("; comment\n7");
        assert_eq!(v.as_num(), Some(7.0));
    }

    #[test]
    fn eof_before_any_token_is_ok_none() {
        let mut arena = Arena::new(DEFAULT_NCELLS);
        let mut source = SliceSource::new("   ");
        let mut reader = Reader::new(&mut source);
        assert_eq!(reader.read_expr(&mut arena).unwrap(), None);
    }
}
