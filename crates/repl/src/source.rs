//! The character source the REPL wires up for `lisp_runtime::reader`: a
//! prelude file, if any, followed by an interactive line editor once the
//! file is exhausted. The core never sees either concretely — only the
//! `InputSource` trait.

use lisp_runtime::InputSource;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::Cell;
use std::fs::File;
use std::io::Read;
use std::rc::Rc;

/// Shared between the source and the REPL loop: the loop stamps the
/// current free-cell count before every top-level read, and resets
/// `fresh` to `true` once the expression that read is complete. The
/// source flips `fresh` to `false` itself the moment it has to block
/// for a second line, producing the `<n>>` / `?` prompt alternation.
#[derive(Clone)]
pub struct PromptState {
    fresh: Rc<Cell<bool>>,
    free_cells: Rc<Cell<usize>>,
}

impl PromptState {
    pub fn new() -> Self {
        PromptState { fresh: Rc::new(Cell::new(true)), free_cells: Rc::new(Cell::new(0)) }
    }

    pub fn mark_fresh(&self) {
        self.fresh.set(true);
    }

    pub fn set_free_cells(&self, n: usize) {
        self.free_cells.set(n);
    }

    fn prompt(&self) -> String {
        if self.fresh.get() { format!("{}>", self.free_cells.get()) } else { "?".to_string() }
    }
}

/// Reads a prelude file byte-by-byte, reporting `None` once it hits EOF
/// so the caller can fall through to the interactive source.
pub struct FileSource {
    file: File,
    buf: [u8; 1],
}

impl FileSource {
    pub fn open(path: &std::path::Path) -> std::io::Result<Self> {
        Ok(FileSource { file: File::open(path)?, buf: [0; 1] })
    }
}

impl InputSource for FileSource {
    fn next_byte(&mut self) -> Option<u8> {
        match self.file.read(&mut self.buf) {
            Ok(1) => Some(self.buf[0]),
            _ => None,
        }
    }
}

/// Blocks on `rustyline` for a line of input whenever its buffer runs
/// dry, re-prompting with `state`'s current text. Returns `None` only on
/// EOF (Ctrl-D) or a genuine line-editor error, which the REPL treats as
/// the end of the session. History lives only in `editor`'s in-memory
/// buffer for the process lifetime; nothing is read from or written to
/// disk.
pub struct InteractiveSource {
    editor: DefaultEditor,
    state: PromptState,
    buf: Vec<u8>,
    pos: usize,
}

impl InteractiveSource {
    pub fn new(state: PromptState) -> rustyline::Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(InteractiveSource { editor, state, buf: Vec::new(), pos: 0 })
    }

    fn refill(&mut self) -> Option<()> {
        loop {
            match self.editor.readline(&self.state.prompt()) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.buf = line.into_bytes();
                    self.buf.push(b'\n');
                    self.pos = 0;
                    self.state.fresh.set(false);
                    return Some(());
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return None,
                Err(_) => return None,
            }
        }
    }
}

impl InputSource for InteractiveSource {
    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= self.buf.len() && self.refill().is_none() {
            return None;
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Some(b)
    }
}

/// Drains `file` before ever touching `interactive`; once `file` reports
/// EOF it is dropped and never consulted again.
pub struct Chained {
    file: Option<FileSource>,
    interactive: InteractiveSource,
}

impl Chained {
    pub fn new(file: Option<FileSource>, interactive: InteractiveSource) -> Self {
        Chained { file, interactive }
    }
}

impl InputSource for Chained {
    fn next_byte(&mut self) -> Option<u8> {
        if let Some(file) = &mut self.file {
            if let Some(b) = file.next_byte() {
                return Some(b);
            }
            self.file = None;
        }
        self.interactive.next_byte()
    }
}
