//! Indentation-aware text sink for generated code
//!
//! [`CodeWriter`] layers two behaviors over plain concatenation: lazy
//! indentation (the prefix for a line is emitted on the first write after a
//! line break, at the level current at that moment) and mode-dependent
//! block delimiters (`{`/`}` for C, nothing for Python, where indentation
//! alone scopes the block).
//!
//! The indentation level can also be saved and restored explicitly; the
//! marshalling tree renderer uses that to align multi-line nested macro
//! arguments.

use crate::error::{CodegenError, CodegenResult};

const INDENTATION_STEP: usize = 4;

/// Target style of a writer: brace-delimited or indentation-delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterMode {
    C,
    Python,
}

/// A mutable, write-only buffer for one generated artifact.
#[derive(Debug)]
pub struct CodeWriter {
    buffer: String,
    indentation_level: usize,
    at_line_start: bool,
    opening_bracket: &'static str,
    closing_bracket: &'static str,
}

impl CodeWriter {
    pub fn new(mode: WriterMode) -> Self {
        let (opening_bracket, closing_bracket) = match mode {
            WriterMode::C => ("{", "}"),
            WriterMode::Python => ("", ""),
        };
        CodeWriter {
            buffer: String::new(),
            indentation_level: 0,
            at_line_start: true,
            opening_bracket,
            closing_bracket,
        }
    }

    /// Append text to the current line, emitting the line's indentation
    /// prefix first if nothing has been written to it yet.
    pub fn write(&mut self, text: &str) {
        if self.at_line_start {
            for _ in 0..self.indentation_level * INDENTATION_STEP {
                self.buffer.push(' ');
            }
            self.at_line_start = false;
        }
        self.buffer.push_str(text);
    }

    /// Append text and terminate the line.
    pub fn writeln(&mut self, text: &str) {
        self.write(text);
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    /// Open a block, run `body` one level deeper, close the block and
    /// append `suffix` after the closing delimiter.
    ///
    /// The body may itself open further blocks; it inherits the increased
    /// indentation level.
    pub fn block<F>(&mut self, body: F, suffix: &str) -> CodegenResult<()>
    where
        F: FnOnce(&mut CodeWriter) -> CodegenResult<()>,
    {
        let opening = self.opening_bracket;
        let closing = self.closing_bracket;
        self.writeln(opening);
        self.indentation_level += 1;
        body(self)?;
        self.indentation_level -= 1;
        self.write(closing);
        self.writeln(suffix);
        Ok(())
    }

    pub fn indent(&mut self) {
        self.indentation_level += 1;
    }

    /// # Panics
    ///
    /// Unindenting below zero is a programming error in the calling
    /// generator, not a recoverable condition.
    pub fn unindent(&mut self) {
        assert!(
            self.indentation_level > 0,
            "attempting to unindent below zero"
        );
        self.indentation_level -= 1;
    }

    pub fn indentation(&self) -> usize {
        self.indentation_level
    }

    pub fn set_indentation(&mut self, level: usize) {
        self.indentation_level = level;
    }

    /// The accumulated text. Fails if any block or explicit indent is
    /// still open.
    pub fn result(self) -> CodegenResult<String> {
        if self.indentation_level != 0 {
            return Err(CodegenError::UnbalancedIndentation {
                level: self.indentation_level,
            });
        }
        Ok(self.buffer)
    }
}
