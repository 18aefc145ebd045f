//! Output Writer
//!
//! Line-oriented text buffer with an indentation level. Generated C++
//! goes through one of these for the header stream and one for the body.

/// Spaces per indentation level.
const INDENT_WIDTH: usize = 4;

/// Indentation-aware text buffer.
#[derive(Default, Debug, Clone)]
pub struct CodeWriter {
    buffer: String,
    indent: usize,
}

impl CodeWriter {
    /// Create a new, empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            indent: 0,
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write `text` as one or more lines at the current indentation.
    ///
    /// Embedded newlines start new lines, each indented the same way;
    /// empty lines get no trailing whitespace.
    pub fn line(&mut self, text: &str) {
        for line in text.split('\n') {
            if !line.is_empty() {
                self.write_indent();
                self.buffer.push_str(line);
            }
            self.buffer.push('\n');
        }
    }

    /// Write text verbatim, ignoring indentation.
    pub fn raw(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Write `{` and indent.
    pub fn open_block(&mut self) {
        self.line("{");
        self.indent();
    }

    /// Dedent and write `}`.
    pub fn close_block(&mut self) {
        self.close_block_with("");
    }

    /// Dedent and write `}` followed by `suffix` (e.g. `;`).
    pub fn close_block_with(&mut self, suffix: &str) {
        self.dedent();
        self.write_indent();
        self.buffer.push('}');
        self.buffer.push_str(suffix);
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything written after byte offset `len` and reset indentation.
    pub(crate) fn rollback(&mut self, len: usize) {
        self.buffer.truncate(len);
        self.indent = 0;
    }

    /// Get the written output.
    pub fn into_string(self) -> String {
        self.buffer
    }
}
