//! Text buffer backed by a rope.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with the handful of operations the
//! reference host needs: char-offset spans in, text out, and in-place edits.
//!
//! - **Offsets are chars**, never bytes. Column 3 of `"café"` is `'é'`.
//!   Conversion to bytes happens only at the syntax boundary
//!   ([`char_to_byte`](Buffer::char_to_byte) / [`byte_to_char`](Buffer::byte_to_char)).
//! - **Out-of-range spans are clamped** to the buffer. Commands run against
//!   a text snapshot that the host may have changed since, and a stale span
//!   must not bring the editor down.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use callnav_core::Span;
use ropey::{Rope, RopeSlice};

/// A text buffer over rope content.
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    // -- Text access --------------------------------------------------------

    /// Total number of lines. An empty buffer has 1 line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// The text in `span`, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, span: Span) -> RopeSlice<'_> {
        let span = self.clamp(span);
        self.rope.slice(span.start..span.end)
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Line containing `char_idx` (clamped).
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Byte offset of `char_idx` (clamped).
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx.min(self.len_chars()))
    }

    /// Char offset of `byte_idx` (clamped). A byte inside a multi-byte
    /// char maps to that char.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.rope.byte_to_char(byte_idx.min(self.rope.len_bytes()))
    }

    /// `span` with both ends clamped to `0..=len_chars()`.
    #[must_use]
    pub fn clamp(&self, span: Span) -> Span {
        let len = self.len_chars();
        let end = span.end.min(len);
        Span::new(span.start.min(end), end)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert text at a char offset (clamped).
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Delete the text in `span`. An empty span is a no-op.
    pub fn delete(&mut self, span: Span) {
        let span = self.clamp(span);
        if span.is_empty() {
            return;
        }
        self.rope.remove(span.start..span.end);
    }

    /// Replace the text in `span` with `text`.
    pub fn replace(&mut self, span: Span, text: &str) {
        let span = self.clamp(span);
        self.rope.remove(span.start..span.end);
        self.rope.insert(span.start, text);
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
