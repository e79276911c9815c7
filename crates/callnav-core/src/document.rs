//! Document snapshots and carriage-return normalization.
//!
//! A [`Document`] is an immutable copy of the host's text plus a rope index.
//! The scanners match regexes over the `&str` (byte offsets) and the rope
//! turns those into the char offsets every [`Span`] is expressed in.
//!
//! Parsers never see `\r`: [`Normalized`] strips carriage returns and keeps
//! enough bookkeeping to map offsets in the stripped text back to the raw
//! text, so CRLF documents still get exact spans.

use ropey::Rope;

use crate::span::Span;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An immutable text snapshot.
pub struct Document {
    text: String,
    rope: Rope,
}

impl Document {
    /// Snapshot `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let rope = Rope::from_str(&text);
        Self { text, rope }
    }

    /// The raw text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Char offset of a byte offset. Offsets past the end clamp to the end.
    #[inline]
    #[must_use]
    pub fn byte_to_char(&self, byte: usize) -> usize {
        self.rope.byte_to_char(byte.min(self.rope.len_bytes()))
    }

    /// Byte offset of a char offset. Offsets past the end clamp to the end.
    #[inline]
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx.min(self.rope.len_chars()))
    }

    /// Convert a byte range of [`text`](Self::text) to a char span.
    #[must_use]
    pub fn span_from_bytes(&self, start: usize, end: usize) -> Span {
        Span::new(self.byte_to_char(start), self.byte_to_char(end))
    }

    /// Byte range of a char span, clamped to the document.
    #[must_use]
    pub fn byte_range(&self, span: Span) -> std::ops::Range<usize> {
        self.char_to_byte(span.start)..self.char_to_byte(span.end.max(span.start))
    }

    /// The text covered by `span` (clamped to the document).
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        &self.text[self.byte_range(span)]
    }
}

// ---------------------------------------------------------------------------
// Carriage-return normalization
// ---------------------------------------------------------------------------

/// Text with every `\r` removed, plus the map back to raw offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    text: String,
    /// Offsets (in the normalized text) where a `\r` used to be, ascending.
    removed: Vec<usize>,
}

impl Normalized {
    /// Strip carriage returns from `raw`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        if !raw.contains('\r') {
            return Self {
                text: raw.to_owned(),
                removed: Vec::new(),
            };
        }
        let mut text = String::with_capacity(raw.len());
        let mut removed = Vec::new();
        for ch in raw.chars() {
            if ch == '\r' {
                removed.push(text.len());
            } else {
                text.push(ch);
            }
        }
        Self { text, removed }
    }

    /// The normalized text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte offset in the normalized text to the raw text.
    ///
    /// A removed `\r` sits in front of whatever followed it, so an offset
    /// lands after every carriage return removed at or before it.
    #[must_use]
    pub fn to_raw(&self, offset: usize) -> usize {
        offset + self.removed.partition_point(|&at| at <= offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
