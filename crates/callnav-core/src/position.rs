//! Parser positions and line-table offset conversion.
//!
//! Parsers report where a node starts as `(line, column)`. The resolver needs
//! flat offsets, so [`LineTable`] keeps the prefix sums of full line lengths
//! (terminators included) and converts without rescanning the text.
//!
//! Unlike [`Span`](crate::span::Span), both coordinates here are **bytes** of
//! the parsed source, the unit tree-sitter reports in. Converting to chars
//! happens once, at the document boundary.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A `(line, col)` location in parsed source, both 0-indexed.
///
/// `col` is a byte offset from the start of the line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

// ---------------------------------------------------------------------------
// LineTable
// ---------------------------------------------------------------------------

/// Prefix sums of line lengths for one text.
///
/// `starts[i]` is the byte offset where line `i` begins, i.e. the summed
/// length of every earlier line including its `\n`. Lines are split on `\n`
/// only; strip carriage returns before building a table if the parser
/// counts them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    starts: Vec<usize>,
    len: usize,
}

impl LineTable {
    /// Build the table for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Flat byte offset of `pos`.
    ///
    /// Returns `None` when the line does not exist or the column runs past
    /// the end of the text.
    #[must_use]
    pub fn offset(&self, pos: Position) -> Option<usize> {
        let offset = self.starts.get(pos.line)? + pos.col;
        (offset <= self.len).then_some(offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
