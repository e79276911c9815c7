//! Undo/redo history: transaction-based edit tracking.
//!
//! Records every buffer mutation as a reversible [`Edit`] grouped into
//! [`Transaction`]s. A transaction is the atomic unit of undo/redo; a command
//! that edits the buffer several times (the unpack-tuple macro deletes a word
//! and inserts its replacement) undoes in one step.
//!
//! ```text
//! history.begin(selection);
//! history.record_delete(at, removed_text);
//! history.record_insert(at, inserted_text);
//! history.commit(selection);
//! ```
//!
//! Empty transactions are discarded.

use callnav_core::Span;

use crate::buffer::Buffer;

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// A single reversible buffer edit at a char offset.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    /// Text was inserted at `at`. Undo = delete it.
    Insert { at: usize, text: String },
    /// Text was deleted starting at `at`. Undo = insert it back.
    Delete { at: usize, text: String },
}

impl Edit {
    fn span(at: usize, text: &str) -> Span {
        Span::new(at, at + text.chars().count())
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A group of edits that undo/redo together, with the selection before and
/// after so undo and redo can put it back.
#[derive(Debug, Clone)]
struct Transaction {
    edits: Vec<Edit>,
    selection_before: Span,
    selection_after: Span,
}

impl Transaction {
    fn undo(&self, buf: &mut Buffer) {
        for edit in self.edits.iter().rev() {
            match edit {
                Edit::Insert { at, text } => buf.delete(Edit::span(*at, text)),
                Edit::Delete { at, text } => buf.insert(*at, text),
            }
        }
    }

    fn redo(&self, buf: &mut Buffer) {
        for edit in &self.edits {
            match edit {
                Edit::Insert { at, text } => buf.insert(*at, text),
                Edit::Delete { at, text } => buf.delete(Edit::span(*at, text)),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo/redo stacks for one buffer. Any new edit after an undo discards the
/// redo stack.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<Transaction>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
        }
    }

    /// Start a transaction. A transaction still pending is committed first.
    pub fn begin(&mut self, selection: Span) {
        if self.pending.is_some() {
            self.commit(selection);
        }
        self.pending = Some(Transaction {
            edits: Vec::new(),
            selection_before: selection,
            selection_after: selection,
        });
    }

    /// Record that `text` was inserted at `at`. No-op without a pending
    /// transaction.
    pub fn record_insert(&mut self, at: usize, text: &str) {
        if let Some(txn) = &mut self.pending {
            txn.edits.push(Edit::Insert {
                at,
                text: text.to_owned(),
            });
        }
    }

    /// Record that `text` was deleted from `at`. Capture `text` before
    /// deleting it.
    pub fn record_delete(&mut self, at: usize, text: &str) {
        if let Some(txn) = &mut self.pending {
            txn.edits.push(Edit::Delete {
                at,
                text: text.to_owned(),
            });
        }
    }

    /// Finalize the pending transaction with the selection after its edits.
    pub fn commit(&mut self, selection: Span) {
        if let Some(mut txn) = self.pending.take() {
            if txn.edits.is_empty() {
                return;
            }
            txn.selection_after = selection;
            self.redo_stack.clear();
            self.undo_stack.push(txn);
        }
    }

    /// Undo the last transaction. Returns the selection to restore.
    pub fn undo(&mut self, buf: &mut Buffer) -> Option<Span> {
        if let Some(txn) = self.pending.take() {
            if !txn.edits.is_empty() {
                self.redo_stack.clear();
                self.undo_stack.push(txn);
            }
        }
        let txn = self.undo_stack.pop()?;
        txn.undo(buf);
        let selection = txn.selection_before;
        self.redo_stack.push(txn);
        Some(selection)
    }

    /// Redo the last undone transaction. Returns the selection to restore.
    pub fn redo(&mut self, buf: &mut Buffer) -> Option<Span> {
        let txn = self.redo_stack.pop()?;
        txn.redo(buf);
        let selection = txn.selection_after;
        self.undo_stack.push(txn);
        Some(selection)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Basic undo/redo ----------------------------------------------------

    #[test]
    fn undo_single_insert() {
        let mut buf = Buffer::from_text("");
        let mut h = History::new();

        h.begin(Span::point(0));
        buf.insert(0, "hello");
        h.record_insert(0, "hello");
        h.commit(Span::point(5));

        let selection = h.undo(&mut buf).unwrap();
        assert_eq!(buf.contents(), "");
        assert_eq!(selection, Span::point(0));
    }

    #[test]
    fn undo_single_delete() {
        let mut buf = Buffer::from_text("hello");
        let mut h = History::new();

        h.begin(Span::new(4, 5));
        h.record_delete(4, "o");
        buf.delete(Span::new(4, 5));
        h.commit(Span::point(4));
        assert_eq!(buf.contents(), "hell");

        let selection = h.undo(&mut buf).unwrap();
        assert_eq!(buf.contents(), "hello");
        assert_eq!(selection, Span::new(4, 5));
    }

    #[test]
    fn redo_after_undo() {
        let mut buf = Buffer::from_text("");
        let mut h = History::new();

        h.begin(Span::point(0));
        buf.insert(0, "hello");
        h.record_insert(0, "hello");
        h.commit(Span::point(5));

        h.undo(&mut buf);
        let selection = h.redo(&mut buf).unwrap();
        assert_eq!(buf.contents(), "hello");
        assert_eq!(selection, Span::point(5));
    }

    // -- Transactions -------------------------------------------------------

    #[test]
    fn replace_undoes_as_one_step() {
        let mut buf = Buffer::from_text("x = things");
        let mut h = History::new();

        h.begin(Span::point(10));
        h.record_delete(4, "things");
        buf.delete(Span::new(4, 10));
        h.record_insert(4, "(thing,)");
        buf.insert(4, "(thing,)");
        h.commit(Span::point(12));
        assert_eq!(buf.contents(), "x = (thing,)");

        assert_eq!(h.undo(&mut buf), Some(Span::point(10)));
        assert_eq!(buf.contents(), "x = things");
        assert_eq!(h.undo(&mut buf), None);
        assert_eq!(h.redo(&mut buf), Some(Span::point(12)));
        assert_eq!(buf.contents(), "x = (thing,)");
    }

    #[test]
    fn multibyte_insert_undo() {
        let mut buf = Buffer::from_text("ab");
        let mut h = History::new();

        h.begin(Span::point(1));
        buf.insert(1, "éé");
        h.record_insert(1, "éé");
        h.commit(Span::point(3));

        h.undo(&mut buf);
        assert_eq!(buf.contents(), "ab");
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut buf = Buffer::from_text("");
        let mut h = History::new();

        h.begin(Span::point(0));
        buf.insert(0, "a");
        h.record_insert(0, "a");
        h.commit(Span::point(1));
        h.undo(&mut buf);

        h.begin(Span::point(0));
        buf.insert(0, "b");
        h.record_insert(0, "b");
        h.commit(Span::point(1));
        assert_eq!(h.redo(&mut buf), None);
        assert_eq!(buf.contents(), "b");
    }

    #[test]
    fn empty_transaction_not_pushed() {
        let mut buf = Buffer::from_text("abc");
        let mut h = History::new();
        h.begin(Span::point(0));
        h.commit(Span::point(0));
        assert_eq!(h.undo(&mut buf), None);
    }

    #[test]
    fn undo_commits_pending_transaction() {
        let mut buf = Buffer::from_text("");
        let mut h = History::new();

        h.begin(Span::point(0));
        buf.insert(0, "x");
        h.record_insert(0, "x");

        assert_eq!(h.undo(&mut buf), Some(Span::point(0)));
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn undo_empty_history() {
        let mut buf = Buffer::from_text("abc");
        let mut h = History::new();
        assert_eq!(h.undo(&mut buf), None);
        assert_eq!(h.redo(&mut buf), None);
    }
}
