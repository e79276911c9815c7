//! Host editor interfaces.
//!
//! Commands never touch an editor directly. They read text and selection,
//! fire editor commands, and edit through these narrow traits, so any editor
//! (or the in-memory reference host) can drive them.
//!
//! All offsets are char offsets into the host's current text.

use std::fmt;

use crate::span::Span;

/// Editor commands the host executes on request. Fire-and-forget: the
/// caller observes the effect through [`TextSource::selection`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum HostCommand {
    /// Record the current location in the visit history before a jump.
    SetVisitHistoryAnchor,
    /// Grow the selection to the next enclosing syntactic unit.
    SelectMore,
}

impl HostCommand {
    /// Command name as editors usually spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetVisitHistoryAnchor => "set-visit-history-anchor",
            Self::SelectMore => "select-more",
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read access to the document and the selection.
pub trait TextSource {
    /// Snapshot of the full document text.
    fn text(&self) -> String;
    /// Current selection. A caret is an empty span.
    fn selection(&self) -> Span;
    /// Replace the selection.
    fn set_selection(&mut self, selection: Span);
}

/// Executes host editor commands.
pub trait CommandSink {
    fn execute(&mut self, command: HostCommand);
}

/// Scroll state, saved and restored around probing.
pub trait Viewport {
    /// First visible line.
    fn scroll_position(&self) -> usize;
    fn set_scroll_position(&mut self, line: usize);
}

/// Text mutation with undo grouping.
pub trait EditableText: TextSource {
    /// Replace the chars in `span` with `text`.
    fn replace(&mut self, span: Span, text: &str);
    /// Open an undo group: edits until the matching
    /// [`end_undo_group`](Self::end_undo_group) undo as one step.
    fn begin_undo_group(&mut self);
    fn end_undo_group(&mut self);

    /// Run `f` inside one undo group.
    fn undoable<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.begin_undo_group();
        let result = f(self);
        self.end_undo_group();
        result
    }
}
