//! Visit history: selections recorded before navigation jumps.
//!
//! Every navigation command fires `set-visit-history-anchor` before it moves
//! the selection, and the host answers by pushing the pre-jump selection
//! here. [`JumpList::back`] and [`JumpList::forward`] walk the history the
//! way a browser does.

use callnav_core::Span;

/// Maximum number of entries kept.
const JUMPLIST_MAX: usize = 100;

/// Selection history for jump navigation.
///
/// The list keeps a pointer into its entries. When the pointer is at the end
/// we are at the "live" selection. The first `back()` saves the live
/// selection so `forward()` can return to it.
///
/// Pushing a selection equal to the most recent entry does nothing.
#[derive(Debug, Default)]
pub struct JumpList {
    entries: Vec<Span>,
    /// Index into `entries`; `entries.len()` when live.
    current: usize,
}

impl JumpList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
        }
    }

    /// Record `selection` before a jump. Entries after the pointer are
    /// discarded when navigating mid-list.
    pub fn push(&mut self, selection: Span) {
        if self.current < self.entries.len() {
            self.entries.truncate(self.current);
        }
        if self.entries.last() != Some(&selection) {
            self.entries.push(selection);
            if self.entries.len() > JUMPLIST_MAX {
                self.entries.remove(0);
            }
        }
        self.current = self.entries.len();
    }

    /// Step back. `live` is the current selection, saved on the first step
    /// back from the live position.
    pub fn back(&mut self, live: Span) -> Option<Span> {
        if self.entries.is_empty() {
            return None;
        }
        if self.current >= self.entries.len() {
            if self.entries.last() != Some(&live) {
                self.entries.push(live);
                if self.entries.len() > JUMPLIST_MAX + 1 {
                    self.entries.remove(0);
                }
            }
            self.current = self.entries.len() - 1;
        }
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.entries[self.current])
    }

    /// Step forward toward the live selection.
    pub fn forward(&mut self) -> Option<Span> {
        if self.current + 1 >= self.entries.len() {
            return None;
        }
        self.current += 1;
        Some(self.entries[self.current])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
