//! Next/previous selection over a span list.
//!
//! One driver serves every entity kind: invocations, arguments, keyword
//! arguments, scope names. The caller provides the candidate spans and the
//! current selection; the driver sorts by the relevant edge and binary
//! searches for the neighbour.
//!
//! | Direction  | Sort key     | Pivot                | Picks                        |
//! |------------|--------------|----------------------|------------------------------|
//! | `Forward`  | `span.end`   | `selection.end + 1`  | first span with `end >= pivot` |
//! | `Backward` | `span.start` | `selection.start - 1`| last span with `start < pivot` |
//!
//! The `+ 1` means a span that ends exactly at the caret is not "next":
//! after selecting `foo` the next command moves past it.

use crate::span::Span;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Navigation direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The span to select next from `spans`, moving away from `selection` in
/// `direction`. `None` when nothing lies that way.
#[must_use]
pub fn select(spans: &[Span], selection: Span, direction: Direction) -> Option<Span> {
    match direction {
        Direction::Forward => next_span(spans, selection.end + 1),
        Direction::Backward => previous_span(spans, selection.start.checked_sub(1)?),
    }
}

fn next_span(spans: &[Span], pivot: usize) -> Option<Span> {
    let mut by_end = spans.to_vec();
    by_end.sort_by_key(|s| s.end);
    let i = by_end.partition_point(|s| s.end < pivot);
    by_end.get(i).copied()
}

fn previous_span(spans: &[Span], pivot: usize) -> Option<Span> {
    let mut by_start = spans.to_vec();
    by_start.sort_by_key(|s| s.start);
    let i = by_start.partition_point(|s| s.start < pivot);
    i.checked_sub(1).map(|i| by_start[i])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
