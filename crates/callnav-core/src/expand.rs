//! Expand a selection to the largest unit satisfying a predicate.
//!
//! The host's `select-more` grows the selection one syntactic step at a
//! time. [`select_largest`] probes that chain up to a limit, remembers the
//! largest selection whose stripped text passes the predicate, puts the
//! selection and scroll position back the way they were, then commits the
//! winner. The host sees one selection change, not a flicker of probes.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::host::{CommandSink, HostCommand, TextSource, Viewport};
use crate::span::Span;

/// `name(.name)*`, optionally with one leading dot (`.attr` after a call).
static DOTTED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.?[a-zA-Z_][0-9a-zA-Z_]*(\.[a-zA-Z_][0-9a-zA-Z_]*)*$")
        .expect("dotted name pattern is valid")
});

const WHITESPACE: &[char] = &[' ', '\n', '\r', '\t', '\x0c', '\x0b'];

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Grow the selection with `select-more` at most `limit` times and select
/// the largest step whose trimmed text satisfies `predicate`.
///
/// Stops early once a step no longer changes the selection. Returns the
/// committed span, or `None` (selection unchanged) if no step matched.
pub fn select_largest<H, F>(host: &mut H, limit: usize, mut predicate: F) -> Option<Span>
where
    H: TextSource + CommandSink + Viewport,
    F: FnMut(&str) -> bool,
{
    let original = host.selection();
    let scroll = host.scroll_position();
    let text = host.text();

    let mut best = None;
    let mut last = original;
    for step in 0..limit {
        host.execute(HostCommand::SelectMore);
        let current = host.selection();
        if current == last {
            debug!(step, "select-more reached a fixpoint");
            break;
        }
        if predicate(selected_text(&text, current).trim()) {
            best = Some(current);
        }
        last = current;
    }

    host.set_selection(original);
    host.set_scroll_position(scroll);

    let best = best?;
    debug!(%best, "expanded selection");
    host.set_selection(best);
    Some(best)
}

fn selected_text(text: &str, span: Span) -> &str {
    let byte = |char_idx: usize| text.char_indices().nth(char_idx).map_or(text.len(), |(i, _)| i);
    let start = byte(span.start);
    let end = byte(span.end).max(start);
    &text[start..end]
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// True for `foo`, `foo.bar.baz`, and `.bar` (surrounding whitespace ignored).
#[must_use]
pub fn is_dotted_name(text: &str) -> bool {
    DOTTED_NAME.is_match(text.trim())
}

/// True when `text` contains none of space, tab, newline, carriage return,
/// form feed, vertical tab.
#[must_use]
pub fn is_whitespaceless_name(text: &str) -> bool {
    !text.contains(WHITESPACE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
