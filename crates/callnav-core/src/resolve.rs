//! Argument boundary resolution.
//!
//! A syntax tree tells us where each argument's *value* starts, but not
//! where the argument as typed starts or ends: keyword names, star prefixes,
//! surrounding whitespace, and separators are not part of the value node.
//! The resolver takes the parser's value positions as anchors and walks the
//! raw text between consecutive anchors to recover each argument's extent.
//!
//! # Algorithm
//!
//! 1. Strip `\r`, prefix a one-char placeholder name so `(a, b)` reads as the
//!    call `f(a, b)`, and parse it. Anything but exactly one well-formed call
//!    is unresolvable: the result is empty.
//! 2. Collect each argument value's `(line, col)` in source order and append
//!    a sentinel at the end of the text.
//! 3. Flatten positions through a [`LineTable`], drop the placeholder width,
//!    and map back across removed carriage returns.
//! 4. For each pair of anchors `(current, next)`:
//!    - **start**: just after the first `(` or `,` following the previous
//!      argument's end, skipping whitespace;
//!    - **end**: the last `,` or `)` before `next`, backed up over
//!      whitespace (and over a trailing comma before the closing `)`).
//!
//!    Comments are blanked out before scanning, so a `,` or `)` inside one
//!    is never taken for a delimiter. A scan that finds no delimiter drops
//!    that argument only.
//! 5. With `keywords_only`, keep spans that start with `name=` (never `==`).
//! 6. Trim whitespace, convert to char offsets, shift by the base offset.
//!
//! Steps 1-5 depend only on the call text and the flag, so they are cached.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::cache::{ArgCache, CacheKey};
use crate::config::Config;
use crate::document::{Document, Normalized};
use crate::error::Result;
use crate::position::LineTable;
use crate::scan;
use crate::span::Span;
use crate::syntax::{CallParser, PythonSyntax};

/// Stands in for the callee name that the call text no longer carries.
const PLACEHOLDER: &str = "f";

/// `name =` at the start of an argument, where the `=` is not part of `==`.
static KEYWORD_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*[A-Za-z_][A-Za-z_0-9]*[ \t]*=(?:[^=]|$)")
        .expect("keyword argument pattern is valid")
});

// ---------------------------------------------------------------------------
// ArgumentResolver
// ---------------------------------------------------------------------------

/// Resolves raw argument spans for call expressions, with a bounded cache.
pub struct ArgumentResolver<P = PythonSyntax> {
    parser: P,
    cache: ArgCache,
}

impl ArgumentResolver<PythonSyntax> {
    /// A resolver backed by tree-sitter-python, sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Python grammar cannot be loaded.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_parser(PythonSyntax::new()?, config.cache_capacity))
    }
}

impl<P: CallParser> ArgumentResolver<P> {
    /// A resolver over any [`CallParser`], caching up to `cache_capacity`
    /// call texts.
    #[must_use]
    pub fn with_parser(parser: P, cache_capacity: usize) -> Self {
        Self {
            parser,
            cache: ArgCache::new(cache_capacity),
        }
    }

    /// The parser, for callers that need other syntax queries.
    pub const fn parser_mut(&mut self) -> &mut P {
        &mut self.parser
    }

    /// The cache, for inspection.
    #[must_use]
    pub const fn cache(&self) -> &ArgCache {
        &self.cache
    }

    /// Argument spans of one call.
    ///
    /// `call_text` is the parenthesized group, `(` through its matching `)`,
    /// and `base_offset` is the char offset of that `(` in the document. The
    /// returned spans are document char offsets in source order, or empty
    /// when the call cannot be resolved.
    pub fn resolve(
        &mut self,
        call_text: &str,
        base_offset: usize,
        keywords_only: bool,
    ) -> Vec<Span> {
        let key = CacheKey::new(call_text, keywords_only);
        let relative = if let Some(spans) = self.cache.get(&key) {
            spans.to_vec()
        } else {
            let spans = relative_argument_spans(&mut self.parser, call_text, keywords_only);
            self.cache.insert(key, spans.clone());
            spans
        };
        relative.into_iter().map(|s| s.shifted(base_offset)).collect()
    }

    /// Argument spans of every call in the document, grouped by call in
    /// the order the calls appear.
    ///
    /// Nested calls contribute their own arguments, so spans may overlap;
    /// the navigation driver sorts them as it needs.
    pub fn argument_spans(&mut self, doc: &Document, keywords_only: bool) -> Vec<Span> {
        let mut spans = Vec::new();
        for group in scan::find_call_parenthesis_spans(doc) {
            let call_text = doc.slice(group);
            spans.extend(self.resolve(call_text, group.start, keywords_only));
        }
        debug!(
            spans = spans.len(),
            cached = self.cache.len(),
            hits = self.cache.hits(),
            misses = self.cache.misses(),
            "resolved arguments"
        );
        spans
    }
}

// ---------------------------------------------------------------------------
// Boundary recovery
// ---------------------------------------------------------------------------

/// Steps 1-6 without the base shift: spans are char offsets into `call_text`.
fn relative_argument_spans<P: CallParser>(
    parser: &mut P,
    call_text: &str,
    keywords_only: bool,
) -> Vec<Span> {
    let normalized = Normalized::new(call_text);
    let source = format!("{PLACEHOLDER}{}", normalized.text());
    let Some(starts) = parser.argument_starts(&source) else {
        debug!(len = call_text.len(), "call is unresolvable");
        return Vec::new();
    };

    let table = LineTable::new(&source);
    let mut anchors: Vec<usize> = starts
        .into_iter()
        .filter_map(|pos| table.offset(pos))
        .map(|offset| normalized.to_raw(offset.saturating_sub(PLACEHOLDER.len())))
        .collect();
    anchors.push(call_text.len());

    // Same offsets as `call_text`, with every comment byte turned to a space.
    let mut masked = call_text.as_bytes().to_vec();
    for range in parser.comment_ranges(&source) {
        let start = normalized.to_raw(range.start.saturating_sub(PLACEHOLDER.len()));
        let end = normalized.to_raw(range.end.saturating_sub(PLACEHOLDER.len()));
        if let Some(comment) = masked.get_mut(start..end) {
            comment.fill(b' ');
        }
    }
    let bytes = masked.as_slice();
    let mut spans = Vec::with_capacity(anchors.len() - 1);
    let mut previous_end = 0;
    for pair in anchors.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let Some(start) = find_start(bytes, previous_end, current) else {
            debug!(current, "no delimiter before argument");
            continue;
        };
        let Some(end) = find_end(bytes, start, next) else {
            debug!(start, next, "no delimiter after argument");
            continue;
        };
        previous_end = end;

        if keywords_only && !is_keyword_argument(&call_text[start..end]) {
            continue;
        }
        let (start, end) = trim_whitespace(bytes, start, end);
        spans.push(Span::new(
            char_offset(call_text, start),
            char_offset(call_text, end),
        ));
    }
    spans
}

/// Raw start of the argument whose value starts at `current`: just past the
/// first `(` or `,` in `[from, current)`, then past any whitespace.
fn find_start(bytes: &[u8], from: usize, current: usize) -> Option<usize> {
    let window = bytes.get(from..current)?;
    let delimiter = window.iter().position(|&b| b == b'(' || b == b',')?;
    let mut start = from + delimiter + 1;
    while start < current && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    Some(start)
}

/// Raw end of the argument starting at `start`: before the last `,` or `)`
/// in `[start, next)`, backed up over whitespace. A trailing comma right
/// before the closing parenthesis is excluded too.
fn find_end(bytes: &[u8], start: usize, next: usize) -> Option<usize> {
    let window = bytes.get(start..next)?;
    let delimiter = window.iter().rposition(|&b| b == b',' || b == b')')?;
    let mut end = back_over_whitespace(bytes, start, start + delimiter);
    if bytes[start + delimiter] == b')' && end > start && bytes[end - 1] == b',' {
        end = back_over_whitespace(bytes, start, end - 1);
    }
    Some(end)
}

fn back_over_whitespace(bytes: &[u8], floor: usize, mut end: usize) -> usize {
    while end > floor && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    end
}

fn trim_whitespace(bytes: &[u8], mut start: usize, end: usize) -> (usize, usize) {
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    (start, back_over_whitespace(bytes, start, end))
}

/// True when `text` begins with `name=` (but not `name==`).
#[must_use]
pub fn is_keyword_argument(text: &str) -> bool {
    KEYWORD_ARGUMENT.is_match(text)
}

/// Char offset of a byte offset within `text`.
fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
