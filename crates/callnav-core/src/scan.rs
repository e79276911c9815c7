//! Call-site scanning: invocations, call-parenthesis groups, scope names.
//!
//! These are pattern scans, not parses. They run over the whole document and
//! return spans in document order. Absence of matches is an empty vector,
//! never an error.
//!
//! # Patterns
//!
//! | Scan                            | Matches                                   |
//! |---------------------------------|-------------------------------------------|
//! | [`find_invocation_spans`]       | `name (`, not after `def `/`class `       |
//! | [`find_call_parenthesis_spans`] | the balanced `( ... )` after any `name (` |
//! | [`find_scope_name_spans`]       | `name` in `def name(` / `class name:`     |
//!
//! The `regex` crate has no look-behind, so the "not preceded by" conditions
//! are checked on each candidate match. A rejected candidate can never hide
//! a valid one: every later start inside it is itself preceded by an
//! identifier character.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::span::Span;

/// An identifier followed by optional spaces and an opening parenthesis.
static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z_0-9]*) *\(").expect("call pattern is valid")
});

/// `def`/`class` at text start or after whitespace, then the scope name,
/// then `(` or `:` possibly on a later line.
static SCOPE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[ \t\r\n])(?:def|class) +([a-zA-Z_][0-9a-zA-Z_]*)[ \t\r\n]*[(:]")
        .expect("scope name pattern is valid")
});

/// Reserved words of Python 3. `print(x)` and `exec(x)` are calls.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

// ---------------------------------------------------------------------------
// Public scans
// ---------------------------------------------------------------------------

/// Spans of every invoked identifier, e.g. `bar` in `foo.bar(baz)`.
///
/// Excludes reserved keywords (`if (x)`), identifiers glued to a preceding
/// identifier character, and definition headers (`def foo(`, `class Foo(`).
#[must_use]
pub fn find_invocation_spans(doc: &Document) -> Vec<Span> {
    call_candidates(doc.text(), true)
        .map(|c| doc.span_from_bytes(c.name_start, c.name_end))
        .collect()
}

/// Spans of the parenthesized group following every call-like identifier.
///
/// Definition headers are *not* excluded here: their parameter lists are
/// harmless and the spans only delimit argument lists. A group that never
/// closes yields a zero-width span at its `(`.
#[must_use]
pub fn find_call_parenthesis_spans(doc: &Document) -> Vec<Span> {
    let text = doc.text();
    call_candidates(text, false)
        .map(|c| {
            let end = balanced_group_end(text, c.paren).unwrap_or(c.paren);
            doc.span_from_bytes(c.paren, end)
        })
        .collect()
}

/// Spans of the names in `def name(` and `class name(` / `class name:`.
#[must_use]
pub fn find_scope_name_spans(doc: &Document) -> Vec<Span> {
    SCOPE_NAME_PATTERN
        .captures_iter(doc.text())
        .filter_map(|caps| caps.get(1))
        .map(|name| doc.span_from_bytes(name.start(), name.end()))
        .collect()
}

/// Byte offset just past the `)` that balances the `(` at `open`.
///
/// Scans forward counting nesting depth. Parentheses inside string literals
/// and comments are counted too. Returns `None` if `open` is not a `(` or
/// the group never closes.
#[must_use]
pub fn balanced_group_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// True for reserved Python keywords.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

// ---------------------------------------------------------------------------
// Candidate matching
// ---------------------------------------------------------------------------

/// One `name (` match, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CallCandidate {
    name_start: usize,
    name_end: usize,
    /// Offset of the `(`.
    paren: usize,
}

fn call_candidates(text: &str, skip_definitions: bool) -> impl Iterator<Item = CallCandidate> + '_ {
    CALL_PATTERN.captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        let before = &text[..name.start()];
        if before.bytes().next_back().is_some_and(is_identifier_byte) {
            return None;
        }
        if skip_definitions && (before.ends_with("def ") || before.ends_with("class ")) {
            return None;
        }
        if is_keyword(name.as_str()) {
            return None;
        }
        Some(CallCandidate {
            name_start: name.start(),
            name_end: name.end(),
            paren: whole.end() - 1,
        })
    })
}

const fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
