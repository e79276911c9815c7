//! Word classification and current-word lookup.
//!
//! A **word** is a run of word characters: letters, digits, underscore.
//! Everything else separates words. `foo.bar_baz` holds two words, `foo`
//! and `bar_baz`.

use crate::span::Span;

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Non-blank, non-word characters (operators, brackets, etc.).
    Punctuation,
    /// Whitespace within a line (space, tab).
    Blank,
    /// Line ending (`\n`, `\r`).
    Newline,
}

/// Classify a character.
#[must_use]
pub fn classify(ch: char) -> CharClass {
    if ch == '\n' || ch == '\r' {
        CharClass::Newline
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

// ---------------------------------------------------------------------------
// Current word
// ---------------------------------------------------------------------------

/// The word under the caret, in char offsets.
///
/// The caret sits *between* chars. A word that contains the caret wins; a
/// caret right after a word (`things|`) selects that word. `None` when the
/// caret touches no word character on either side.
#[must_use]
pub fn word_at(text: &str, caret: usize) -> Option<Span> {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());
    let is_word = |i: usize| classify(chars[i]) == CharClass::Word;

    let anchor = if caret < chars.len() && is_word(caret) {
        caret
    } else if caret > 0 && is_word(caret - 1) {
        caret - 1
    } else {
        return None;
    };

    let mut start = anchor;
    while start > 0 && is_word(start - 1) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < chars.len() && is_word(end) {
        end += 1;
    }
    Some(Span::new(start, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
