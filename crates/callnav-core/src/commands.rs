//! User-facing commands over a host editor.
//!
//! | Command                       | Entry point                                     |
//! |-------------------------------|-------------------------------------------------|
//! | next/previous invocation      | [`Navigator::select`] with [`Target::Invocation`]      |
//! | next/previous argument        | [`Navigator::select`] with [`Target::Argument`]        |
//! | next/previous keyword arg     | [`Navigator::select`] with [`Target::KeywordArgument`] |
//! | next/previous scope name      | [`Navigator::select`] with [`Target::ScopeName`]       |
//! | select expression / name      | [`Navigator::expand`] with a [`Shape`]                 |
//! | unpack tuple to one           | [`unpack_tuple_to_one`]                                |
//!
//! Every command is a no-op when there is nothing to do.

use tracing::debug;

use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::expand::{self, is_dotted_name, is_whitespaceless_name};
use crate::host::{CommandSink, EditableText, HostCommand, TextSource, Viewport};
use crate::navigate::{self, Direction};
use crate::resolve::ArgumentResolver;
use crate::scan;
use crate::span::Span;
use crate::word;

/// What a navigation command moves between.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    /// Invoked identifiers: `bar` in `foo.bar(baz)`.
    Invocation,
    /// Every argument of every call.
    Argument,
    /// Only `name=value` arguments.
    KeywordArgument,
    /// Names in `def name(` and `class name:`.
    ScopeName,
}

/// What an expansion command grows the selection into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    /// The largest text that parses as one Python expression.
    Expression,
    /// The largest `foo.bar.baz`.
    DottedName,
    /// The largest text without whitespace, e.g. `foo.bar(e=3)`.
    WhitespacelessName,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Runs navigation and expansion commands. Owns the argument resolver, so
/// its parse cache lives as long as the navigator.
pub struct Navigator {
    resolver: ArgumentResolver,
    config: Config,
}

impl Navigator {
    /// # Errors
    ///
    /// Returns an error if the Python grammar cannot be loaded.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            resolver: ArgumentResolver::new(&config)?,
            config,
        })
    }

    /// Candidate spans for `target` in `doc`.
    pub fn spans(&mut self, doc: &Document, target: Target) -> Vec<Span> {
        match target {
            Target::Invocation => scan::find_invocation_spans(doc),
            Target::Argument => self.resolver.argument_spans(doc, false),
            Target::KeywordArgument => self.resolver.argument_spans(doc, true),
            Target::ScopeName => scan::find_scope_name_spans(doc),
        }
    }

    /// Select the next or previous `target` relative to the host selection.
    ///
    /// Records a visit-history anchor before moving. Returns the new
    /// selection, or `None` with nothing changed.
    pub fn select<H>(&mut self, host: &mut H, target: Target, direction: Direction) -> Option<Span>
    where
        H: TextSource + CommandSink,
    {
        let doc = Document::new(host.text());
        let spans = self.spans(&doc, target);
        let selection = host.selection();
        let Some(chosen) = navigate::select(&spans, selection, direction) else {
            debug!(?target, ?direction, %selection, candidates = spans.len(), "nothing to select");
            return None;
        };
        host.execute(HostCommand::SetVisitHistoryAnchor);
        host.set_selection(chosen);
        Some(chosen)
    }

    /// Grow the host selection into the largest `shape` around it.
    pub fn expand<H>(&mut self, host: &mut H, shape: Shape) -> Option<Span>
    where
        H: TextSource + CommandSink + Viewport,
    {
        let limit = self.config.expansion_limit;
        match shape {
            Shape::Expression => {
                let syntax = self.resolver.parser_mut();
                expand::select_largest(host, limit, |text| syntax.is_expression(text))
            }
            Shape::DottedName => expand::select_largest(host, limit, is_dotted_name),
            Shape::WhitespacelessName => {
                expand::select_largest(host, limit, is_whitespaceless_name)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unpack tuple to one
// ---------------------------------------------------------------------------

/// Turn the plural word at the caret into a one-tuple: `things` becomes
/// `(thing,)`, ready for `(thing,) = things`.
///
/// `singularize` maps the plural word to its singular. Runs as one undo
/// step and leaves the caret after the inserted `)`. Returns the span of
/// the inserted text, or `None` (text untouched) when the caret is not on a
/// word ending in `s`.
pub fn unpack_tuple_to_one<H, F>(host: &mut H, singularize: F) -> Option<Span>
where
    H: EditableText,
    F: FnOnce(&str) -> String,
{
    let text = host.text();
    let word = word::word_at(&text, host.selection().end)?;
    let plural: String = text.chars().skip(word.start).take(word.len()).collect();
    if !plural.ends_with('s') {
        debug!(word = %plural, "not a plural word");
        return None;
    }
    let replacement = format!("({},)", singularize(&plural));
    let inserted = Span::new(word.start, word.start + replacement.chars().count());
    host.undoable(|host| {
        host.replace(word, &replacement);
        host.set_selection(Span::point(inserted.end));
    });
    Some(inserted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Minimal host: a string, a selection, and a log of what happened.
    #[derive(Default)]
    struct RecordingHost {
        text: String,
        selection: Span,
        scroll: usize,
        commands: Vec<HostCommand>,
        undo_depth: i32,
        grouped_edits: usize,
    }

    impl RecordingHost {
        fn new(text: &str, selection: Span) -> Self {
            Self {
                text: text.to_owned(),
                selection,
                ..Self::default()
            }
        }
    }

    impl TextSource for RecordingHost {
        fn text(&self) -> String {
            self.text.clone()
        }
        fn selection(&self) -> Span {
            self.selection
        }
        fn set_selection(&mut self, selection: Span) {
            self.selection = selection;
        }
    }

    impl CommandSink for RecordingHost {
        fn execute(&mut self, command: HostCommand) {
            self.commands.push(command);
        }
    }

    impl Viewport for RecordingHost {
        fn scroll_position(&self) -> usize {
            self.scroll
        }
        fn set_scroll_position(&mut self, line: usize) {
            self.scroll = line;
        }
    }

    impl EditableText for RecordingHost {
        fn replace(&mut self, span: Span, text: &str) {
            if self.undo_depth > 0 {
                self.grouped_edits += 1;
            }
            let doc = Document::new(self.text.as_str());
            let range = doc.byte_range(span);
            self.text.replace_range(range, text);
        }
        fn begin_undo_group(&mut self) {
            self.undo_depth += 1;
        }
        fn end_undo_group(&mut self) {
            self.undo_depth -= 1;
        }
    }

    fn navigator() -> Navigator {
        Navigator::new(Config::default()).unwrap()
    }

    fn singular(word: &str) -> String {
        word.strip_suffix('s').unwrap_or(word).to_owned()
    }

    // -- spans ----------------------------------------------------------------

    #[test]
    fn spans_per_target() {
        let doc = Document::new("def run(a, k=1):\n    go(a, k=k)\n");
        let mut nav = navigator();
        let texts = |spans: Vec<Span>| -> Vec<String> {
            spans.into_iter().map(|s| doc.slice(s).to_owned()).collect()
        };
        assert_eq!(texts(nav.spans(&doc, Target::Invocation)), vec!["go"]);
        assert_eq!(texts(nav.spans(&doc, Target::ScopeName)), vec!["run"]);
        assert_eq!(
            texts(nav.spans(&doc, Target::Argument)),
            vec!["a", "k=1", "a", "k=k"]
        );
        assert_eq!(
            texts(nav.spans(&doc, Target::KeywordArgument)),
            vec!["k=1", "k=k"]
        );
    }

    // -- select ---------------------------------------------------------------

    #[test]
    fn select_next_invocation_moves_and_anchors() {
        let mut host = RecordingHost::new("a = foo(1)\nb = bar(2)\n", Span::new(4, 7));
        let got = navigator().select(&mut host, Target::Invocation, Direction::Forward);
        assert_eq!(got, Some(Span::new(15, 18)));
        assert_eq!(host.selection, Span::new(15, 18));
        assert_eq!(host.commands, vec![HostCommand::SetVisitHistoryAnchor]);
    }

    #[test]
    fn select_previous_argument() {
        let mut host = RecordingHost::new("f(aa, bb, cc)", Span::point(10));
        let got = navigator().select(&mut host, Target::Argument, Direction::Backward);
        assert_eq!(got, Some(Span::new(6, 8)));
    }

    #[test]
    fn select_next_keyword_argument_skips_positional() {
        let mut host = RecordingHost::new("f(x, y, key=z)", Span::point(0));
        let got = navigator().select(&mut host, Target::KeywordArgument, Direction::Forward);
        assert_eq!(got, Some(Span::new(8, 13)));
    }

    #[test]
    fn select_nothing_changes_nothing() {
        let mut host = RecordingHost::new("x = 1\n", Span::point(2));
        let got = navigator().select(&mut host, Target::Invocation, Direction::Forward);
        assert_eq!(got, None);
        assert_eq!(host.selection, Span::point(2));
        assert!(host.commands.is_empty());
    }

    #[test]
    fn select_next_scope_name() {
        let text = "class A:\n    def m(self):\n        pass\n";
        let mut host = RecordingHost::new(text, Span::new(6, 7));
        let got = navigator().select(&mut host, Target::ScopeName, Direction::Forward);
        assert_eq!(got, Some(Span::new(17, 18)));
    }

    // -- expand ---------------------------------------------------------------

    #[test]
    fn expand_without_select_more_support_is_noop() {
        // RecordingHost ignores select-more, so the first probe is a fixpoint.
        let mut host = RecordingHost::new("foo.bar", Span::point(5));
        let got = navigator().expand(&mut host, Shape::DottedName);
        assert_eq!(got, None);
        assert_eq!(host.commands, vec![HostCommand::SelectMore]);
        assert_eq!(host.selection, Span::point(5));
    }

    // -- unpack_tuple_to_one --------------------------------------------------

    #[test]
    fn unpack_plural_word() {
        let mut host = RecordingHost::new("x = things\n", Span::point(10));
        let got = unpack_tuple_to_one(&mut host, singular);
        assert_eq!(got, Some(Span::new(4, 12)));
        assert_eq!(host.text, "x = (thing,)\n");
        assert_eq!(host.selection, Span::point(12));
        assert_eq!(host.grouped_edits, 1);
        assert_eq!(host.undo_depth, 0);
    }

    #[test]
    fn unpack_with_caret_inside_word() {
        let mut host = RecordingHost::new("for items in x", Span::point(5));
        unpack_tuple_to_one(&mut host, singular);
        assert_eq!(host.text, "for (item,) in x");
        assert_eq!(host.selection, Span::point(11));
    }

    #[test]
    fn unpack_uses_injected_singular() {
        let mut host = RecordingHost::new("indices", Span::point(7));
        unpack_tuple_to_one(&mut host, |_| "index".to_owned());
        assert_eq!(host.text, "(index,)");
    }

    #[test]
    fn unpack_ignores_non_plural() {
        let mut host = RecordingHost::new("x = thing", Span::point(9));
        assert_eq!(unpack_tuple_to_one(&mut host, singular), None);
        assert_eq!(host.text, "x = thing");
        assert_eq!(host.selection, Span::point(9));
    }

    #[test]
    fn unpack_without_word_is_noop() {
        let mut host = RecordingHost::new("a = (", Span::point(5));
        assert_eq!(unpack_tuple_to_one(&mut host, singular), None);
        assert_eq!(host.text, "a = (");
    }
}
