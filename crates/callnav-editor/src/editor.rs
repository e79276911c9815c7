//! The reference host: a buffer, a selection, a viewport, and history.
//!
//! `Editor` implements every host trait from [`callnav_core::host`], so the
//! navigation, expansion, and unpack commands can run against it exactly as
//! they would inside a real editor.
//!
//! `select-more` is syntax-aware: it grows the selection to the smallest
//! named Python syntax node that strictly contains it, using the same
//! tree-sitter grammar as the argument resolver.

use std::path::Path;

use callnav_core::host::{CommandSink, EditableText, HostCommand, TextSource, Viewport};
use callnav_core::syntax::PythonSyntax;
use callnav_core::{Error, Result, Span};
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::history::History;
use crate::jumplist::JumpList;

/// Visible lines when no height is given.
const DEFAULT_HEIGHT: usize = 40;

/// An in-memory editor over one buffer.
pub struct Editor {
    buffer: Buffer,
    selection: Span,
    /// First visible line.
    top_line: usize,
    /// Number of visible lines.
    height: usize,
    jumps: JumpList,
    history: History,
    /// Nesting depth of open undo groups.
    undo_depth: usize,
    syntax: PythonSyntax,
}

impl Editor {
    // -- Construction -------------------------------------------------------

    /// An editor over `text` with the caret at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the Python grammar cannot be loaded.
    pub fn new(text: &str) -> Result<Self> {
        Self::with_buffer(Buffer::from_text(text))
    }

    /// An editor over the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or an error if the
    /// Python grammar cannot be loaded.
    pub fn open(path: &Path) -> Result<Self> {
        let buffer = Buffer::from_file(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_buffer(buffer)
    }

    fn with_buffer(buffer: Buffer) -> Result<Self> {
        Ok(Self {
            buffer,
            selection: Span::point(0),
            top_line: 0,
            height: DEFAULT_HEIGHT,
            jumps: JumpList::new(),
            history: History::new(),
            undo_depth: 0,
            syntax: PythonSyntax::new()?,
        })
    }

    /// Set the number of visible lines (at least 1).
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height.max(1);
        self
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn jumps(&self) -> &JumpList {
        &self.jumps
    }

    /// The selected text.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.buffer.slice(self.selection).to_string()
    }

    // -- Selection and scrolling --------------------------------------------

    /// Scroll so the start of the selection is on screen.
    fn ensure_selection_visible(&mut self) {
        let line = self.buffer.char_to_line(self.selection.start);
        if line < self.top_line {
            self.top_line = line;
        }
        if line >= self.top_line + self.height {
            self.top_line = line - self.height + 1;
        }
    }

    /// Grow the selection to the enclosing syntax node. No-op at the top.
    pub fn select_more(&mut self) {
        let text = self.buffer.contents();
        let start = self.buffer.char_to_byte(self.selection.start);
        let end = self.buffer.char_to_byte(self.selection.end);
        let Some(grown) = self.syntax.enclosing_range(&text, start..end) else {
            trace!(selection = %self.selection, "select-more: nothing larger");
            return;
        };
        let grown = Span::new(
            self.buffer.byte_to_char(grown.start),
            self.buffer.byte_to_char(grown.end),
        );
        trace!(from = %self.selection, to = %grown, "select-more");
        self.selection = grown;
        self.ensure_selection_visible();
    }

    // -- History ------------------------------------------------------------

    /// Jump back to the previous visit-history anchor.
    pub fn jump_back(&mut self) -> Option<Span> {
        let target = self.jumps.back(self.selection)?;
        self.set_selection(target);
        Some(self.selection)
    }

    /// Jump forward again after [`jump_back`](Self::jump_back).
    pub fn jump_forward(&mut self) -> Option<Span> {
        let target = self.jumps.forward()?;
        self.set_selection(target);
        Some(self.selection)
    }

    /// Undo the last edit group.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.buffer) {
            Some(selection) => {
                self.set_selection(selection);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone edit group.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.buffer) {
            Some(selection) => {
                self.set_selection(selection);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Host traits
// ---------------------------------------------------------------------------

impl TextSource for Editor {
    fn text(&self) -> String {
        self.buffer.contents()
    }

    fn selection(&self) -> Span {
        self.selection
    }

    fn set_selection(&mut self, selection: Span) {
        self.selection = self.buffer.clamp(selection);
        self.ensure_selection_visible();
    }
}

impl CommandSink for Editor {
    fn execute(&mut self, command: HostCommand) {
        debug!(%command, "execute");
        match command {
            HostCommand::SetVisitHistoryAnchor => self.jumps.push(self.selection),
            HostCommand::SelectMore => self.select_more(),
        }
    }
}

impl Viewport for Editor {
    fn scroll_position(&self) -> usize {
        self.top_line
    }

    fn set_scroll_position(&mut self, line: usize) {
        self.top_line = line.min(self.buffer.line_count().saturating_sub(1));
    }
}

impl EditableText for Editor {
    fn replace(&mut self, span: Span, text: &str) {
        let span = self.buffer.clamp(span);
        let removed = self.buffer.slice(span).to_string();
        let implicit_group = self.undo_depth == 0;
        if implicit_group {
            self.history.begin(self.selection);
        }
        if !removed.is_empty() {
            self.history.record_delete(span.start, &removed);
        }
        if !text.is_empty() {
            self.history.record_insert(span.start, text);
        }
        self.buffer.replace(span, text);
        if implicit_group {
            self.history.commit(self.selection);
        }
    }

    fn begin_undo_group(&mut self) {
        if self.undo_depth == 0 {
            self.history.begin(self.selection);
        }
        self.undo_depth += 1;
    }

    fn end_undo_group(&mut self) {
        match self.undo_depth {
            0 => {}
            1 => {
                self.undo_depth = 0;
                self.history.commit(self.selection);
            }
            _ => self.undo_depth -= 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use callnav_core::{unpack_tuple_to_one, Config, Direction, Navigator, Shape, Target};
    use pretty_assertions::assert_eq;

    fn editor(text: &str, selection: Span) -> Editor {
        let mut ed = Editor::new(text).unwrap();
        ed.set_selection(selection);
        ed
    }

    fn navigator() -> Navigator {
        Navigator::new(Config::default()).unwrap()
    }

    fn singular(word: &str) -> String {
        word.strip_suffix('s').unwrap_or(word).to_owned()
    }

    // -- select-more --------------------------------------------------------

    #[test]
    fn select_more_grows_through_syntax() {
        let mut ed = editor("x = foo.bar(baz)\n", Span::point(9));
        ed.select_more();
        assert_eq!(ed.selected_text(), "bar");
        ed.select_more();
        assert_eq!(ed.selected_text(), "foo.bar");
        ed.select_more();
        assert_eq!(ed.selected_text(), "foo.bar(baz)");
    }

    #[test]
    fn select_more_uses_char_offsets() {
        let mut ed = editor("é = foo.bar(baz)\n", Span::point(9));
        ed.select_more();
        assert_eq!(ed.selection(), Span::new(8, 11));
        assert_eq!(ed.selected_text(), "bar");
    }

    // -- Navigation ---------------------------------------------------------

    #[test]
    fn navigation_records_visit_history() {
        let text = "a = foo(1)\nb = bar(2)\nc = baz(3)\n";
        let mut ed = editor(text, Span::point(0));
        let mut nav = navigator();

        nav.select(&mut ed, Target::Invocation, Direction::Forward);
        assert_eq!(ed.selected_text(), "foo");
        nav.select(&mut ed, Target::Invocation, Direction::Forward);
        assert_eq!(ed.selected_text(), "bar");
        assert_eq!(ed.jumps().len(), 2);

        assert_eq!(ed.jump_back(), Some(Span::new(4, 7)));
        assert_eq!(ed.jump_back(), Some(Span::point(0)));
        assert_eq!(ed.jump_forward(), Some(Span::new(4, 7)));
    }

    #[test]
    fn walk_arguments_forward_and_back() {
        let mut ed = editor("result = call(first, key=second, *rest)\n", Span::point(14));
        let mut nav = navigator();
        let mut seen = Vec::new();
        while nav.select(&mut ed, Target::Argument, Direction::Forward).is_some() {
            seen.push(ed.selected_text());
        }
        assert_eq!(seen, vec!["first", "key=second", "*rest"]);

        nav.select(&mut ed, Target::Argument, Direction::Backward);
        assert_eq!(ed.selected_text(), "key=second");
    }

    #[test]
    fn keyword_argument_navigation() {
        let mut ed = editor("f(a, c, b=1, d=2)", Span::point(0));
        let mut nav = navigator();
        nav.select(&mut ed, Target::KeywordArgument, Direction::Forward);
        assert_eq!(ed.selected_text(), "b=1");
        nav.select(&mut ed, Target::KeywordArgument, Direction::Forward);
        assert_eq!(ed.selected_text(), "d=2");
        assert_eq!(nav.select(&mut ed, Target::KeywordArgument, Direction::Forward), None);
    }

    #[test]
    fn scope_name_navigation() {
        let text = "class Shape:\n    def area(self):\n        pass\n\ndef main():\n    pass\n";
        let mut ed = editor(text, Span::point(0));
        let mut nav = navigator();
        let mut seen = Vec::new();
        while nav.select(&mut ed, Target::ScopeName, Direction::Forward).is_some() {
            seen.push(ed.selected_text());
        }
        assert_eq!(seen, vec!["Shape", "area", "main"]);
    }

    #[test]
    fn navigation_scrolls_to_target() {
        let mut text = String::new();
        for i in 0..50 {
            text.push_str(&format!("x{i} = {i}\n"));
        }
        text.push_str("y = call(1)\n");
        let mut ed = editor(&text, Span::point(0)).with_height(10);
        navigator().select(&mut ed, Target::Invocation, Direction::Forward);
        assert_eq!(ed.selected_text(), "call");
        assert_eq!(ed.scroll_position(), 41);
    }

    // -- Expansion ----------------------------------------------------------

    #[test]
    fn expand_to_dotted_name() {
        let mut ed = editor("x = foo.bar(baz)\n", Span::point(9));
        let got = navigator().expand(&mut ed, Shape::DottedName);
        assert_eq!(got, Some(Span::new(4, 11)));
        assert_eq!(ed.selected_text(), "foo.bar");
    }

    #[test]
    fn expand_to_expression() {
        let mut ed = editor("x = foo.bar(baz)\n", Span::point(9));
        navigator().expand(&mut ed, Shape::Expression);
        assert_eq!(ed.selected_text(), "foo.bar(baz)");
    }

    #[test]
    fn expand_to_whitespaceless_name() {
        let mut ed = editor("x = foo.bar(e=3) + 1\n", Span::point(9));
        navigator().expand(&mut ed, Shape::WhitespacelessName);
        assert_eq!(ed.selected_text(), "foo.bar(e=3)");
    }

    #[test]
    fn expand_restores_scroll() {
        let mut ed = editor("x = foo.bar(baz)\n", Span::point(9));
        ed.set_scroll_position(0);
        navigator().expand(&mut ed, Shape::Expression);
        assert_eq!(ed.scroll_position(), 0);
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn unpack_tuple_is_one_undo_step() {
        let mut ed = editor("for x in things:\n", Span::point(15));
        let got = unpack_tuple_to_one(&mut ed, singular);
        assert_eq!(got, Some(Span::new(9, 17)));
        assert_eq!(ed.text(), "for x in (thing,):\n");
        assert_eq!(ed.selection(), Span::point(17));

        assert!(ed.undo());
        assert_eq!(ed.text(), "for x in things:\n");
        assert_eq!(ed.selection(), Span::point(15));
        assert!(ed.redo());
        assert_eq!(ed.text(), "for x in (thing,):\n");
        assert_eq!(ed.selection(), Span::point(17));
    }

    #[test]
    fn replace_outside_group_is_its_own_step() {
        let mut ed = editor("abc", Span::point(0));
        ed.replace(Span::new(0, 1), "x");
        ed.replace(Span::new(1, 2), "y");
        assert_eq!(ed.text(), "xyc");
        ed.undo();
        assert_eq!(ed.text(), "xbc");
    }

    #[test]
    fn nested_undo_groups_commit_once() {
        let mut ed = editor("abc", Span::point(0));
        ed.begin_undo_group();
        ed.replace(Span::new(0, 1), "x");
        ed.begin_undo_group();
        ed.replace(Span::new(1, 2), "y");
        ed.end_undo_group();
        ed.end_undo_group();
        ed.undo();
        assert_eq!(ed.text(), "abc");
    }

    #[test]
    fn open_reads_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"f(a)\n").unwrap();
        let ed = Editor::open(file.path()).unwrap();
        assert_eq!(ed.text(), "f(a)\n");
        assert!(matches!(
            Editor::open(Path::new("/nonexistent/x.py")),
            Err(Error::Io { .. })
        ));
    }
}
