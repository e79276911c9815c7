//! Python syntax queries via tree-sitter.
//!
//! The resolver needs one capability from a parser: "parse this as a single
//! call and tell me where each argument's value starts". That is the
//! [`CallParser`] trait, which can also report comment ranges so the
//! delimiter scans skip them. [`PythonSyntax`] implements it on top of
//! tree-sitter-python and also answers the questions the expansion commands
//! ask: is this text one expression, and what is the next larger syntax node
//! around a range.
//!
//! Every query is a full parse from scratch. Calls and selections are small,
//! and tree-sitter is fast enough that caching trees buys nothing here.

use std::ops::Range;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::Result;
use crate::position::Position;

// ---------------------------------------------------------------------------
// CallParser
// ---------------------------------------------------------------------------

/// Parses one call expression and reports its argument value positions.
pub trait CallParser {
    /// Parse `source` as a single call expression.
    ///
    /// Returns the start of every argument's *value*, in source order:
    /// positional arguments (for binary operations, the leftmost operand),
    /// keyword argument values, and the operands of `*args` / `**kwargs`.
    ///
    /// Returns `None` when `source` does not parse, contains syntax errors,
    /// or is anything other than exactly one call.
    fn argument_starts(&mut self, source: &str) -> Option<Vec<Position>>;

    /// Byte ranges of the comments in `source`, in source order.
    ///
    /// Parsers that don't track comments report none.
    fn comment_ranges(&mut self, _source: &str) -> Vec<Range<usize>> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// PythonSyntax
// ---------------------------------------------------------------------------

/// A tree-sitter parser loaded with the Python grammar.
pub struct PythonSyntax {
    parser: Parser,
}

impl PythonSyntax {
    /// Create a parser for Python.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Language`](crate::Error::Language) if the grammar's
    /// ABI version is not supported by the linked tree-sitter runtime.
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parse `source` into a tree. `None` only if tree-sitter gives up
    /// (cancellation or timeout, neither of which we configure).
    fn parse(&mut self, source: &str) -> Option<Tree> {
        self.parser.parse(source, None)
    }

    /// True when `source` is exactly one Python expression.
    ///
    /// Tuples without parentheses (`a, b`) count, assignments do not.
    /// Carriage returns are ignored.
    pub fn is_expression(&mut self, source: &str) -> bool {
        let source = source.replace('\r', "");
        let Some(tree) = self.parse(&source) else {
            return false;
        };
        let root = tree.root_node();
        if root.has_error() {
            return false;
        }
        let Some(statement) = single_statement(root) else {
            return false;
        };
        if statement.kind() != "expression_statement" {
            return false;
        }
        let mut cursor = statement.walk();
        let is_expression = statement.named_child_count() > 0
            && statement.named_children(&mut cursor).all(|child| {
                !matches!(child.kind(), "assignment" | "augmented_assignment" | "comment")
            });
        is_expression
    }

    /// The byte range of the smallest named syntax node that strictly
    /// contains `range`, i.e. the next step of "select more".
    ///
    /// For an empty `range`, the smallest named node at that offset is
    /// returned even if it is a single token. Returns `None` when no larger
    /// node exists.
    pub fn enclosing_range(&mut self, source: &str, range: Range<usize>) -> Option<Range<usize>> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        let mut node = root.named_descendant_for_byte_range(range.start, range.end)?;
        while !strictly_contains(node.byte_range(), &range) {
            node = node.parent()?;
        }
        Some(node.byte_range())
    }
}

impl CallParser for PythonSyntax {
    fn argument_starts(&mut self, source: &str) -> Option<Vec<Position>> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }
        let statement = single_statement(root)?;
        if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
            return None;
        }
        let call = statement.named_child(0)?;
        if call.kind() != "call" {
            return None;
        }
        let arguments = call.child_by_field_name("arguments")?;

        let mut starts = Vec::new();
        if arguments.kind() == "generator_expression" {
            // `f(x for x in y)`: the generator is the single argument.
            let body = arguments.child_by_field_name("body")?;
            starts.push(leftmost_operand(body).start_position().into());
            return Some(starts);
        }

        let mut cursor = arguments.walk();
        for argument in arguments.named_children(&mut cursor) {
            let value = match argument.kind() {
                "comment" => continue,
                "keyword_argument" => argument.child_by_field_name("value")?,
                "list_splat" | "dictionary_splat" => first_named_child(argument)?,
                _ => leftmost_operand(argument),
            };
            starts.push(value.start_position().into());
        }
        Some(starts)
    }

    fn comment_ranges(&mut self, source: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let Some(tree) = self.parse(source) else {
            return ranges;
        };
        let mut cursor = tree.walk();
        loop {
            let node = cursor.node();
            if node.kind() == "comment" {
                ranges.push(node.byte_range());
            } else if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return ranges;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The only non-comment statement under `root`, if there is exactly one.
fn single_statement(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    let mut statements = root
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment");
    let first = statements.next()?;
    statements.next().is_none().then_some(first)
}

/// Descend through binary operations to their leftmost operand.
fn leftmost_operand(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "binary_operator" {
        match node.child_by_field_name("left") {
            Some(left) => node = left,
            None => break,
        }
    }
    node
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

fn strictly_contains(outer: Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end && outer != *inner
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
