use std::fmt::{self, Write};
use std::ops;

use crate::lang::kind::NodeKind;
use crate::lang::language::Language;

/// A zero-based row and byte column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Point { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_point: Point,
    pub end_point: Point,
}

/// Maps byte offsets to points.
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex { line_starts }
    }

    pub(crate) fn point(&self, offset: usize) -> Point {
        let row = match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(next) => next - 1,
        };
        Point::new(row, offset - self.line_starts[row])
    }
}

pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) field: Option<&'static str>,
    pub(crate) start_byte: usize,
    pub(crate) end_byte: usize,
    pub(crate) start_position: Point,
    pub(crate) end_position: Point,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
}

/// A concrete syntax tree. Owns its source text; nodes are stored in a flat
/// arena in pre-order, so the root is always the first entry.
pub struct Tree {
    language: Language,
    source: String,
    nodes: Vec<NodeData>,
}

impl Tree {
    pub(crate) fn new(language: Language, source: String, nodes: Vec<NodeData>) -> Self {
        Tree {
            language,
            source,
            nodes,
        }
    }

    pub fn root_node(&self) -> Node<'_> {
        Node { tree: self, id: 0 }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The file named by a leading `"..." include` directive.
    pub fn include_path(&self) -> Option<&str> {
        let directive = self
            .root_node()
            .children()
            .find(|n| n.kind() == NodeKind::IncludeDirective)?;
        let text = directive.text();
        let start = text.find('"')? + 1;
        let end = start + text[start..].find('"')?;
        Some(&text[start..end])
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{Tree {:?}}}", self.root_node())
    }
}

/// A borrowed view of a single node in a [`Tree`].
#[derive(Copy, Clone)]
pub struct Node<'tree> {
    tree: &'tree Tree,
    id: usize,
}

impl<'tree> Node<'tree> {
    fn data(&self) -> &'tree NodeData {
        &self.tree.nodes[self.id]
    }

    fn at(&self, id: usize) -> Node<'tree> {
        Node {
            tree: self.tree,
            id,
        }
    }

    /// Position of the node in its tree's arena.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn tree(&self) -> &'tree Tree {
        self.tree
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.data().kind.as_str()
    }

    pub fn is_named(&self) -> bool {
        self.data().kind.is_named()
    }

    /// Whether this node covers text the grammar does not recognize.
    pub fn is_error(&self) -> bool {
        self.data().kind == NodeKind::Error
    }

    /// Whether this node or anything below it is an `ERROR` node.
    pub fn has_error(&self) -> bool {
        self.descendants().any(|n| n.is_error())
    }

    pub fn start_byte(&self) -> usize {
        self.data().start_byte
    }

    pub fn end_byte(&self) -> usize {
        self.data().end_byte
    }

    pub fn byte_range(&self) -> ops::Range<usize> {
        self.start_byte()..self.end_byte()
    }

    pub fn start_position(&self) -> Point {
        self.data().start_position
    }

    pub fn end_position(&self) -> Point {
        self.data().end_position
    }

    pub fn range(&self) -> Range {
        Range {
            start_byte: self.start_byte(),
            end_byte: self.end_byte(),
            start_point: self.start_position(),
            end_point: self.end_position(),
        }
    }

    pub fn text(&self) -> &'tree str {
        &self.tree.source[self.byte_range()]
    }

    pub fn parent(&self) -> Option<Node<'tree>> {
        self.data().parent.map(|id| self.at(id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, i: usize) -> Option<Node<'tree>> {
        self.data().children.get(i).map(|&id| self.at(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'tree>> + use<'tree> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    pub fn named_children(&self) -> impl Iterator<Item = Node<'tree>> + use<'tree> {
        self.children().filter(|n| n.is_named())
    }

    pub fn first_child(&self) -> Option<Node<'tree>> {
        self.children().next()
    }

    pub fn last_child(&self) -> Option<Node<'tree>> {
        self.children().next_back()
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<Node<'tree>> {
        self.children().find(|n| n.field_name() == Some(name))
    }

    /// The field this node fills in its parent, if any.
    pub fn field_name(&self) -> Option<&'static str> {
        self.data().field
    }

    pub fn next_sibling(&self) -> Option<Node<'tree>> {
        let siblings = &self.parent()?.data().children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| self.at(id))
    }

    pub fn prev_sibling(&self) -> Option<Node<'tree>> {
        let siblings = &self.parent()?.data().children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        pos.checked_sub(1).map(|prev| self.at(siblings[prev]))
    }

    /// Walks this node and everything below it in pre-order.
    pub fn descendants(&self) -> Descendants<'tree> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// The smallest node under this one whose range contains `point`. Ranges
    /// are treated as closed, so a point just past a token still hits it.
    pub fn descendant_for_point(&self, point: Point) -> Node<'tree> {
        let contains = |n: &Node| n.start_position() <= point && point <= n.end_position();

        let mut node = *self;
        loop {
            let child = node.children().find(contains);
            match child {
                Some(child) => node = child,
                None => return node,
            }
        }
    }

    /// Renders the named nodes below this one as an S-expression.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        if let Some(field) = self.field_name() {
            let _ = write!(out, "{}: ", field);
        }
        out.push('(');
        out.push_str(self.kind_name());
        for child in self.named_children().filter(|c| c.kind() != NodeKind::Comment) {
            out.push(' ');
            child.write_sexp(out);
        }
        out.push(')');
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{Node {} {} - {}}}",
            self.kind_name(),
            self.start_position(),
            self.end_position()
        )
    }
}

pub struct Descendants<'tree> {
    tree: &'tree Tree,
    stack: Vec<usize>,
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id].children.iter().rev().copied());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}
