//! Indentation-structured outline parsing.
//!
//! Each line's leading whitespace decides where it lands in the tree, with
//! a `- ` bullet marker breaking ties between lines at the same column.
//! Only relative indent magnitudes are compared, so the outline does not
//! need a consistent indent width.

use serde::Serialize;

/// A single outline entry and the entries nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Line content with surrounding whitespace and bullet marker removed.
    pub label: String,

    /// Nested entries, in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a childless node.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    pub fn with_children(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Walk the descendants depth-first, children in order.
    ///
    /// Yields `(depth, node)` where direct children are at depth 0.
    /// The node itself is not yielded.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().map(|c| (0, c)).collect(),
        }
    }
}

/// Depth-first iterator over a node's descendants.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

/// Ordered sequence of root nodes parsed from one outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.roots.iter()
    }

    /// Total number of nodes, counting every level.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|r| 1 + r.descendant_count()).sum()
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// One scanned outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine<'a> {
    /// Nesting key: twice the leading whitespace count, plus one for a
    /// bullet marker. A `- point` sits below an unmarked heading at the
    /// same column but never below a line with less whitespace.
    pub indent: usize,
    pub label: &'a str,
}

impl<'a> OutlineLine<'a> {
    pub fn scan(line: &'a str) -> Self {
        let content = line.trim_start();
        let whitespace = line.chars().count() - content.chars().count();
        let (marked, rest) = split_bullet(content);
        Self {
            indent: 2 * whitespace + usize::from(marked),
            label: rest.trim(),
        }
    }
}

/// Split one leading `-` bullet marker off the line content.
///
/// Returns whether a marker was found and the remaining text. The dash
/// must be followed by whitespace or stand alone, so `-5 degrees` keeps
/// its sign.
fn split_bullet(content: &str) -> (bool, &str) {
    match content.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            (true, rest.trim_start())
        }
        _ => (false, content),
    }
}

/// Scan every line of an outline.
///
/// Blank lines at the very start and end of the text are dropped; blank
/// lines in the middle are kept and scan to an empty label. Lines may end
/// in `\r\n`.
pub fn scan_lines(text: &str) -> impl Iterator<Item = OutlineLine<'_>> {
    let body = text.trim();
    let lines = if body.is_empty() {
        None
    } else {
        Some(body.split('\n'))
    };
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(OutlineLine::scan)
}

/// Parse indented text into a forest.
///
/// A line nests under the closest preceding line with a strictly smaller
/// indent. Lines with equal indent are siblings. Never fails.
pub fn parse(text: &str) -> Forest {
    let mut roots = Vec::new();
    // Open ancestors; an empty stack stands for the forest itself.
    let mut open: Vec<(usize, Node)> = Vec::new();

    for line in scan_lines(text) {
        while open.last().is_some_and(|(indent, _)| *indent >= line.indent) {
            close_top(&mut open, &mut roots);
        }
        open.push((line.indent, Node::new(line.label)));
    }
    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    let forest = Forest::new(roots);
    log::debug!(
        "Parsed outline: {} roots, {} nodes",
        forest.len(),
        forest.node_count()
    );
    forest
}

/// Pop the innermost open node and attach it to its parent.
fn close_top(open: &mut Vec<(usize, Node)>, roots: &mut Vec<Node>) {
    if let Some((_, node)) = open.pop() {
        match open.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
