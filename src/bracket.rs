//! The bracket notation for labeled trees.
//!
//! Every node is written as `{label` followed by its children and a closing `}`, so
//! `{a{b}{c{d}}}` is the tree whose root `a` has the children `b` and `c`, and `c` has the
//! single child `d`. Labels are taken verbatim, including any whitespace, and cannot contain
//! braces.

use crate::Node;
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The ways in which bracket notation can be malformed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// The input holds no tree at all.
    Empty,
    /// Something other than whitespace precedes the root's opening brace.
    ExpectedOpen,
    /// The input ends before every node is closed.
    UnexpectedEnd,
    /// A closing brace has no matching opening brace.
    UnexpectedClose,
    /// A label continues after the node's first child.
    LabelAfterChild,
    /// Something other than whitespace follows the root's closing brace.
    TrailingInput,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        f.write_str(match self {
            Empty => "empty input",
            ExpectedOpen => "expected `{`",
            UnexpectedEnd => "unclosed node",
            UnexpectedClose => "unmatched `}`",
            LabelAfterChild => "label text after a child node",
            TrailingInput => "unexpected input after the root node",
        })
    }
}

/// Error returned when bracket notation cannot be parsed into a [Node].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }

    /// What went wrong.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The byte offset in the input where the problem was detected.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.position)
    }
}

impl Error for ParseError {}

/// A node whose closing brace has not been seen yet.
#[derive(Default)]
struct Frame {
    label: String,
    children: Vec<Node<String>>,
}

/// Parses a tree written in bracket notation.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::{bracket, Node};
///
/// let t = bracket::parse("{a{b}{c}}")?;
/// assert_eq!(t, Node::new("a".into(), [Node::leaf("b".into()), Node::leaf("c".into())]));
/// # Ok::<(), bracket::ParseError>(())
/// ```
pub fn parse(s: &str) -> Result<Node<String>, ParseError> {
    use ParseErrorKind::*;

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    for (position, c) in s.char_indices() {
        match (c, stack.last_mut()) {
            ('{', _) if root.is_some() => return Err(ParseError::new(TrailingInput, position)),
            ('{', _) => stack.push(Frame::default()),

            ('}', None) => return Err(ParseError::new(UnexpectedClose, position)),
            ('}', Some(_)) => {
                let Some(Frame { label, children }) = stack.pop() else {
                    return Err(ParseError::new(UnexpectedClose, position));
                };

                let node = Node::new(label, children);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }

            (c, Some(frame)) if frame.children.is_empty() => frame.label.push(c),
            (_, Some(_)) => return Err(ParseError::new(LabelAfterChild, position)),

            (c, None) if c.is_whitespace() => {}
            (_, None) if root.is_some() => return Err(ParseError::new(TrailingInput, position)),
            (_, None) => return Err(ParseError::new(ExpectedOpen, position)),
        }
    }

    match (root, stack.is_empty()) {
        (Some(root), true) => Ok(root),
        (None, true) => Err(ParseError::new(Empty, s.len())),
        (_, false) => Err(ParseError::new(UnexpectedEnd, s.len())),
    }
}

impl FromStr for Node<String> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Writes the tree in bracket notation.
impl<T: Display> Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.label)?;
        for c in &self.children {
            write!(f, "{}", c)?;
        }
        f.write_str("}")
    }
}
