use derive_more::From;
use std::mem;

/// An abstraction for an ordered tree of labeled nodes.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::{distance, Tree, Unit};
///
/// enum Expr {
///     Num(i64),
///     Add(Box<Expr>, Box<Expr>),
///     Neg(Box<Expr>),
/// }
///
/// impl<'t> Tree<'t> for Expr {
///     type Label = str;
///     fn label(&'t self) -> &'t str {
///         match self {
///             Expr::Num(_) => "num",
///             Expr::Add(..) => "add",
///             Expr::Neg(_) => "neg",
///         }
///     }
///
///     type Children = Vec<&'t Self>;
///     fn children(&'t self) -> Self::Children {
///         match self {
///             Expr::Num(_) => vec![],
///             Expr::Add(a, b) => vec![a.as_ref(), b.as_ref()],
///             Expr::Neg(a) => vec![a.as_ref()],
///         }
///     }
/// }
///
/// let a = Expr::Add(Box::new(Expr::Num(1)), Box::new(Expr::Num(2)));
/// let b = Expr::Add(Box::new(Expr::Num(1)), Box::new(Expr::Neg(Box::new(Expr::Num(2)))));
///
/// assert_eq!(distance(&a, &b, &Unit), 1);
/// ```
pub trait Tree<'t>: 't {
    /// The type of this [Tree]'s [label][Tree::label].
    type Label: 't + ?Sized;

    /// Returns the label carried by this node.
    fn label(&'t self) -> &'t Self::Label;

    /// A type that can iterate over this [Tree]'s [children][Tree::children] from left to right.
    type Children: IntoIterator<Item = &'t Self>;

    /// Returns this [Tree]'s immediate children.
    fn children(&'t self) -> Self::Children;
}

/// An immutable ordered tree that owns its children.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, From)]
pub struct Node<T> {
    pub(crate) label: T,
    pub(crate) children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Creates a node labeled `label` with the given children, in order.
    pub fn new<I: IntoIterator<Item = Self>>(label: T, children: I) -> Self {
        Node {
            label,
            children: children.into_iter().collect(),
        }
    }

    /// Creates a node without children.
    pub fn leaf(label: T) -> Self {
        Node {
            label,
            children: Vec::new(),
        }
    }

    /// Returns the total number of nodes in this tree, itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}

// The derived drop would recurse once per level.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<'t, T: 't> Tree<'t> for Node<T> {
    type Label = T;

    #[inline]
    fn label(&'t self) -> &'t T {
        &self.label
    }

    type Children = &'t [Self];

    #[inline]
    fn children(&'t self) -> Self::Children {
        &self.children
    }
}


#[cfg(test)]
pub(crate) use tests::Size;
