use crate::Tree;
use derive_more::Deref;
use std::fmt::{self, Debug};

/// A node of a [Tree] as seen by a postorder traversal.
pub struct Entry<'t, L: ?Sized> {
    label: &'t L,
    index: usize,
    leftmost: usize,
    keyroot: bool,
}

impl<'t, L: ?Sized> Entry<'t, L> {
    /// The label of the node.
    #[inline]
    pub fn label(&self) -> &'t L {
        self.label
    }

    /// The position of the node in the postorder sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The position of the leftmost leaf of the subtree rooted at this node.
    ///
    /// Leaves are their own leftmost leaf.
    #[inline]
    pub fn leftmost(&self) -> usize {
        self.leftmost
    }

    /// Whether the node is the root or has a sibling to its left.
    #[inline]
    pub fn is_keyroot(&self) -> bool {
        self.keyroot
    }
}

impl<L: ?Sized> Clone for Entry<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ?Sized> Copy for Entry<'_, L> {}

impl<L: ?Sized + PartialEq> PartialEq for Entry<'_, L> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.index == other.index
            && self.leftmost == other.leftmost
            && self.keyroot == other.keyroot
    }
}

impl<L: ?Sized + Eq> Eq for Entry<'_, L> {}

impl<L: ?Sized + Debug> Debug for Entry<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("label", &self.label)
            .field("index", &self.index)
            .field("leftmost", &self.leftmost)
            .field("keyroot", &self.keyroot)
            .finish()
    }
}

/// The postorder sequence of a [Tree], annotated for the keyroot decomposition.
///
/// The subtree rooted at any [Entry] occupies the contiguous range
/// `entry.leftmost()..=entry.index()` of the sequence.
#[derive(Deref)]
pub struct Postorder<'t, L: ?Sized> {
    #[deref(forward)]
    entries: Box<[Entry<'t, L>]>,
}

impl<'t, L: ?Sized> Postorder<'t, L> {
    /// The root of the tree, unless the forest is empty.
    #[inline]
    pub fn root(&self) -> Option<&Entry<'t, L>> {
        self.entries.last()
    }

    /// The subtree rooted at `entry`, in postorder.
    #[inline]
    pub fn subtree(&self, entry: &Entry<'t, L>) -> &[Entry<'t, L>] {
        &self.entries[entry.leftmost..=entry.index]
    }

    /// The keyroots, in increasing postorder index.
    pub fn keyroots(&self) -> impl Clone + Iterator<Item = &Entry<'t, L>> {
        self.entries.iter().filter(|e| e.keyroot)
    }
}

/// The decomposition of the empty forest.
impl<L: ?Sized> Default for Postorder<'_, L> {
    fn default() -> Self {
        Postorder {
            entries: Box::default(),
        }
    }
}

impl<L: ?Sized + Debug> Debug for Postorder<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

struct Frame<'t, T: Tree<'t>> {
    node: &'t T,
    children: <T::Children as IntoIterator>::IntoIter,
    leftmost: Option<usize>,
    keyroot: bool,
}

impl<'t, T: Tree<'t>> Frame<'t, T> {
    fn new(node: &'t T, keyroot: bool) -> Self {
        Frame {
            node,
            children: node.children().into_iter(),
            leftmost: None,
            keyroot,
        }
    }
}

/// Decomposes a [Tree] into its postorder sequence.
///
/// Runs in linear time and does not recurse, so arbitrarily deep trees are supported.
pub fn postorder<'t, T: Tree<'t>>(root: &'t T) -> Postorder<'t, T::Label> {
    let mut entries = Vec::new();
    let mut stack = vec![Frame::new(root, true)];

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.children.next() {
            // only the first child inherits its parent's leftmost leaf
            let keyroot = frame.leftmost.is_some();
            stack.push(Frame::new(child, keyroot));
            continue;
        }

        let index = entries.len();
        let leftmost = frame.leftmost.unwrap_or(index);
        let (node, keyroot) = (frame.node, frame.keyroot);
        stack.pop();

        if let Some(parent) = stack.last_mut() {
            parent.leftmost.get_or_insert(leftmost);
        }

        entries.push(Entry {
            label: node.label(),
            index,
            leftmost,
            keyroot,
        });
    }

    Postorder {
        entries: entries.into(),
    }
}
