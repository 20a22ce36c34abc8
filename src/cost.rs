use std::ops::Add;

/// A measure for the cost of editing the nodes of a [Tree][crate::Tree].
///
/// Every method must return a non-negative [Weight][Cost::Weight]. Costs that violate the
/// triangle inequality are accepted, but the resulting distance need not be a metric.
pub trait Cost<L: ?Sized> {
    /// The type of the cost of a single edit.
    ///
    /// The default value of this type is assumed to be the additive identity (i.e. _zero_).
    type Weight: Default + Copy + Ord + Add<Output = Self::Weight>;

    /// Returns the cost of removing a node labeled `label`.
    fn delete(&self, label: &L) -> Self::Weight;

    /// Returns the cost of inserting a node labeled `label`.
    fn insert(&self, label: &L) -> Self::Weight;

    /// Returns the cost of changing the label `from` into `to`.
    fn relabel(&self, from: &L, to: &L) -> Self::Weight;
}

impl<L: ?Sized, C: Cost<L> + ?Sized> Cost<L> for &C {
    type Weight = C::Weight;

    #[inline]
    fn delete(&self, label: &L) -> Self::Weight {
        C::delete(self, label)
    }

    #[inline]
    fn insert(&self, label: &L) -> Self::Weight {
        C::insert(self, label)
    }

    #[inline]
    fn relabel(&self, from: &L, to: &L) -> Self::Weight {
        C::relabel(self, from, to)
    }
}

/// Every insertion and deletion costs one, relabeling costs one unless the labels are equal.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Unit;

impl<L: PartialEq + ?Sized> Cost<L> for Unit {
    type Weight = usize;

    #[inline]
    fn delete(&self, _: &L) -> usize {
        1
    }

    #[inline]
    fn insert(&self, _: &L) -> usize {
        1
    }

    #[inline]
    fn relabel(&self, from: &L, to: &L) -> usize {
        usize::from(from != to)
    }
}

/// A [Cost] assembled from three functions.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::{distance, Costs, Node};
///
/// let cost = Costs {
///     delete: |_: &char| 3u32,
///     insert: |_: &char| 2u32,
///     relabel: |a: &char, b: &char| if a == b { 0 } else { 6 },
/// };
///
/// let a = Node::new('a', [Node::leaf('b')]);
/// let b = Node::new('a', [Node::leaf('c')]);
///
/// // deleting `b` and inserting `c` is cheaper than relabeling
/// assert_eq!(distance(&a, &b, &cost), 5);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Costs<D, I, R> {
    /// The cost of removing a node.
    pub delete: D,
    /// The cost of inserting a node.
    pub insert: I,
    /// The cost of changing one label into another.
    pub relabel: R,
}

impl<L, W, D, I, R> Cost<L> for Costs<D, I, R>
where
    L: ?Sized,
    W: Default + Copy + Ord + Add<Output = W>,
    D: Fn(&L) -> W,
    I: Fn(&L) -> W,
    R: Fn(&L, &L) -> W,
{
    type Weight = W;

    #[inline]
    fn delete(&self, label: &L) -> W {
        (self.delete)(label)
    }

    #[inline]
    fn insert(&self, label: &L) -> W {
        (self.insert)(label)
    }

    #[inline]
    fn relabel(&self, from: &L, to: &L) -> W {
        (self.relabel)(from, to)
    }
}

/// Checks in debug builds that the wrapped [Cost] never returns a negative weight.
pub(crate) struct NonNegative<'c, C: ?Sized>(pub(crate) &'c C);

impl<L: ?Sized, C: Cost<L> + ?Sized> Cost<L> for NonNegative<'_, C> {
    type Weight = C::Weight;

    #[inline]
    fn delete(&self, label: &L) -> Self::Weight {
        non_negative(self.0.delete(label))
    }

    #[inline]
    fn insert(&self, label: &L) -> Self::Weight {
        non_negative(self.0.insert(label))
    }

    #[inline]
    fn relabel(&self, from: &L, to: &L) -> Self::Weight {
        non_negative(self.0.relabel(from, to))
    }
}

#[inline]
fn non_negative<W: Default + Ord>(w: W) -> W {
    debug_assert!(w >= W::default(), "edit costs must not be negative");
    w
}
