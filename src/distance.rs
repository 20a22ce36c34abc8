use crate::tracing_macros::{debug, trace};
use crate::{postorder, Cost, Entry, NonNegative, Postorder, Tree};
use itertools::iproduct;
use pathfinding::matrix::Matrix;

/// A method for computing the edit distance between two [Postorder] decompositions.
///
/// Every strategy computes the same distance; they only differ in how they get there.
pub trait Strategy {
    /// Returns the lowest total cost of the edits that transform `a` into `b`.
    ///
    /// Either side may be [empty][Postorder::default], in which case every node of the other
    /// side is either inserted or deleted.
    fn minimum_cost<L, C>(&self, a: &Postorder<'_, L>, b: &Postorder<'_, L>, cost: &C) -> C::Weight
    where
        L: ?Sized,
        C: Cost<L> + ?Sized;
}

/// Fills the whole `treedist` table bottom-up, one pair of keyroots at a time.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tabulated;

/// The cost of turning a forest into nothing or nothing into a forest.
pub(crate) fn trivial<L, C>(a: &Postorder<'_, L>, b: &Postorder<'_, L>, cost: &C) -> Option<C::Weight>
where
    L: ?Sized,
    C: Cost<L> + ?Sized,
{
    let zero = C::Weight::default();

    match (a.is_empty(), b.is_empty()) {
        (true, _) => Some(b.iter().fold(zero, |w, e| w + cost.insert(e.label()))),
        (_, true) => Some(a.iter().fold(zero, |w, e| w + cost.delete(e.label()))),
        _ => None,
    }
}

impl Strategy for Tabulated {
    fn minimum_cost<L, C>(&self, a: &Postorder<'_, L>, b: &Postorder<'_, L>, cost: &C) -> C::Weight
    where
        L: ?Sized,
        C: Cost<L> + ?Sized,
    {
        let cost = NonNegative(cost);

        if let Some(w) = trivial(a, b, &cost) {
            return w;
        }

        debug!(
            nodes = ?(a.len(), b.len()),
            keyroots = ?(a.keyroots().count(), b.keyroots().count()),
            "tabulated tree distance"
        );

        let mut treedist = Matrix::new(a.len(), b.len(), C::Weight::default());

        // Keyroots nested under others come first in postorder, so every entry of `treedist`
        // read by a pair has been written by an earlier one.
        for (x, y) in iproduct!(a.keyroots(), b.keyroots()) {
            trace!(a = x.index(), b = y.index(), "keyroot pair");
            forest(a.subtree(x), b.subtree(y), &cost, &mut treedist);
        }

        treedist[(a.len() - 1, b.len() - 1)]
    }
}

/// Computes the forest distances between every prefix of `xs` and every prefix of `ys`.
///
/// Both slices are subtrees in postorder, so their roots come last and their leftmost leaves
/// come first.
fn forest<L, C>(xs: &[Entry<'_, L>], ys: &[Entry<'_, L>], cost: &C, treedist: &mut Matrix<C::Weight>)
where
    L: ?Sized,
    C: Cost<L> + ?Sized,
{
    let (m, n) = (xs.len(), ys.len());
    let (l, k) = match (xs.first(), ys.first()) {
        (Some(x), Some(y)) => (x.index(), y.index()),
        _ => return,
    };

    let mut fd = Matrix::new(m + 1, n + 1, C::Weight::default());

    for (i, x) in (1..=m).zip(xs) {
        fd[(i, 0)] = fd[(i - 1, 0)] + cost.delete(x.label());
    }

    for (j, y) in (1..=n).zip(ys) {
        fd[(0, j)] = fd[(0, j - 1)] + cost.insert(y.label());
    }

    for (i, x) in (1..=m).zip(xs) {
        for (j, y) in (1..=n).zip(ys) {
            let remove = fd[(i - 1, j)] + cost.delete(x.label());
            let insert = fd[(i, j - 1)] + cost.insert(y.label());

            // prefix lengths preceding the subtrees rooted at `x` and `y`
            let (p, q) = (x.leftmost() - l, y.leftmost() - k);

            if p == 0 && q == 0 {
                let relabel = fd[(i - 1, j - 1)] + cost.relabel(x.label(), y.label());
                let d = remove.min(insert).min(relabel);
                treedist[(x.index(), y.index())] = d;
                fd[(i, j)] = d;
            } else {
                let replace = fd[(p, q)] + treedist[(x.index(), y.index())];
                fd[(i, j)] = remove.min(insert).min(replace);
            }
        }
    }
}

/// Returns the tree edit distance between `a` and `b`.
///
/// This is the lowest total cost of deleting, inserting and relabeling nodes such that `a`
/// becomes `b`, computed with the [Tabulated] strategy.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::{distance, Node, Unit};
///
/// let a = Node::new("a", [Node::leaf("b"), Node::leaf("c")]);
/// let b = Node::new("a", [Node::leaf("b"), Node::leaf("c"), Node::leaf("d")]);
///
/// assert_eq!(distance(&a, &b, &Unit), 1);
/// ```
pub fn distance<'t, T, C>(a: &'t T, b: &'t T, cost: &C) -> C::Weight
where
    T: Tree<'t>,
    C: Cost<T::Label> + ?Sized,
{
    distance_with(&Tabulated, a, b, cost)
}

/// Returns the tree edit distance between `a` and `b` computed with the given [Strategy].
pub fn distance_with<'t, S, T, C>(strategy: &S, a: &'t T, b: &'t T, cost: &C) -> C::Weight
where
    S: Strategy + ?Sized,
    T: Tree<'t>,
    C: Cost<T::Label> + ?Sized,
{
    strategy.minimum_cost(&postorder(a), &postorder(b), cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Costs, Node, Size, Unit};
    use assert_matches::assert_matches;
    use proptest::collection::vec;
    use test_strategy::{proptest, Arbitrary};

    /// A label drawn from a small alphabet, so that equal labels are common.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
    pub(crate) enum Letter {
        A,
        B,
        C,
        D,
    }

    fn tree(s: &str) -> Node<String> {
        s.parse().expect("valid bracket notation")
    }

    /// Copies `t` twice, the second time replacing the label of every node whose bit is set
    /// with one that appears nowhere in the first copy.
    fn relabel(t: &Node<u8>, bits: &mut impl Iterator<Item = bool>) -> (Node<u8>, Node<u8>, usize) {
        let label = t.label % 128;
        let fresh = bits.next().unwrap_or(false);

        let mut children = (Vec::new(), Vec::new());
        let mut count = usize::from(fresh);
        for c in &t.children {
            let (x, y, n) = relabel(c, bits);
            children.0.push(x);
            children.1.push(y);
            count += n;
        }

        let a = Node::new(label, children.0);
        let b = Node::new(if fresh { u8::MAX } else { label }, children.1);
        (a, b, count)
    }

    #[test]
    fn replacing_a_leaf_costs_one_relabel() {
        assert_eq!(distance(&tree("{a{b}{c}}"), &tree("{a{b}{d}}"), &Unit), 1);
    }

    #[test]
    fn appending_a_leaf_costs_one_insertion() {
        assert_eq!(distance(&tree("{a{b}{c}}"), &tree("{a{b}{c}{d}}"), &Unit), 1);
    }

    #[test]
    fn removing_a_leaf_costs_one_deletion() {
        assert_eq!(distance(&tree("{a{b}{c{d}{e}}}"), &tree("{a{b}{c{d}}}"), &Unit), 1);
    }

    #[test]
    fn moving_a_node_costs_deleting_and_inserting_it() {
        let a = tree("{f{d{a}{c{b}}}{e}}");
        let b = tree("{f{c{d{a}{b}}}{e}}");
        assert_eq!(distance(&a, &b, &Unit), 2);
    }

    #[test]
    fn removing_an_inner_node_lifts_its_children() {
        assert_eq!(distance(&tree("{a{b{c}{d}}}"), &tree("{a{c}{d}}"), &Unit), 1);
    }

    #[proptest]
    fn the_distance_between_identical_trees_is_zero(#[any(Size::from((3, 3)))] a: Node<u8>) {
        assert_eq!(distance(&a, &a, &Unit), 0);
    }

    #[proptest]
    fn the_distance_between_single_nodes_is_their_relabel_cost(a: u8, b: u8) {
        let d = distance(&Node::leaf(a), &Node::leaf(b), &Unit);
        assert_eq!(d, usize::from(a != b));
    }

    #[proptest]
    fn the_distance_to_the_empty_forest_is_the_number_of_nodes(a: Node<u8>) {
        let p = postorder(&a);
        let empty = Postorder::default();
        assert_eq!(Tabulated.minimum_cost(&p, &empty, &Unit), a.size());
        assert_eq!(Tabulated.minimum_cost(&empty, &p, &Unit), a.size());
        assert_eq!(Tabulated.minimum_cost(&empty, &empty, &Unit), 0);
    }

    #[proptest]
    fn deletions_and_insertions_are_charged_to_their_own_side(a: Node<u8>) {
        let cost = Costs {
            delete: |_: &u8| 3u64,
            insert: |_: &u8| 5u64,
            relabel: |x: &u8, y: &u8| u64::from(x != y),
        };

        let p = postorder(&a);
        let n = a.size() as u64;
        assert_eq!(Tabulated.minimum_cost(&p, &Postorder::default(), &cost), 3 * n);
        assert_eq!(Tabulated.minimum_cost(&Postorder::default(), &p, &cost), 5 * n);
    }

    #[proptest]
    fn the_distance_is_at_most_the_cost_of_replacing_everything(
        #[any(Size::from((3, 3)))] a: Node<u8>,
        #[any(Size::from((3, 3)))] b: Node<u8>,
    ) {
        assert_matches!((distance(&a, &b, &Unit), a.size() + b.size()), (x, y) if x <= y);
    }

    #[proptest]
    fn the_distance_is_at_least_the_difference_in_size(
        #[any(Size::from((3, 3)))] a: Node<u8>,
        #[any(Size::from((3, 3)))] b: Node<u8>,
    ) {
        assert_matches!((distance(&a, &b, &Unit), a.size().abs_diff(b.size())), (x, y) if x >= y);
    }

    #[proptest]
    fn the_distance_is_symmetric_when_insertion_and_deletion_are_swapped(
        #[any(Size::from((3, 3)))] a: Node<Letter>,
        #[any(Size::from((3, 3)))] b: Node<Letter>,
        #[strategy(1u32..8)] d: u32,
        #[strategy(1u32..8)] i: u32,
    ) {
        let relabel = |x: &Letter, y: &Letter| if x == y { 0 } else { d.max(i) };

        let forward = Costs {
            delete: |_: &Letter| d,
            insert: |_: &Letter| i,
            relabel,
        };

        let backward = Costs {
            delete: |_: &Letter| i,
            insert: |_: &Letter| d,
            relabel,
        };

        assert_eq!(distance(&a, &b, &forward), distance(&b, &a, &backward));
    }

    #[proptest]
    fn scaling_every_cost_scales_the_distance(
        #[any(Size::from((3, 3)))] a: Node<Letter>,
        #[any(Size::from((3, 3)))] b: Node<Letter>,
        #[strategy(1usize..10)] k: usize,
    ) {
        let scaled = Costs {
            delete: |_: &Letter| k,
            insert: |_: &Letter| k,
            relabel: |x: &Letter, y: &Letter| if x == y { 0 } else { k },
        };

        assert_eq!(distance(&a, &b, &scaled), k * distance(&a, &b, &Unit));
    }

    #[proptest]
    fn relabeling_is_bounded_by_the_number_of_mismatched_labels(
        #[any(Size::from((3, 3)))] a: Node<Letter>,
        #[strategy(vec(proptest::prelude::any::<Letter>(), #a.size()))] labels: Vec<Letter>,
    ) {
        fn zip(t: &Node<Letter>, labels: &mut impl Iterator<Item = Letter>) -> Node<Letter> {
            let label = labels.next().unwrap_or(t.label);
            Node::new(label, t.children.iter().map(|c| zip(c, labels)))
        }

        let b = zip(&a, &mut labels.iter().copied());
        let (p, q) = (postorder(&a), postorder(&b));
        let mismatches = p.iter().zip(q.iter()).filter(|(x, y)| x.label() != y.label()).count();

        assert_matches!(distance(&a, &b, &Unit), d if d <= mismatches);
    }

    #[proptest]
    fn relabeling_with_fresh_labels_costs_one_per_node(
        #[any(Size::from((3, 3)))] a: Node<u8>,
        #[strategy(vec(proptest::prelude::any::<bool>(), #a.size()))] bits: Vec<bool>,
    ) {
        let (a, b, fresh) = relabel(&a, &mut bits.into_iter());
        assert_eq!(distance(&a, &b, &Unit), fresh);
    }
}

#[cfg(test)]
pub(crate) use tests::Letter;
