use crate::tracing_macros::{debug, trace};
use crate::{trivial, Cost, Entry, NonNegative, Postorder, Strategy};
use pathfinding::matrix::Matrix;
use std::collections::HashMap;

/// Computes only the entries of `treedist` the answer depends on, on demand.
///
/// Subtree pairs are resolved from an explicit stack, so the depth of the trees does not
/// limit the size of the input.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Memoized;

/// A pair of subtrees whose forest distances are partially filled.
struct Pending<W> {
    x: usize,
    y: usize,
    forestdist: Matrix<W>,
    // the next cell to fill, counted in row-major order from `(1, 1)`
    cell: usize,
}

struct Memo<'a, 't, L: ?Sized, C: Cost<L> + ?Sized> {
    a: &'a [Entry<'t, L>],
    b: &'a [Entry<'t, L>],
    cost: &'a C,
    treedist: HashMap<(usize, usize), C::Weight>,
}

impl<'a, 't, L: ?Sized, C: Cost<L> + ?Sized> Memo<'a, 't, L, C> {
    /// The distance between the subtrees rooted at `a[x]` and `b[y]`.
    fn tree(&mut self, x: usize, y: usize) -> C::Weight {
        if let Some(&w) = self.treedist.get(&(x, y)) {
            return w;
        }

        let mut stack = vec![self.pending(x, y)];
        let mut w = C::Weight::default();

        while let Some(top) = stack.last_mut() {
            match self.resume(top) {
                Ok(d) => {
                    w = d;
                    stack.pop();
                }

                Err((x, y)) => stack.push(self.pending(x, y)),
            }
        }

        w
    }

    fn pending(&self, x: usize, y: usize) -> Pending<C::Weight> {
        trace!(a = x, b = y, "subtree pair");

        let (l, k) = (self.a[x].leftmost(), self.b[y].leftmost());
        let (xs, ys) = (&self.a[l..=x], &self.b[k..=y]);
        let (m, n) = (xs.len(), ys.len());
        let mut forestdist = Matrix::new(m + 1, n + 1, C::Weight::default());

        for (i, e) in (1..=m).zip(xs) {
            forestdist[(i, 0)] = forestdist[(i - 1, 0)] + self.cost.delete(e.label());
        }

        for (j, e) in (1..=n).zip(ys) {
            forestdist[(0, j)] = forestdist[(0, j - 1)] + self.cost.insert(e.label());
        }

        Pending {
            x,
            y,
            forestdist,
            cell: 0,
        }
    }

    /// Fills the forest distances of `p` up to its last cell, which is the distance between
    /// its subtrees, or stops at the first nested pair of subtrees that is not known yet.
    fn resume(&mut self, p: &mut Pending<C::Weight>) -> Result<C::Weight, (usize, usize)> {
        let (a, b, cost) = (self.a, self.b, self.cost);
        let (l, k) = (a[p.x].leftmost(), b[p.y].leftmost());
        let (m, n) = (p.x + 1 - l, p.y + 1 - k);
        let fd = &mut p.forestdist;

        while p.cell < m * n {
            let (i, j) = (p.cell / n + 1, p.cell % n + 1);
            let (x, y) = (&a[l + i - 1], &b[k + j - 1]);

            // prefix lengths preceding the subtrees rooted at `x` and `y`
            let (s, t) = (x.leftmost() - l, y.leftmost() - k);

            let replace = match (s, t) {
                (0, 0) => None,
                _ => match self.treedist.get(&(x.index(), y.index())) {
                    Some(&d) => Some(fd[(s, t)] + d),
                    None => return Err((x.index(), y.index())),
                },
            };

            let remove = fd[(i - 1, j)] + cost.delete(x.label());
            let insert = fd[(i, j - 1)] + cost.insert(y.label());

            fd[(i, j)] = match replace {
                Some(replace) => remove.min(insert).min(replace),
                None => {
                    let relabel = fd[(i - 1, j - 1)] + cost.relabel(x.label(), y.label());
                    let d = remove.min(insert).min(relabel);
                    self.treedist.insert((x.index(), y.index()), d);
                    d
                }
            };

            p.cell += 1;
        }

        Ok(fd[(m, n)])
    }
}

impl Strategy for Memoized {
    fn minimum_cost<L, C>(&self, a: &Postorder<'_, L>, b: &Postorder<'_, L>, cost: &C) -> C::Weight
    where
        L: ?Sized,
        C: Cost<L> + ?Sized,
    {
        let cost = NonNegative(cost);

        if let Some(w) = trivial(a, b, &cost) {
            return w;
        }

        debug!(nodes = ?(a.len(), b.len()), "memoized tree distance");

        let mut memo = Memo {
            a: &a[..],
            b: &b[..],
            cost: &cost,
            treedist: HashMap::new(),
        };

        memo.tree(a.len() - 1, b.len() - 1)
    }
}
