//! # Overview
//!
//! This crate computes the [tree edit distance][ted] between ordered labeled trees: the lowest
//! total cost of deleting, inserting and relabeling nodes such that one tree becomes the other.
//! Costs are user-defined through the [Cost] trait, with [Unit] charging one for every edit and
//! nothing for keeping a label.
//!
//! Distances are computed with the algorithm of [Zhang and Shasha][zs], which decomposes each
//! tree into its postorder sequence and _keyroots_ and then solves one forest distance problem
//! per pair of keyroots. Two interchangeable [Strategy]s are provided: [Tabulated] fills every
//! table bottom-up, [Memoized] only computes what the answer depends on.
//!
//! [ted]: https://en.wikipedia.org/wiki/Graph_edit_distance#Tree_edit_distance
//! [zs]: https://doi.org/10.1137/0218082
//!
//! # Example
//!
//! ```rust
//! use zhang_shasha::*;
//!
//! let a: Node<String> = "{f{d{a}{c{b}}}{e}}".parse()?;
//! let b: Node<String> = "{f{c{d{a}{b}}}{e}}".parse()?;
//!
//! // remove `c` from under `d`, then insert it back above `d`
//! assert_eq!(distance(&a, &b, &Unit), 2);
//! assert_eq!(distance_with(&Memoized, &a, &b, &Unit), 2);
//!
//! // the shapes differ, so no amount of relabeling avoids a deletion and an insertion
//! let cost = Costs {
//!     delete: |_: &String| 10u32,
//!     insert: |_: &String| 10u32,
//!     relabel: |x: &String, y: &String| u32::from(x != y),
//! };
//!
//! assert_eq!(distance(&a, &b, &cost), 20);
//! # Ok::<(), bracket::ParseError>(())
//! ```
//!
//! # Logging
//!
//! With the `tracing` feature enabled, every computation emits a `debug` event and every
//! pair of subtrees it visits emits a `trace` event.

mod cost;
mod distance;
mod memoize;
mod postorder;
mod tree;

pub use cost::*;
pub use distance::*;
pub use memoize::*;
pub use postorder::*;
pub use tree::*;

pub mod bracket;

mod tracing_macros;
