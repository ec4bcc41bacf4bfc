//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one. Besides logarithmic insertion, removal, and search, this tree carries a
//! join-based set algebra: `split` and `join` combine into a union running in O(m log(n / m + 1))
//! and an intersection built from the same primitives. The algebra consumes its operand trees.

mod node;
mod set;
mod tree;

pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
