//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions. The encoding is left-leaning: every
//! red edge is a left edge, and a red node never has a red left child, so a red edge marks the
//! glued half of an emulated 3-node.

mod node;
mod set;
mod tree;

pub use self::set::{LlrbSet, LlrbSetIntoIter, LlrbSetIter};
