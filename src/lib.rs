//! An ordered integer set with two interchangeable self-balancing backends: an AVL tree with a
//! join-based set algebra, and a left-leaning red-black tree. The `Set` facade dispatches to the
//! chosen backend and picks the cheaper algorithm for union and intersection.

extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod avl_tree;
pub mod llrb_tree;
mod set;

pub use crate::set::{Backend, Set, SetIntoIter, SetIter};

/// The element type stored by every set in this crate.
///
/// The value domain is deliberately a fixed scalar rather than a generic parameter; the trees only
/// ever need a total order and cheap copies.
pub type Value = i64;
