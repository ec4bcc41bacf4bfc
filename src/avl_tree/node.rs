use crate::avl_tree::tree;
use crate::Value;
use std::cmp;

/// A struct representing an internal node of an AVL tree.
///
/// A leaf has height 0; a missing child counts as height -1 so that the stored height is always
/// `1 + max(height(left), height(right))`.
#[derive(Clone)]
pub struct Node {
    pub value: Value,
    pub height: i32,
    pub left: tree::Tree,
    pub right: tree::Tree,
}

impl Node {
    pub fn new(value: Value) -> Self {
        Node {
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn update(&mut self) {
        let Node {
            ref mut height,
            ref left,
            ref right,
            ..
        } = self;
        *height = cmp::max(tree::height(left), tree::height(right)) + 1;
    }

    pub fn balance(&self) -> i32 {
        tree::height(&self.left) - tree::height(&self.right)
    }
}
