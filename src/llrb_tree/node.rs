use crate::llrb_tree::tree;
use crate::Value;
use std::mem;

/// An enum representing the color of a node in a left-leaning red-black tree.
#[derive(Clone, Copy, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A struct representing an internal node of a left-leaning red-black tree.
#[derive(Clone)]
pub struct Node {
    pub value: Value,
    pub color: Color,
    pub left: tree::Tree,
    pub right: tree::Tree,
}

impl Node {
    pub fn new(value: Value) -> Self {
        Node {
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    /// Flips this node's color and the colors of both children, absorbing or emitting a
    /// temporary 4-node.
    pub fn invert(&mut self) {
        self.color = self.color.flip();
        if let Some(ref mut child) = self.left {
            child.color = child.color.flip();
        }
        if let Some(ref mut child) = self.right {
            child.color = child.color.flip();
        }
    }

    pub fn rotate_left(&mut self) {
        let mut child = self
            .right
            .take()
            .expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        self.color = child.color;
        child.color = Color::Red;
        self.left = Some(child);
    }

    pub fn rotate_right(&mut self) {
        let mut child = self
            .left
            .take()
            .expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        self.color = child.color;
        child.color = Color::Red;
        self.right = Some(child);
    }

    /// Restores the left-leaning invariants at this node after a structural change below it. The
    /// three fixes must run in this order; each one can expose the violation the next targets.
    pub fn fixup(&mut self) {
        if tree::is_red(&self.right) && !tree::is_red(&self.left) {
            self.rotate_left();
        }

        let left_left_red = {
            if let Some(ref child) = self.left {
                child.color == Color::Red && tree::is_red(&child.left)
            } else {
                false
            }
        };
        if left_left_red {
            self.rotate_right();
        }

        if tree::is_red(&self.left) && tree::is_red(&self.right) {
            self.invert();
        }
    }

    /// Pushes a red edge down toward the left child ahead of a removal, so the recursion never
    /// descends into a pure-black node with no red edge to spend.
    pub fn propagate_left(&mut self) {
        self.invert();

        let right_left_red = {
            if let Some(ref child) = self.right {
                tree::is_red(&child.left)
            } else {
                false
            }
        };
        if right_left_red {
            if let Some(ref mut child) = self.right {
                child.rotate_right();
            }
            self.rotate_left();
            self.invert();
        }
    }

    /// Mirror of `propagate_left` for descents into the right child.
    pub fn propagate_right(&mut self) {
        self.invert();

        let left_left_red = {
            if let Some(ref child) = self.left {
                tree::is_red(&child.left)
            } else {
                false
            }
        };
        if left_left_red {
            self.rotate_right();
            self.invert();
        }
    }
}
