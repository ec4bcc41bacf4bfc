use crate::llrb_tree::node::{Color, Node};
use crate::Value;
use std::cmp::Ordering;

pub type Tree = Option<Box<Node>>;

pub fn is_red(tree: &Tree) -> bool {
    match tree {
        None => false,
        Some(ref node) => node.color == Color::Red,
    }
}

pub fn insert(tree: &mut Tree, value: Value) -> bool {
    let inserted = match tree {
        Some(ref mut node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return true;
        },
    };

    let node = tree.as_mut().expect("Expected non-empty tree.");
    node.fixup();

    inserted
}

// precondition: `node` roots a non-empty subtree
fn min(node: &Node) -> Value {
    let mut curr = node;
    while let Some(ref left_node) = curr.left {
        curr = left_node;
    }
    curr.value
}

pub fn remove(tree: &mut Tree, value: Value) -> bool {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return false,
    };

    let mut target = value;
    let mut descend_right = false;

    if value == node.value {
        if node.left.is_some() && node.right.is_some() {
            // Two children: adopt the in-order successor and delete its original node below.
            // The successor is captured before any rotation can change this node's value.
            target = match node.right {
                Some(ref right_node) => min(right_node),
                None => unreachable!(),
            };
            node.value = target;
            descend_right = true;
        } else {
            let mut child = match node.left.take() {
                Some(child) => Some(child),
                None => node.right.take(),
            };
            // the replacement carries the spliced node's color, preserving black balance
            if let Some(ref mut child) = child {
                child.color = node.color;
            }
            *tree = child;
            return true;
        }
    }

    let removed = if target > node.value || descend_right {
        if is_red(&node.left) {
            node.rotate_right();
        }

        let should_propagate = {
            if let Some(ref child) = node.right {
                child.color == Color::Black && !is_red(&child.left)
            } else {
                false
            }
        };
        if should_propagate {
            node.propagate_right();
        }

        remove(&mut node.right, target)
    } else if target < node.value {
        let should_propagate = {
            if let Some(ref child) = node.left {
                child.color == Color::Black && !is_red(&child.left)
            } else {
                false
            }
        };
        if should_propagate {
            node.propagate_left();
        }

        remove(&mut node.left, target)
    } else {
        false
    };

    node.fixup();
    *tree = Some(node);

    removed
}

pub fn contains(tree: &Tree, value: Value) -> bool {
    match tree {
        Some(ref node) => match value.cmp(&node.value) {
            Ordering::Less => contains(&node.left, value),
            Ordering::Greater => contains(&node.right, value),
            Ordering::Equal => true,
        },
        None => false,
    }
}

#[cfg(test)]
pub fn check_invariants(tree: &Tree) {
    // every path from the root to a missing child must cross the same number of black nodes
    fn check(tree: &Tree, lower: Option<Value>, upper: Option<Value>) -> usize {
        match tree {
            Some(ref node) => {
                if let Some(lower) = lower {
                    assert!(node.value > lower);
                }
                if let Some(upper) = upper {
                    assert!(node.value < upper);
                }

                assert!(!is_red(&node.right), "right-leaning red edge");
                if node.color == Color::Red {
                    assert!(!is_red(&node.left), "two consecutive red edges");
                }

                let black_left = check(&node.left, lower, Some(node.value));
                let black_right = check(&node.right, Some(node.value), upper);
                assert_eq!(black_left, black_right);

                match node.color {
                    Color::Black => black_left + 1,
                    Color::Red => black_left,
                }
            },
            None => 0,
        }
    }

    assert!(!is_red(tree), "red root");
    check(tree, None, None);
}
