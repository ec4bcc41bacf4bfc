use crate::avl_tree::node::Node;
use crate::Value;
use std::cmp::Ordering;

pub type Tree = Option<Box<Node>>;

pub fn height(tree: &Tree) -> i32 {
    match tree {
        None => -1,
        Some(ref node) => node.height,
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

fn rotate_left_right(mut node: Box<Node>) -> Box<Node> {
    let child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = Some(rotate_left(child));
    rotate_right(node)
}

fn rotate_right_left(mut node: Box<Node>) -> Box<Node> {
    let child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = Some(rotate_right(child));
    rotate_left(node)
}

// Restores the height invariant at the root of `tree` after one child changed by at most one
// level: single rotation when the taller child leans the same way, double otherwise.
fn rebalance(tree: &mut Tree) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        let leans_right = match node.left {
            Some(ref child) => child.balance() < 0,
            None => unreachable!(),
        };
        if leans_right {
            node = rotate_left_right(node);
        } else {
            node = rotate_right(node);
        }
    } else if node.balance() < -1 {
        let leans_left = match node.right {
            Some(ref child) => child.balance() > 0,
            None => unreachable!(),
        };
        if leans_left {
            node = rotate_right_left(node);
        } else {
            node = rotate_left(node);
        }
    }

    *tree = Some(node);
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

    rebalance(tree);
    inserted
}

pub fn remove(tree: &mut Tree, value: Value) -> bool {
    let removed = match tree.take() {
        Some(mut node) => match value.cmp(&node.value) {
            Ordering::Less => {
                let removed = remove(&mut node.left, value);
                *tree = Some(node);
                removed
            },
            Ordering::Greater => {
                let removed = remove(&mut node.right, value);
                *tree = Some(node);
                removed
            },
            Ordering::Equal => {
                match (node.left.take(), node.right.take()) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (Some(left), right) => {
                        // Two children: adopt the maximum of the left subtree. `split_last`
                        // rebuilds the detached path through `join`, so the whole left subtree
                        // comes back balanced.
                        let (rest, last) = split_last(left);
                        node.value = last;
                        node.left = rest;
                        node.right = right;
                        *tree = Some(node);
                    },
                }
                true
            },
        },
        None => return false,
    };

    rebalance(tree);
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

pub fn count(tree: &Tree) -> usize {
    match tree {
        Some(ref node) => 1 + count(&node.left) + count(&node.right),
        None => 0,
    }
}

// precondition: `left` is more than one level taller than `right`
fn join_right(mut left: Box<Node>, value: Value, right: Tree) -> Box<Node> {
    if height(&left.right) <= height(&right) + 1 {
        let mut mid = Box::new(Node::new(value));
        mid.left = left.right.take();
        mid.right = right;
        mid.update();

        let overgrown = mid.height > height(&left.left) + 1;
        left.right = Some(mid);
        if overgrown {
            rotate_right_left(left)
        } else {
            left.update();
            left
        }
    } else {
        let spine = match left.right.take() {
            Some(spine) => spine,
            None => unreachable!(),
        };
        let joined = join_right(spine, value, right);

        let overgrown = joined.height > height(&left.left) + 1;
        left.right = Some(joined);
        if overgrown {
            rotate_left(left)
        } else {
            left.update();
            left
        }
    }
}

// precondition: `right` is more than one level taller than `left`
fn join_left(left: Tree, value: Value, mut right: Box<Node>) -> Box<Node> {
    if height(&right.left) <= height(&left) + 1 {
        let mut mid = Box::new(Node::new(value));
        mid.left = left;
        mid.right = right.left.take();
        mid.update();

        let overgrown = mid.height > height(&right.right) + 1;
        right.left = Some(mid);
        if overgrown {
            rotate_left_right(right)
        } else {
            right.update();
            right
        }
    } else {
        let spine = match right.left.take() {
            Some(spine) => spine,
            None => unreachable!(),
        };
        let joined = join_left(left, value, spine);

        let overgrown = joined.height > height(&right.right) + 1;
        right.left = Some(joined);
        if overgrown {
            rotate_right(right)
        } else {
            right.update();
            right
        }
    }
}

/// Builds a balanced tree out of `left`, `value`, and `right` in time proportional to the height
/// difference of the operands.
///
/// precondition: every value in `left` < `value` < every value in `right`
pub fn join(left: Tree, value: Value, right: Tree) -> Tree {
    if height(&left) > height(&right) + 1 {
        let node = match left {
            Some(node) => node,
            None => unreachable!(),
        };
        Some(join_right(node, value, right))
    } else if height(&right) > height(&left) + 1 {
        let node = match right {
            Some(node) => node,
            None => unreachable!(),
        };
        Some(join_left(left, value, node))
    } else {
        let mut node = Box::new(Node::new(value));
        node.left = left;
        node.right = right;
        node.update();
        Some(node)
    }
}

/// Partitions `tree` into the values below and above `value`, reporting whether `value` itself
/// was present. Consumes the tree; both halves come back balanced through `join`.
pub fn split(tree: Tree, value: Value) -> (Tree, Tree, bool) {
    match tree {
        Some(mut node) => match value.cmp(&node.value) {
            Ordering::Equal => (node.left.take(), node.right.take(), true),
            Ordering::Less => {
                let (below, above, present) = split(node.left.take(), value);
                let above = join(above, node.value, node.right.take());
                (below, above, present)
            },
            Ordering::Greater => {
                let (below, above, present) = split(node.right.take(), value);
                let below = join(node.left.take(), node.value, below);
                (below, above, present)
            },
        },
        None => (None, None, false),
    }
}

/// Removes the maximum value of the subtree rooted at `node` and returns the remainder together
/// with that value, for use as a join separator.
pub fn split_last(mut node: Box<Node>) -> (Tree, Value) {
    match node.right.take() {
        Some(right) => {
            let (rest, last) = split_last(right);
            (join(node.left.take(), node.value, rest), last)
        },
        None => (node.left.take(), node.value),
    }
}

/// Joins two trees when no separator value is at hand: the maximum of `left` is extracted to
/// serve as one.
///
/// precondition: every value in `left` < every value in `right`
pub fn join_no_key(left: Tree, right: Tree) -> Tree {
    match left {
        Some(node) => {
            let (rest, last) = split_last(node);
            join(rest, last, right)
        },
        None => right,
    }
}

/// Computes the union of two trees, consuming both. Splitting `left` around the root of `right`
/// and recursing yields O(m log(n / m + 1)) for |left| = n >= |right| = m.
pub fn union(left: Tree, right: Tree) -> Tree {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (left, Some(mut right_node)) => {
            let (below, above, _) = split(left, right_node.value);
            let union_left = union(below, right_node.left.take());
            let union_right = union(above, right_node.right.take());
            join(union_left, right_node.value, union_right)
        },
    }
}

/// Computes the intersection of two trees, consuming both. Subtrees that fall out of the result
/// are simply dropped.
pub fn intersection(left: Tree, right: Tree) -> Tree {
    match (left, right) {
        (None, _) | (_, None) => None,
        (left, Some(mut right_node)) => {
            let (below, above, present) = split(left, right_node.value);
            let inter_left = intersection(below, right_node.left.take());
            let inter_right = intersection(above, right_node.right.take());
            if present {
                join(inter_left, right_node.value, inter_right)
            } else {
                join_no_key(inter_left, inter_right)
            }
        },
    }
}

#[cfg(test)]
pub fn check_invariants(tree: &Tree) {
    fn check(tree: &Tree, lower: Option<Value>, upper: Option<Value>) -> i32 {
        match tree {
            Some(ref node) => {
                if let Some(lower) = lower {
                    assert!(node.value > lower);
                }
                if let Some(upper) = upper {
                    assert!(node.value < upper);
                }

                let height_left = check(&node.left, lower, Some(node.value));
                let height_right = check(&node.right, Some(node.value), upper);

                assert_eq!(node.height, height_left.max(height_right) + 1);
                assert!((height_left - height_right).abs() <= 1);

                node.height
            },
            None => -1,
        }
    }

    check(tree, None, None);
}
