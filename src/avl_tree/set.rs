use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::Value;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered set implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. This set additionally
/// exposes a join-based union and intersection; both consume their operands and return a brand
/// new set.
///
/// # Examples
/// ```
/// use ordset::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(3));
///
/// assert!(set.remove(0));
/// assert!(!set.remove(1));
/// ```
#[derive(Clone)]
pub struct AvlSet {
    root: tree::Tree,
    len: usize,
}

impl AvlSet {
    /// Constructs a new, empty `AvlSet`.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let set = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlSet { root: None, len: 0 }
    }

    /// Inserts a value into the set. Returns `true` if the value was not already present; a
    /// duplicate insertion is a no-op reported as `false`.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: Value) -> bool {
        let inserted = tree::insert(&mut self.root, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes a value from the set. Returns `true` if the value was present; removing an absent
    /// value is a no-op reported as `false`.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(set.remove(1));
    /// assert!(!set.remove(1));
    /// ```
    pub fn remove(&mut self, value: Value) -> bool {
        let removed = tree::remove(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(0));
    /// assert!(set.contains(1));
    /// ```
    pub fn contains(&self, value: Value) -> bool {
        tree::contains(&self.root, value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the union of two sets, consuming both. Runs in O(m log(n / m + 1)) for set sizes
    /// n >= m, which beats inserting the smaller set's elements one at a time.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut a = AvlSet::new();
    /// a.insert(1);
    /// a.insert(2);
    ///
    /// let mut b = AvlSet::new();
    /// b.insert(2);
    /// b.insert(3);
    ///
    /// let union = AvlSet::union(a, b);
    /// assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2, &3]);
    /// assert_eq!(union.len(), 3);
    /// ```
    pub fn union(left: Self, right: Self) -> Self {
        let AvlSet { root: left_root, .. } = left;
        let AvlSet { root: right_root, .. } = right;
        let root = tree::union(left_root, right_root);
        let len = tree::count(&root);
        AvlSet { root, len }
    }

    /// Returns the intersection of two sets, consuming both.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut a = AvlSet::new();
    /// a.insert(1);
    /// a.insert(2);
    ///
    /// let mut b = AvlSet::new();
    /// b.insert(2);
    /// b.insert(3);
    ///
    /// let intersection = AvlSet::intersection(a, b);
    /// assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&2]);
    /// assert_eq!(intersection.len(), 1);
    /// ```
    pub fn intersection(left: Self, right: Self) -> Self {
        let AvlSet { root: left_root, .. } = left;
        let AvlSet { root: right_root, .. } = right;
        let root = tree::intersection(left_root, right_root);
        let len = tree::count(&root);
        AvlSet { root, len }
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal,
    /// so they arrive in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ordset::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter {
        AvlSetIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        tree::check_invariants(&self.root);
        assert_eq!(self.len, tree::count(&self.root));
    }
}

impl IntoIterator for AvlSet {
    type IntoIter = AvlSetIntoIter;
    type Item = Value;

    fn into_iter(self) -> Self::IntoIter {
        AvlSetIntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a AvlSet {
    type IntoIter = AvlSetIter<'a>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct AvlSetIntoIter {
    current: tree::Tree,
    stack: Vec<Node>,
}

impl Iterator for AvlSetIntoIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            value
        })
    }
}

/// An iterator for `AvlSet`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a> {
    current: &'a tree::Tree,
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for AvlSetIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.value
        })
    }
}

impl Default for AvlSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AvlSet {
    fn eq(&self, other: &AvlSet) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for AvlSet {}

impl fmt::Debug for AvlSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for AvlSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for AvlSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AvlSetVisitor;

        impl<'de> Visitor<'de> for AvlSetVisitor {
            type Value = AvlSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<AvlSet, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = AvlSet::new();
                while let Some(value) = seq.next_element()? {
                    set.insert(value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(AvlSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let set = AvlSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(set.contains(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<&i64>>(), vec![&1]);
    }

    #[test]
    fn test_insert_keeps_balance() {
        let mut set = AvlSet::new();
        for &value in &[5, 3, 8, 1, 4, 7, 9] {
            assert!(set.insert(value));
            set.check_invariants();
        }
        assert_eq!(
            set.iter().collect::<Vec<&i64>>(),
            vec![&1, &3, &4, &5, &7, &8, &9],
        );
    }

    #[test]
    fn test_insert_ascending_keeps_balance() {
        let mut set = AvlSet::new();
        for value in 0..256 {
            set.insert(value);
            set.check_invariants();
        }
        assert_eq!(set.len(), 256);
    }

    #[test]
    fn test_remove() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert!(set.remove(1));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_remove_absent() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert!(!set.remove(2));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<&i64>>(), vec![&1]);
    }

    #[test]
    fn test_remove_two_children_keeps_balance() {
        let mut set = AvlSet::new();
        for value in 0..64 {
            set.insert(value);
        }

        // removing interior values exercises the two-children case repeatedly
        for value in (0..64).step_by(2) {
            assert!(set.remove(value));
            set.check_invariants();
        }

        assert_eq!(
            set.iter().cloned().collect::<Vec<i64>>(),
            (0..64).filter(|value| value % 2 == 1).collect::<Vec<i64>>(),
        );
    }

    #[test]
    fn test_clear() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
    }

    #[test]
    fn test_union() {
        let mut a = AvlSet::new();
        for value in 1..=4 {
            a.insert(value);
        }

        let mut b = AvlSet::new();
        for value in 3..=6 {
            b.insert(value);
        }

        let union = AvlSet::union(a, b);
        union.check_invariants();
        assert_eq!(
            union.iter().collect::<Vec<&i64>>(),
            vec![&1, &2, &3, &4, &5, &6],
        );
        assert_eq!(union.len(), 6);
    }

    #[test]
    fn test_union_with_empty() {
        let mut a = AvlSet::new();
        a.insert(1);

        let union = AvlSet::union(a, AvlSet::new());
        assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1]);
        assert_eq!(union.len(), 1);
    }

    #[test]
    fn test_intersection() {
        let mut a = AvlSet::new();
        for value in 1..=4 {
            a.insert(value);
        }

        let mut b = AvlSet::new();
        for value in 3..=6 {
            b.insert(value);
        }

        let intersection = AvlSet::intersection(a, b);
        intersection.check_invariants();
        assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&3, &4]);
        assert_eq!(intersection.len(), 2);
    }

    #[test]
    fn test_intersection_disjoint() {
        let mut a = AvlSet::new();
        a.insert(1);
        a.insert(2);

        let mut b = AvlSet::new();
        b.insert(3);
        b.insert(4);

        let intersection = AvlSet::intersection(a, b);
        assert!(intersection.is_empty());
    }

    #[test]
    fn test_clone_independence() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(2);

        let mut clone = set.clone();
        clone.insert(3);
        clone.remove(1);

        assert_eq!(set.iter().collect::<Vec<&i64>>(), vec![&1, &2]);
        assert_eq!(set.len(), 2);
        assert_eq!(clone.iter().collect::<Vec<&i64>>(), vec![&2, &3]);
    }

    #[test]
    fn test_into_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<i64>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_serde() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(2);

        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::I64(1),
                Token::I64(2),
                Token::I64(3),
                Token::SeqEnd,
            ],
        );
    }
}
