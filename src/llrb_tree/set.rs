use crate::llrb_tree::node::{Color, Node};
use crate::llrb_tree::tree;
use crate::Value;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered set implemented using a left-leaning red-black tree.
///
/// A left-leaning red-black tree keeps every red edge on a left link and every root-to-leaf path
/// crossing the same number of black nodes, which bounds its height logarithmically in the number
/// of elements.
///
/// # Examples
/// ```
/// use ordset::llrb_tree::LlrbSet;
///
/// let mut set = LlrbSet::new();
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
pub struct LlrbSet {
    root: tree::Tree,
    len: usize,
}

impl LlrbSet {
    /// Constructs a new, empty `LlrbSet`.
    ///
    /// # Examples
    /// ```
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        LlrbSet { root: None, len: 0 }
    }

    /// Inserts a value into the set. Returns `true` if the value was not already present; a
    /// duplicate insertion is a no-op reported as `false`.
    ///
    /// # Examples
    /// ```
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: Value) -> bool {
        let inserted = tree::insert(&mut self.root, value);
        self.blacken_root();
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
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(1);
    /// assert!(set.remove(1));
    /// assert!(!set.remove(1));
    /// ```
    pub fn remove(&mut self, value: Value) -> bool {
        let removed = tree::remove(&mut self.root, value);
        self.blacken_root();
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
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
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
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
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal,
    /// so they arrive in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ordset::llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> LlrbSetIter {
        LlrbSetIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    fn blacken_root(&mut self) {
        if let Some(ref mut node) = self.root {
            node.color = Color::Black;
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        tree::check_invariants(&self.root);
        assert_eq!(self.len, self.iter().count());
    }
}

impl IntoIterator for LlrbSet {
    type IntoIter = LlrbSetIntoIter;
    type Item = Value;

    fn into_iter(self) -> Self::IntoIter {
        LlrbSetIntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a LlrbSet {
    type IntoIter = LlrbSetIter<'a>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `LlrbSet`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct LlrbSetIntoIter {
    current: tree::Tree,
    stack: Vec<Node>,
}

impl Iterator for LlrbSetIntoIter {
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

/// An iterator for `LlrbSet`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct LlrbSetIter<'a> {
    current: &'a tree::Tree,
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for LlrbSetIter<'a> {
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

impl Default for LlrbSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LlrbSet {
    fn eq(&self, other: &LlrbSet) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for LlrbSet {}

impl fmt::Debug for LlrbSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for LlrbSet {
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

impl<'de> Deserialize<'de> for LlrbSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LlrbSetVisitor;

        impl<'de> Visitor<'de> for LlrbSetVisitor {
            type Value = LlrbSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<LlrbSet, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = LlrbSet::new();
                while let Some(value) = seq.next_element()? {
                    set.insert(value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(LlrbSetVisitor)
    }
}
