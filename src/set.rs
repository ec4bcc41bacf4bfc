use crate::avl_tree::{AvlSet, AvlSetIntoIter, AvlSetIter};
use crate::llrb_tree::{LlrbSet, LlrbSetIntoIter, LlrbSetIter};
use crate::Value;
use std::fmt;

/// The tree implementation backing a `Set`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Backend {
    Avl,
    Llrb,
}

/// An ordered set backed by the self-balancing tree chosen at construction.
///
/// Primitive operations forward to the active backend. Union and intersection pick, per call, the
/// cheaper algorithm for the operand pair: two AVL sets are combined with the join-based algebra
/// on clones, every other pairing drives the smaller operand through the larger one. Both
/// operations leave their operands untouched.
///
/// # Examples
/// ```
/// use ordset::{Backend, Set};
///
/// let mut a = Set::new(Backend::Avl);
/// a.insert(1);
/// a.insert(2);
///
/// let mut b = Set::new(Backend::Llrb);
/// b.insert(2);
/// b.insert(3);
///
/// let union = Set::union(&a, &b);
/// assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2, &3]);
///
/// let intersection = Set::intersection(&a, &b);
/// assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&2]);
///
/// // operands are preserved
/// assert_eq!(a.len(), 2);
/// assert_eq!(b.len(), 2);
/// ```
#[derive(Clone)]
pub struct Set {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Avl(AvlSet),
    Llrb(LlrbSet),
}

impl Set {
    /// Constructs a new, empty `Set` backed by the requested tree.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let set = Set::new(Backend::Avl);
    /// assert!(set.is_empty());
    /// assert_eq!(set.backend(), Backend::Avl);
    /// ```
    pub fn new(backend: Backend) -> Self {
        let repr = match backend {
            Backend::Avl => Repr::Avl(AvlSet::new()),
            Backend::Llrb => Repr::Llrb(LlrbSet::new()),
        };
        Set { repr }
    }

    /// Returns the backend this set was constructed with.
    pub fn backend(&self) -> Backend {
        match self.repr {
            Repr::Avl(..) => Backend::Avl,
            Repr::Llrb(..) => Backend::Llrb,
        }
    }

    /// Inserts a value into the set. Returns `true` if the value was not already present; a
    /// duplicate insertion is a no-op reported as `false`.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let mut set = Set::new(Backend::Llrb);
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: Value) -> bool {
        match self.repr {
            Repr::Avl(ref mut set) => set.insert(value),
            Repr::Llrb(ref mut set) => set.insert(value),
        }
    }

    /// Removes a value from the set. Returns `true` if the value was present; removing an absent
    /// value is a no-op reported as `false`.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let mut set = Set::new(Backend::Avl);
    /// set.insert(1);
    /// assert!(set.remove(1));
    /// assert!(!set.remove(1));
    /// ```
    pub fn remove(&mut self, value: Value) -> bool {
        match self.repr {
            Repr::Avl(ref mut set) => set.remove(value),
            Repr::Llrb(ref mut set) => set.remove(value),
        }
    }

    /// Checks if a value exists in the set.
    pub fn contains(&self, value: Value) -> bool {
        match self.repr {
            Repr::Avl(ref set) => set.contains(value),
            Repr::Llrb(ref set) => set.contains(value),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Avl(ref set) => set.len(),
            Repr::Llrb(ref set) => set.len(),
        }
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        match self.repr {
            Repr::Avl(ref mut set) => set.clear(),
            Repr::Llrb(ref mut set) => set.clear(),
        }
    }

    /// Returns the union of two sets, leaving both operands untouched.
    ///
    /// When both operands are AVL-backed, their backing sets are cloned and combined with the
    /// join-based union in O(m log(n / m + 1)). Any other pairing clones the larger operand and
    /// inserts the smaller operand's elements into it one at a time, in O((n + m) log(n + m)).
    /// The result keeps the backend of the larger operand; on equal lengths the right operand is
    /// treated as the larger one.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let mut a = Set::new(Backend::Avl);
    /// a.insert(1);
    ///
    /// let mut b = Set::new(Backend::Avl);
    /// b.insert(2);
    ///
    /// let union = Set::union(&a, &b);
    /// assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2]);
    /// assert!(a.contains(1) && b.contains(2));
    /// ```
    pub fn union(left: &Self, right: &Self) -> Self {
        if let (&Repr::Avl(ref a), &Repr::Avl(ref b)) = (&left.repr, &right.repr) {
            return Set {
                repr: Repr::Avl(AvlSet::union(a.clone(), b.clone())),
            };
        }

        let (smaller, larger) = if right.len() < left.len() {
            (right, left)
        } else {
            (left, right)
        };

        let mut result = larger.clone();
        for &value in smaller {
            result.insert(value);
        }
        result
    }

    /// Returns the intersection of two sets, leaving both operands untouched.
    ///
    /// The smaller operand drives an in-order walk; every value also contained in the other
    /// operand is inserted into a fresh set of the driver's backend. This path is deliberately
    /// used for AVL pairs as well: the join-based intersection consumes its inputs, so preserving
    /// the operands would cost a full clone up front, making it no cheaper than the walk.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let mut a = Set::new(Backend::Avl);
    /// a.insert(1);
    /// a.insert(2);
    ///
    /// let mut b = Set::new(Backend::Llrb);
    /// b.insert(2);
    ///
    /// let intersection = Set::intersection(&a, &b);
    /// assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&2]);
    /// ```
    pub fn intersection(left: &Self, right: &Self) -> Self {
        let (smaller, larger) = if right.len() < left.len() {
            (right, left)
        } else {
            (left, right)
        };

        let mut result = Set::new(smaller.backend());
        for &value in smaller {
            if larger.contains(value) {
                result.insert(value);
            }
        }
        result
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal,
    /// so they arrive in ascending order regardless of the backend.
    ///
    /// # Examples
    /// ```
    /// use ordset::{Backend, Set};
    ///
    /// let mut set = Set::new(Backend::Llrb);
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SetIter {
        let repr = match self.repr {
            Repr::Avl(ref set) => SetIterRepr::Avl(set.iter()),
            Repr::Llrb(ref set) => SetIterRepr::Llrb(set.iter()),
        };
        SetIter { repr }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        match self.repr {
            Repr::Avl(ref set) => set.check_invariants(),
            Repr::Llrb(ref set) => set.check_invariants(),
        }
    }
}

impl IntoIterator for Set {
    type IntoIter = SetIntoIter;
    type Item = Value;

    fn into_iter(self) -> Self::IntoIter {
        let repr = match self.repr {
            Repr::Avl(set) => SetIntoIterRepr::Avl(set.into_iter()),
            Repr::Llrb(set) => SetIntoIterRepr::Llrb(set.into_iter()),
        };
        SetIntoIter { repr }
    }
}

impl<'a> IntoIterator for &'a Set {
    type IntoIter = SetIter<'a>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `Set`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct SetIntoIter {
    repr: SetIntoIterRepr,
}

enum SetIntoIterRepr {
    Avl(AvlSetIntoIter),
    Llrb(LlrbSetIntoIter),
}

impl Iterator for SetIntoIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.repr {
            SetIntoIterRepr::Avl(ref mut iter) => iter.next(),
            SetIntoIterRepr::Llrb(ref mut iter) => iter.next(),
        }
    }
}

/// An iterator for `Set`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct SetIter<'a> {
    repr: SetIterRepr<'a>,
}

enum SetIterRepr<'a> {
    Avl(AvlSetIter<'a>),
    Llrb(LlrbSetIter<'a>),
}

impl<'a> Iterator for SetIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.repr {
            SetIterRepr::Avl(ref mut iter) => iter.next(),
            SetIterRepr::Llrb(ref mut iter) => iter.next(),
        }
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Set) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Set {}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Backend, Set};
    use serde_test::{assert_tokens, Token};

    const BACKENDS: [Backend; 2] = [Backend::Avl, Backend::Llrb];

    #[test]
    fn test_new_empty() {
        for &backend in &BACKENDS {
            let set = Set::new(backend);
            assert_eq!(set.backend(), backend);
            assert_eq!(set.len(), 0);
            assert!(set.is_empty());
        }
    }

    #[test]
    fn test_dispatch_primitives() {
        for &backend in &BACKENDS {
            let mut set = Set::new(backend);

            assert!(set.insert(5));
            assert!(set.insert(3));
            assert!(!set.insert(5));

            assert!(set.contains(3));
            assert!(!set.contains(4));
            assert_eq!(set.len(), 2);

            assert!(set.remove(3));
            assert!(!set.remove(3));
            assert_eq!(set.len(), 1);

            set.clear();
            assert!(set.is_empty());
        }
    }

    #[test]
    fn test_iter_ascending() {
        for &backend in &BACKENDS {
            let mut set = Set::new(backend);
            for &value in &[5, 3, 8, 1, 4, 7, 9] {
                set.insert(value);
            }
            assert_eq!(
                set.iter().collect::<Vec<&i64>>(),
                vec![&1, &3, &4, &5, &7, &8, &9],
            );
        }
    }

    fn build(backend: Backend, values: &[i64]) -> Set {
        let mut set = Set::new(backend);
        for &value in values {
            set.insert(value);
        }
        set
    }

    #[test]
    fn test_union_avl_pair() {
        let a = build(Backend::Avl, &[1, 2, 3, 4]);
        let b = build(Backend::Avl, &[3, 4, 5, 6]);

        let union = Set::union(&a, &b);
        union.check_invariants();
        assert_eq!(union.backend(), Backend::Avl);
        assert_eq!(
            union.iter().collect::<Vec<&i64>>(),
            vec![&1, &2, &3, &4, &5, &6],
        );
        assert_eq!(union.len(), 6);

        // operands preserved
        assert_eq!(a, build(Backend::Avl, &[1, 2, 3, 4]));
        assert_eq!(b, build(Backend::Avl, &[3, 4, 5, 6]));
        a.check_invariants();
        b.check_invariants();
    }

    #[test]
    fn test_union_mixed_backends() {
        let a = build(Backend::Llrb, &[1, 2]);
        let b = build(Backend::Avl, &[2, 3, 4]);

        let union = Set::union(&a, &b);
        union.check_invariants();
        // the larger operand is the accumulator, so its backend wins
        assert_eq!(union.backend(), Backend::Avl);
        assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2, &3, &4]);

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_union_equal_lengths_backend() {
        let a = build(Backend::Avl, &[1, 2]);
        let b = build(Backend::Llrb, &[3, 4]);

        // on a length tie the right operand acts as the larger one
        assert_eq!(Set::union(&a, &b).backend(), Backend::Llrb);
        assert_eq!(Set::union(&b, &a).backend(), Backend::Avl);
    }

    #[test]
    fn test_union_with_empty() {
        for &backend in &BACKENDS {
            let a = build(backend, &[1, 2]);
            let empty = Set::new(backend);

            let union = Set::union(&a, &empty);
            assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2]);

            let union = Set::union(&empty, &a);
            assert_eq!(union.iter().collect::<Vec<&i64>>(), vec![&1, &2]);
        }
    }

    #[test]
    fn test_intersection() {
        let a = build(Backend::Avl, &[1, 2, 3, 4]);
        let b = build(Backend::Llrb, &[3, 4, 5, 6]);

        let intersection = Set::intersection(&a, &b);
        intersection.check_invariants();
        assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&3, &4]);
        assert_eq!(intersection.len(), 2);

        // operands preserved
        assert_eq!(a.iter().collect::<Vec<&i64>>(), vec![&1, &2, &3, &4]);
        assert_eq!(b.iter().collect::<Vec<&i64>>(), vec![&3, &4, &5, &6]);
    }

    #[test]
    fn test_intersection_smaller_operand_backend() {
        let a = build(Backend::Llrb, &[2, 3]);
        let b = build(Backend::Avl, &[1, 2, 3, 4]);

        let intersection = Set::intersection(&a, &b);
        assert_eq!(intersection.backend(), Backend::Llrb);
        assert_eq!(intersection.iter().collect::<Vec<&i64>>(), vec![&2, &3]);
    }

    #[test]
    fn test_intersection_with_empty() {
        let a = build(Backend::Avl, &[1, 2, 3]);
        let empty = Set::new(Backend::Llrb);

        let intersection = Set::intersection(&a, &empty);
        assert!(intersection.is_empty());
    }

    #[test]
    fn test_eq_across_backends() {
        let a = build(Backend::Avl, &[1, 2, 3]);
        let b = build(Backend::Llrb, &[1, 2, 3]);
        let c = build(Backend::Llrb, &[1, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_independence() {
        for &backend in &BACKENDS {
            let set = build(backend, &[1, 2]);

            let mut clone = set.clone();
            clone.insert(3);
            clone.remove(1);

            assert_eq!(set.iter().collect::<Vec<&i64>>(), vec![&1, &2]);
            assert_eq!(clone.iter().collect::<Vec<&i64>>(), vec![&2, &3]);
        }
    }

    #[test]
    fn test_into_iter() {
        for &backend in &BACKENDS {
            let set = build(backend, &[5, 1, 3]);
            assert_eq!(set.into_iter().collect::<Vec<i64>>(), vec![1, 3, 5]);
        }
    }

    #[test]
    fn test_debug() {
        let set = build(Backend::Avl, &[2, 1, 3]);
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn test_backend_serde() {
        assert_tokens(
            &Backend::Avl,
            &[Token::UnitVariant {
                name: "Backend",
                variant: "Avl",
            }],
        );
        assert_tokens(
            &Backend::Llrb,
            &[Token::UnitVariant {
                name: "Backend",
                variant: "Llrb",
            }],
        );
    }
}
