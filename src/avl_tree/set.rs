use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::avl_tree::tree::{self, Tree};
use crate::bst::{IntoPostorder, Iter, Postorder};
use crate::error;
use crate::merge;
use log::debug;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Each node stores that
/// difference as a balance factor in `-1..=1` instead of a height, and links back to its parent,
/// so both rebalancing and traversal run without recursion.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert!(set.is_valid());
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: Tree<T>,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts an item into the set. Returns `false` and drops the item if an equal item is
    /// already present, in which case the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, item: T) -> bool
    where
        T: Ord,
    {
        tree::insert(&mut self.tree, item)
    }

    /// Removes an item from the set. If the item exists in the set, it will return the item.
    /// Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::remove(&mut self.tree, key)
    }

    /// Checks if an item exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values. Nodes are freed by a single postorder walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the minimum item of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum item of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Checks every avl invariant: strictly ascending inorder items, consistent parent links, and
    /// a stored balance factor in `-1..=1` that matches the measured height difference at every
    /// node.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (0..100).collect();
    /// assert_eq!(set.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> error::Result<()>
    where
        T: Ord,
    {
        tree::validate(&self.tree).map_err(|violation| {
            debug!("avl tree failed validation: {}", violation);
            violation
        })
    }

    /// Returns `true` if every avl invariant holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(set.is_valid());
    /// ```
    pub fn is_valid(&self) -> bool
    where
        T: Ord,
    {
        self.validate().is_ok()
    }

    /// Returns a new set holding the items of this set that also appear in `other`, which must
    /// yield an ascending, duplicate-free sequence. The element type of `other` only needs to be
    /// comparable with `T`. Runs in time linear in the combined length of both sequences.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<i32> = vec![2, 5, 7, 10, 12].into_iter().collect();
    /// let other: AvlSet<i32> = vec![-1, 3, 7, 10, 800].into_iter().collect();
    ///
    /// let common = set.intersect(&other);
    /// assert_eq!(common.iter().collect::<Vec<&i32>>(), vec![&7, &10]);
    /// ```
    pub fn intersect<'b, U, I>(&self, other: I) -> Self
    where
        T: Ord + Clone + PartialOrd<U>,
        U: 'b,
        I: IntoIterator<Item = &'b U>,
    {
        let mut ret = Self::with_chunk_size(self.tree.arena.chunk_size());
        for item in merge::intersection(self.iter(), other) {
            ret.insert(item.clone());
        }
        ret
    }

    /// Returns an iterator over the set. The iterator will yield items using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the set that yields items using post-order traversal, so every
    /// item comes after the items of both of its subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(set.postorder().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
    pub fn postorder(&self) -> AvlSetPostorder<'_, T> {
        AvlSetPostorder {
            tree_iter: self.tree.postorder(),
        }
    }

    /// Consumes the set, yielding owned items using post-order traversal. Each node is freed as
    /// soon as its item is yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(set.into_postorder().collect::<Vec<u32>>(), vec![1, 3, 2]);
    /// ```
    pub fn into_postorder(self) -> AvlSetIntoPostorder<T> {
        AvlSetIntoPostorder {
            tree_iter: IntoPostorder::new(self.tree),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T> {
    tree_iter: Iter<'a, T, i8>,
}

impl<'a, T> Clone for AvlSetIter<'a, T> {
    fn clone(&self) -> Self {
        AvlSetIter {
            tree_iter: self.tree_iter.clone(),
        }
    }
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for AvlSetIter<'a, T> where T: 'a {}

/// A post-order iterator for `AvlSet<T>`.
///
/// This iterator yields immutable references, visiting both subtrees of a node before the node.
pub struct AvlSetPostorder<'a, T> {
    tree_iter: Postorder<'a, T, i8>,
}

impl<'a, T> Iterator for AvlSetPostorder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for AvlSetPostorder<'a, T> where T: 'a {}

/// An owning post-order iterator for `AvlSet<T>`.
///
/// This iterator frees each node as it yields the node's item.
pub struct AvlSetIntoPostorder<T> {
    tree_iter: IntoPostorder<T, i8>,
}

impl<T> Iterator for AvlSetIntoPostorder<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<T> ExactSizeIterator for AvlSetIntoPostorder<T> {}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for AvlSet<T> where T: Eq {}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> Serialize for AvlSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SetVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for SetVisitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = AvlSet<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of set items")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = AvlSet::new();
                while let Some(item) = seq.next_element()? {
                    set.insert(item);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor {
            marker: PhantomData,
        })
    }
}
