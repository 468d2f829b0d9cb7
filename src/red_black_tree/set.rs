use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::bst::{IntoPostorder, Iter, Postorder};
use crate::error;
use crate::merge;
use crate::red_black_tree::node::Color;
use crate::red_black_tree::tree::{self, Tree};
use log::debug;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered set implemented using a red-black tree.
///
/// A red-black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, no red node has a red child, and every path from a node down to an absent
/// child passes through the same number of black nodes, which keeps the height within twice the
/// optimum. Every node links back to its parent, so traversals need neither recursion nor an
/// auxiliary stack.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
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
pub struct RedBlackSet<T> {
    tree: Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts an item into the set. Returns `false` and drops the item if an equal item is
    /// already present, in which case the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Checks every red-black invariant: strictly ascending inorder items, consistent parent
    /// links, a black root, no red node with a red child, and equal black height on every path.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..100).collect();
    /// assert_eq!(set.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> error::Result<()>
    where
        T: Ord,
    {
        tree::validate(&self.tree).map_err(|violation| {
            debug!("red-black tree failed validation: {}", violation);
            violation
        })
    }

    /// Returns `true` if every red-black invariant holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<i32> = vec![2, 5, 7, 10, 12].into_iter().collect();
    /// let other: RedBlackSet<i32> = vec![-1, 3, 7, 10, 800].into_iter().collect();
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
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the set that yields items using post-order traversal, so every
    /// item comes after the items of both of its subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(set.postorder().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
    pub fn postorder(&self) -> RedBlackSetPostorder<'_, T> {
        RedBlackSetPostorder {
            tree_iter: self.tree.postorder(),
        }
    }

    /// Consumes the set, yielding owned items using post-order traversal. Each node is freed as
    /// soon as its item is yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(set.into_postorder().collect::<Vec<u32>>(), vec![1, 3, 2]);
    /// ```
    pub fn into_postorder(self) -> RedBlackSetIntoPostorder<T> {
        RedBlackSetIntoPostorder {
            tree_iter: IntoPostorder::new(self.tree),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree_iter: Iter<'a, T, Color>,
}

impl<'a, T> Clone for RedBlackSetIter<'a, T> {
    fn clone(&self) -> Self {
        RedBlackSetIter {
            tree_iter: self.tree_iter.clone(),
        }
    }
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
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

impl<'a, T> ExactSizeIterator for RedBlackSetIter<'a, T> where T: 'a {}

/// A post-order iterator for `RedBlackSet<T>`.
///
/// This iterator yields immutable references, visiting both subtrees of a node before the node.
pub struct RedBlackSetPostorder<'a, T> {
    tree_iter: Postorder<'a, T, Color>,
}

impl<'a, T> Iterator for RedBlackSetPostorder<'a, T>
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

impl<'a, T> ExactSizeIterator for RedBlackSetPostorder<'a, T> where T: 'a {}

/// An owning post-order iterator for `RedBlackSet<T>`.
///
/// This iterator frees each node as it yields the node's item.
pub struct RedBlackSetIntoPostorder<T> {
    tree_iter: IntoPostorder<T, Color>,
}

impl<T> Iterator for RedBlackSetIntoPostorder<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoPostorder<T> {}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
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

impl<T> Serialize for RedBlackSet<T>
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

impl<'de, T> Deserialize<'de> for RedBlackSet<T>
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
            type Value = RedBlackSet<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of set items")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = RedBlackSet::new();
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

#[cfg(test)]
mod tests {
    use super::RedBlackSet;

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
        assert!(set.is_valid());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        assert!(set.is_valid());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_root_with_right_child() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(2);
        assert_eq!(set.remove(&1), Some(1));
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2]);
        assert!(set.is_valid());
    }

    #[test]
    fn test_remove_borrowed() {
        let mut set = RedBlackSet::new();
        set.insert(String::from("a"));
        set.insert(String::from("b"));
        assert_eq!(set.remove("a"), Some(String::from("a")));
        assert!(set.contains("b"));
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn test_postorder() {
        let set: RedBlackSet<u32> = (1..8).collect();
        //        2
        //      /   \
        //     1     4
        //         /   \
        //        3     6
        //             / \
        //            5   7
        assert_eq!(
            set.postorder().collect::<Vec<&u32>>(),
            vec![&1, &3, &5, &7, &6, &4, &2],
        );
    }

    #[test]
    fn test_into_postorder() {
        let set: RedBlackSet<u32> = (1..8).collect();
        let expected = set.postorder().cloned().collect::<Vec<u32>>();
        assert_eq!(set.into_postorder().collect::<Vec<u32>>(), expected);
    }

    #[test]
    fn test_clone() {
        let mut set: RedBlackSet<u32> = (0..32).collect();
        let cloned = set.clone();
        set.remove(&0);
        assert_eq!(cloned.len(), 32);
        assert!(cloned.contains(&0));
        assert!(cloned.is_valid());
    }

    #[test]
    fn test_eq_and_debug() {
        let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
        let other: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(set, other);
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn test_intersect() {
        let set: RedBlackSet<i32> = vec![2, 13, 10, 5, 12, 7].into_iter().collect();
        let other = vec![-1, 3, 7, 10, 12, 800];
        let common = set.intersect(&other);
        assert_eq!(common.iter().collect::<Vec<&i32>>(), vec![&7, &10, &12]);
        assert!(common.is_valid());
    }
}
