//! Singly-linked list whose nodes live in a `TypedArena`.

use crate::arena::{Handle, TypedArena, DEFAULT_CHUNK_SIZE};
use crate::error::{self, Violation};
use log::debug;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

#[derive(Clone)]
struct Node<T> {
    item: T,
    next: Option<Handle>,
}

/// A singly-linked list that tracks both ends, so items can be added to either end in constant
/// time.
///
/// # Examples
///
/// ```
/// use balanced_collections::linked_list::List;
///
/// let mut list = List::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
///
/// list.reverse();
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
/// ```
#[derive(Clone)]
pub struct List<T> {
    arena: TypedArena<Node<T>>,
    head: Option<Handle>,
    tail: Option<Handle>,
}

impl<T> List<T> {
    /// Constructs a new, empty `List<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let list: List<u32> = List::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `List<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        List {
            arena: TypedArena::new(chunk_size),
            head: None,
            tail: None,
        }
    }

    /// Inserts an item at the front of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(1);
    /// list.push_front(2);
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn push_front(&mut self, item: T) {
        let handle = self.arena.allocate(Node {
            item,
            next: self.head,
        });
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }

    /// Appends an item to the back of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn push_back(&mut self, item: T) {
        let handle = self.arena.allocate(Node { item, next: None });
        match self.tail {
            Some(tail) => self.arena[tail].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }

    /// Reverses the order of the items in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let mut list: List<u32> = (0..3).collect();
    /// list.reverse();
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&2, &1, &0]);
    /// ```
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut curr = self.head;
        while let Some(handle) = curr {
            curr = self.arena[handle].next;
            self.arena[handle].next = prev;
            prev = Some(handle);
        }
        self.tail = self.head;
        self.head = prev;
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Clears the list, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let mut list: List<u32> = (0..3).collect();
    /// list.clear();
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let mut curr = self.head.take();
        while let Some(handle) = curr {
            curr = self.arena.free(handle).next;
        }
        self.tail = None;
    }

    /// Checks that the head and tail agree, that the last reachable node is the tail, and that
    /// every allocated node is reachable from the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let list: List<u32> = (0..3).collect();
    /// assert_eq!(list.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> error::Result<()> {
        self.check_links().map_err(|violation| {
            debug!("list failed validation: {}", violation);
            violation
        })
    }

    /// Returns `true` if the list is internally consistent.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn check_links(&self) -> error::Result<()> {
        if self.head.is_some() != self.tail.is_some() {
            return Err(Violation::BrokenListLinks);
        }

        let mut count = 0;
        let mut curr = self.head;
        while let Some(handle) = curr {
            count += 1;
            if count > self.len() {
                return Err(Violation::BrokenListLinks);
            }
            curr = self.arena[handle].next;
            if curr.is_none() && self.tail != Some(handle) {
                return Err(Violation::BrokenListLinks);
            }
        }

        if count != self.len() {
            return Err(Violation::LengthMismatch {
                expected: self.len(),
                found: count,
            });
        }
        Ok(())
    }

    /// Returns an iterator over the list, from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::linked_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    ///
    /// let mut iterator = list.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> ListIter<'_, T> {
        ListIter {
            arena: &self.arena,
            next: self.head,
            remaining: self.len(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type IntoIter = ListIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        ListIntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T>
where
    T: 'a,
{
    type IntoIter = ListIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `List<T>`.
///
/// This iterator yields owned items from front to back, freeing each node as it goes.
pub struct ListIntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for ListIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let List {
            ref mut arena,
            ref mut head,
            ref mut tail,
        } = self.list;
        head.take().map(|handle| {
            let Node { item, next } = arena.free(handle);
            *head = next;
            if next.is_none() {
                *tail = None;
            }
            item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for ListIntoIter<T> {}

/// An iterator for `List<T>`.
///
/// This iterator yields immutable references from front to back.
pub struct ListIter<'a, T> {
    arena: &'a TypedArena<Node<T>>,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for ListIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.next.map(|handle| {
            let node = &arena[handle];
            self.next = node.next;
            self.remaining -= 1;
            &node.item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for ListIter<'a, T> where T: 'a {}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for List<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for List<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for List<T> where T: Eq {}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> Serialize for List<T>
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

impl<'de, T> Deserialize<'de> for List<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for ListVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = List<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of list items")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = List::new();
                while let Some(item) = seq.next_element()? {
                    list.push_back(item);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor {
            marker: PhantomData,
        })
    }
}
