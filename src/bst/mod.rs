//! Parent-linked binary search tree storage shared by the balanced tree variants.
//!
//! `RawTree` owns the node arena and the root link and provides the structural primitives that
//! both variants build on: descent, linking a new leaf, single rotations, splicing a node out of
//! the tree, traversal cursors, teardown, and the order/link consistency check. Balance metadata
//! is opaque here; each variant maintains its own around these primitives.

pub mod node;
pub mod traversal;

use crate::arena::{Handle, TypedArena};
use crate::error::{Result, Violation};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;

pub use self::node::{Node, Side};
pub use self::traversal::{InorderCursor, IntoPostorder, Iter, Postorder, PostorderCursor};

/// Outcome of searching for an item's position.
pub enum Location {
    /// The item is already stored in the tree.
    Found,
    /// The item is absent and belongs at this empty child link. `None` means the tree is empty.
    Vacant(Option<(Handle, Side)>),
}

/// A node that has been unlinked from the tree and freed.
pub struct Detached<T, B> {
    pub item: T,
    /// Balance metadata of the position that physically disappeared. When the removed node had
    /// two children this is the inorder successor's original metadata.
    pub balance: B,
    /// Parent of the link whose subtree lost a node, and which side of it that link is. `None`
    /// when the link was the root.
    pub vacated: Option<(Handle, Side)>,
}

#[derive(Clone)]
pub struct RawTree<T, B> {
    pub arena: TypedArena<Node<T, B>>,
    pub root: Option<Handle>,
}

impl<T, B> RawTree<T, B> {
    pub fn new(chunk_size: usize) -> Self {
        RawTree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node(&self, handle: Handle) -> &Node<T, B> {
        &self.arena[handle]
    }

    pub fn node_mut(&mut self, handle: Handle) -> &mut Node<T, B> {
        &mut self.arena[handle]
    }

    /// Returns the child link of `parent` that points at `handle`.
    pub fn side_of(&self, parent: Handle, handle: Handle) -> Side {
        if self.arena[parent].left == Some(handle) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Returns the node's parent together with the side of the parent it hangs from.
    pub fn parent_link(&self, handle: Handle) -> Option<(Handle, Side)> {
        self.arena[handle]
            .parent
            .map(|parent| (parent, self.side_of(parent, handle)))
    }

    pub fn child_at(&self, link: Option<(Handle, Side)>) -> Option<Handle> {
        match link {
            Some((parent, side)) => self.arena[parent].child(side),
            None => self.root,
        }
    }

    /// Points the link `old` occupies at `new`, fixing `new`'s parent link.
    pub fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, old);
                *self.arena[parent].child_mut(side) = new;
            },
            None => self.root = new,
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Rotates the subtree rooted at `handle` towards `side` and returns the new subtree root.
    ///
    /// ```text
    ///     x      rotate(x, Left) ->      y
    ///      \                            /
    ///       y    <- rotate(y, Right)   x
    /// ```
    pub fn rotate(&mut self, handle: Handle, side: Side) -> Handle {
        trace!("rotating {:?} towards {:?}", handle, side);
        let pivot_side = side.opposite();
        let pivot = self.arena[handle]
            .child(pivot_side)
            .expect("Expected pivot child node to be `Some`.");
        let inner = self.arena[pivot].child(side);

        *self.arena[handle].child_mut(pivot_side) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        let parent = self.arena[handle].parent;
        self.replace_child(parent, handle, Some(pivot));
        *self.arena[pivot].child_mut(side) = Some(handle);
        self.arena[handle].parent = Some(pivot);
        pivot
    }

    pub fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.arena[self.leftmost(root)].item)
    }

    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self.arena[self.rightmost(root)].item)
    }

    pub fn find<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.item.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Descends from the root looking for `item`. `visit` is called with every node passed on
    /// the way down, including the matching node if there is one.
    pub fn locate<F>(&self, item: &T, mut visit: F) -> Location
    where
        T: Ord,
        F: FnMut(Handle, &Node<T, B>),
    {
        let mut link = None;
        while let Some(handle) = self.child_at(link) {
            let node = &self.arena[handle];
            visit(handle, node);
            let side = match item.cmp(&node.item) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Location::Found,
            };
            link = Some((handle, side));
        }
        Location::Vacant(link)
    }

    /// Allocates a leaf at the empty link `link` and returns its handle.
    pub fn attach(&mut self, link: Option<(Handle, Side)>, item: T, balance: B) -> Handle {
        let parent = link.map(|(parent, _)| parent);
        let handle = self.arena.allocate(Node::new(item, balance, parent));
        match link {
            Some((parent, side)) => *self.arena[parent].child_mut(side) = Some(handle),
            None => self.root = Some(handle),
        }
        handle
    }

    /// Unlinks `handle` from the tree and frees it.
    ///
    /// A node with at most one child is replaced by that child. A node with two children is
    /// replaced by its inorder successor, which also takes over the removed node's balance
    /// metadata; the successor's own position is then filled by its right child.
    pub fn detach(&mut self, handle: Handle) -> Detached<T, B>
    where
        B: Copy,
    {
        let (left, right, parent) = {
            let node = &self.arena[handle];
            (node.left, node.right, node.parent)
        };

        let vacated = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                let vacated = if successor == right {
                    (successor, Side::Right)
                } else {
                    let successor_parent = self.arena[successor]
                        .parent
                        .expect("Expected successor to have a parent.");
                    let successor_right = self.arena[successor].right;
                    self.replace_child(Some(successor_parent), successor, successor_right);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    (successor_parent, Side::Left)
                };
                self.replace_child(parent, handle, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);

                let successor_balance = self.arena[successor].balance;
                self.arena[successor].balance = self.arena[handle].balance;
                self.arena[handle].balance = successor_balance;
                Some(vacated)
            },
            (child, None) | (None, child) => {
                let vacated = parent.map(|parent| (parent, self.side_of(parent, handle)));
                self.replace_child(parent, handle, child);
                vacated
            },
        };

        let Node { item, balance, .. } = self.arena.free(handle);
        Detached {
            item,
            balance,
            vacated,
        }
    }

    /// Frees every node with a postorder walk. Each node is freed right after the cursor yields
    /// it, which the cursor's look-ahead makes safe.
    pub fn clear(&mut self) {
        let mut cursor = PostorderCursor::new(self);
        let mut freed = 0;
        while let Some(handle) = cursor.advance(&self.arena) {
            self.arena.free(handle);
            freed += 1;
        }
        self.root = None;
        trace!("freed {} nodes", freed);
    }

    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(self)
    }

    pub fn postorder(&self) -> Postorder<'_, T, B> {
        Postorder::new(self)
    }

    /// Checks strict inorder ascent, parent/child link agreement and the node count.
    pub fn check_order_and_links(&self) -> Result<()>
    where
        T: Ord,
    {
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(Violation::BrokenParentLink);
            }
        }

        let mut cursor = InorderCursor::new(self);
        let mut prev: Option<&T> = None;
        let mut count = 0;
        while let Some(handle) = cursor.advance(&self.arena) {
            let node = &self.arena[handle];
            for child in node.left.iter().chain(node.right.iter()) {
                if self.arena[*child].parent != Some(handle) {
                    return Err(Violation::BrokenParentLink);
                }
            }
            if let Some(prev) = prev {
                if *prev >= node.item {
                    return Err(Violation::UnorderedItems);
                }
            }
            prev = Some(&node.item);
            count += 1;
        }

        if count != self.len() {
            return Err(Violation::LengthMismatch {
                expected: self.len(),
                found: count,
            });
        }
        Ok(())
    }
}
