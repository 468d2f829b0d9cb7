//! Stackless traversal over parent-linked trees.
//!
//! Cursors hold nothing but handles and a phase flag, so a traversal can be stopped at any point
//! and simply dropped, and a fresh traversal never depends on one that came before it. Neither
//! cursor allocates.

use crate::arena::{Handle, TypedArena};
use crate::bst::{Node, RawTree};

/// Inorder cursor. The successor of the yielded node is computed before the node is handed out.
#[derive(Clone, Copy, Debug)]
pub struct InorderCursor {
    next: Option<Handle>,
}

impl InorderCursor {
    pub fn new<T, B>(tree: &RawTree<T, B>) -> Self {
        InorderCursor {
            next: tree.root.map(|root| tree.leftmost(root)),
        }
    }

    pub fn advance<T, B>(&mut self, arena: &TypedArena<Node<T, B>>) -> Option<Handle> {
        let current = self.next?;
        self.next = match arena[current].right {
            Some(mut next) => {
                while let Some(left) = arena[next].left {
                    next = left;
                }
                Some(next)
            },
            None => {
                let mut child = current;
                let mut parent = arena[current].parent;
                while let Some(handle) = parent {
                    if arena[handle].right != Some(child) {
                        break;
                    }
                    child = handle;
                    parent = arena[handle].parent;
                }
                parent
            },
        };
        Some(current)
    }
}

/// Postorder cursor.
///
/// The cursor always sits on the node it will inspect next, never on the node it last yielded,
/// and it never follows a link into a subtree it has finished. The node returned by `advance` may
/// therefore be freed before `advance` is called again.
#[derive(Clone, Copy, Debug)]
pub struct PostorderCursor {
    next: Option<Handle>,
    descending: bool,
}

impl PostorderCursor {
    pub fn new<T, B>(tree: &RawTree<T, B>) -> Self {
        PostorderCursor {
            next: tree.root.map(|root| tree.leftmost(root)),
            descending: true,
        }
    }

    pub fn advance<T, B>(&mut self, arena: &TypedArena<Node<T, B>>) -> Option<Handle> {
        while let Some(next) = self.next {
            if self.descending {
                match arena[next].right {
                    Some(mut right) => {
                        while let Some(left) = arena[right].left {
                            right = left;
                        }
                        self.next = Some(right);
                    },
                    None => self.descending = false,
                }
            } else {
                let parent = arena[next].parent;
                // Coming up from a left subtree means the parent's right subtree is still
                // unvisited.
                self.descending = match parent {
                    Some(parent) => arena[parent].right != Some(next),
                    None => true,
                };
                self.next = parent;
                return Some(next);
            }
        }
        None
    }
}

/// An iterator over a tree that yields immutable references using in-order traversal.
pub struct Iter<'a, T, B> {
    arena: &'a TypedArena<Node<T, B>>,
    cursor: InorderCursor,
    remaining: usize,
}

impl<'a, T, B> Iter<'a, T, B> {
    pub fn new(tree: &'a RawTree<T, B>) -> Self {
        Iter {
            arena: &tree.arena,
            cursor: InorderCursor::new(tree),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, B> Clone for Iter<'a, T, B> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, B> Iterator for Iter<'a, T, B>
where
    T: 'a,
    B: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.cursor.advance(arena).map(|handle| {
            self.remaining -= 1;
            &arena[handle].item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, B> ExactSizeIterator for Iter<'a, T, B> {}

/// An iterator over a tree that yields immutable references using post-order traversal.
pub struct Postorder<'a, T, B> {
    arena: &'a TypedArena<Node<T, B>>,
    cursor: PostorderCursor,
    remaining: usize,
}

impl<'a, T, B> Postorder<'a, T, B> {
    pub fn new(tree: &'a RawTree<T, B>) -> Self {
        Postorder {
            arena: &tree.arena,
            cursor: PostorderCursor::new(tree),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, B> Iterator for Postorder<'a, T, B>
where
    T: 'a,
    B: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.cursor.advance(arena).map(|handle| {
            self.remaining -= 1;
            &arena[handle].item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, B> ExactSizeIterator for Postorder<'a, T, B> {}

/// An owning iterator that yields items using post-order traversal, freeing each node as it is
/// yielded. Nodes not yet yielded are dropped with the iterator.
pub struct IntoPostorder<T, B> {
    tree: RawTree<T, B>,
    cursor: PostorderCursor,
}

impl<T, B> IntoPostorder<T, B> {
    pub fn new(tree: RawTree<T, B>) -> Self {
        let cursor = PostorderCursor::new(&tree);
        IntoPostorder { tree, cursor }
    }
}

impl<T, B> Iterator for IntoPostorder<T, B> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let IntoPostorder {
            ref mut tree,
            ref mut cursor,
        } = self;
        cursor.advance(&tree.arena).map(|handle| {
            if tree.root == Some(handle) {
                tree.root = None;
            }
            tree.arena.free(handle).item
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, B> ExactSizeIterator for IntoPostorder<T, B> {}

#[cfg(test)]
mod tests {
    use super::{InorderCursor, PostorderCursor};
    use crate::bst::{RawTree, Side};

    // Builds the tree
    //
    //         4
    //       /   \
    //      2     6
    //     / \     \
    //    1   3     7
    fn sample() -> RawTree<u32, ()> {
        let mut tree = RawTree::new(8);
        let four = tree.attach(None, 4, ());
        let two = tree.attach(Some((four, Side::Left)), 2, ());
        let six = tree.attach(Some((four, Side::Right)), 6, ());
        tree.attach(Some((two, Side::Left)), 1, ());
        tree.attach(Some((two, Side::Right)), 3, ());
        tree.attach(Some((six, Side::Right)), 7, ());
        tree
    }

    #[test]
    fn test_inorder() {
        let tree = sample();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &6, &7]);
    }

    #[test]
    fn test_postorder() {
        let tree = sample();
        assert_eq!(
            tree.postorder().collect::<Vec<&u32>>(),
            vec![&1, &3, &2, &7, &6, &4],
        );
    }

    #[test]
    fn test_empty() {
        let tree: RawTree<u32, ()> = RawTree::new(8);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.postorder().next(), None);
    }

    #[test]
    fn test_resume_inorder_cursor() {
        let tree = sample();
        let mut cursor = InorderCursor::new(&tree);
        cursor.advance(&tree.arena);
        cursor.advance(&tree.arena);
        let mut resumed = cursor;
        let rest = std::iter::from_fn(|| resumed.advance(&tree.arena))
            .map(|handle| tree.node(handle).item)
            .collect::<Vec<u32>>();
        assert_eq!(rest, vec![3, 4, 6, 7]);
    }

    #[test]
    fn test_free_while_walking_postorder() {
        let mut tree = sample();
        let mut cursor = PostorderCursor::new(&tree);
        let mut freed = Vec::new();
        while let Some(handle) = cursor.advance(&tree.arena) {
            freed.push(tree.arena.free(handle).item);
        }
        assert_eq!(freed, vec![1, 3, 2, 7, 6, 4]);
        assert!(tree.arena.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tree = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_exact_size() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 6);
        iter.next();
        assert_eq!(iter.len(), 5);
        assert_eq!(tree.postorder().len(), 6);
    }
}
