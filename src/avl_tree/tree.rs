use crate::arena::Handle;
use crate::bst::{Detached, PostorderCursor, Location, RawTree, Side};
use crate::error::{Result, Violation};
use std::borrow::Borrow;
use std::cmp;
use std::collections::HashMap;

// The balance metadata of a node is its balance factor: the height of its right subtree minus the
// height of its left subtree.
pub type Tree<T> = RawTree<T, i8>;

// Rotates towards `side` and recomputes the two factors the rotation changes.
fn rotate<T>(tree: &mut Tree<T>, handle: Handle, side: Side) -> Handle {
    let pivot = tree.rotate(handle, side);
    let p = tree.node(handle).balance;
    let q = tree.node(pivot).balance;
    let (p, q) = match side {
        Side::Right => {
            let p = p + 1 - cmp::min(q, 0);
            (p, q + 1 + cmp::max(p, 0))
        },
        Side::Left => {
            let p = p - 1 - cmp::max(q, 0);
            (p, q - 1 + cmp::min(p, 0))
        },
    };
    tree.node_mut(handle).balance = p;
    tree.node_mut(pivot).balance = q;
    pivot
}

// Restores the subtree rooted at a node with a factor of +2 or -2 and returns its new root.
fn rebalance<T>(tree: &mut Tree<T>, handle: Handle) -> Handle {
    let factor = tree.node(handle).balance;
    let heavy = if factor < 0 { Side::Left } else { Side::Right };
    let child = tree
        .node(handle)
        .child(heavy)
        .expect("Expected heavy child node to be `Some`.");
    if tree.node(child).balance * factor < 0 {
        rotate(tree, child, heavy);
    }
    rotate(tree, handle, heavy.opposite())
}

pub fn insert<T>(tree: &mut Tree<T>, item: T) -> bool
where
    T: Ord,
{
    let mut head = tree.root;
    let link = match tree.locate(&item, |handle, node| {
        if node.balance != 0 {
            head = Some(handle);
        }
    }) {
        Location::Found => return false,
        Location::Vacant(link) => link,
    };
    let handle = tree.attach(link, item, 0);

    // Every node strictly below the head had a factor of zero, so only the head can go out of
    // balance.
    let head = match head {
        Some(head) => head,
        None => return true,
    };
    let mut curr = head;
    while curr != handle {
        let (delta, next) = {
            let node = tree.node(curr);
            if tree.node(handle).item < node.item {
                (-1, node.left)
            } else {
                (1, node.right)
            }
        };
        tree.node_mut(curr).balance += delta;
        curr = next.expect("Expected path to inserted node to be `Some`.");
    }

    if tree.node(head).balance.abs() == 2 {
        rebalance(tree, head);
    }
    true
}

pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = tree.find(key)?;
    let Detached { item, vacated, .. } = tree.detach(handle);
    retrace(tree, vacated);
    Some(item)
}

// Walks up from the link whose subtree lost one level of height until some subtree keeps its
// height.
fn retrace<T>(tree: &mut Tree<T>, mut link: Option<(Handle, Side)>) {
    while let Some((parent, side)) = link {
        let factor = match side {
            Side::Left => tree.node(parent).balance + 1,
            Side::Right => tree.node(parent).balance - 1,
        };
        tree.node_mut(parent).balance = factor;

        let subtree = match factor {
            -1 | 1 => break,
            0 => parent,
            _ => {
                let subtree = rebalance(tree, parent);
                if tree.node(subtree).balance != 0 {
                    break;
                }
                subtree
            },
        };
        link = tree.parent_link(subtree);
    }
}

pub fn validate<T>(tree: &Tree<T>) -> Result<()>
where
    T: Ord,
{
    tree.check_order_and_links()?;

    let mut heights: HashMap<Handle, usize> = HashMap::with_capacity(tree.len());
    let mut cursor = PostorderCursor::new(tree);
    while let Some(handle) = cursor.advance(&tree.arena) {
        let node = tree.node(handle);
        if node.balance < -1 || node.balance > 1 {
            return Err(Violation::BalanceFactorOutOfRange {
                factor: node.balance,
            });
        }

        let left = node.left.map_or(0, |child| heights[&child]);
        let right = node.right.map_or(0, |child| heights[&child]);
        let measured = right as isize - left as isize;
        if measured != isize::from(node.balance) {
            return Err(Violation::BalanceFactorMismatch {
                stored: node.balance,
                measured,
            });
        }
        heights.insert(handle, cmp::max(left, right) + 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{insert, remove, validate, Tree};
    use crate::error::Violation;

    fn tree_of(items: &[u32]) -> Tree<u32> {
        let mut tree = Tree::new(16);
        for item in items {
            insert(&mut tree, *item);
        }
        tree
    }

    fn factors(tree: &Tree<u32>) -> Vec<(u32, i8)> {
        let mut cursor = crate::bst::InorderCursor::new(tree);
        let mut ret = Vec::new();
        while let Some(handle) = cursor.advance(&tree.arena) {
            let node = tree.node(handle);
            ret.push((node.item, node.balance));
        }
        ret
    }

    fn root_item(tree: &Tree<u32>) -> u32 {
        tree.node(tree.root.unwrap()).item
    }

    #[test]
    fn test_insert_single_rotation() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(root_item(&tree), 2);
        assert_eq!(factors(&tree), vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_insert_double_rotation() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(root_item(&tree), 2);
        assert_eq!(factors(&tree), vec![(1, 0), (2, 0), (3, 0)]);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_insert_updates_factors_below_head() {
        let tree = tree_of(&[4, 2, 6, 1]);
        assert_eq!(factors(&tree), vec![(1, 0), (2, -1), (4, -1), (6, 0)]);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = tree_of(&[1, 2]);
        assert!(!insert(&mut tree, 2));
        assert_eq!(factors(&tree), vec![(1, 1), (2, 0)]);
    }

    #[test]
    fn test_remove_rotates_balanced_child() {
        let mut tree = tree_of(&[2, 1, 4, 3, 5]);
        assert_eq!(remove(&mut tree, &1), Some(1));
        assert_eq!(root_item(&tree), 4);
        assert_eq!(factors(&tree), vec![(2, 1), (3, 0), (4, -1), (5, 0)]);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_remove_two_children() {
        let mut tree = tree_of(&[2, 1, 4, 3, 5]);
        assert_eq!(remove(&mut tree, &2), Some(2));
        assert_eq!(root_item(&tree), 3);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(remove(&mut tree, &4), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_validate_out_of_range() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root.unwrap();
        tree.node_mut(root).balance = 2;
        assert_eq!(
            validate(&tree),
            Err(Violation::BalanceFactorOutOfRange { factor: 2 }),
        );
    }

    #[test]
    fn test_validate_mismatch() {
        let mut tree = tree_of(&[1, 2, 3]);
        let one = tree.find(&1).unwrap();
        tree.node_mut(one).balance = 1;
        assert_eq!(
            validate(&tree),
            Err(Violation::BalanceFactorMismatch {
                stored: 1,
                measured: 0
            }),
        );
    }
}
