use crate::arena::Handle;
use crate::bst::{Detached, InorderCursor, PostorderCursor, Location, RawTree, Side};
use crate::error::{Result, Violation};
use crate::red_black_tree::node::Color;
use std::borrow::Borrow;

pub type Tree<T> = RawTree<T, Color>;

pub fn is_red<T>(tree: &Tree<T>, handle: Option<Handle>) -> bool {
    match handle {
        None => false,
        Some(handle) => tree.node(handle).is_red(),
    }
}

fn set_color<T>(tree: &mut Tree<T>, handle: Handle, color: Color) {
    tree.node_mut(handle).balance = color;
}

pub fn insert<T>(tree: &mut Tree<T>, item: T) -> bool
where
    T: Ord,
{
    let link = match tree.locate(&item, |_, _| {}) {
        Location::Found => return false,
        Location::Vacant(link) => link,
    };
    let handle = tree.attach(link, item, Color::Red);
    insert_fixup(tree, handle);
    true
}

fn insert_fixup<T>(tree: &mut Tree<T>, mut node: Handle) {
    while let Some(mut parent) = tree.node(node).parent {
        if !tree.node(parent).is_red() {
            break;
        }
        // the root is black, so a red parent always has a parent of its own
        let grandparent = tree
            .node(parent)
            .parent
            .expect("Expected red node to have a parent.");
        let side = tree.side_of(grandparent, parent);
        let uncle = tree.node(grandparent).child(side.opposite());

        if is_red(tree, uncle) {
            set_color(tree, parent, Color::Black);
            set_color(tree, uncle.expect("Expected red uncle to be `Some`."), Color::Black);
            set_color(tree, grandparent, Color::Red);
            node = grandparent;
        } else {
            if tree.side_of(parent, node) != side {
                node = parent;
                parent = tree.rotate(node, side);
            }
            set_color(tree, parent, Color::Black);
            set_color(tree, grandparent, Color::Red);
            tree.rotate(grandparent, side.opposite());
        }
    }

    if let Some(root) = tree.root {
        set_color(tree, root, Color::Black);
    }
}

pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let handle = tree.find(key)?;
    let Detached {
        item,
        balance,
        vacated,
    } = tree.detach(handle);
    if balance == Color::Black {
        remove_fixup(tree, vacated);
    }
    Some(item)
}

// `link` names the position that lost a black node. The node occupying it, if any, carries an
// extra black that is pushed upward until a red node or the root absorbs it.
fn remove_fixup<T>(tree: &mut Tree<T>, mut link: Option<(Handle, Side)>) {
    while let Some((parent, side)) = link {
        if is_red(tree, tree.node(parent).child(side)) {
            break;
        }

        let far_side = side.opposite();
        let mut sibling = tree
            .node(parent)
            .child(far_side)
            .expect("Expected sibling of a doubly black node to be `Some`.");

        if tree.node(sibling).is_red() {
            set_color(tree, sibling, Color::Black);
            set_color(tree, parent, Color::Red);
            tree.rotate(parent, side);
            sibling = tree
                .node(parent)
                .child(far_side)
                .expect("Expected sibling of a doubly black node to be `Some`.");
        }

        let near = tree.node(sibling).child(side);
        let far = tree.node(sibling).child(far_side);
        if !is_red(tree, near) && !is_red(tree, far) {
            set_color(tree, sibling, Color::Red);
            link = tree.parent_link(parent);
            continue;
        }

        if !is_red(tree, far) {
            set_color(tree, near.expect("Expected red nephew to be `Some`."), Color::Black);
            set_color(tree, sibling, Color::Red);
            sibling = tree.rotate(sibling, far_side);
        }

        let parent_color = tree.node(parent).balance;
        set_color(tree, sibling, parent_color);
        set_color(tree, parent, Color::Black);
        let far = tree
            .node(sibling)
            .child(far_side)
            .expect("Expected red nephew to be `Some`.");
        set_color(tree, far, Color::Black);
        tree.rotate(parent, side);
        link = None;
        break;
    }

    if let Some(handle) = tree.child_at(link) {
        set_color(tree, handle, Color::Black);
    }
}

pub fn validate<T>(tree: &Tree<T>) -> Result<()>
where
    T: Ord,
{
    tree.check_order_and_links()?;

    if is_red(tree, tree.root) {
        return Err(Violation::RedRoot);
    }

    let mut cursor = InorderCursor::new(tree);
    while let Some(handle) = cursor.advance(&tree.arena) {
        let node = tree.node(handle);
        if node.is_red() && (is_red(tree, node.left) || is_red(tree, node.right)) {
            return Err(Violation::RedChildOfRed);
        }
    }

    // Every node missing a child ends at least one root-to-leaf path; count the black nodes on
    // that path by climbing the parent links.
    let mut expected = None;
    let mut cursor = PostorderCursor::new(tree);
    while let Some(handle) = cursor.advance(&tree.arena) {
        let node = tree.node(handle);
        if node.left.is_some() && node.right.is_some() {
            continue;
        }

        let mut black_height = 0;
        let mut ancestor = Some(handle);
        while let Some(handle) = ancestor {
            let node = tree.node(handle);
            if !node.is_red() {
                black_height += 1;
            }
            ancestor = node.parent;
        }

        match expected {
            None => expected = Some(black_height),
            Some(expected) if expected != black_height => {
                return Err(Violation::BlackHeightMismatch {
                    expected,
                    found: black_height,
                });
            },
            Some(_) => {},
        }
    }
    Ok(())
}
