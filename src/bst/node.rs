use crate::arena::Handle;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of a parent-linked binary search tree. `B` is the
/// balance metadata of the tree variant.
#[derive(Clone)]
pub struct Node<T, B> {
    pub item: T,
    pub balance: B,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T, B> Node<T, B> {
    pub fn new(item: T, balance: B, parent: Option<Handle>) -> Self {
        Node {
            item,
            balance,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
