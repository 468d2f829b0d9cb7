use crate::bst::Node;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl<T> Node<T, Color> {
    pub fn is_red(&self) -> bool {
        self.balance == Color::Red
    }
}
