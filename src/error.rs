use std::error;
use std::fmt;
use std::result;

/// A broken structural invariant reported by a container's `validate` method.
///
/// No container operation ever produces one of these; a violation means the container's internal
/// algorithms are defective, not that the caller did something wrong.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// An inorder traversal did not yield strictly ascending items.
    UnorderedItems,
    /// A child's parent link does not point back at the node that links to it.
    BrokenParentLink,
    /// The number of reachable elements differs from the number of allocated nodes.
    LengthMismatch { expected: usize, found: usize },
    /// The root of a red-black tree is red.
    RedRoot,
    /// A red node of a red-black tree has a red child.
    RedChildOfRed,
    /// Two root-to-leaf paths of a red-black tree pass through different numbers of black nodes.
    BlackHeightMismatch { expected: usize, found: usize },
    /// An AVL node's balance factor lies outside `-1..=1`.
    BalanceFactorOutOfRange { factor: i8 },
    /// An AVL node's stored balance factor differs from its measured height difference.
    BalanceFactorMismatch { stored: i8, measured: isize },
    /// A linked list's head, tail and next links disagree.
    BrokenListLinks,
}

impl error::Error for Violation {}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnorderedItems => write!(f, "items are not in strictly ascending order"),
            Violation::BrokenParentLink => write!(f, "parent link disagrees with child link"),
            Violation::LengthMismatch { expected, found } => {
                write!(f, "expected {} reachable elements, found {}", expected, found)
            },
            Violation::RedRoot => write!(f, "root node is red"),
            Violation::RedChildOfRed => write!(f, "red node has a red child"),
            Violation::BlackHeightMismatch { expected, found } => {
                write!(f, "black height {} differs from black height {}", found, expected)
            },
            Violation::BalanceFactorOutOfRange { factor } => {
                write!(f, "balance factor {} is out of range", factor)
            },
            Violation::BalanceFactorMismatch { stored, measured } => write!(
                f,
                "stored balance factor {} differs from measured balance factor {}",
                stored, measured,
            ),
            Violation::BrokenListLinks => write!(f, "list head, tail and links disagree"),
        }
    }
}

/// Convenience `Result` type for structural validation.
pub type Result<T> = result::Result<T, Violation>;
