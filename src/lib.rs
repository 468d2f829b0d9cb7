//! Ordered sets backed by parent-linked balanced binary search trees.
//!
//! Both [`red_black_tree::RedBlackSet`] and [`avl_tree::AvlSet`] store their nodes in a
//! [`arena::TypedArena`] and link every node to its parent, which lets them traverse in order and
//! in post-order without recursion or an auxiliary stack. Each set can check its own structural
//! invariants with `validate`, and can intersect itself with any ascending sequence in linear
//! time. A singly-linked [`linked_list::List`] built on the same arena rounds out the crate.
//!
//! # Examples
//!
//! ```
//! use balanced_collections::avl_tree::AvlSet;
//! use balanced_collections::red_black_tree::RedBlackSet;
//!
//! let avl: AvlSet<u32> = vec![2, 13, 10, 5, 12, 7].into_iter().collect();
//! let red_black: RedBlackSet<u32> = vec![7, 8, 12, 14].into_iter().collect();
//!
//! assert!(avl.is_valid());
//! assert_eq!(
//!     avl.intersect(&red_black).iter().collect::<Vec<&u32>>(),
//!     vec![&7, &12],
//! );
//! ```

pub mod arena;
pub mod avl_tree;
mod bst;
pub mod error;
pub mod linked_list;
pub mod merge;
pub mod red_black_tree;

pub use crate::error::Violation;
