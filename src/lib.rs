//! Classic pointer-based data structures, written out by hand.
//!
//! - [`binary_tree::Tree`]: a complete binary tree. Nodes are filled in level
//!   order and deleting a value moves the deepest, rightmost value into the
//!   hole, so the tree never has gaps. It can be walked breadth-first or in
//!   pre-, in- and post-order.
//! - [`linked_list::LinkedList`]: a singly-linked list edited in place.
//! - [`doubly_linked_list::DoublyLinkedList`]: the same, with back links for
//!   O(1) parents and walks from the tail.
//! - [`persistent_list::PersistentList`]: an immutable singly-linked list whose
//!   versions share every node they have in common.
//!
//! Every list implements [`list::ListOps`] for positional reads and hands out
//! borrowed node handles (`get_node`, `parent`) that new values can be
//! inserted after.
//!
//! `Tree` and the in-place lists are `Send` and `Sync` whenever their values
//! are, so a tree can be read from several threads at once.
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod binary_tree;
pub mod doubly_linked_list;
pub mod error;
pub mod linked_list;
pub mod list;
pub mod persistent_list;
pub mod traversal;

pub use binary_tree::{NodeRef, Tree};
pub use doubly_linked_list::DoublyLinkedList;
pub use error::{ListError, ListResult, TreeError, TreeResult};
pub use linked_list::LinkedList;
pub use list::ListOps;
pub use persistent_list::PersistentList;
pub use traversal::TraversalOrder;
