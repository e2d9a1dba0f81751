use crate::error::{TreeError, TreeResult};
use crate::traversal::{InOrder, LevelOrder, PostOrder, PreOrder, Traverse, TraversalOrder};
use log::{debug, trace};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// A complete binary tree: nodes are always filled in level order, so reading
/// the tree breadth-first never shows a gap.
///
/// Values are not ordered. `insert` places the new node at the first free slot
/// in level order and `delete` refills the hole with the deepest, rightmost
/// node.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Link<T>,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// Read-only view of a node, borrowed from its tree.
///
/// Handles compare by identity: two handles are equal when they point at the
/// same node, regardless of the values held.
pub struct NodeRef<'a, T> {
    ptr: NonNull<Node<T>>,
    _marker: PhantomData<&'a Node<T>>,
}

pub struct IntoIter<T> {
    queue: VecDeque<NonNull<Node<T>>>,
}

pub struct Iter<'a, T> {
    inner: LevelOrder<'a, T>,
}

pub struct IterMut<'a, T> {
    queue: VecDeque<NonNull<Node<T>>>,
    _marker: PhantomData<&'a mut T>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            root: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(NodeRef::new)
    }

    /// Inserts `value` at the first free position in level order.
    pub fn insert(&mut self, value: T) -> &mut Self {
        let parent = self
            .find_bfs(|n| n.left().is_none() || n.right().is_none())
            .map(|n| n.ptr);
        let new = node_for_value(value, parent);
        match parent {
            // SAFETY: parent came from a live node of this tree and we hold &mut self
            Some(mut ptr) => unsafe {
                let node = ptr.as_mut();
                if node.left.is_none() {
                    trace!("attaching node {} as left child", self.len);
                    node.left = Some(new);
                } else {
                    trace!("attaching node {} as right child", self.len);
                    node.right = Some(new);
                }
            },
            None => {
                trace!("attaching node as root");
                self.root = Some(new);
            }
        }
        self.len += 1;
        self
    }

    /// Deletes the first node (in pre-order) holding `value`.
    ///
    /// The hole is filled by moving the value of the last node in level order
    /// into it, then detaching that last node. Fails without touching the tree
    /// when no node holds `value`.
    pub fn delete(&mut self, value: &T) -> TreeResult<&mut Self>
    where
        T: PartialEq,
    {
        // the last node in level order exists exactly when the tree is non-empty
        let Some(replacement) = self.traverse(TraversalOrder::LevelOrder).last() else {
            debug!("delete on an empty tree");
            return Err(TreeError::ValueNotFound);
        };
        let replacement = replacement.ptr;
        let Some(found) = self.find_nlr(|n| n.value() == value).map(|n| n.ptr) else {
            debug!("delete of a missing value on a tree of {} nodes", self.len);
            return Err(TreeError::ValueNotFound);
        };

        if found != replacement {
            // SAFETY: both pointers are distinct live nodes of this tree
            unsafe {
                std::mem::swap(
                    &mut (*found.as_ptr()).value,
                    &mut (*replacement.as_ptr()).value,
                );
            }
        }
        trace!("detaching replacement node {}", self.len - 1);
        self.detach_subtree(replacement);
        Ok(self)
    }

    pub fn list_bfs(&self) -> Vec<&T> {
        self.map_bfs(|n| n.value())
    }

    pub fn list_nlr(&self) -> Vec<&T> {
        self.map_nlr(|n| n.value())
    }

    pub fn list_lnr(&self) -> Vec<&T> {
        self.map_lnr(|n| n.value())
    }

    pub fn list_lrn(&self) -> Vec<&T> {
        self.map_lrn(|n| n.value())
    }

    pub fn map_bfs<'a, U, F>(&'a self, f: F) -> Vec<U>
    where
        F: FnMut(NodeRef<'a, T>) -> U,
    {
        LevelOrder::new(self.root).map(f).collect()
    }

    pub fn map_nlr<'a, U, F>(&'a self, f: F) -> Vec<U>
    where
        F: FnMut(NodeRef<'a, T>) -> U,
    {
        PreOrder::new(self.root).map(f).collect()
    }

    pub fn map_lnr<'a, U, F>(&'a self, f: F) -> Vec<U>
    where
        F: FnMut(NodeRef<'a, T>) -> U,
    {
        InOrder::new(self.root).map(f).collect()
    }

    pub fn map_lrn<'a, U, F>(&'a self, f: F) -> Vec<U>
    where
        F: FnMut(NodeRef<'a, T>) -> U,
    {
        PostOrder::new(self.root).map(f).collect()
    }

    pub fn find_bfs<'a, P>(&'a self, mut predicate: P) -> Option<NodeRef<'a, T>>
    where
        P: FnMut(NodeRef<'a, T>) -> bool,
    {
        LevelOrder::new(self.root).find(|&n| predicate(n))
    }

    pub fn find_nlr<'a, P>(&'a self, mut predicate: P) -> Option<NodeRef<'a, T>>
    where
        P: FnMut(NodeRef<'a, T>) -> bool,
    {
        PreOrder::new(self.root).find(|&n| predicate(n))
    }

    pub fn find_lnr<'a, P>(&'a self, mut predicate: P) -> Option<NodeRef<'a, T>>
    where
        P: FnMut(NodeRef<'a, T>) -> bool,
    {
        InOrder::new(self.root).find(|&n| predicate(n))
    }

    pub fn find_lrn<'a, P>(&'a self, mut predicate: P) -> Option<NodeRef<'a, T>>
    where
        P: FnMut(NodeRef<'a, T>) -> bool,
    {
        PostOrder::new(self.root).find(|&n| predicate(n))
    }

    /// Lazily walks the nodes in the given order.
    pub fn traverse(&self, order: TraversalOrder) -> Traverse<'_, T> {
        Traverse::new(self.root, order)
    }

    /// Values in level order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: LevelOrder::new(self.root),
        }
    }

    /// Mutable values in level order. Rewriting values never affects the
    /// shape of the tree.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            queue: self.root.into_iter().collect(),
            _marker: PhantomData,
        }
    }

    /// Unlinks the subtree rooted at `node_ptr`, frees it and returns how many
    /// nodes it held.
    fn detach_subtree(&mut self, node_ptr: NonNull<Node<T>>) -> usize {
        // SAFETY: node_ptr is a live node of this tree and we hold &mut self
        unsafe {
            let node = node_ptr.as_ref();
            match node.parent {
                None => self.root = None,
                Some(mut parent_ptr) => {
                    let parent = parent_ptr.as_mut();
                    if parent.left == Some(node_ptr) {
                        parent.left = None;
                    } else {
                        parent.right = None;
                    }
                }
            }
            let removed = free_subtree(node_ptr);
            self.len -= removed;
            removed
        }
    }
}

fn node_for_value<T>(value: T, parent: Link<T>) -> NonNull<Node<T>> {
    NonNull::from(Box::leak(Box::new(Node {
        value,
        parent,
        left: None,
        right: None,
    })))
}

/// Frees every node reachable from `top` and returns the count.
///
/// # Safety
/// `top` must be a live node that nothing else links to anymore.
unsafe fn free_subtree<T>(top: NonNull<Node<T>>) -> usize {
    let mut stack = vec![top];
    let mut freed = 0;
    while let Some(ptr) = stack.pop() {
        // SAFETY: every pointer on the stack is uniquely owned by this walk
        let node = unsafe { Box::from_raw(ptr.as_ptr()) };
        stack.extend(node.left);
        stack.extend(node.right);
        freed += 1;
    }
    freed
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(ptr: NonNull<Node<T>>) -> Self {
        NodeRef {
            ptr,
            _marker: PhantomData,
        }
    }

    fn node(&self) -> &'a Node<T> {
        // SAFETY: the handle borrows the tree, which keeps the node alive
        unsafe { self.ptr.as_ref() }
    }

    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node().left.map(NodeRef::new)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node().right.map(NodeRef::new)
    }

    /// The node this one hangs from; `None` only for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent.map(NodeRef::new)
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for NodeRef<'_, T> {}

// SAFETY: the tree owns its nodes exclusively, like a `Box<Node<T>>` would
unsafe impl<T: Send> Send for Tree<T> {}
// SAFETY: `&Tree` only hands out shared access to the values
unsafe impl<T: Sync> Sync for Tree<T> {}

// SAFETY: a handle is a shared borrow of one node
unsafe impl<T: Sync> Send for NodeRef<'_, T> {}
unsafe impl<T: Sync> Sync for NodeRef<'_, T> {}

// SAFETY: the queue owns the remaining nodes
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

// SAFETY: behaves like `&mut T` for every queued node
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            // SAFETY: the root was just unlinked from the tree
            unsafe {
                free_subtree(root);
            }
        }
        self.len = 0;
    }
}

impl<T> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let queue = self.root.take().into_iter().collect();
        self.len = 0;
        IntoIter { queue }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.queue.pop_front()?;
        // SAFETY: the iterator owns every node still queued
        let node = unsafe { Box::from_raw(ptr.as_ptr()) };
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(node.value)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|n| n.value())
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|ptr| {
            // SAFETY: each node is yielded once and the tree is mutably borrowed
            unsafe {
                let node = &mut *ptr.as_ptr();
                self.queue.extend(node.left);
                self.queue.extend(node.right);
                &mut node.value
            }
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("value", self.value())
            .field("parent", &self.parent().map(|p| p.value()))
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
