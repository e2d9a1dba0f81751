//! Lazy traversals over a [`Tree`](crate::binary_tree::Tree).
//!
//! Every iterator yields [`NodeRef`]s and keeps its own queue or stack, so
//! walking a tree never recurses and stopping early (`find`, `take`, ...)
//! leaves the rest of the tree unvisited.

use crate::binary_tree::{Link, Node, NodeRef};
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The order in which a traversal visits the nodes of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Breadth-first: depth 0, then depth 1, ... left to right (BFS)
    LevelOrder,
    /// Node, left subtree, right subtree (NLR)
    PreOrder,
    /// Left subtree, node, right subtree (LNR)
    InOrder,
    /// Left subtree, right subtree, node (LRN)
    PostOrder,
}

pub struct LevelOrder<'a, T> {
    queue: VecDeque<NonNull<Node<T>>>,
    _marker: PhantomData<&'a Node<T>>,
}

pub struct PreOrder<'a, T> {
    stack: Vec<NonNull<Node<T>>>,
    _marker: PhantomData<&'a Node<T>>,
}

pub struct InOrder<'a, T> {
    stack: Vec<NonNull<Node<T>>>,
    next: Link<T>,
    _marker: PhantomData<&'a Node<T>>,
}

pub struct PostOrder<'a, T> {
    // the flag is set once both children of the node have been pushed
    stack: Vec<(NonNull<Node<T>>, bool)>,
    _marker: PhantomData<&'a Node<T>>,
}

/// A traversal in an order picked at runtime.
pub enum Traverse<'a, T> {
    LevelOrder(LevelOrder<'a, T>),
    PreOrder(PreOrder<'a, T>),
    InOrder(InOrder<'a, T>),
    PostOrder(PostOrder<'a, T>),
}

// SAFETY: traversals only read through shared borrows of the tree
unsafe impl<T: Sync> Send for LevelOrder<'_, T> {}
unsafe impl<T: Sync> Sync for LevelOrder<'_, T> {}
unsafe impl<T: Sync> Send for PreOrder<'_, T> {}
unsafe impl<T: Sync> Sync for PreOrder<'_, T> {}
unsafe impl<T: Sync> Send for InOrder<'_, T> {}
unsafe impl<T: Sync> Sync for InOrder<'_, T> {}
unsafe impl<T: Sync> Send for PostOrder<'_, T> {}
unsafe impl<T: Sync> Sync for PostOrder<'_, T> {}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        LevelOrder {
            queue: root.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        PreOrder {
            stack: root.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        InOrder {
            stack: Vec::new(),
            next: root,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        PostOrder {
            stack: root.into_iter().map(|ptr| (ptr, false)).collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(root: Link<T>, order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::LevelOrder => Traverse::LevelOrder(LevelOrder::new(root)),
            TraversalOrder::PreOrder => Traverse::PreOrder(PreOrder::new(root)),
            TraversalOrder::InOrder => Traverse::InOrder(InOrder::new(root)),
            TraversalOrder::PostOrder => Traverse::PostOrder(PostOrder::new(root)),
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = NodeRef<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.queue.pop_front()?;
        // SAFETY: the iterator borrows the tree for 'a, so every link is live
        let node = unsafe { ptr.as_ref() };
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(NodeRef::new(ptr))
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = NodeRef<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.stack.pop()?;
        // SAFETY: the iterator borrows the tree for 'a, so every link is live
        let node = unsafe { ptr.as_ref() };
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(NodeRef::new(ptr))
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = NodeRef<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the iterator borrows the tree for 'a, so every link is live
        unsafe {
            while let Some(ptr) = self.next {
                self.stack.push(ptr);
                self.next = ptr.as_ref().left;
            }
            let ptr = self.stack.pop()?;
            self.next = ptr.as_ref().right;
            Some(NodeRef::new(ptr))
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = NodeRef<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (ptr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(NodeRef::new(ptr));
            }
            // SAFETY: the iterator borrows the tree for 'a, so every link is live
            let node = unsafe { ptr.as_ref() };
            self.stack.push((ptr, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeRef<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traverse::LevelOrder(iter) => iter.next(),
            Traverse::PreOrder(iter) => iter.next(),
            Traverse::InOrder(iter) => iter.next(),
            Traverse::PostOrder(iter) => iter.next(),
        }
    }
}
