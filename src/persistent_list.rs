use crate::error::{ListError, ListResult};
use crate::list::ListOps;
use std::fmt;
use std::rc::Rc;

/// Immutable singly-linked list.
///
/// Every edit returns a new list and leaves `self` as it was. Nodes after the
/// edit point are shared between the old and the new list; only the nodes in
/// front of it are copied.
pub struct PersistentList<T> {
    head: Link<T>,
    len: usize,
}

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Rc<Node<T>>>;

/// Borrowed view of one node. Handles compare by identity, so a node shared
/// by two versions is the same node in both.
pub struct ListNode<'a, T> {
    node: &'a Node<T>,
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<T> PersistentList<T> {
    pub fn new() -> Self {
        PersistentList { head: None, len: 0 }
    }

    /// O(1): the whole of `self` becomes the tail of the result.
    pub fn prepend(&self, value: T) -> Self {
        PersistentList {
            head: Some(Rc::new(Node {
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn append(&self, value: T) -> Self
    where
        T: Clone,
    {
        let last = Some(Rc::new(Node { value, next: None }));
        PersistentList {
            head: self.copy_front(self.len, last),
            len: self.len + 1,
        }
    }

    pub fn insert_at(&self, value: T, position: usize) -> ListResult<Self>
    where
        T: Clone,
    {
        if position > self.len {
            return Err(ListError::IndexOutOfBounds {
                index: position,
                len: self.len,
            });
        }
        if position == 0 {
            return Ok(self.prepend(value));
        }
        let rest = Some(Rc::new(Node {
            value,
            next: self.link_at(position),
        }));
        Ok(PersistentList {
            head: self.copy_front(position, rest),
            len: self.len + 1,
        })
    }

    pub fn delete_at(&self, position: usize) -> ListResult<Self>
    where
        T: Clone,
    {
        if position >= self.len {
            return Err(ListError::IndexOutOfBounds {
                index: position,
                len: self.len,
            });
        }
        Ok(PersistentList {
            head: self.copy_front(position, self.link_at(position + 1)),
            len: self.len - 1,
        })
    }

    /// Drops the first element equal to `value`. A missing value gives back a
    /// list sharing every node with `self`.
    pub fn delete_value(&self, value: &T) -> Self
    where
        T: Clone + PartialEq,
    {
        match self.find_index_by_value(value) {
            Some(index) => PersistentList {
                head: self.copy_front(index, self.link_at(index + 1)),
                len: self.len - 1,
            },
            None => self.clone(),
        }
    }

    /// New list with `value` right after `node`, which must be reachable
    /// from `self`.
    pub fn insert_after(&self, value: T, node: ListNode<'_, T>) -> ListResult<Self>
    where
        T: Clone,
    {
        let Some(position) = self.nodes().position(|n| n == node) else {
            return Err(ListError::NodeNotInList);
        };
        self.insert_at(value, position + 1)
    }

    pub fn head_node(&self) -> Option<ListNode<'_, T>> {
        self.head.as_deref().map(|node| ListNode { node })
    }

    pub fn tail_node(&self) -> Option<ListNode<'_, T>> {
        self.nodes().last()
    }

    pub fn get_node(&self, index: usize) -> Option<ListNode<'_, T>> {
        self.nodes().nth(index)
    }

    pub fn find_node<P>(&self, mut predicate: P) -> Option<ListNode<'_, T>>
    where
        P: FnMut(&T) -> bool,
    {
        self.nodes().find(|node| predicate(node.value()))
    }

    /// The node whose `next` is `node`, found by walking from the head.
    pub fn parent<'a>(&'a self, node: ListNode<'a, T>) -> Option<ListNode<'a, T>> {
        self.nodes().find(|candidate| candidate.next() == Some(node))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    fn nodes(&self) -> impl Iterator<Item = ListNode<'_, T>> {
        std::iter::successors(self.head_node(), |node| node.next())
    }

    /// Copies the first `count` values in front of `rest`.
    fn copy_front(&self, count: usize, rest: Link<T>) -> Link<T>
    where
        T: Clone,
    {
        let front: Vec<&T> = self.iter().take(count).collect();
        front.into_iter().rev().fold(rest, |next, value| {
            Some(Rc::new(Node {
                value: value.clone(),
                next,
            }))
        })
    }

    /// The shared link to the node at `index`, `None` past the end.
    fn link_at(&self, index: usize) -> Link<T> {
        let mut link = self.head.as_ref();
        for _ in 0..index {
            link = link?.next.as_ref();
        }
        link.cloned()
    }
}

impl<'a, T> ListNode<'a, T> {
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn next(&self) -> Option<ListNode<'a, T>> {
        self.node.next.as_deref().map(|node| ListNode { node })
    }
}

impl<T> Clone for ListNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListNode<'_, T> {}

impl<T> PartialEq for ListNode<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
    }
}

impl<T> Eq for ListNode<'_, T> {}

impl<T> ListOps<T> for PersistentList<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn head(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    fn tail(&self) -> Option<&T> {
        self.iter().last()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|v| predicate(v))
    }

    fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }
}

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        PersistentList {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for PersistentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(node) = link {
            match Rc::try_unwrap(node) {
                Ok(mut node) => link = node.next.take(),
                // still shared with another list
                Err(_) => break,
            }
        }
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let len = values.len();
        let head = values
            .into_iter()
            .rev()
            .fold(None, |next, value| Some(Rc::new(Node { value, next })));
        PersistentList { head, len }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for ListNode<'_, T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("ListNode")
            .field("value", self.value())
            .field("next", &self.next().map(|n| n.value()))
            .finish()
    }
}
