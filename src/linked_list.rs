use crate::error::{ListError, ListResult};
use crate::list::ListOps;
use log::trace;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Singly-linked list mutated in place, with O(1) access to both ends.
pub struct LinkedList<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<NonNull<Node<T>>>;

/// Read-only view of one node, borrowed from its list.
///
/// Handles compare by identity, not by value.
pub struct ListNode<'a, T> {
    ptr: NonNull<Node<T>>,
    _marker: PhantomData<&'a Node<T>>,
}

/// Exclusive access to one node, able to splice new nodes in after it.
pub struct ListNodeMut<'a, T> {
    list: &'a mut LinkedList<T>,
    ptr: NonNull<Node<T>>,
}

pub struct IntoIter<T> {
    list: LinkedList<T>,
}

pub struct Iter<'a, T> {
    next: Link<T>,
    _marker: PhantomData<&'a T>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn append(&mut self, value: T) -> &mut Self {
        let new = node_for_value(value, None);
        match self.tail {
            // SAFETY: tail is a live node owned by this list
            Some(mut tail) => unsafe { tail.as_mut().next = Some(new) },
            None => self.head = Some(new),
        }
        self.tail = Some(new);
        self.len += 1;
        self
    }

    pub fn prepend(&mut self, value: T) -> &mut Self {
        let new = node_for_value(value, self.head);
        self.head = Some(new);
        if self.tail.is_none() {
            self.tail = Some(new);
        }
        self.len += 1;
        self
    }

    /// Inserts `value` so that it ends up at `position`.
    ///
    /// `position == len()` appends; anything past that is out of bounds.
    pub fn insert_at(&mut self, value: T, position: usize) -> ListResult<&mut Self> {
        if position == 0 {
            return Ok(self.prepend(value));
        }
        if position == self.len {
            return Ok(self.append(value));
        }
        let len = self.len;
        let Some(parent) = self.get_node_mut(position - 1) else {
            return Err(ListError::IndexOutOfBounds {
                index: position,
                len,
            });
        };
        trace!("inserting after element {}", position - 1);
        parent.insert_after(value);
        Ok(self)
    }

    /// Removes the element at `position` and hands it back.
    pub fn delete_at(&mut self, position: usize) -> ListResult<T> {
        let out_of_bounds = ListError::IndexOutOfBounds {
            index: position,
            len: self.len,
        };
        if position >= self.len {
            return Err(out_of_bounds);
        }
        let (node_ptr, parent) = if position == 0 {
            (self.head.ok_or(out_of_bounds)?, None)
        } else {
            let parent = self.node_at(position - 1).ok_or(out_of_bounds)?;
            // SAFETY: parent is a live node owned by this list
            let node = unsafe { parent.as_ref().next }.ok_or(out_of_bounds)?;
            (node, Some(parent))
        };

        // SAFETY: node_ptr is unlinked below before the box is dropped
        unsafe {
            let node = Box::from_raw(node_ptr.as_ptr());
            match parent {
                Some(mut parent) => parent.as_mut().next = node.next,
                None => self.head = node.next,
            }
            if self.tail == Some(node_ptr) {
                self.tail = parent;
            }
            self.len -= 1;
            Ok(node.value)
        }
    }

    /// Removes the first element equal to `value`, if any.
    pub fn delete_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.find_index_by_value(value)?;
        self.delete_at(index).ok()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            _marker: PhantomData,
        }
    }

    pub fn head_node(&self) -> Option<ListNode<'_, T>> {
        self.head.map(ListNode::new)
    }

    pub fn tail_node(&self) -> Option<ListNode<'_, T>> {
        self.tail.map(ListNode::new)
    }

    pub fn get_node(&self, index: usize) -> Option<ListNode<'_, T>> {
        self.node_at(index).map(ListNode::new)
    }

    pub fn find_node<P>(&self, mut predicate: P) -> Option<ListNode<'_, T>>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_links()
            .map(ListNode::new)
            .find(|node| predicate(node.value()))
    }

    /// The node whose `next` is `node`. Walks from the head: there are no
    /// back links.
    pub fn parent<'a>(&'a self, node: ListNode<'a, T>) -> Option<ListNode<'a, T>> {
        self.iter_links()
            .map(ListNode::new)
            .find(|candidate| candidate.next() == Some(node))
    }

    pub fn get_node_mut(&mut self, index: usize) -> Option<ListNodeMut<'_, T>> {
        let ptr = self.node_at(index)?;
        Some(ListNodeMut { list: self, ptr })
    }

    fn node_at(&self, index: usize) -> Link<T> {
        self.iter_links().nth(index)
    }

    fn iter_links(&self) -> impl Iterator<Item = NonNull<Node<T>>> + '_ {
        // SAFETY: every link reachable from head is a live node of this list
        std::iter::successors(self.head, |ptr| unsafe { ptr.as_ref().next })
    }

    fn pop_front(&mut self) -> Option<T> {
        self.head.map(|ptr| {
            // SAFETY: head is owned by the list and unlinked right away
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            self.head = node.next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            node.value
        })
    }
}

fn node_for_value<T>(value: T, next: Link<T>) -> NonNull<Node<T>> {
    NonNull::from(Box::leak(Box::new(Node { value, next })))
}

impl<'a, T> ListNode<'a, T> {
    fn new(ptr: NonNull<Node<T>>) -> Self {
        ListNode {
            ptr,
            _marker: PhantomData,
        }
    }

    pub fn value(&self) -> &'a T {
        // SAFETY: the handle borrows the list, which keeps the node alive
        unsafe { &(*self.ptr.as_ptr()).value }
    }

    pub fn next(&self) -> Option<ListNode<'a, T>> {
        // SAFETY: as above
        unsafe { self.ptr.as_ref().next.map(ListNode::new) }
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
        self.ptr == other.ptr
    }
}

impl<T> Eq for ListNode<'_, T> {}

impl<'a, T> ListNodeMut<'a, T> {
    pub fn value(&self) -> &T {
        // SAFETY: the handle holds the list mutably borrowed
        unsafe { &self.ptr.as_ref().value }
    }

    pub fn value_mut(&mut self) -> &mut T {
        // SAFETY: as above
        unsafe { &mut self.ptr.as_mut().value }
    }

    /// Links a new node holding `value` right after this one and returns a
    /// handle to it.
    pub fn insert_after(mut self, value: T) -> ListNodeMut<'a, T> {
        // SAFETY: the handle holds the list mutably borrowed
        let new = unsafe {
            let node = self.ptr.as_mut();
            let new = node_for_value(value, node.next);
            node.next = Some(new);
            new
        };
        if self.list.tail == Some(self.ptr) {
            self.list.tail = Some(new);
        }
        self.list.len += 1;
        ListNodeMut {
            list: self.list,
            ptr: new,
        }
    }
}

impl<T> ListOps<T> for LinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn head(&self) -> Option<&T> {
        // SAFETY: head is live for as long as &self
        self.head.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
    }

    fn tail(&self) -> Option<&T> {
        // SAFETY: tail is live for as long as &self
        self.tail.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
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

// SAFETY: the list owns its nodes exclusively, like a `Box<Node<T>>` would
unsafe impl<T: Send> Send for LinkedList<T> {}
// SAFETY: `&LinkedList` only hands out shared access to the values
unsafe impl<T: Sync> Sync for LinkedList<T> {}
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
unsafe impl<T: Sync> Send for ListNode<'_, T> {}
unsafe impl<T: Sync> Sync for ListNode<'_, T> {}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the iterator borrows the list, so every node stays alive
        unsafe {
            self.next.map(|ptr| {
                let node = &*ptr.as_ptr();
                self.next = node.next;
                &node.value
            })
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
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
