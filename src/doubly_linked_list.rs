use crate::error::{ListError, ListResult};
use crate::list::ListOps;
use log::trace;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Doubly-linked list mutated in place.
///
/// Every node links back to the one before it, so a node's parent, the tail
/// and positions near the tail are reached without walking from the head.
pub struct DoublyLinkedList<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    value: T,
    prev: Link<T>,
    next: Link<T>,
}

type Link<T> = Option<NonNull<Node<T>>>;

/// Read-only view of one node, borrowed from its list.
pub struct ListNode<'a, T> {
    ptr: NonNull<Node<T>>,
    _marker: PhantomData<&'a Node<T>>,
}

/// Exclusive access to one node of a [`DoublyLinkedList`].
pub struct ListNodeMut<'a, T> {
    list: &'a mut DoublyLinkedList<T>,
    ptr: NonNull<Node<T>>,
}

pub struct IntoIter<T> {
    list: DoublyLinkedList<T>,
}

pub struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        DoublyLinkedList {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn append(&mut self, value: T) -> &mut Self {
        let new = node_for_value(value, self.tail, None);
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
        let new = node_for_value(value, None, self.head);
        match self.head {
            // SAFETY: head is a live node owned by this list
            Some(mut head) => unsafe { head.as_mut().prev = Some(new) },
            None => self.tail = Some(new),
        }
        self.head = Some(new);
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
        parent.insert_after(value);
        Ok(self)
    }

    /// Removes the element at `position` and hands it back.
    pub fn delete_at(&mut self, position: usize) -> ListResult<T> {
        let Some(ptr) = self.node_at(position) else {
            return Err(ListError::IndexOutOfBounds {
                index: position,
                len: self.len,
            });
        };
        // SAFETY: node_at only returns live nodes of this list
        Ok(unsafe { self.unlink(ptr) })
    }

    /// Removes the first element equal to `value`, if any.
    pub fn delete_value(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.find_index_by_value(value)?;
        self.delete_at(index).ok()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        // SAFETY: head is a live node owned by this list
        self.head.map(|ptr| unsafe { self.unlink(ptr) })
    }

    pub fn pop_back(&mut self) -> Option<T> {
        // SAFETY: tail is a live node owned by this list
        self.tail.map(|ptr| unsafe { self.unlink(ptr) })
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
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
        // SAFETY: every link reachable from head is a live node of this list
        std::iter::successors(self.head, |ptr| unsafe { ptr.as_ref().next })
            .map(ListNode::new)
            .find(|node| predicate(node.value()))
    }

    /// The node before `node`, read off its back link.
    pub fn parent<'a>(&'a self, node: ListNode<'a, T>) -> Option<ListNode<'a, T>> {
        node.prev()
    }

    pub fn get_node_mut(&mut self, index: usize) -> Option<ListNodeMut<'_, T>> {
        let ptr = self.node_at(index)?;
        Some(ListNodeMut { list: self, ptr })
    }

    /// Walks from whichever end is closer to `index`.
    fn node_at(&self, index: usize) -> Link<T> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            // SAFETY: every link reachable from head is a live node of this list
            std::iter::successors(self.head, |ptr| unsafe { ptr.as_ref().next }).nth(index)
        } else {
            let steps = self.len - 1 - index;
            trace!("walking {} nodes back from the tail", steps);
            // SAFETY: every link reachable from tail is a live node of this list
            std::iter::successors(self.tail, |ptr| unsafe { ptr.as_ref().prev }).nth(steps)
        }
    }

    /// Splices `ptr` out of the list and frees it.
    ///
    /// # Safety
    /// `ptr` must be a live node of this list.
    unsafe fn unlink(&mut self, ptr: NonNull<Node<T>>) -> T {
        // SAFETY: the caller hands over a live node; its neighbours are live too
        unsafe {
            let node = Box::from_raw(ptr.as_ptr());
            match node.prev {
                Some(mut prev) => prev.as_mut().next = node.next,
                None => self.head = node.next,
            }
            match node.next {
                Some(mut next) => next.as_mut().prev = node.prev,
                None => self.tail = node.prev,
            }
            self.len -= 1;
            node.value
        }
    }
}

fn node_for_value<T>(value: T, prev: Link<T>, next: Link<T>) -> NonNull<Node<T>> {
    NonNull::from(Box::leak(Box::new(Node { value, prev, next })))
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

    pub fn prev(&self) -> Option<ListNode<'a, T>> {
        // SAFETY: as above
        unsafe { self.ptr.as_ref().prev.map(ListNode::new) }
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
    pub fn insert_after(self, value: T) -> ListNodeMut<'a, T> {
        let mut ptr = self.ptr;
        // SAFETY: the handle holds the list mutably borrowed
        let new = unsafe {
            let node = ptr.as_mut();
            let new = node_for_value(value, Some(self.ptr), node.next);
            match node.next {
                Some(mut next) => next.as_mut().prev = Some(new),
                None => self.list.tail = Some(new),
            }
            node.next = Some(new);
            new
        };
        self.list.len += 1;
        ListNodeMut {
            list: self.list,
            ptr: new,
        }
    }

    /// Unlinks this node and hands back its value.
    pub fn remove(self) -> T {
        // SAFETY: the handle points at a live node of the borrowed list
        unsafe { self.list.unlink(self.ptr) }
    }
}

impl<T> ListOps<T> for DoublyLinkedList<T> {
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
        // SAFETY: node_at only returns live nodes of this list
        self.node_at(index)
            .map(|ptr| unsafe { &(*ptr.as_ptr()).value })
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
unsafe impl<T: Send> Send for DoublyLinkedList<T> {}
// SAFETY: `&DoublyLinkedList` only hands out shared access to the values
unsafe impl<T: Sync> Sync for DoublyLinkedList<T> {}
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
unsafe impl<T: Sync> Send for ListNode<'_, T> {}
unsafe impl<T: Sync> Sync for ListNode<'_, T> {}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DoublyLinkedList<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyLinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
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

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the iterator borrows the list, so every node stays alive
        unsafe {
            self.head.map(|ptr| {
                let node = &*ptr.as_ptr();
                self.len -= 1;
                self.head = node.next;
                &node.value
            })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the iterator borrows the list, so every node stays alive
        unsafe {
            self.tail.map(|ptr| {
                let node = &*ptr.as_ptr();
                self.len -= 1;
                self.tail = node.prev;
                &node.value
            })
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for ListNode<'_, T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("ListNode")
            .field("value", self.value())
            .field("prev", &self.prev().map(|n| n.value()))
            .field("next", &self.next().map(|n| n.value()))
            .finish()
    }
}
