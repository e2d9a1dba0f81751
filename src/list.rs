/// Positional read access shared by the list implementations.
///
/// Mutation is not part of the contract: [`LinkedList`](crate::linked_list::LinkedList)
/// and [`DoublyLinkedList`](crate::doubly_linked_list::DoublyLinkedList) edit
/// themselves in place while [`PersistentList`](crate::persistent_list::PersistentList)
/// returns a new list, so only the queries line up.
pub trait ListOps<T> {
    fn len(&self) -> usize;

    fn head(&self) -> Option<&T>;

    fn tail(&self) -> Option<&T>;

    /// Element at `index`, counted from the head.
    fn get(&self, index: usize) -> Option<&T>;

    /// First element matching `predicate`, in head to tail order.
    fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool;

    fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, counted from the tail (0 is the tail itself).
    fn get_nth_from_last(&self, index: usize) -> Option<&T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        self.get(len - index - 1)
    }

    fn find_index_by_value(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.find_index(|v| v == value)
    }
}
