//! Arena-backed doubly linked list with sentinel boundaries.
//!
//! Nodes are stored in a single `Vec` and linked by index instead of by
//! pointer. The first two slots are permanent sentinels:
//!
//! ```text
//!   slot:   0 (HEAD)    1 (TAIL)    2        3        4
//!          ┌────────┐  ┌────────┐  ┌────┐   ┌────┐   ┌────┐
//!          │ sigil  │  │ sigil  │  │ A  │   │ B  │   │free│
//!          └────────┘  └────────┘  └────┘   └────┘   └────┘
//!
//!   HEAD ⇄ A ⇄ B ⇄ TAIL        free list: [4]
//! ```
//!
//! Callers hold [`NodeRef`] handles. A handle carries the slot index and the
//! slot's generation at the time the node was created; removing a node bumps
//! the generation, so a stale handle is rejected with
//! [`ListError::InvalidNode`] even after its slot has been reused. Handles to
//! the sentinels are never handed out and are rejected by every positional
//! operation.
//!
//! All operations are O(1) except [`List::iter`], [`List::clear`] and
//! [`List::check_invariants`].

extern crate alloc;

use crate::error::{InvariantError, ListError};
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

/// Arena index of the head sentinel.
pub(crate) const HEAD: usize = 0;

/// Arena index of the tail sentinel.
pub(crate) const TAIL: usize = 1;

/// Link value of a node that is not attached to any neighbour.
const NIL: usize = usize::MAX;

/// Stable, generation-checked reference to a node in a [`List`].
///
/// A `NodeRef` is only meaningful for the list that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    index: usize,
    generation: u32,
}

impl NodeRef {
    /// Returns the arena slot this reference points at.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A slot in the list arena.
///
/// Sentinels and free slots carry no value.
struct Entry<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
    generation: u32,
}

impl<T> Entry<T> {
    fn new_sigil() -> Self {
        Entry {
            val: None,
            prev: NIL,
            next: NIL,
            generation: 0,
        }
    }
}

/// A doubly linked list bounded by a head and a tail sentinel.
///
/// # Examples
///
/// ```
/// use freq_cache::list::List;
///
/// let mut list = List::new();
/// list.push_back(1);
/// let middle = list.push_back(2);
/// list.push_back(3);
///
/// assert_eq!(list.remove(middle), Ok(2));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// assert!(list.remove(middle).is_err());
/// ```
pub struct List<T> {
    entries: Vec<Entry<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        let mut entries = Vec::with_capacity(cap.saturating_add(2));
        entries.push(Entry::new_sigil());
        entries.push(Entry::new_sigil());
        entries[HEAD].next = TAIL;
        entries[TAIL].prev = HEAD;

        List {
            entries,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of real nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no real nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `val` right after the head sentinel.
    pub fn push_front(&mut self, val: T) -> NodeRef {
        let next = self.entries[HEAD].next;
        self.insert_between(val, HEAD, next)
    }

    /// Inserts `val` right before the tail sentinel.
    pub fn push_back(&mut self, val: T) -> NodeRef {
        let prev = self.entries[TAIL].prev;
        self.insert_between(val, prev, TAIL)
    }

    /// Inserts `val` directly after `node`.
    pub fn insert_after(&mut self, node: NodeRef, val: T) -> Result<NodeRef, ListError> {
        let idx = self.resolve(node)?;
        let next = self.entries[idx].next;
        Ok(self.insert_between(val, idx, next))
    }

    /// Inserts `val` directly before `node`.
    pub fn insert_before(&mut self, node: NodeRef, val: T) -> Result<NodeRef, ListError> {
        let idx = self.resolve(node)?;
        let prev = self.entries[idx].prev;
        Ok(self.insert_between(val, prev, idx))
    }

    /// Removes the first node and returns its value.
    pub fn remove_front(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        let first = self.entries[HEAD].next;
        self.release(first).ok_or(ListError::Empty)
    }

    /// Removes the last node and returns its value.
    pub fn remove_back(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        let last = self.entries[TAIL].prev;
        self.release(last).ok_or(ListError::Empty)
    }

    /// Removes `node` and returns its value.
    ///
    /// The removed node's links are cleared and `node` becomes stale.
    pub fn remove(&mut self, node: NodeRef) -> Result<T, ListError> {
        let idx = self.resolve(node)?;
        self.release(idx).ok_or(ListError::InvalidNode)
    }

    /// Moves `node` to the back of the list.
    ///
    /// The node keeps its slot, so `node` stays valid afterwards.
    pub fn move_to_back(&mut self, node: NodeRef) -> Result<(), ListError> {
        let idx = self.resolve(node)?;
        if self.entries[TAIL].prev == idx {
            return Ok(());
        }
        self.detach(idx);
        let prev = self.entries[TAIL].prev;
        self.attach_between(idx, prev, TAIL);
        Ok(())
    }

    /// Returns the value of the first node.
    pub fn front(&self) -> Option<&T> {
        self.entries[self.entries[HEAD].next].val.as_ref()
    }

    /// Returns the value of the last node.
    pub fn back(&self) -> Option<&T> {
        self.entries[self.entries[TAIL].prev].val.as_ref()
    }

    /// Returns a reference to the first node.
    pub fn front_ref(&self) -> Option<NodeRef> {
        (!self.is_empty()).then(|| self.handle(self.entries[HEAD].next))
    }

    /// Returns a reference to the last node.
    pub fn back_ref(&self) -> Option<NodeRef> {
        (!self.is_empty()).then(|| self.handle(self.entries[TAIL].prev))
    }

    /// Returns the value held by `node`, if the reference is live.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        let idx = self.resolve(node).ok()?;
        self.entries[idx].val.as_ref()
    }

    /// Returns a mutable reference to the value held by `node`.
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        let idx = self.resolve(node).ok()?;
        self.entries[idx].val.as_mut()
    }

    /// Returns `true` if `node` refers to a live node of this list.
    pub fn contains(&self, node: NodeRef) -> bool {
        self.resolve(node).is_ok()
    }

    /// Returns the neighbours of `node` as `(prev, next)`.
    ///
    /// A neighbour that is a sentinel is reported as `None`.
    pub fn neighbors(&self, node: NodeRef) -> Option<(Option<NodeRef>, Option<NodeRef>)> {
        let idx = self.resolve(node).ok()?;
        let entry = &self.entries[idx];
        let prev = (entry.prev != HEAD).then(|| self.handle(entry.prev));
        let next = (entry.next != TAIL).then(|| self.handle(entry.next));
        Some((prev, next))
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.entries[HEAD].next,
            remaining: self.len,
        }
    }

    /// Removes every node. Outstanding references all become stale.
    pub fn clear(&mut self) {
        while self.remove_front().is_ok() {}
    }

    /// Walks the list and verifies link consistency and the node count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = &self.entries[HEAD];
        let tail = &self.entries[TAIL];
        if head.val.is_some() || tail.val.is_some() {
            return Err(InvariantError::new("sentinel carries a value"));
        }
        if (head.next == TAIL) != (self.len == 0) || (tail.prev == HEAD) != (self.len == 0) {
            return Err(InvariantError::new(format!(
                "sentinels linked to each other with len {}",
                self.len
            )));
        }

        let mut count = 0;
        let mut prev = HEAD;
        let mut current = head.next;
        while current != TAIL {
            let Some(entry) = self.entries.get(current) else {
                return Err(InvariantError::new(format!("link to missing slot {current}")));
            };
            if entry.val.is_none() {
                return Err(InvariantError::new(format!("slot {current} is linked but empty")));
            }
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {current} points back at {} instead of {prev}",
                    entry.prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("more linked nodes than len"));
            }
            prev = current;
            current = entry.next;
        }
        if tail.prev != prev {
            return Err(InvariantError::new("tail sentinel does not point at last node"));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {count} nodes but len is {}",
                self.len
            )));
        }
        if self.entries.len() != self.len + self.free.len() + 2 {
            return Err(InvariantError::new("arena slots leaked"));
        }
        Ok(())
    }

    fn handle(&self, idx: usize) -> NodeRef {
        NodeRef {
            index: idx,
            generation: self.entries[idx].generation,
        }
    }

    /// Maps a reference to a live arena slot.
    fn resolve(&self, node: NodeRef) -> Result<usize, ListError> {
        if node.index == HEAD || node.index == TAIL {
            return Err(ListError::InvalidNode);
        }
        match self.entries.get(node.index) {
            Some(entry) if entry.generation == node.generation && entry.val.is_some() => {
                Ok(node.index)
            }
            _ => Err(ListError::InvalidNode),
        }
    }

    fn insert_between(&mut self, val: T, prev: usize, next: usize) -> NodeRef {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.entries[idx].val = Some(val);
                idx
            }
            None => {
                self.entries.push(Entry {
                    val: Some(val),
                    prev: NIL,
                    next: NIL,
                    generation: 0,
                });
                self.entries.len() - 1
            }
        };
        self.attach_between(idx, prev, next);
        self.len += 1;
        self.handle(idx)
    }

    fn attach_between(&mut self, idx: usize, prev: usize, next: usize) {
        self.entries[idx].prev = prev;
        self.entries[idx].next = next;
        self.entries[prev].next = idx;
        self.entries[next].prev = idx;
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.entries[idx].prev, self.entries[idx].next);
        self.entries[prev].next = next;
        self.entries[next].prev = prev;
        self.entries[idx].prev = NIL;
        self.entries[idx].next = NIL;
    }

    /// Unlinks a live slot, retires its generation and returns the value.
    fn release(&mut self, idx: usize) -> Option<T> {
        self.detach(idx);
        let entry = &mut self.entries[idx];
        entry.generation = entry.generation.wrapping_add(1);
        let val = entry.val.take();
        self.free.push(idx);
        self.len -= 1;
        val
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.entries.len())
            .finish()
    }
}

/// Front-to-back iterator over the values of a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.current == TAIL {
            return None;
        }
        let entry = &self.list.entries[self.current];
        self.current = entry.next;
        self.remaining -= 1;
        entry.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn values<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    fn sentinel(index: usize) -> NodeRef {
        NodeRef {
            index,
            generation: 0,
        }
    }

    #[test]
    fn test_construct() {
        let list = List::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.entries[HEAD].next, TAIL);
        assert_eq!(list.entries[TAIL].prev, HEAD);
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_push_front() {
        let mut list = List::new();
        list.push_front(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&1));

        list.push_front(2);
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec![2, 1]);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_push_back() {
        let mut list = List::new();
        let first = list.push_back(1);
        let second = list.push_back(2);
        assert_ne!(first, second);
        assert_eq!(list.len(), 2);
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.neighbors(second), Some((Some(first), None)));
        assert_eq!(list.neighbors(first), Some((None, Some(second))));
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_insert_after() {
        let mut list = List::new();
        let first = list.push_back(1);
        list.push_back(3);

        let inserted = list.insert_after(first, 2).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.neighbors(inserted).unwrap().0, Some(first));

        assert_eq!(list.insert_after(sentinel(TAIL), 4), Err(ListError::InvalidNode));
        assert_eq!(list.insert_after(sentinel(HEAD), 4), Err(ListError::InvalidNode));
        assert_eq!(list.len(), 3);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_insert_before() {
        let mut list = List::new();
        list.push_back(1);
        let last = list.push_back(3);

        let inserted = list.insert_before(last, 2).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.neighbors(inserted).unwrap().1, Some(last));

        assert_eq!(list.insert_before(sentinel(HEAD), 4), Err(ListError::InvalidNode));
        assert_eq!(list.insert_before(sentinel(TAIL), 4), Err(ListError::InvalidNode));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_front_and_back() {
        let mut list = List::<u32>::new();
        assert_eq!(list.remove_front(), Err(ListError::Empty));
        assert_eq!(list.remove_back(), Err(ListError::Empty));

        list.push_back(1);
        list.push_back(2);
        list.push_back(3);

        assert_eq!(list.remove_front(), Ok(1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.front(), Some(&2));

        assert_eq!(list.remove_back(), Ok(3));
        assert_eq!(list.len(), 1);

        assert_eq!(list.remove_back(), Ok(2));
        assert!(list.is_empty());
        assert_eq!(list.entries[HEAD].next, TAIL);
        assert_eq!(list.entries[TAIL].prev, HEAD);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_middle_clears_links() {
        let mut list = List::new();
        list.push_back(1);
        let middle = list.push_back(2);
        list.push_back(3);

        assert_eq!(list.remove(middle), Ok(2));
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.entries[middle.index()].prev, NIL);
        assert_eq!(list.entries[middle.index()].next, NIL);
        assert!(!list.contains(middle));
        assert!(list.neighbors(middle).is_none());
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_rejects_sentinels_and_stale_refs() {
        let mut list = List::new();
        assert_eq!(list.remove(sentinel(HEAD)), Err(ListError::InvalidNode));
        assert_eq!(list.remove(sentinel(TAIL)), Err(ListError::InvalidNode));

        let node = list.push_back(1);
        assert_eq!(list.remove(node), Ok(1));
        assert_eq!(list.remove(node), Err(ListError::InvalidNode));
        assert_eq!(list.move_to_back(node), Err(ListError::InvalidNode));
        assert_eq!(list.insert_after(node, 5), Err(ListError::InvalidNode));
        assert!(list.get(node).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_stale_ref_after_slot_reuse() {
        let mut list = List::new();
        let old = list.push_back(1);
        list.remove(old).unwrap();

        let new = list.push_back(2);
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(list.get(old).is_none());
        assert_eq!(list.get(new), Some(&2));
        assert_eq!(list.remove(old), Err(ListError::InvalidNode));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_many_stale_refs_after_slot_reuse() {
        let mut list = List::new();
        let old: Vec<_> = (0..500).map(|i| list.push_back(i)).collect();
        for &node in &old {
            list.remove(node).unwrap();
        }
        let new: Vec<_> = (500..1000).map(|i| list.push_back(i)).collect();

        for &node in &old {
            assert!(list.get(node).is_none());
            assert_eq!(list.remove(node), Err(ListError::InvalidNode));
            assert_eq!(list.move_to_back(node), Err(ListError::InvalidNode));
            assert_eq!(list.insert_after(node, 0), Err(ListError::InvalidNode));
        }
        assert_eq!(list.len(), 500);
        assert_eq!(list.get(new[0]), Some(&500));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), (500..1000).collect::<Vec<_>>());
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_move_to_back() {
        let mut list = List::new();
        assert_eq!(list.move_to_back(sentinel(HEAD)), Err(ListError::InvalidNode));
        assert_eq!(list.move_to_back(sentinel(TAIL)), Err(ListError::InvalidNode));

        let head = list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        list.move_to_back(head).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec![2, 3, 1]);
        assert_eq!(list.get(head), Some(&1));

        let mut list = List::new();
        list.push_back(1);
        let middle = list.push_back(2);
        list.push_back(3);
        let tail = list.push_back(4);
        list.move_to_back(middle).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(values(&list), vec![1, 3, 4, 2]);

        list.move_to_back(middle).unwrap();
        assert_eq!(values(&list), vec![1, 3, 4, 2]);
        list.move_to_back(tail).unwrap();
        assert_eq!(values(&list), vec![1, 3, 2, 4]);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_complex_operations() {
        let mut list = List::new();
        list.push_back(1);
        list.push_back(2);
        let zero = list.push_front(0);
        list.insert_after(zero, -1).unwrap();
        let last = list.back_ref().unwrap();
        list.insert_before(last, 3).unwrap();

        assert_eq!(list.len(), 5);
        assert_eq!(values(&list), vec![0, -1, 1, 3, 2]);
        assert_eq!(list.iter().len(), 5);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_front_and_back_refs() {
        let mut list = List::new();
        assert!(list.front_ref().is_none());
        assert!(list.back_ref().is_none());

        let a = list.push_back('a');
        let b = list.push_back('b');
        assert_eq!(list.front_ref(), Some(a));
        assert_eq!(list.back_ref(), Some(b));
    }

    #[test]
    fn test_get_mut() {
        let mut list = List::new();
        let node = list.push_back(String::from("test"));

        list.get_mut(node).unwrap().push_str("_modified");
        assert_eq!(list.get(node).map(String::as_str), Some("test_modified"));

        *list.get_mut(node).unwrap() = String::from("new_value");
        assert_eq!(list.front().map(String::as_str), Some("new_value"));
    }

    #[test]
    fn test_clear() {
        let mut list = List::new();
        let node = list.push_back(10);
        list.push_back(20);
        list.push_back(30);

        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(node));
        assert!(list.check_invariants().is_ok());

        list.push_back(40);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_length_consistency_after_mixed_operations() {
        let mut list = List::with_capacity(4);
        let n1 = list.push_back(10);
        let n2 = list.push_back(20);
        let n3 = list.push_back(30);

        list.move_to_back(n1).unwrap();
        list.move_to_back(n3).unwrap();
        assert_eq!(list.len(), 3);

        let n4 = list.push_front(40);
        assert_eq!(list.len(), 4);

        assert_eq!(list.remove(n2), Ok(20));
        assert_eq!(list.remove(n4), Ok(40));
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec![10, 30]);
        assert!(list.check_invariants().is_ok());

        list.clear();
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_check_invariants_detects_corruption() {
        let mut list = List::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.entries[a.index()].next = TAIL;
        assert!(list.check_invariants().is_err());
    }
}
