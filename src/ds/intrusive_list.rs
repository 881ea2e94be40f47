//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, enabling
//! stable handles and O(1) splice/move operations without owning pointers in
//! both directions.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next, linked }          │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Handles
//!
//! [`ListHandle`] pairs a `SlotId` with the identity of the list that issued
//! it. Passing a handle from another list yields [`ListError::ForeignHandle`];
//! passing one whose entry was already removed yields
//! [`ListError::StaleHandle`]. Both indicate a bug in the caller.
//!
//! An entry can be *unlinked* (taken out of the order but kept in the arena)
//! and later re-inserted with [`IntrusiveList::push_front_existing`], which
//! is how `move_to_front` avoids reallocating.
//!
//! ## Performance
//! - `push_front` / `push_front_existing`: O(1)
//! - `unlink` / `remove` / `pop_back`: O(1)
//! - `front` / `back` / `len`: O(1)
//! - `iter`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::ListError;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Stable reference to an entry of one specific [`IntrusiveList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHandle {
    list: u64,
    slot: SlotId,
}

impl ListHandle {
    /// Arena slot backing the entry.
    pub fn slot(self) -> SlotId {
        self.slot
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
    linked: bool,
}

#[derive(Debug)]
/// Intrusive list that stores nodes in a `SlotArena` and links them via `SlotId`.
pub struct IntrusiveList<T> {
    id: u64,
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of linked entries.
    ///
    /// Entries that were unlinked and not yet re-inserted are not counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entry is linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `handle` refers to a live entry of this list,
    /// linked or not.
    pub fn contains(&self, handle: ListHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns `true` if `handle` refers to an entry currently in the order.
    pub fn is_linked(&self, handle: ListHandle) -> bool {
        self.resolve(handle)
            .ok()
            .and_then(|slot| self.arena.get(slot))
            .is_some_and(|node| node.linked)
    }

    /// Returns the value at the front (most recently inserted) of the list.
    pub fn front(&self) -> Result<&T, ListError> {
        self.head
            .and_then(|slot| self.arena.get(slot))
            .map(|node| &node.value)
            .ok_or(ListError::Empty)
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Result<&T, ListError> {
        self.tail
            .and_then(|slot| self.arena.get(slot))
            .map(|node| &node.value)
            .ok_or(ListError::Empty)
    }

    /// Returns the handle at the front, if any.
    pub fn front_handle(&self) -> Option<ListHandle> {
        self.head.map(|slot| self.handle(slot))
    }

    /// Returns the handle at the back, if any.
    pub fn back_handle(&self) -> Option<ListHandle> {
        self.tail.map(|slot| self.handle(slot))
    }

    /// Returns the value behind `handle`.
    pub fn get(&self, handle: ListHandle) -> Result<&T, ListError> {
        let slot = self.resolve(handle)?;
        self.arena
            .get(slot)
            .map(|node| &node.value)
            .ok_or(ListError::StaleHandle)
    }

    /// Returns a mutable reference to the value behind `handle`.
    pub fn get_mut(&mut self, handle: ListHandle) -> Result<&mut T, ListError> {
        let slot = self.resolve(handle)?;
        self.arena
            .get_mut(slot)
            .map(|node| &mut node.value)
            .ok_or(ListError::StaleHandle)
    }

    /// Inserts a new entry at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> ListHandle {
        let slot = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
            linked: false,
        });
        self.attach_front(slot);
        self.handle(slot)
    }

    /// Re-inserts a previously unlinked entry at the front.
    pub fn push_front_existing(&mut self, handle: ListHandle) -> Result<(), ListError> {
        let slot = self.resolve(handle)?;
        if self.arena.get(slot).is_some_and(|node| node.linked) {
            return Err(ListError::AlreadyLinked);
        }
        self.attach_front(slot);
        Ok(())
    }

    /// Takes the entry out of the order but keeps its storage alive.
    ///
    /// Unlinking an entry that is already detached is a no-op.
    pub fn unlink(&mut self, handle: ListHandle) -> Result<(), ListError> {
        let slot = self.resolve(handle)?;
        self.detach(slot);
        Ok(())
    }

    /// Removes the entry wherever it sits and returns its value.
    pub fn remove(&mut self, handle: ListHandle) -> Result<T, ListError> {
        let slot = self.resolve(handle)?;
        self.detach(slot);
        self.arena
            .remove(slot)
            .map(|node| node.value)
            .ok_or(ListError::StaleHandle)
    }

    /// Moves a linked or detached entry to the front.
    pub fn move_to_front(&mut self, handle: ListHandle) -> Result<(), ListError> {
        let slot = self.resolve(handle)?;
        if self.head == Some(slot) {
            return Ok(());
        }
        self.detach(slot);
        self.attach_front(slot);
        Ok(())
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        let slot = self.tail.ok_or(ListError::Empty)?;
        self.detach(slot);
        self.arena
            .remove(slot)
            .map(|node| node.value)
            .ok_or(ListError::Empty)
    }

    /// Frees every entry, linked or detached. Handles issued before the
    /// clear become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of handles from front to back.
    pub fn iter_handles(&self) -> impl Iterator<Item = ListHandle> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            let slot = current?;
            current = self.arena.get(slot)?.next;
            Some(self.handle(slot))
        })
    }

    fn handle(&self, slot: SlotId) -> ListHandle {
        ListHandle {
            list: self.id,
            slot,
        }
    }

    fn resolve(&self, handle: ListHandle) -> Result<SlotId, ListError> {
        if handle.list != self.id {
            return Err(ListError::ForeignHandle);
        }
        if !self.arena.contains(handle.slot) {
            return Err(ListError::StaleHandle);
        }
        Ok(handle.slot)
    }

    fn detach(&mut self, slot: SlotId) {
        let (prev, next) = match self.arena.get(slot) {
            Some(node) if node.linked => (node.prev, node.next),
            _ => return,
        };

        if let Some(prev_slot) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_slot) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_slot) = next {
            if let Some(next_node) = self.arena.get_mut(next_slot) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(slot) {
            node.prev = None;
            node.next = None;
            node.linked = false;
        }
        self.len -= 1;
    }

    fn attach_front(&mut self, slot: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(slot) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
                node.linked = true;
            },
            None => return,
        }
        if let Some(old_head) = old_head {
            if let Some(head_node) = self.arena.get_mut(old_head) {
                head_node.prev = Some(slot);
            }
        } else {
            self.tail = Some(slot);
        }
        self.head = Some(slot);
        self.len += 1;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(slot) = current {
            assert!(seen.insert(slot));
            let node = self.arena.get(slot).expect("node missing");
            assert!(node.linked);
            assert_eq!(node.prev, prev);
            if let Some(next_slot) = node.next {
                let next_node = self.arena.get(next_slot).expect("next node missing");
                assert_eq!(next_node.prev, Some(slot));
            } else {
                assert_eq!(self.tail, Some(slot));
            }

            prev = Some(slot);
            current = node.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
        let linked = self.arena.iter().filter(|(_, node)| node.linked).count();
        assert_eq!(linked, self.len);
    }
}

pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current?;
        let node = self.list.arena.get(slot)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
