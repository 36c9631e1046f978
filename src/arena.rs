//! Slab storage for skip list nodes.
//!
//! Nodes refer to each other through [`NodeId`]s instead of pointers. A freed
//! slot is threaded onto a free list and handed out again by the next
//! allocation, so the backing `Vec` only grows when every slot is occupied.

use std::mem;
use std::ops::{Index, IndexMut};

/// Opaque handle to a slot in a [`NodeArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct NodeId(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<NodeId>),
}

pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<NodeId>,
    len: usize,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free_head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            }
            Some(id) => {
                let vacant = mem::replace(&mut self.slots[id.0], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => self.free_head = next,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
                id
            }
        }
    }

    /// Releases the slot behind `id` and returns what it held.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds or already vacant.
    pub(crate) fn free(&mut self, id: NodeId) -> T {
        let old = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free_head));
        match old {
            Slot::Occupied(value) => {
                self.free_head = Some(id);
                self.len -= 1;
                value
            }
            Slot::Vacant(next) => {
                self.slots[id.0] = Slot::Vacant(next);
                panic!("attempting to free vacant slot {:?}", id)
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// # Panics
///
/// Panics if `id` does not name an occupied slot.
impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        self.get(id).expect("dangling node id")
    }
}

/// # Panics
///
/// Panics if `id` does not name an occupied slot.
impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id).expect("dangling node id")
    }
}
