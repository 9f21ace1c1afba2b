//! Node storage with stable, generation-checked handles.
//!
//! Values are stored in a growable array of slots. Vacated slots are threaded
//! onto a free list and reused by later insertions. Each slot carries a
//! generation counter which is odd while the slot is occupied and even while
//! it is vacant, so a handle to a removed value never resolves again, even
//! after its slot has been recycled.

use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt::{self, Debug, Formatter};
use core::mem;
use core::ops::{Index, IndexMut};

/// A stable reference to a value stored in a [`Pool`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    #[inline]
    pub(crate) fn into_raw_parts(self) -> (usize, u32) {
        (self.index as usize, self.generation)
    }
}

impl Debug for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

enum Slot<T> {
    Occupied { generation: u32, item: T },
    Vacant { generation: u32, next_free_slot: Option<u32> },
}

impl<T> Slot<T> {
    #[inline]
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn stale_handle(handle: Handle) -> ! {
    panic!("pool handle {:?} does not refer to a live value", handle)
}

#[cold]
#[inline(never)]
#[track_caller]
fn too_many_slots() -> ! {
    panic!("pool cannot address more than u32::MAX slots")
}

#[cold]
#[inline(never)]
#[track_caller]
fn free_list_corrupted(index: u32) -> ! {
    panic!("free list entry {} refers to an occupied slot", index)
}

/// An object pool handing out generation-checked [`Handle`]s.
pub(crate) struct Pool<T> {
    slots: Vec<Slot<T>>,
    len: usize,
    next_free_slot: Option<u32>,
}

impl<T> Pool<T> {
    /// Constructs a new, empty pool. Does not allocate.
    pub(crate) const fn new() -> Self {
        Pool {
            slots: Vec::new(),
            len: 0,
            next_free_slot: None,
        }
    }

    /// Returns the number of values currently in the pool.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots allocated so far, occupied or not.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the specified handle refers to a live value.
    pub(crate) fn contains_handle(&self, handle: Handle) -> bool {
        let (index, generation) = handle.into_raw_parts();
        generation % 2 == 1
            && self
                .slots
                .get(index)
                .map_or(false, |slot| slot.generation() == generation)
    }

    /// Inserts a value into the pool, returning a unique handle to access it.
    pub(crate) fn insert(&mut self, value: T) -> Handle {
        let handle = match self.next_free_slot {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let (generation, next_free_slot) = match *slot {
                    Slot::Vacant {
                        generation,
                        next_free_slot,
                    } => (generation.wrapping_add(1), next_free_slot),
                    Slot::Occupied { .. } => free_list_corrupted(index),
                };
                debug_assert_eq!(generation % 2, 1);

                *slot = Slot::Occupied {
                    generation,
                    item: value,
                };
                self.next_free_slot = next_free_slot;
                Handle { index, generation }
            }
            None => {
                let index = match u32::try_from(self.slots.len()) {
                    Ok(index) if index < u32::MAX => index,
                    _ => too_many_slots(),
                };

                if self.slots.len() == self.slots.capacity() {
                    log::trace!(
                        "node pool growing beyond {} slots",
                        self.slots.capacity()
                    );
                }

                self.slots.push(Slot::Occupied {
                    generation: 1,
                    item: value,
                });
                Handle {
                    index,
                    generation: 1,
                }
            }
        };

        self.len += 1;
        handle
    }

    /// Returns a reference to the value referred to by `handle`, or [`None`]
    /// if the handle is stale.
    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        let (index, generation) = handle.into_raw_parts();
        match self.slots.get(index)? {
            Slot::Occupied {
                generation: current,
                item,
            } if *current == generation => Some(item),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value referred to by `handle`, or
    /// [`None`] if the handle is stale.
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let (index, generation) = handle.into_raw_parts();
        match self.slots.get_mut(index)? {
            Slot::Occupied {
                generation: current,
                item,
            } if *current == generation => Some(item),
            _ => None,
        }
    }

    /// Removes the value referred to by `handle` from the pool, returning it
    /// unless the handle is stale. This invalidates the handle.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains_handle(handle) {
            return None;
        }

        let (index, generation) = handle.into_raw_parts();
        let vacated = Slot::Vacant {
            generation: generation.wrapping_add(1),
            next_free_slot: self.next_free_slot,
        };

        let item = match mem::replace(&mut self.slots[index], vacated) {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => unreachable!(),
        };

        self.next_free_slot = Some(handle.index);
        self.len -= 1;
        Some(item)
    }
}

impl<T> Index<Handle> for Pool<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, handle: Handle) -> &T {
        match self.get(handle) {
            Some(item) => item,
            None => stale_handle(handle),
        }
    }
}

impl<T> IndexMut<Handle> for Pool<T> {
    #[track_caller]
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        match self.get_mut(handle) {
            Some(item) => item,
            None => stale_handle(handle),
        }
    }
}
