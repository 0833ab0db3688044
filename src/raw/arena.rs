use alloc::vec::Vec;

use super::handle::{Generation, Handle};

#[derive(Clone)]
struct Slot<T> {
    generation: Generation,
    element: Option<T>,
}

/// Slot storage addressed by [`Handle`].
///
/// Vacated slots are recycled through a free list. Every time a slot is vacated its
/// [`Generation`] advances, so a `(Handle, Generation)` pair names exactly one element for the
/// whole life of the arena.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()].element = Some(element);
            h
        } else {
            // Strict less-than: after the push there are at most `Handle::MAX` slots.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot {
                generation: Generation::FIRST,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns the generation of the slot behind `handle`.
    ///
    /// For an occupied slot this is the generation its current element was allocated under.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.slots[handle.to_index()].generation
    }

    /// Returns `true` if `handle` still refers to the element allocated under `generation`.
    pub(crate) fn is_live(&self, handle: Handle, generation: Generation) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.element.is_some() && slot.generation == generation)
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.next();
        self.free.push(handle);
        element
    }

    /// Drops every element. Slots are kept for reuse and all outstanding generations expire.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.next();
            }
            self.free.push(Handle::from_index(index));
        }
    }
}
