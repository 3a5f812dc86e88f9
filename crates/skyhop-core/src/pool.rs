use serde::{Deserialize, Serialize};

/// Index of a slot in a [`Pool`]. Stable for the lifetime of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    value: T,
    active: bool,
}

/// Growable arena with a free list of released slots.
///
/// `acquire` reuses the most recently released slot in O(1) and only grows
/// the arena when no slot is free. Released slots keep their last value
/// but are invisible to `get` and `iter_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Activate `value` in a free slot, growing the arena if none is free.
    pub fn acquire(&mut self, value: T) -> SlotId {
        if let Some(i) = self.free.pop() {
            self.slots[i] = Slot {
                value,
                active: true,
            };
            SlotId(i)
        } else {
            self.slots.push(Slot {
                value,
                active: true,
            });
            SlotId(self.slots.len() - 1)
        }
    }

    /// Deactivate a slot and return it to the free list.
    /// Returns false if the slot was already inactive or out of range.
    pub fn release(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.active => {
                slot.active = false;
                self.free.push(id.0);
                true
            },
            _ => false,
        }
    }

    /// Deactivate every slot, keeping the arena's capacity.
    pub fn release_all(&mut self) {
        self.free.clear();
        for (i, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.active = false;
            self.free.push(i);
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .filter(|s| s.active)
            .map(|s| &s.value)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (SlotId(i), &s.value))
    }

    /// First active slot whose value matches `pred`.
    pub fn find_active(&self, mut pred: impl FnMut(&T) -> bool) -> Option<SlotId> {
        self.iter_active().find(|(_, v)| pred(v)).map(|(id, _)| id)
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots allocated, active or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
