//! Fixed-capacity slot arrays
//!
//! Entities live in numbered slots that never move, so a slot index stays a
//! valid handle for as long as the entity is alive. An empty slot is the
//! entity's inactive state and is reused first-fit by the next insertion.

/// A fixed-capacity array of optional entities
#[derive(Debug, Clone)]
pub struct Slots<T> {
    slots: Vec<Option<T>>,
}

impl<T> Slots<T> {
    /// Create an array with `capacity` empty slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    /// Total number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }

    /// Index of the lowest empty slot
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Store `value` in the lowest empty slot, returning its index.
    /// Returns `None` (dropping the value) when every slot is taken.
    pub fn insert(&mut self, value: T) -> Option<usize> {
        let index = self.first_free()?;
        self.slots[index] = Some(value);
        Some(index)
    }

    /// Empty a slot, returning what it held
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Occupied slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i, v)))
    }

    /// Occupied slots in index order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (i, v)))
    }
}
