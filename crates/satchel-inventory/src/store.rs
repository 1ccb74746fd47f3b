//! Fixed-capacity item storage.
//!
//! The store owns the slot array and the display-index bookkeeping. Display
//! indices of occupied slots always form the range `0..occupied_count` with
//! no gaps: adding hands out the next counter value and every removal
//! re-indexes the whole array in storage order.

use crate::item::{CapturedItem, Item};
use thiserror::Error;
use tracing::{debug, warn};

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No empty slot left
    #[error("Inventory full: capacity {capacity}")]
    Full {
        /// Inventory capacity
        capacity: usize,
    },
    /// Slot holds no item
    #[error("Slot {slot} is not occupied")]
    NotOccupied {
        /// Slot index
        slot: usize,
    },
    /// Slot index outside the grid
    #[error("Invalid slot index {slot} (capacity {capacity})")]
    InvalidSlot {
        /// Slot index
        slot: usize,
        /// Inventory capacity
        capacity: usize,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// The slot array of one inventory grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore {
    /// One entry per grid slot, row-major
    slots: Vec<Item>,
    /// Next display index to hand out; equals the occupied count
    counter: usize,
}

impl ItemStore {
    /// Creates an empty store with the given number of slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Item::empty(); capacity],
            counter: 0,
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub const fn occupied_count(&self) -> usize {
        self.counter
    }

    /// Read-only view of every slot.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.slots
    }

    /// Gets a slot by index.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot)
    }

    /// Checks whether a slot exists and holds an item.
    #[must_use]
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Item::is_occupied)
    }

    /// First empty slot in storage order.
    #[must_use]
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Item::is_empty)
    }

    /// Checks if no empty slot remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.first_empty_slot().is_none()
    }

    /// Adds an item to the first empty slot and returns that slot.
    pub fn try_add(&mut self, captured: CapturedItem) -> InventoryResult<usize> {
        let Some(slot) = self.first_empty_slot() else {
            return Err(InventoryError::Full {
                capacity: self.capacity(),
            });
        };

        self.slots[slot] = Item::from_captured(captured, self.counter);
        self.counter += 1;
        debug!(slot, display_index = self.counter - 1, "Item added");
        Ok(slot)
    }

    /// Empties a slot and re-indexes the remaining items.
    pub fn remove_at(&mut self, slot: usize) -> InventoryResult<Item> {
        self.check_slot(slot)?;
        if self.slots[slot].is_empty() {
            return Err(InventoryError::NotOccupied { slot });
        }

        let removed = std::mem::take(&mut self.slots[slot]);
        self.reindex();
        debug!(slot, occupied = self.counter, "Item removed");
        Ok(removed)
    }

    /// Clears every slot and restarts display indices at zero.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = Item::empty();
        }
        self.counter = 0;
    }

    /// Moves an item into an empty slot.
    pub fn move_item(&mut self, from: usize, to: usize) -> InventoryResult<()> {
        self.check_slot(from)?;
        self.check_slot(to)?;
        if self.slots[from].is_empty() {
            return Err(InventoryError::NotOccupied { slot: from });
        }
        if from == to {
            return Ok(());
        }
        if self.slots[to].is_occupied() {
            warn!(from, to, "Move target is occupied, swapping instead");
        }
        self.slots.swap(from, to);
        Ok(())
    }

    /// Exchanges the contents of two slots.
    pub fn swap(&mut self, a: usize, b: usize) -> InventoryResult<()> {
        self.check_slot(a)?;
        self.check_slot(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Moves `from` into `to` and the previous occupant of `to` into `spill`.
    ///
    /// `spill` must be empty or equal to `from`.
    pub fn displace(&mut self, from: usize, to: usize, spill: usize) -> InventoryResult<()> {
        self.check_slot(from)?;
        self.check_slot(to)?;
        self.check_slot(spill)?;
        if self.slots[from].is_empty() {
            return Err(InventoryError::NotOccupied { slot: from });
        }
        if spill != from && self.slots[spill].is_occupied() {
            return Err(InventoryError::Full {
                capacity: self.capacity(),
            });
        }

        let carried = std::mem::take(&mut self.slots[from]);
        let displaced = std::mem::replace(&mut self.slots[to], carried);
        self.slots[spill] = displaced;
        Ok(())
    }

    /// Checks that occupied display indices are exactly `0..occupied_count`.
    #[must_use]
    pub fn indices_are_contiguous(&self) -> bool {
        let mut seen = vec![false; self.counter];
        let mut occupied = 0;
        for item in self.slots.iter().filter(|i| i.is_occupied()) {
            occupied += 1;
            match item.display_index {
                Some(i) if i < seen.len() && !seen[i] => seen[i] = true,
                _ => return false,
            }
        }
        occupied == self.counter
    }

    fn reindex(&mut self) {
        let mut next = 0;
        for item in &mut self.slots {
            if item.is_occupied() {
                item.display_index = Some(next);
                next += 1;
            } else {
                item.display_index = None;
            }
        }
        self.counter = next;
    }

    fn check_slot(&self, slot: usize) -> InventoryResult<()> {
        if slot < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError::InvalidSlot {
                slot,
                capacity: self.slots.len(),
            })
        }
    }
}
