//! Event bus for telling the game layer what the inventory did.

use std::cell::Cell;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::trace;

use crate::config::InventoryConfig;
use crate::drag::DropOutcome;

/// Event types published by the inventory panel.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    /// Item entered a slot
    ItemAdded {
        /// Slot it landed in
        slot: usize,
        /// Display index assigned
        display_index: usize,
    },
    /// Item left a slot through the public API
    ItemRemoved {
        /// Slot it left
        slot: usize,
    },
    /// Pickup refused because no slot is free
    PickupRefused,
    /// Pointer pressed on an occupied slot
    DragStarted {
        /// Origin slot
        slot: usize,
    },
    /// Item left the grid and follows the pointer
    PoppedOut {
        /// Origin slot
        slot: usize,
    },
    /// Interior drag moved the item into an empty slot
    LiveMoved {
        /// Previous slot
        from: usize,
        /// New slot
        to: usize,
    },
    /// Interior drag swapped the item with an occupant
    LiveSwapped {
        /// Previous slot, now holding the displaced item
        from: usize,
        /// New slot
        to: usize,
    },
    /// Pointer released and a drop outcome applied
    Dropped(DropOutcome),
    /// Drag ended without touching the store
    DragAborted,
    /// Panel shown
    Opened,
    /// Panel hidden
    Closed,
    /// Store cleared for a new session
    SessionReset,
}

/// Queue of inventory events waiting for the game layer.
///
/// Publishing never blocks the pointer callbacks. When the queue is full the
/// newest event is discarded and counted.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<InventoryEvent>,
    receiver: Receiver<InventoryEvent>,
    dropped: Cell<usize>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(InventoryConfig::default().event_capacity)
    }
}

impl EventBus {
    /// Creates a queue holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            dropped: Cell::new(0),
        }
    }

    /// Queues an event, discarding it if the queue is full.
    pub fn publish(&self, event: InventoryEvent) {
        if let Err(TrySendError::Full(event)) = self.sender.try_send(event) {
            self.dropped.set(self.dropped.get() + 1);
            trace!(?event, dropped = self.dropped.get(), "Event queue full");
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<InventoryEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Maximum number of queued events.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sender.capacity().unwrap_or(0)
    }

    /// Events discarded because the queue was full.
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        bus.publish(InventoryEvent::Opened);
        bus.publish(InventoryEvent::ItemRemoved { slot: 2 });

        assert_eq!(bus.pending_count(), 2);
        let events = bus.drain();
        assert_eq!(events, vec![InventoryEvent::Opened, InventoryEvent::ItemRemoved { slot: 2 }]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_and_counts_newest() {
        let bus = EventBus::new(1);
        bus.publish(InventoryEvent::Opened);
        bus.publish(InventoryEvent::Closed);
        bus.publish(InventoryEvent::SessionReset);

        assert_eq!(bus.dropped_count(), 2);
        assert_eq!(bus.drain(), vec![InventoryEvent::Opened]);

        bus.publish(InventoryEvent::Closed);
        assert_eq!(bus.drain(), vec![InventoryEvent::Closed]);
    }

    #[test]
    fn test_default_capacity_follows_config() {
        let bus = EventBus::default();
        assert_eq!(bus.capacity(), InventoryConfig::default().event_capacity);
        assert_eq!(bus.dropped_count(), 0);
    }
}
