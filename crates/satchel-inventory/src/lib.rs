//! # Satchel Inventory
//!
//! Grid inventory core for Satchel.
//!
//! This crate provides the engine-independent half of a drag-and-drop
//! inventory panel:
//! - Item store with contiguous display indices
//! - Slot resolution from pointer positions to grid cells
//! - Edge-crossing and threshold pop-out detection
//! - Drag state machine with live rearrangement and world ejection
//! - Ghost and slide presentation helpers
//! - Host collaborator traits for layout, drawing, world and pointer capture
//! - Event bus for telling the game layer what happened

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod drag;
pub mod edge;
pub mod events;
pub mod geometry;
pub mod ghost;
pub mod host;
pub mod item;
pub mod panel;
pub mod resolver;
pub mod slide;
pub mod store;

#[cfg(test)]
mod testing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::drag::*;
    pub use crate::edge::*;
    pub use crate::events::*;
    pub use crate::geometry::*;
    pub use crate::ghost::*;
    pub use crate::host::*;
    pub use crate::item::*;
    pub use crate::panel::*;
    pub use crate::resolver::*;
    pub use crate::slide::*;
    pub use crate::store::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_common::{EntityClassId, Transform};

    #[test]
    fn test_store_add_remove() {
        let mut store = ItemStore::new(4);
        let slot = store
            .try_add(CapturedItem::new(EntityClassId::new(1), Transform::IDENTITY))
            .expect("store has room");

        assert_eq!(slot, 0);
        assert_eq!(store.occupied_count(), 1);
        assert!(store.remove_at(slot).is_ok());
        assert_eq!(store.occupied_count(), 0);
    }

    #[test]
    fn test_default_controller_is_idle() {
        let controller = DragController::from_config(&InventoryConfig::default());
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(!controller.is_dragging());
    }
}
