//! Collaborators supplied by the host engine.
//!
//! The core never touches widgets, actors or input devices directly. It
//! drives these traits, all on the UI thread, from inside pointer callbacks.

use crate::geometry::GeometryOracle;
use crate::ghost::Ghost;
use crate::item::{CapturedItem, Item};
use crate::slide::SlideFrame;
use satchel_common::{ActorHandle, EntityClassId, EntityHandle, MaterialId, MeshId, Transform};

/// One-way renderer from item values to slot visuals.
///
/// A slot's visible content must be a pure function of the [`Item`] passed
/// to [`PresentationSync::redraw_slot`].
pub trait PresentationSync {
    /// Whether the root widget tree exists. Checked once at construction.
    fn has_root(&self) -> bool;

    /// Rebuild one slot's visual from an item; an empty item clears it.
    fn redraw_slot(&mut self, slot: usize, item: &Item);

    /// Create the free-floating ghost for a popped-out item.
    fn show_ghost(&mut self, ghost: &Ghost, item: &Item);

    /// Reposition the ghost.
    fn move_ghost(&mut self, ghost: &Ghost);

    /// Destroy the ghost.
    fn hide_ghost(&mut self);

    /// Highlight the hovered slot during a drag (`None` clears).
    fn highlight(&mut self, _slot: Option<usize>) {}

    /// Draw one frame of a slide animation.
    fn show_slide(&mut self, _frame: &SlideFrame) {}

    /// Show or hide the whole panel.
    fn set_visible(&mut self, visible: bool);
}

/// Everything needed to put an ejected item back into the world.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    /// Entity class to instantiate
    pub kind: EntityClassId,
    /// Spawn pose (the pose captured at pickup)
    pub transform: Transform,
    /// Mesh to assign
    pub mesh: Option<MeshId>,
    /// Materials to assign, in mesh slot order
    pub materials: Vec<MaterialId>,
}

impl SpawnRequest {
    /// Builds a request from an occupied item; `None` for an empty slot.
    #[must_use]
    pub fn from_item(item: &Item) -> Option<Self> {
        Some(Self {
            kind: item.source_kind?,
            transform: item.world_transform,
            mesh: item.mesh,
            materials: item.materials.clone(),
        })
    }
}

/// Bridge to the 3D world.
pub trait WorldBridge {
    /// Read transform and visuals from an actor about to be picked up.
    fn capture(&mut self, actor: ActorHandle) -> Option<CapturedItem>;

    /// Spawn a world entity for an ejected item.
    ///
    /// Mesh and material loads may block; this happens at most once per drop.
    fn spawn(&mut self, request: &SpawnRequest) -> Option<EntityHandle>;

    /// Destroy an actor that has been absorbed into the inventory.
    fn destroy(&mut self, actor: ActorHandle);
}

/// Exclusive pointer capture for the panel's widget.
///
/// Acquired when a drag starts and released on every path back to idle.
pub trait PointerCapture {
    /// Route all pointer events to the panel. Returns `false` if the host
    /// has no widget to capture with.
    fn acquire_capture(&mut self) -> bool;

    /// Stop routing pointer events to the panel.
    fn release_capture(&mut self);
}

/// Everything the panel needs from its host.
pub trait InventoryHost: GeometryOracle + PresentationSync + WorldBridge + PointerCapture {}

impl<T> InventoryHost for T where T: GeometryOracle + PresentationSync + WorldBridge + PointerCapture {}
