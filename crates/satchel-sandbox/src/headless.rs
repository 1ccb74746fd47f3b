//! Headless host: a fixed grid layout, a toy world and log-only drawing.

use std::collections::HashMap;

use glam::{Quat, Vec2, Vec3};
use satchel_common::{
    ActorHandle, EntityClassId, EntityHandle, GridDims, MaterialId, MeshId, ScreenRect, TextureId,
    Transform,
};
use satchel_inventory::{
    CapturedItem, GeometryOracle, Ghost, Item, PointerCapture, PresentationSync, SlideFrame,
    SpawnRequest, UniformGridLayout, WorldBridge,
};
use tracing::{debug, info, trace};

/// Slot side length in pixels.
const CELL_SIZE: f32 = 64.0;
/// Padding on each side of a slot.
const CELL_PADDING: f32 = 4.0;
/// Panel background margin around the grid.
const PANEL_MARGIN: f32 = 12.0;

/// Host that lays out a uniform grid and keeps a small world of actors.
#[derive(Debug)]
pub struct HeadlessHost {
    layout: UniformGridLayout,
    world: HashMap<ActorHandle, CapturedItem>,
    spawned: Vec<(EntityHandle, SpawnRequest)>,
    next_handle: u64,
    captured: bool,
    redraws: usize,
}

impl HeadlessHost {
    /// Creates a host whose grid starts at `origin` on screen.
    pub fn new(dims: GridDims, origin: Vec2) -> Self {
        Self {
            layout: UniformGridLayout::new(dims, origin, Vec2::splat(CELL_SIZE))
                .with_padding(CELL_PADDING)
                .with_panel_margin(PANEL_MARGIN),
            world: HashMap::new(),
            spawned: Vec::new(),
            next_handle: 1,
            captured: false,
            redraws: 0,
        }
    }

    /// Places a pickup-able actor of `kind` at `position`, turned and scaled
    /// by kind so ejected poses are easy to tell apart.
    pub fn place_actor(&mut self, kind: u32, position: Vec3) -> ActorHandle {
        let handle = ActorHandle::new(self.next_handle);
        self.next_handle += 1;
        let transform = Transform::from_translation(position)
            .with_rotation(Quat::from_rotation_y(kind as f32 * 0.5))
            .with_scale(Vec3::splat(1.0 + (kind % 3) as f32 * 0.25));
        let captured = CapturedItem::new(EntityClassId::new(kind), transform)
            .with_mesh(MeshId::new(kind))
            .with_material(MaterialId::new(kind * 10))
            .with_icon(TextureId::new(kind));
        self.world.insert(handle, captured);
        debug!(actor = handle.raw(), kind, "Actor placed");
        handle
    }

    /// Centre of a slot in screen space.
    pub fn slot_center(&self, slot: usize) -> Option<Vec2> {
        self.layout.slot_center(slot)
    }

    /// Panel background rectangle.
    pub fn panel(&self) -> Option<ScreenRect> {
        self.layout.panel_rect()
    }

    /// Number of actors left in the world.
    pub fn actor_count(&self) -> usize {
        self.world.len()
    }

    /// Entities spawned by ejection so far.
    pub fn spawned(&self) -> &[(EntityHandle, SpawnRequest)] {
        &self.spawned
    }

    /// Whether pointer capture is currently held.
    pub const fn has_capture(&self) -> bool {
        self.captured
    }

    /// Slot redraw count.
    pub const fn redraws(&self) -> usize {
        self.redraws
    }
}

impl GeometryOracle for HeadlessHost {
    fn slot_rect(&self, slot: usize) -> Option<ScreenRect> {
        self.layout.slot_rect(slot)
    }

    fn panel_rect(&self) -> Option<ScreenRect> {
        self.layout.panel_rect()
    }
}

impl PresentationSync for HeadlessHost {
    fn has_root(&self) -> bool {
        true
    }

    fn redraw_slot(&mut self, slot: usize, item: &Item) {
        self.redraws += 1;
        trace!(
            slot,
            label = ?item.label(),
            icon = ?item.icon.map(TextureId::raw),
            "Redraw slot"
        );
    }

    fn show_ghost(&mut self, ghost: &Ghost, item: &Item) {
        debug!(position = ?ghost.position, label = ?item.label(), "Ghost shown");
    }

    fn move_ghost(&mut self, ghost: &Ghost) {
        trace!(position = ?ghost.position, "Ghost moved");
    }

    fn hide_ghost(&mut self) {
        debug!("Ghost hidden");
    }

    fn highlight(&mut self, slot: Option<usize>) {
        trace!(?slot, "Highlight");
    }

    fn show_slide(&mut self, frame: &SlideFrame) {
        trace!(
            from = frame.from,
            to = frame.to,
            progress = frame.progress,
            direction = ?frame.direction,
            "Slide frame"
        );
    }

    fn set_visible(&mut self, visible: bool) {
        info!(visible, "Panel visibility changed");
    }
}

impl WorldBridge for HeadlessHost {
    fn capture(&mut self, actor: ActorHandle) -> Option<CapturedItem> {
        self.world.get(&actor).cloned()
    }

    fn spawn(&mut self, request: &SpawnRequest) -> Option<EntityHandle> {
        let entity = EntityHandle::new(self.next_handle);
        self.next_handle += 1;
        info!(
            entity = entity.raw(),
            kind = request.kind.raw(),
            at = ?request.transform.translation,
            "Spawned ejected item"
        );
        self.spawned.push((entity, request.clone()));
        Some(entity)
    }

    fn destroy(&mut self, actor: ActorHandle) {
        self.world.remove(&actor);
        debug!(actor = actor.raw(), "Actor destroyed");
    }
}

impl PointerCapture for HeadlessHost {
    fn acquire_capture(&mut self) -> bool {
        self.captured = true;
        true
    }

    fn release_capture(&mut self) {
        self.captured = false;
    }
}
