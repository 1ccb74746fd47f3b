//! Recording host used by the unit and scenario tests.

#![cfg(test)]

use crate::geometry::{GeometryOracle, UniformGridLayout};
use crate::ghost::Ghost;
use crate::host::{PointerCapture, PresentationSync, SpawnRequest, WorldBridge};
use crate::item::{CapturedItem, Item};
use crate::slide::SlideFrame;
use glam::{Vec2, Vec3};
use satchel_common::{
    ActorHandle, EntityClassId, EntityHandle, GridDims, MaterialId, MeshId, ScreenRect, Transform,
};
use std::collections::HashMap;

/// Host that records every call it receives.
#[derive(Debug)]
pub struct MockHost {
    pub layout: UniformGridLayout,
    pub root: bool,
    pub capture_available: bool,
    pub acquired: usize,
    pub released: usize,
    pub redraws: Vec<(usize, Item)>,
    pub ghost: Option<Ghost>,
    pub ghost_shown: usize,
    pub ghost_moves: usize,
    pub ghost_hidden: usize,
    pub highlighted: Option<usize>,
    pub slides: Vec<SlideFrame>,
    pub visible: bool,
    pub actors: HashMap<ActorHandle, CapturedItem>,
    pub destroyed: Vec<ActorHandle>,
    pub spawns: Vec<SpawnRequest>,
    next_entity: u64,
}

impl MockHost {
    /// 3x4 grid of 50px slots with 5px padding at (100, 100), 10px panel margin.
    pub fn new() -> Self {
        Self::with_dims(GridDims::new(3, 4))
    }

    pub fn with_dims(dims: GridDims) -> Self {
        Self {
            layout: UniformGridLayout::new(dims, Vec2::new(100.0, 100.0), Vec2::splat(50.0))
                .with_padding(5.0)
                .with_panel_margin(10.0),
            root: true,
            capture_available: true,
            acquired: 0,
            released: 0,
            redraws: Vec::new(),
            ghost: None,
            ghost_shown: 0,
            ghost_moves: 0,
            ghost_hidden: 0,
            highlighted: None,
            slides: Vec::new(),
            visible: false,
            actors: HashMap::new(),
            destroyed: Vec::new(),
            spawns: Vec::new(),
            next_entity: 1000,
        }
    }

    pub fn center(&self, slot: usize) -> Vec2 {
        self.layout.slot_center(slot).expect("slot is inside the grid")
    }

    pub fn last_redraw_of(&self, slot: usize) -> Option<&Item> {
        self.redraws.iter().rev().find(|(s, _)| *s == slot).map(|(_, i)| i)
    }

    pub fn place_actor(&mut self, actor: ActorHandle, captured: CapturedItem) {
        self.actors.insert(actor, captured);
    }
}

/// Captured data with a distinct kind, position and visuals.
pub fn captured(kind: u32) -> CapturedItem {
    CapturedItem::new(
        EntityClassId::new(kind),
        Transform::from_translation(Vec3::new(kind as f32, 0.0, 10.0)),
    )
    .with_mesh(MeshId::new(kind * 10))
    .with_material(MaterialId::new(kind * 100))
}

impl GeometryOracle for MockHost {
    fn slot_rect(&self, slot: usize) -> Option<ScreenRect> {
        self.layout.slot_rect(slot)
    }

    fn panel_rect(&self) -> Option<ScreenRect> {
        self.layout.panel_rect()
    }
}

impl PresentationSync for MockHost {
    fn has_root(&self) -> bool {
        self.root
    }

    fn redraw_slot(&mut self, slot: usize, item: &Item) {
        self.redraws.push((slot, item.clone()));
    }

    fn show_ghost(&mut self, ghost: &Ghost, _item: &Item) {
        self.ghost = Some(*ghost);
        self.ghost_shown += 1;
    }

    fn move_ghost(&mut self, ghost: &Ghost) {
        self.ghost = Some(*ghost);
        self.ghost_moves += 1;
    }

    fn hide_ghost(&mut self) {
        self.ghost = None;
        self.ghost_hidden += 1;
    }

    fn highlight(&mut self, slot: Option<usize>) {
        self.highlighted = slot;
    }

    fn show_slide(&mut self, frame: &SlideFrame) {
        self.slides.push(frame.clone());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl WorldBridge for MockHost {
    fn capture(&mut self, actor: ActorHandle) -> Option<CapturedItem> {
        self.actors.get(&actor).cloned()
    }

    fn spawn(&mut self, request: &SpawnRequest) -> Option<EntityHandle> {
        self.spawns.push(request.clone());
        self.next_entity += 1;
        Some(EntityHandle::new(self.next_entity))
    }

    fn destroy(&mut self, actor: ActorHandle) {
        self.actors.remove(&actor);
        self.destroyed.push(actor);
    }
}

impl PointerCapture for MockHost {
    fn acquire_capture(&mut self) -> bool {
        if self.capture_available {
            self.acquired += 1;
        }
        self.capture_available
    }

    fn release_capture(&mut self) {
        self.released += 1;
    }
}
