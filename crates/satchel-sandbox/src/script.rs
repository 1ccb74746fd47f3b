//! Scripted and randomized drag sessions.

use anyhow::{ensure, Context, Result};
use glam::{Vec2, Vec3};
use satchel_inventory::{DragPhase, DropOutcome, InventoryConfig, InventoryPanel, PointerEvent};
use tracing::{debug, info, warn};

use crate::headless::HeadlessHost;

/// Where the grid's top-left corner sits on screen.
const GRID_ORIGIN: Vec2 = Vec2::new(200.0, 150.0);
/// Simulated frame time.
const FRAME_DT: f32 = 1.0 / 60.0;
/// How far beyond the panel the random walk may wander.
const WANDER: f32 = 80.0;

/// Totals reported at the end of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Drags started
    pub drags: usize,
    /// Drops that moved an item into an empty slot
    pub moves: usize,
    /// Drops that swapped two items
    pub swaps: usize,
    /// Drops that put the item back
    pub restores: usize,
    /// Items sent back into the world
    pub ejections: usize,
    /// Drags that ended without a drop
    pub aborts: usize,
    /// Items picked up from the world
    pub pickups: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Moved { .. } => self.moves += 1,
            DropOutcome::Swapped { .. } => self.swaps += 1,
            DropOutcome::Restored { .. } => self.restores += 1,
            DropOutcome::Ejected { .. } => self.ejections += 1,
            DropOutcome::Aborted => self.aborts += 1,
        }
    }
}

/// Creates an open panel over a headless host.
pub fn build_panel(config: InventoryConfig) -> Result<InventoryPanel<HeadlessHost>> {
    let host = HeadlessHost::new(config.dims(), GRID_ORIGIN);
    let mut panel = InventoryPanel::new(config, host).context("creating inventory panel")?;
    panel.open();
    Ok(panel)
}

fn center(panel: &InventoryPanel<HeadlessHost>, slot: usize) -> Result<Vec2> {
    panel
        .host()
        .slot_center(slot)
        .with_context(|| format!("slot {slot} has no geometry"))
}

fn settle(panel: &mut InventoryPanel<HeadlessHost>, frames: usize) {
    for _ in 0..frames {
        panel.tick(FRAME_DT);
    }
}

/// Picks up a few actors, swaps two of them live and ejects one.
pub fn run_scripted(panel: &mut InventoryPanel<HeadlessHost>) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for kind in 1..=3 {
        let actor = panel
            .host_mut()
            .place_actor(kind, Vec3::new(kind as f32 * 2.0, 0.0, 0.0));
        if let Some(slot) = panel.pick_up(actor)? {
            summary.pickups += 1;
            debug!(kind, slot, "Picked up actor");
        }
    }
    ensure!(panel.host().actor_count() == 0, "picked-up actors remain in the world");

    // Live swap: drag slot 0 across slot 1 and let go there.
    let from = center(panel, 0)?;
    let to = center(panel, 1)?;
    ensure!(panel.on_pointer_down(&PointerEvent::at(from)), "press on slot 0 did not start a drag");
    summary.drags += 1;
    panel.on_pointer_move(&PointerEvent::at(to).with_delta(to - from));
    settle(panel, 12);
    if let Some(outcome) = panel.on_pointer_up(&PointerEvent::at(to)) {
        summary.record(outcome);
    }

    // Eject: pull slot 0 over the top edge and release outside the panel.
    let panel_top = panel.host().panel().context("panel is not laid out")?.top_left.y;
    let start = center(panel, 0)?;
    let outside = Vec2::new(start.x, panel_top - 40.0);
    ensure!(panel.on_pointer_down(&PointerEvent::at(start)), "press on slot 0 did not start a drag");
    summary.drags += 1;
    panel.on_pointer_move(&PointerEvent::at(outside).with_delta(outside - start));
    ensure!(panel.drag_phase() == DragPhase::Detached, "item did not pop out over the top edge");
    settle(panel, 6);
    let state = panel.drag_state();
    if let (Some(session), Some(ghost)) = (state.session(), state.ghost()) {
        debug!(
            origin = session.origin_slot,
            ghost = ?ghost.position,
            settled = ghost.settled(),
            "Carrying item outside the grid"
        );
    }
    if let Some(outcome) = panel.on_pointer_up(&PointerEvent::at(outside)) {
        summary.record(outcome);
    }

    ensure!(summary.ejections == 1, "expected one ejection, got {}", summary.ejections);
    ensure!(panel.host().spawned().len() == 1, "ejection did not spawn an entity");
    ensure!(panel.store().indices_are_contiguous(), "display indices not contiguous");
    ensure!(!panel.host().has_capture(), "pointer capture leaked");

    info!(?summary, "Scripted session finished");
    Ok(summary)
}

/// Random pointer walk. Every drag ends with capture released and
/// contiguous display indices.
pub fn run_random(
    panel: &mut InventoryPanel<HeadlessHost>,
    seed: u64,
    drags: usize,
) -> Result<RunSummary> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut summary = RunSummary::default();
    let area = panel.host().panel().context("panel is not laid out")?;
    let capacity = panel.store().capacity();

    let random_point = |rng: &mut fastrand::Rng| {
        let span = area.size + Vec2::splat(WANDER * 2.0);
        area.top_left - Vec2::splat(WANDER) + Vec2::new(rng.f32() * span.x, rng.f32() * span.y)
    };

    let mut events = 0;

    for _ in 0..drags {
        events += panel.events().drain().len();
        if rng.u8(..4) == 0 {
            let actor = panel
                .host_mut()
                .place_actor(rng.u32(1..20), Vec3::new(rng.f32() * 10.0, 0.0, 0.0));
            match panel.pick_up(actor) {
                Ok(Some(_)) => summary.pickups += 1,
                Ok(None) => {},
                Err(e) => debug!("Pickup skipped: {e}"),
            }
        }

        let slot = rng.usize(..capacity);
        let mut pointer = center(panel, slot)?;
        if !panel.on_pointer_down(&PointerEvent::at(pointer)) {
            continue;
        }
        summary.drags += 1;

        for _ in 0..rng.usize(1..6) {
            let next = random_point(&mut rng);
            panel.on_pointer_move(&PointerEvent::at(next).with_delta(next - pointer));
            pointer = next;
            panel.tick(FRAME_DT);
        }

        match panel.on_pointer_up(&PointerEvent::at(pointer)) {
            Some(outcome) => summary.record(outcome),
            None => summary.aborts += 1,
        }

        ensure!(panel.drag_phase() == DragPhase::Idle, "drag still active after release");
        ensure!(!panel.host().has_capture(), "pointer capture leaked");
        ensure!(
            panel.store().indices_are_contiguous(),
            "display indices not contiguous after {summary:?}"
        );
    }
    events += panel.events().drain().len();

    if events == 0 && summary.drags > 0 {
        warn!("No events published during random walk");
    }
    info!(
        seed,
        ?summary,
        events,
        dropped = panel.events().dropped_count(),
        "Random session finished"
    );
    Ok(summary)
}
