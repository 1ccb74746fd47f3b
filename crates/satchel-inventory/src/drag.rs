//! Pointer drag state machine.
//!
//! ```text
//!            press on occupied slot            pop-out rule fires
//!   Idle ─────────────────────────▶ Selected ─────────────────────▶ Detached
//!    ▲                                 │  ▲ live move/swap              │ ghost follows
//!    │                                 └──┘ per hovered slot            │ pointer
//!    └──────────── release: Move / Restore / Swap / Eject ◀────────────┘
//! ```
//!
//! While `Selected`, hovering another slot already rearranges the store one
//! slot at a time. While `Detached`, the store is left alone until release.
//! The origin slot keeps its item in the store for the whole drag; only its
//! visual is cleared once the item pops out.

use crate::config::InventoryConfig;
use crate::edge::{EdgeDetector, PopOutDetector};
use crate::ghost::Ghost;
use crate::host::{InventoryHost, SpawnRequest};
use crate::item::Item;
use crate::resolver::SlotResolver;
use crate::store::{InventoryResult, ItemStore};
use glam::Vec2;
use satchel_common::EntityHandle;
use tracing::{debug, error, info, trace, warn};

/// One pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Screen-absolute position
    pub screen: Vec2,
    /// Position local to the panel widget
    pub local: Vec2,
    /// Cursor movement since the previous event
    pub delta: Vec2,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(screen: Vec2, local: Vec2, delta: Vec2) -> Self {
        Self {
            screen,
            local,
            delta,
        }
    }

    /// Event for a panel whose local space equals screen space.
    #[must_use]
    pub const fn at(screen: Vec2) -> Self {
        Self::new(screen, screen, Vec2::ZERO)
    }

    /// Sets the cursor delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }
}

/// Transient state of one drag, alive from press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Slot the carried item currently occupies in the store
    pub origin_slot: usize,
    /// Snapshot of the item taken at press time
    pub carried_item: Item,
    /// Last slot under the pointer, for highlighting only
    pub last_hovered: Option<usize>,
    /// Where the press happened
    pub press_position: Vec2,
}

impl DragSession {
    /// Whether the origin slot still holds the item picked up at press time.
    fn origin_holds_carried(&self, store: &ItemStore) -> bool {
        store
            .get(self.origin_slot)
            .is_some_and(|item| item.same_contents(&self.carried_item))
    }
}

/// Drag lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// Pressed on an item that is still inside the grid
    Selected(DragSession),
    /// Item popped out and follows the pointer as a ghost
    Detached {
        /// Session data
        session: DragSession,
        /// Overlay following the pointer
        ghost: Ghost,
    },
}

impl DragState {
    /// State without payload.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        match self {
            Self::Idle => DragPhase::Idle,
            Self::Selected(_) => DragPhase::Selected,
            Self::Detached { .. } => DragPhase::Detached,
        }
    }

    /// Active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Selected(session) | Self::Detached { session, .. } => Some(session),
        }
    }

    /// Ghost, while detached.
    #[must_use]
    pub const fn ghost(&self) -> Option<&Ghost> {
        match self {
            Self::Detached { ghost, .. } => Some(ghost),
            _ => None,
        }
    }
}

/// Drag phase without session data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag
    #[default]
    Idle,
    /// Item selected inside the grid
    Selected,
    /// Item popped out
    Detached,
}

/// What a release did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Item moved into an empty slot
    Moved {
        /// Origin slot, now empty
        from: usize,
        /// Target slot
        to: usize,
    },
    /// Item stayed where it was
    Restored {
        /// Origin slot
        slot: usize,
    },
    /// Item exchanged places with an occupant
    Swapped {
        /// Origin slot
        from: usize,
        /// Target slot, now holding the carried item
        to: usize,
        /// Where the displaced occupant went
        displaced_to: usize,
    },
    /// Item left the inventory and was spawned in the world
    Ejected {
        /// Origin slot, now empty
        slot: usize,
        /// Spawned entity, if the world bridge produced one
        entity: Option<EntityHandle>,
    },
    /// Origin became invalid; nothing was changed
    Aborted,
}

/// What a pointer move did.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResponse {
    /// No drag in progress
    Ignored,
    /// Selected item is hovering without changing slots
    Hovering(Option<usize>),
    /// Selected item moved into an empty slot
    LiveMoved {
        /// Previous slot
        from: usize,
        /// New slot
        to: usize,
    },
    /// Selected item swapped with an occupant
    LiveSwapped {
        /// Previous slot, now holding `displaced`
        from: usize,
        /// New slot
        to: usize,
        /// Item pushed from `to` into `from`
        displaced: Item,
    },
    /// Item popped out of the grid
    PoppedOut {
        /// Origin slot
        slot: usize,
    },
    /// Ghost retargeted onto the pointer
    GhostMoved(Option<usize>),
    /// Origin became invalid and the drag ended
    Aborted,
}

/// Owns the pointer interaction lifecycle for one inventory grid.
#[derive(Debug, Clone)]
pub struct DragController {
    resolver: SlotResolver,
    pop_out: PopOutDetector,
    ghost_size: f32,
    ghost_follow_speed: f32,
    state: DragState,
}

impl DragController {
    /// Creates a controller from configuration.
    #[must_use]
    pub fn from_config(config: &InventoryConfig) -> Self {
        let dims = config.dims();
        Self {
            resolver: SlotResolver::new(dims, config.min_slot_extent),
            pop_out: PopOutDetector::new(
                config.pop_out,
                EdgeDetector::new(dims, config.edge_margin()),
                config.drag_threshold,
            ),
            ghost_size: config.ghost_size,
            ghost_follow_speed: config.ghost_follow_speed,
            state: DragState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Slot resolver used for hover and drop.
    #[must_use]
    pub const fn resolver(&self) -> &SlotResolver {
        &self.resolver
    }

    /// Press: selects the item under the pointer and captures the pointer.
    ///
    /// Returns the selected slot, or `None` if nothing was selected.
    pub fn pointer_down<H: InventoryHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        store: &ItemStore,
        host: &mut H,
    ) -> Option<usize> {
        if self.is_dragging() {
            debug!("Press ignored, drag already in progress");
            return None;
        }

        let slot = self.resolver.resolve(&*host, event.screen)?;
        let item = store.get(slot).filter(|item| item.is_occupied())?.clone();

        if !host.acquire_capture() {
            error!("Couldn't acquire pointer capture, drag not started");
            return None;
        }

        debug!(slot, "Item selected");
        host.highlight(Some(slot));
        self.state = DragState::Selected(DragSession {
            origin_slot: slot,
            carried_item: item,
            last_hovered: Some(slot),
            press_position: event.screen,
        });
        Some(slot)
    }

    /// Move: pops the item out, rearranges live, or moves the ghost.
    pub fn pointer_move<H: InventoryHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        store: &mut ItemStore,
        host: &mut H,
    ) -> MoveResponse {
        match std::mem::take(&mut self.state) {
            DragState::Idle => MoveResponse::Ignored,
            DragState::Selected(session) => self.move_selected(session, event, store, host),
            DragState::Detached { session, ghost } => {
                self.move_detached(session, ghost, event, store, host)
            },
        }
    }

    /// Release: resolves the drop, releases capture and redraws every slot.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn pointer_up<H: InventoryHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        store: &mut ItemStore,
        host: &mut H,
    ) -> Option<DropOutcome> {
        let (session, detached) = match std::mem::take(&mut self.state) {
            DragState::Idle => return None,
            DragState::Selected(session) => (session, false),
            DragState::Detached { session, .. } => (session, true),
        };

        let outcome = match self.resolve_drop(&session, detached, event.screen, store, host) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Drop failed, leaving store untouched: {e}");
                DropOutcome::Aborted
            },
        };
        info!(?outcome, "Drop resolved");

        self.finish(detached, store, host);
        Some(outcome)
    }

    /// Ends any drag without resolving a drop. Returns `true` if one was active.
    pub fn cancel<H: InventoryHost + ?Sized>(&mut self, store: &ItemStore, host: &mut H) -> bool {
        let detached = match std::mem::take(&mut self.state) {
            DragState::Idle => return false,
            DragState::Selected(_) => false,
            DragState::Detached { .. } => true,
        };
        debug!("Drag cancelled");
        self.finish(detached, store, host);
        true
    }

    /// Per-frame update: eases the ghost toward the pointer.
    pub fn tick<H: InventoryHost + ?Sized>(&mut self, dt: f32, host: &mut H) {
        if let DragState::Detached { ghost, .. } = &mut self.state {
            if ghost.advance(dt.max(0.0), self.ghost_follow_speed) {
                host.move_ghost(ghost);
            }
        }
    }

    /// Redraws one slot from the store.
    ///
    /// The origin of a popped-out item is drawn empty: its item is on the ghost.
    pub fn sync_slot<H: InventoryHost + ?Sized>(&self, slot: usize, store: &ItemStore, host: &mut H) {
        let Some(item) = store.get(slot) else {
            return;
        };
        match &self.state {
            DragState::Detached { session, .. } if session.origin_slot == slot => {
                host.redraw_slot(slot, &Item::empty());
            },
            _ => host.redraw_slot(slot, item),
        }
    }

    /// Redraws every slot from the store.
    pub fn sync_all<H: InventoryHost + ?Sized>(&self, store: &ItemStore, host: &mut H) {
        for slot in 0..store.capacity() {
            self.sync_slot(slot, store, host);
        }
    }

    fn move_selected<H: InventoryHost + ?Sized>(
        &mut self,
        mut session: DragSession,
        event: &PointerEvent,
        store: &mut ItemStore,
        host: &mut H,
    ) -> MoveResponse {
        let origin = session.origin_slot;
        if !session.origin_holds_carried(store) {
            return self.abort(origin, false, store, host);
        }

        let origin_rect = self.resolver.settled_rect(&*host, origin);
        if self
            .pop_out
            .should_pop_out(origin, origin_rect, event.screen, event.delta)
        {
            let ghost = Ghost::at_pointer(event.local, self.ghost_size);
            info!(slot = origin, "Item popped out of grid");
            host.show_ghost(&ghost, &session.carried_item);
            self.state = DragState::Detached { session, ghost };
            self.sync_slot(origin, store, host);
            return MoveResponse::PoppedOut { slot: origin };
        }

        let hovered = self.resolver.resolve(&*host, event.screen);
        update_hover(&mut session, hovered, host);

        let response = match hovered {
            Some(target) if target != origin => {
                let displaced = store.get(target).filter(|i| i.is_occupied()).cloned();
                let applied = match &displaced {
                    Some(_) => store.swap(origin, target),
                    None => store.move_item(origin, target),
                };
                if let Err(e) = applied {
                    warn!("Live move from {origin} to {target} failed: {e}");
                    self.state = DragState::Selected(session);
                    return MoveResponse::Hovering(hovered);
                }

                session.origin_slot = target;
                self.sync_slot(origin, store, host);
                self.sync_slot(target, store, host);

                match displaced {
                    Some(displaced) => {
                        trace!(from = origin, to = target, "Live swap");
                        MoveResponse::LiveSwapped {
                            from: origin,
                            to: target,
                            displaced,
                        }
                    },
                    None => {
                        trace!(from = origin, to = target, "Live move");
                        MoveResponse::LiveMoved {
                            from: origin,
                            to: target,
                        }
                    },
                }
            },
            _ => MoveResponse::Hovering(hovered),
        };

        self.state = DragState::Selected(session);
        response
    }

    fn move_detached<H: InventoryHost + ?Sized>(
        &mut self,
        mut session: DragSession,
        mut ghost: Ghost,
        event: &PointerEvent,
        store: &mut ItemStore,
        host: &mut H,
    ) -> MoveResponse {
        if !session.origin_holds_carried(store) {
            return self.abort(session.origin_slot, true, store, host);
        }

        // the drawn position only eases in `tick`
        ghost.retarget(event.local);

        let hovered = self.resolver.resolve(&*host, event.screen);
        update_hover(&mut session, hovered, host);

        self.state = DragState::Detached { session, ghost };
        MoveResponse::GhostMoved(hovered)
    }

    fn resolve_drop<H: InventoryHost + ?Sized>(
        &self,
        session: &DragSession,
        detached: bool,
        pointer: Vec2,
        store: &mut ItemStore,
        host: &mut H,
    ) -> InventoryResult<DropOutcome> {
        let origin = session.origin_slot;
        if !session.origin_holds_carried(store) {
            warn!(slot = origin, "Origin slot no longer holds the dragged item");
            return Ok(DropOutcome::Aborted);
        }

        match self.resolver.resolve(&*host, pointer) {
            Some(target) if store.get(target).is_some_and(Item::is_empty) => {
                store.move_item(origin, target)?;
                Ok(DropOutcome::Moved {
                    from: origin,
                    to: target,
                })
            },
            Some(target) if target == origin => Ok(DropOutcome::Restored { slot: origin }),
            Some(target) => {
                // a popped-out edge item sends the occupant to the first free slot
                let spill = if detached && self.pop_out.edges().is_edge_slot(origin) {
                    store.first_empty_slot().unwrap_or(origin)
                } else {
                    origin
                };
                store.displace(origin, target, spill)?;
                Ok(DropOutcome::Swapped {
                    from: origin,
                    to: target,
                    displaced_to: spill,
                })
            },
            None => {
                let inside = self.resolver.bounds(&*host).map(|b| b.contains(pointer));
                match (detached, inside) {
                    (true, Some(false)) => Self::eject(session, store, host),
                    (_, None) => {
                        warn!("Inventory bounds unknown, restoring item");
                        Ok(DropOutcome::Restored { slot: origin })
                    },
                    _ => Ok(DropOutcome::Restored { slot: origin }),
                }
            },
        }
    }

    fn eject<H: InventoryHost + ?Sized>(
        session: &DragSession,
        store: &mut ItemStore,
        host: &mut H,
    ) -> InventoryResult<DropOutcome> {
        let origin = session.origin_slot;
        // spawn from the press-time snapshot, not whatever sits in the slot now
        let entity = SpawnRequest::from_item(&session.carried_item)
            .and_then(|request| host.spawn(&request));
        if entity.is_none() {
            warn!(slot = origin, "World bridge spawned nothing for ejected item");
        }
        store.remove_at(origin)?;
        Ok(DropOutcome::Ejected {
            slot: origin,
            entity,
        })
    }

    fn abort<H: InventoryHost + ?Sized>(
        &mut self,
        origin: usize,
        detached: bool,
        store: &ItemStore,
        host: &mut H,
    ) -> MoveResponse {
        warn!(slot = origin, "Origin slot became invalid, aborting drag");
        self.state = DragState::Idle;
        self.finish(detached, store, host);
        MoveResponse::Aborted
    }

    /// Shared exit path back to `Idle`; releases capture exactly once.
    fn finish<H: InventoryHost + ?Sized>(&mut self, detached: bool, store: &ItemStore, host: &mut H) {
        debug_assert!(matches!(self.state, DragState::Idle));
        if detached {
            host.hide_ghost();
        }
        host.highlight(None);
        host.release_capture();
        self.sync_all(store, host);
        debug_assert!(store.indices_are_contiguous());
    }
}

fn update_hover<H: InventoryHost + ?Sized>(
    session: &mut DragSession,
    hovered: Option<usize>,
    host: &mut H,
) {
    if session.last_hovered != hovered {
        session.last_hovered = hovered;
        host.highlight(hovered);
    }
}
