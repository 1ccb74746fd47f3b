//! The inventory panel: the component the game layer talks to.
//!
//! Owns the item store, the drag controller and the host collaborators, and
//! turns every state change into an [`InventoryEvent`].

use crate::config::InventoryConfig;
use crate::drag::{DragController, DragPhase, DragState, DropOutcome, MoveResponse, PointerEvent};
use crate::events::{EventBus, InventoryEvent};
use crate::host::InventoryHost;
use crate::item::{CapturedItem, Item};
use crate::slide::SlideAnimator;
use crate::store::{InventoryError, InventoryResult, ItemStore};
use satchel_common::{ActorHandle, SatchelError, SatchelResult};
use tracing::{debug, error, info, warn};

/// Grid inventory panel bound to a host.
#[derive(Debug)]
pub struct InventoryPanel<H: InventoryHost> {
    config: InventoryConfig,
    store: ItemStore,
    drag: DragController,
    slide: SlideAnimator,
    events: EventBus,
    host: H,
    open: bool,
}

impl<H: InventoryHost> InventoryPanel<H> {
    /// Creates a panel and draws every slot once.
    ///
    /// Fails only when the host has no widget tree to draw into.
    pub fn new(mut config: InventoryConfig, mut host: H) -> SatchelResult<Self> {
        config.validate();
        if !host.has_root() {
            error!("Couldn't find the root widget tree for the inventory");
            return Err(SatchelError::MissingLayout(
                "inventory host has no root widget".to_string(),
            ));
        }

        let dims = config.dims();
        let store = ItemStore::new(dims.capacity());
        let drag = DragController::from_config(&config);
        let slide = SlideAnimator::new(dims, config.slide_duration, config.slide_enabled);
        let events = EventBus::new(config.event_capacity);

        drag.sync_all(&store, &mut host);
        info!(rows = dims.rows, columns = dims.columns, "Inventory created");

        Ok(Self {
            config,
            store,
            drag,
            slide,
            events,
            host,
            open: false,
        })
    }

    /// Shows the panel.
    pub fn open(&mut self) {
        self.open = true;
        self.host.set_visible(true);
        self.events.publish(InventoryEvent::Opened);
    }

    /// Hides the panel, cancelling any drag in progress.
    pub fn close(&mut self) {
        if self.drag.cancel(&self.store, &mut self.host) {
            self.events.publish(InventoryEvent::DragAborted);
        }
        self.slide.cancel();
        self.open = false;
        self.host.set_visible(false);
        self.events.publish(InventoryEvent::Closed);
    }

    /// Whether the panel is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Adds captured item data to the first empty slot.
    pub fn add_item(&mut self, captured: CapturedItem) -> InventoryResult<usize> {
        match self.store.try_add(captured) {
            Ok(slot) => {
                self.drag.sync_slot(slot, &self.store, &mut self.host);
                let display_index = self.store.occupied_count() - 1;
                self.events.publish(InventoryEvent::ItemAdded {
                    slot,
                    display_index,
                });
                Ok(slot)
            },
            Err(e) => {
                warn!("No free slots because inventory is full");
                self.events.publish(InventoryEvent::PickupRefused);
                Err(e)
            },
        }
    }

    /// Absorbs a world actor into the inventory.
    ///
    /// A full inventory refuses before the actor is touched. If the world
    /// bridge cannot capture the actor, nothing happens and `Ok(None)` is
    /// returned. On success the actor is destroyed.
    pub fn pick_up(&mut self, actor: ActorHandle) -> InventoryResult<Option<usize>> {
        if self.store.is_full() {
            warn!(actor = actor.raw(), "Pickup refused, inventory is full");
            self.events.publish(InventoryEvent::PickupRefused);
            return Err(InventoryError::Full {
                capacity: self.store.capacity(),
            });
        }

        let Some(captured) = self.host.capture(actor) else {
            warn!(actor = actor.raw(), "Actor has nothing to capture");
            return Ok(None);
        };

        let slot = self.add_item(captured)?;
        self.host.destroy(actor);
        Ok(Some(slot))
    }

    /// Empties a slot; remaining items are re-indexed.
    pub fn remove_item(&mut self, slot: usize) -> InventoryResult<Item> {
        match self.store.remove_at(slot) {
            Ok(item) => {
                self.drag.sync_all(&self.store, &mut self.host);
                self.events.publish(InventoryEvent::ItemRemoved { slot });
                Ok(item)
            },
            Err(e) => {
                warn!("Remove ignored: {e}");
                Err(e)
            },
        }
    }

    /// Checks if no slot is free.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    /// Read-only view of all slots.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// The item store.
    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Current drag phase.
    #[must_use]
    pub const fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Event bus.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to update layout.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Pointer pressed. Returns `true` if a drag started.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        if !self.open {
            return false;
        }
        match self.drag.pointer_down(event, &self.store, &mut self.host) {
            Some(slot) => {
                self.events.publish(InventoryEvent::DragStarted { slot });
                true
            },
            None => false,
        }
    }

    /// Pointer moved.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> MoveResponse {
        let response = self.drag.pointer_move(event, &mut self.store, &mut self.host);
        match &response {
            MoveResponse::LiveMoved { from, to } => {
                self.events.publish(InventoryEvent::LiveMoved {
                    from: *from,
                    to: *to,
                });
            },
            MoveResponse::LiveSwapped {
                from,
                to,
                displaced,
            } => {
                self.slide.start(displaced.clone(), *to, *from);
                self.events.publish(InventoryEvent::LiveSwapped {
                    from: *from,
                    to: *to,
                });
            },
            MoveResponse::PoppedOut { slot } => {
                self.events.publish(InventoryEvent::PoppedOut { slot: *slot });
            },
            MoveResponse::Aborted => self.events.publish(InventoryEvent::DragAborted),
            MoveResponse::Ignored | MoveResponse::Hovering(_) | MoveResponse::GhostMoved(_) => {},
        }
        response
    }

    /// Pointer released. Returns the applied outcome if a drag was active.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Option<DropOutcome> {
        let outcome = self.drag.pointer_up(event, &mut self.store, &mut self.host)?;
        match outcome {
            DropOutcome::Aborted => self.events.publish(InventoryEvent::DragAborted),
            _ => self.events.publish(InventoryEvent::Dropped(outcome)),
        }
        Some(outcome)
    }

    /// Advances presentation by `dt` seconds: ghost easing and slides.
    pub fn tick(&mut self, dt: f32) {
        self.drag.tick(dt, &mut self.host);
        if let Some(frame) = self.slide.tick(dt, &self.host) {
            self.host.show_slide(&frame);
            if frame.finished {
                self.drag.sync_slot(frame.to, &self.store, &mut self.host);
            }
        }
    }

    /// Clears the inventory for a new game session.
    pub fn reset_session(&mut self) {
        if self.drag.cancel(&self.store, &mut self.host) {
            self.events.publish(InventoryEvent::DragAborted);
        }
        self.slide.cancel();
        self.store.reset();
        self.drag.sync_all(&self.store, &mut self.host);
        debug!("Inventory session reset");
        self.events.publish(InventoryEvent::SessionReset);
    }
}
