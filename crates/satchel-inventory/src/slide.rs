//! Slide animation for items displaced by a live move.
//!
//! Advanced by elapsed time from the host's frame tick. Never feeds back into
//! the item store: the store already holds the final arrangement, the slide
//! only animates the displaced item's visual between the two slots.

use crate::geometry::GeometryOracle;
use crate::item::Item;
use glam::Vec2;
use satchel_common::GridDims;
use tracing::trace;

/// Direction a displaced item travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    /// Same cell or diagonal
    #[default]
    None,
    /// Toward row 0
    Up,
    /// Toward the last row
    Down,
    /// Toward column 0
    Left,
    /// Toward the last column
    Right,
}

impl SlideDirection {
    /// Direction from slot `from` to slot `to`; only straight moves count.
    #[must_use]
    pub fn between(dims: GridDims, from: usize, to: usize) -> Self {
        let (Some(a), Some(b)) = (dims.coord_of(from), dims.coord_of(to)) else {
            return Self::None;
        };
        match (a.row.cmp(&b.row), a.column.cmp(&b.column)) {
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Equal) => Self::Up,
            (std::cmp::Ordering::Less, std::cmp::Ordering::Equal) => Self::Down,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Greater) => Self::Left,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Less) => Self::Right,
            _ => Self::None,
        }
    }
}

/// One rendered frame of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    /// The item being animated
    pub item: Item,
    /// Slot it left
    pub from: usize,
    /// Slot it is heading to
    pub to: usize,
    /// Travel direction
    pub direction: SlideDirection,
    /// Eased progress, 0 to 1
    pub progress: f32,
    /// Interpolated centre, if both slots are laid out
    pub position: Option<Vec2>,
    /// Last frame of this slide
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Slide {
    item: Item,
    from: usize,
    to: usize,
    direction: SlideDirection,
    elapsed: f32,
}

/// Runs at most one slide at a time.
#[derive(Debug, Clone)]
pub struct SlideAnimator {
    dims: GridDims,
    duration: f32,
    enabled: bool,
    active: Option<Slide>,
}

impl SlideAnimator {
    /// Creates an animator.
    #[must_use]
    pub const fn new(dims: GridDims, duration: f32, enabled: bool) -> Self {
        Self {
            dims,
            duration,
            enabled,
            active: None,
        }
    }

    /// Starts a slide, replacing any running one.
    pub fn start(&mut self, item: Item, from: usize, to: usize) {
        if !self.enabled || from == to {
            return;
        }
        let direction = SlideDirection::between(self.dims, from, to);
        trace!(from, to, ?direction, "Slide started");
        self.active = Some(Slide {
            item,
            from,
            to,
            direction,
            elapsed: 0.0,
        });
    }

    /// Whether a slide is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Stops any running slide.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advances by `dt` seconds and returns the frame to draw.
    pub fn tick<O: GeometryOracle + ?Sized>(&mut self, dt: f32, oracle: &O) -> Option<SlideFrame> {
        let slide = self.active.as_mut()?;
        slide.elapsed += dt.max(0.0);

        let linear = if self.duration > 0.0 {
            (slide.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let progress = smoothstep(linear);
        let position = match (oracle.slot_rect(slide.from), oracle.slot_rect(slide.to)) {
            (Some(a), Some(b)) => Some(a.center().lerp(b.center(), progress)),
            _ => None,
        };
        let finished = linear >= 1.0;

        let frame = SlideFrame {
            item: slide.item.clone(),
            from: slide.from,
            to: slide.to,
            direction: slide.direction,
            progress,
            position,
            finished,
        };
        if finished {
            self.active = None;
        }
        Some(frame)
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::UniformGridLayout;

    fn layout() -> UniformGridLayout {
        UniformGridLayout::new(GridDims::new(3, 4), Vec2::ZERO, Vec2::splat(10.0))
    }

    #[test]
    fn test_direction_between_slots() {
        let dims = GridDims::new(3, 4);
        assert_eq!(SlideDirection::between(dims, 5, 1), SlideDirection::Up);
        assert_eq!(SlideDirection::between(dims, 1, 5), SlideDirection::Down);
        assert_eq!(SlideDirection::between(dims, 6, 5), SlideDirection::Left);
        assert_eq!(SlideDirection::between(dims, 5, 6), SlideDirection::Right);
        assert_eq!(SlideDirection::between(dims, 0, 5), SlideDirection::None);
    }

    #[test]
    fn test_slide_runs_to_completion() {
        let layout = layout();
        let mut slide = SlideAnimator::new(layout.dims(), 0.2, true);
        slide.start(Item::empty(), 0, 1);

        let mid = slide.tick(0.1, &layout).expect("slide is running");
        assert!((mid.progress - 0.5).abs() < 1e-5);
        let pos = mid.position.expect("both slots laid out");
        assert!(pos.distance(Vec2::new(10.0, 5.0)) < 1e-3);
        assert!(!mid.finished);

        let end = slide.tick(0.2, &layout).expect("final frame");
        assert!(end.finished);
        assert_eq!(end.position, Some(Vec2::new(15.0, 5.0)));
        assert!(!slide.is_active());
        assert!(slide.tick(0.1, &layout).is_none());
    }

    #[test]
    fn test_disabled_animator_ignores_start() {
        let mut slide = SlideAnimator::new(GridDims::new(3, 4), 0.2, false);
        slide.start(Item::empty(), 0, 1);
        assert!(!slide.is_active());
    }
}
