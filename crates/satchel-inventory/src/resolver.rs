//! Pointer-to-slot resolution.

use crate::geometry::GeometryOracle;
use glam::Vec2;
use satchel_common::{GridDims, ScreenRect, SlotCoord};
use tracing::trace;

/// Finds the slot under a screen-space pointer position.
#[derive(Debug, Clone, Copy)]
pub struct SlotResolver {
    dims: GridDims,
    min_extent: f32,
}

impl SlotResolver {
    /// Creates a resolver; rectangles smaller than `min_extent` are ignored.
    #[must_use]
    pub const fn new(dims: GridDims, min_extent: f32) -> Self {
        Self { dims, min_extent }
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Returns the slot whose rectangle contains `pointer`.
    ///
    /// Overlapping candidates are broken by distance to the rectangle centre.
    /// Degenerate rectangles are skipped; the next frame retries them.
    pub fn resolve<O: GeometryOracle + ?Sized>(&self, oracle: &O, pointer: Vec2) -> Option<usize> {
        let mut nearest = None;
        let mut nearest_distance = f32::MAX;

        for row in 0..self.dims.rows {
            for column in 0..self.dims.columns {
                let slot = SlotCoord::new(row, column).to_index(self.dims.columns);
                let Some(rect) = self.settled_rect(oracle, slot) else {
                    continue;
                };
                if !rect.contains(pointer) {
                    continue;
                }

                let distance = pointer.distance(rect.center());
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = Some(slot);
                }
            }
        }

        trace!(?pointer, ?nearest, "Resolved hovered slot");
        nearest
    }

    /// Rectangle of a slot if it exists and has been laid out.
    pub fn settled_rect<O: GeometryOracle + ?Sized>(&self, oracle: &O, slot: usize) -> Option<ScreenRect> {
        let Some(rect) = oracle.slot_rect(slot) else {
            trace!(slot, "No geometry for slot");
            return None;
        };
        if rect.is_degenerate(self.min_extent) {
            trace!(slot, ?rect, "Skipping degenerate slot rect");
            return None;
        }
        Some(rect)
    }

    /// Area that counts as "inside the inventory".
    ///
    /// Prefers the panel background; falls back to the union of every
    /// settled slot. `None` when nothing is laid out yet.
    pub fn bounds<O: GeometryOracle + ?Sized>(&self, oracle: &O) -> Option<ScreenRect> {
        if let Some(panel) = oracle.panel_rect().filter(|r| !r.is_degenerate(self.min_extent)) {
            return Some(panel);
        }

        (0..self.dims.capacity())
            .filter_map(|slot| self.settled_rect(oracle, slot))
            .reduce(|acc, rect| acc.union(&rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::UniformGridLayout;

    /// Oracle with hand-placed rectangles.
    struct FixedRects(Vec<ScreenRect>);

    impl GeometryOracle for FixedRects {
        fn slot_rect(&self, slot: usize) -> Option<ScreenRect> {
            self.0.get(slot).copied()
        }

        fn panel_rect(&self) -> Option<ScreenRect> {
            None
        }
    }

    fn layout() -> UniformGridLayout {
        UniformGridLayout::new(GridDims::new(3, 4), Vec2::ZERO, Vec2::splat(50.0)).with_padding(5.0)
    }

    #[test]
    fn test_resolve_slot_under_pointer() {
        let layout = layout();
        let resolver = SlotResolver::new(layout.dims(), 1.0);

        let center = layout.slot_center(6).expect("slot 6 exists");
        assert_eq!(resolver.resolve(&layout, center), Some(6));
    }

    #[test]
    fn test_resolve_gap_and_outside_is_none() {
        let layout = layout();
        let resolver = SlotResolver::new(layout.dims(), 1.0);

        // padding gap between slot 0 and slot 1
        assert_eq!(resolver.resolve(&layout, Vec2::new(57.0, 25.0)), None);
        assert_eq!(resolver.resolve(&layout, Vec2::new(-20.0, -20.0)), None);
    }

    #[test]
    fn test_resolve_skips_degenerate_rect() {
        let mut layout = layout();
        let resolver = SlotResolver::new(layout.dims(), 1.0);
        let center = layout.slot_center(2).expect("slot 2 exists");

        layout.set_unsettled(2, true);
        assert_eq!(resolver.resolve(&layout, center), None);

        layout.settle_all();
        assert_eq!(resolver.resolve(&layout, center), Some(2));
    }

    #[test]
    fn test_overlap_prefers_nearest_center() {
        let rects = FixedRects(vec![
            ScreenRect::new(Vec2::new(0.0, 0.0), Vec2::splat(100.0)),
            ScreenRect::new(Vec2::new(60.0, 0.0), Vec2::splat(100.0)),
        ]);
        let resolver = SlotResolver::new(GridDims::new(1, 2), 1.0);

        assert_eq!(resolver.resolve(&rects, Vec2::new(70.0, 50.0)), Some(0));
        assert_eq!(resolver.resolve(&rects, Vec2::new(95.0, 50.0)), Some(1));
    }

    #[test]
    fn test_bounds_fall_back_to_slot_union() {
        let rects = FixedRects(vec![
            ScreenRect::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0)),
            ScreenRect::new(Vec2::new(20.0, 0.0), Vec2::splat(10.0)),
        ]);
        let resolver = SlotResolver::new(GridDims::new(1, 2), 1.0);

        let bounds = resolver.bounds(&rects).expect("two settled slots");
        assert_eq!(bounds.bottom_right(), Vec2::new(30.0, 10.0));

        let unsettled = FixedRects(vec![ScreenRect::default(); 2]);
        assert!(resolver.bounds(&unsettled).is_none());
    }
}
