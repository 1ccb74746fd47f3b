//! Grid geometry as seen by the inventory core.
//!
//! The host owns layout; the core only asks where a slot currently is.

use glam::Vec2;
use satchel_common::{GridDims, ScreenRect, SlotCoord};

/// Maps slot indices to screen-absolute rectangles.
pub trait GeometryOracle {
    /// Rectangle of a slot, or `None` if the slot has no widget.
    ///
    /// May be zero-sized until the host's first layout pass settles.
    fn slot_rect(&self, slot: usize) -> Option<ScreenRect>;

    /// Rectangle of the whole panel background, if laid out.
    fn panel_rect(&self) -> Option<ScreenRect>;
}

/// Headless uniform grid layout.
///
/// Computes rectangles the way a uniform grid panel with per-slot padding
/// arranges its children. Individual slots can be marked unsettled to
/// report zero-sized geometry.
#[derive(Debug, Clone)]
pub struct UniformGridLayout {
    dims: GridDims,
    origin: Vec2,
    cell_size: Vec2,
    padding: f32,
    panel_margin: f32,
    unsettled: Vec<bool>,
}

impl UniformGridLayout {
    /// Creates a layout with the first slot's outer corner at `origin`.
    #[must_use]
    pub fn new(dims: GridDims, origin: Vec2, cell_size: Vec2) -> Self {
        Self {
            dims,
            origin,
            cell_size,
            padding: 0.0,
            panel_margin: 0.0,
            unsettled: vec![false; dims.capacity()],
        }
    }

    /// Sets padding applied on every side of each slot.
    #[must_use]
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets how far the panel background extends beyond the grid.
    #[must_use]
    pub fn with_panel_margin(mut self, margin: f32) -> Self {
        self.panel_margin = margin;
        self
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Marks a slot as not yet laid out (or settles it again).
    pub fn set_unsettled(&mut self, slot: usize, unsettled: bool) {
        if let Some(flag) = self.unsettled.get_mut(slot) {
            *flag = unsettled;
        }
    }

    /// Settles every slot.
    pub fn settle_all(&mut self) {
        self.unsettled.iter_mut().for_each(|f| *f = false);
    }

    /// Centre of a slot, for driving pointer input.
    #[must_use]
    pub fn slot_center(&self, slot: usize) -> Option<Vec2> {
        self.slot_rect(slot).map(|r| r.center())
    }

    fn grid_rect(&self) -> ScreenRect {
        let stride = self.cell_size + Vec2::splat(self.padding * 2.0);
        let size = Vec2::new(
            stride.x * self.dims.columns as f32,
            stride.y * self.dims.rows as f32,
        );
        ScreenRect::new(self.origin, size)
    }
}

impl GeometryOracle for UniformGridLayout {
    fn slot_rect(&self, slot: usize) -> Option<ScreenRect> {
        let SlotCoord { row, column } = self.dims.coord_of(slot)?;
        let stride = self.cell_size + Vec2::splat(self.padding * 2.0);
        let top_left = self.origin
            + Vec2::new(stride.x * column as f32, stride.y * row as f32)
            + Vec2::splat(self.padding);

        if self.unsettled[slot] {
            return Some(ScreenRect::new(top_left, Vec2::ZERO));
        }
        Some(ScreenRect::new(top_left, self.cell_size))
    }

    fn panel_rect(&self) -> Option<ScreenRect> {
        let grid = self.grid_rect();
        Some(ScreenRect::new(
            grid.top_left - Vec2::splat(self.panel_margin),
            grid.size + Vec2::splat(self.panel_margin * 2.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> UniformGridLayout {
        UniformGridLayout::new(GridDims::new(3, 4), Vec2::new(100.0, 50.0), Vec2::splat(64.0))
            .with_padding(7.0)
    }

    #[test]
    fn test_slot_rects_follow_row_major_order() {
        let layout = layout();
        let first = layout.slot_rect(0).expect("slot 0 exists");
        let sixth = layout.slot_rect(5).expect("slot 5 exists");

        assert_eq!(first.top_left, Vec2::new(107.0, 57.0));
        assert_eq!(first.size, Vec2::splat(64.0));
        // row 1, column 1
        assert_eq!(sixth.top_left, Vec2::new(107.0 + 78.0, 57.0 + 78.0));
        assert!(layout.slot_rect(12).is_none());
    }

    #[test]
    fn test_unsettled_slot_is_degenerate() {
        let mut layout = layout();
        layout.set_unsettled(3, true);
        assert!(layout.slot_rect(3).expect("slot 3 exists").is_degenerate(1.0));

        layout.settle_all();
        assert!(!layout.slot_rect(3).expect("slot 3 exists").is_degenerate(1.0));
    }

    #[test]
    fn test_panel_rect_covers_grid_and_margin() {
        let layout = layout().with_panel_margin(10.0);
        let panel = layout.panel_rect().expect("panel is laid out");
        assert_eq!(panel.top_left, Vec2::new(90.0, 40.0));
        assert_eq!(panel.size, Vec2::new(4.0 * 78.0 + 20.0, 3.0 * 78.0 + 20.0));
    }
}
