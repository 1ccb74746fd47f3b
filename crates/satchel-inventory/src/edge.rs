//! Pop-out detection: when does a pressed item leave the grid?

use glam::Vec2;
use satchel_common::{GridDims, ScreenRect};
use serde::{Deserialize, Serialize};

/// Which outer edges of the grid the pointer has crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeCrossing {
    /// Above the top row
    pub top: bool,
    /// Below the bottom row
    pub bottom: bool,
    /// Left of the first column
    pub left: bool,
    /// Right of the last column
    pub right: bool,
}

impl EdgeCrossing {
    /// Checks if any edge was crossed.
    #[must_use]
    pub const fn any(self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// Detects the pointer leaving the grid through the origin slot's outer edge.
///
/// Only edges the origin slot actually sits on are considered, so a drag
/// that starts in an interior cell never crosses anything.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    dims: GridDims,
    margin: f32,
}

impl EdgeDetector {
    /// Creates a detector; `margin` is the combined pad and buffer in pixels.
    #[must_use]
    pub const fn new(dims: GridDims, margin: f32) -> Self {
        Self { dims, margin }
    }

    /// Evaluates each edge independently against the origin slot's rectangle.
    #[must_use]
    pub fn crossing(&self, origin: usize, origin_rect: ScreenRect, pointer: Vec2) -> EdgeCrossing {
        let Some(coord) = self.dims.coord_of(origin) else {
            return EdgeCrossing::default();
        };
        let top_left = origin_rect.top_left;
        let bottom_right = origin_rect.bottom_right();

        EdgeCrossing {
            top: coord.row == 0 && pointer.y < top_left.y - self.margin,
            bottom: coord.row + 1 == self.dims.rows && pointer.y > bottom_right.y + self.margin,
            left: coord.column == 0 && pointer.x < top_left.x - self.margin,
            right: coord.column + 1 == self.dims.columns && pointer.x > bottom_right.x + self.margin,
        }
    }

    /// Checks whether a slot sits on an outer edge.
    #[must_use]
    pub fn is_edge_slot(&self, slot: usize) -> bool {
        self.dims.coord_of(slot).is_some_and(|c| self.dims.is_edge(c))
    }
}

/// Rule deciding when a selected item pops out of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopOutRule {
    /// Pointer crosses the grid edge the origin slot sits on
    #[default]
    EdgeCrossing,
    /// A single pointer move exceeds the drag threshold, from any slot
    Threshold,
}

/// Applies one [`PopOutRule`].
#[derive(Debug, Clone, Copy)]
pub struct PopOutDetector {
    rule: PopOutRule,
    edges: EdgeDetector,
    threshold: f32,
}

impl PopOutDetector {
    /// Creates a detector for a rule.
    #[must_use]
    pub const fn new(rule: PopOutRule, edges: EdgeDetector, threshold: f32) -> Self {
        Self {
            rule,
            edges,
            threshold,
        }
    }

    /// Active rule.
    #[must_use]
    pub const fn rule(&self) -> PopOutRule {
        self.rule
    }

    /// Edge detector used by the edge rule.
    #[must_use]
    pub const fn edges(&self) -> &EdgeDetector {
        &self.edges
    }

    /// Decides whether this pointer move pops the item out.
    ///
    /// `origin_rect` is `None` while the origin slot is not laid out; the
    /// edge rule then waits for a later frame.
    #[must_use]
    pub fn should_pop_out(
        &self,
        origin: usize,
        origin_rect: Option<ScreenRect>,
        pointer: Vec2,
        delta: Vec2,
    ) -> bool {
        match self.rule {
            PopOutRule::EdgeCrossing => origin_rect
                .is_some_and(|rect| self.edges.crossing(origin, rect, pointer).any()),
            PopOutRule::Threshold => delta.length_squared() > self.threshold * self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 50.0;

    fn rect_at(row: u32, column: u32) -> ScreenRect {
        ScreenRect::new(
            Vec2::new(column as f32 * SIZE, row as f32 * SIZE),
            Vec2::splat(SIZE),
        )
    }

    fn detector() -> EdgeDetector {
        EdgeDetector::new(GridDims::new(3, 4), 2.0)
    }

    #[test]
    fn test_corner_slot_crosses_top_and_left() {
        let d = detector();
        let rect = rect_at(0, 0);

        assert!(d.crossing(0, rect, Vec2::new(25.0, -3.0)).top);
        assert!(d.crossing(0, rect, Vec2::new(-3.0, 25.0)).left);
        // within pad + buffer
        assert!(!d.crossing(0, rect, Vec2::new(25.0, -1.5)).any());
        // crossing the inner side is not leaving the grid
        assert!(!d.crossing(0, rect, Vec2::new(80.0, 25.0)).any());
    }

    #[test]
    fn test_bottom_right_corner() {
        let d = detector();
        let rect = rect_at(2, 3);
        let crossing = d.crossing(11, rect, Vec2::new(210.0, 160.0));
        assert!(crossing.bottom);
        assert!(crossing.right);
        assert!(!crossing.top);
    }

    #[test]
    fn test_interior_slot_never_crosses() {
        let d = detector();
        let rect = rect_at(1, 1);
        assert!(!d.is_edge_slot(5));
        assert!(!d.crossing(5, rect, Vec2::new(-500.0, -500.0)).any());
        assert!(!d.crossing(5, rect, Vec2::new(900.0, 900.0)).any());
    }

    #[test]
    fn test_threshold_rule_uses_delta_only() {
        let d = PopOutDetector::new(PopOutRule::Threshold, detector(), 4.0);
        assert!(!d.should_pop_out(5, None, Vec2::ZERO, Vec2::new(3.0, 2.0)));
        assert!(d.should_pop_out(5, None, Vec2::ZERO, Vec2::new(4.0, 1.0)));
    }

    #[test]
    fn test_edge_rule_waits_for_layout() {
        let d = PopOutDetector::new(PopOutRule::EdgeCrossing, detector(), 4.0);
        let far = Vec2::new(-100.0, -100.0);
        assert!(!d.should_pop_out(0, None, far, Vec2::new(50.0, 50.0)));
        assert!(d.should_pop_out(0, Some(rect_at(0, 0)), far, Vec2::ZERO));
    }
}
