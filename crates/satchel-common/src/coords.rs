//! Coordinate types for grid cells and screen-space rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed dimensions of an inventory grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u32,
}

impl GridDims {
    /// Creates new grid dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Total number of slots (`rows * columns`).
    #[must_use]
    pub const fn capacity(self) -> usize {
        (self.rows as usize) * (self.columns as usize)
    }

    /// Returns the cell coordinate of a slot index, if it is inside the grid.
    #[must_use]
    pub const fn coord_of(self, index: usize) -> Option<SlotCoord> {
        if index >= self.capacity() {
            return None;
        }
        Some(SlotCoord::from_index(index, self.columns))
    }

    /// Checks whether a cell touches any outer edge of the grid.
    #[must_use]
    pub const fn is_edge(self, coord: SlotCoord) -> bool {
        coord.row == 0
            || coord.column == 0
            || coord.row + 1 == self.rows
            || coord.column + 1 == self.columns
    }
}

/// Row/column address of a slot (row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotCoord {
    /// Row, 0 at the top
    pub row: u32,
    /// Column, 0 at the left
    pub column: u32,
}

impl SlotCoord {
    /// Creates a new slot coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Converts to linear index (`row * columns + column`).
    #[must_use]
    pub const fn to_index(self, columns: u32) -> usize {
        (self.row as usize) * (columns as usize) + (self.column as usize)
    }

    /// Creates from linear index.
    #[must_use]
    pub const fn from_index(index: usize, columns: u32) -> Self {
        let columns = columns as usize;
        Self {
            row: (index / columns) as u32,
            column: (index % columns) as u32,
        }
    }
}

/// Axis-aligned rectangle in screen-absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Top-left corner
    pub top_left: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    /// Creates a rectangle spanning two corners.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            top_left: min,
            size: max - min,
        }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn bottom_right(&self) -> Vec2 {
        self.top_left + self.size
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.top_left + self.size * 0.5
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let br = self.bottom_right();
        point.x >= self.top_left.x && point.x <= br.x && point.y >= self.top_left.y && point.y <= br.y
    }

    /// A rectangle is degenerate while either dimension is below `min_extent`.
    ///
    /// Hosts report zero-sized geometry until the first layout pass settles.
    #[must_use]
    pub fn is_degenerate(&self, min_extent: f32) -> bool {
        self.size.x < min_extent || self.size.y < min_extent
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.top_left.min(other.top_left),
            self.bottom_right().max(other.bottom_right()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_capacity_and_lookup() {
        let dims = GridDims::new(3, 4);
        assert_eq!(dims.capacity(), 12);
        assert_eq!(dims.coord_of(5), Some(SlotCoord::new(1, 1)));
        assert_eq!(dims.coord_of(12), None);
        assert_eq!(SlotCoord::new(2, 3).to_index(dims.columns), 11);
    }

    #[test]
    fn test_edge_cells() {
        let dims = GridDims::new(3, 4);
        assert!(dims.is_edge(SlotCoord::new(0, 0)));
        assert!(dims.is_edge(SlotCoord::new(1, 3)));
        assert!(dims.is_edge(SlotCoord::new(2, 2)));
        assert!(!dims.is_edge(SlotCoord::new(1, 1)));
        assert!(!dims.is_edge(SlotCoord::new(1, 2)));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = ScreenRect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 30.0)));
        assert!(!rect.contains(Vec2::new(30.1, 15.0)));
        assert_eq!(rect.center(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_rect_degenerate_and_union() {
        let empty = ScreenRect::default();
        assert!(empty.is_degenerate(1.0));

        let a = ScreenRect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = ScreenRect::new(Vec2::new(20.0, 5.0), Vec2::new(10.0, 10.0));
        let u = a.union(&b);
        assert_eq!(u.top_left, Vec2::new(0.0, 0.0));
        assert_eq!(u.bottom_right(), Vec2::new(30.0, 15.0));
    }
}
