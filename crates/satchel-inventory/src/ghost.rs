//! Free-floating overlay that follows the pointer while an item is popped out.
//!
//! Purely presentational: the ghost carries no store state.

use glam::Vec2;

/// Distance below which the ghost snaps onto its target.
const SNAP_DISTANCE: f32 = 1e-4;

/// Ghost square in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    /// Drawn top-left corner
    pub position: Vec2,
    /// Where the top-left corner is heading
    pub target: Vec2,
    /// Side length
    pub size: f32,
}

impl Ghost {
    /// Creates a ghost centred on the pointer.
    #[must_use]
    pub fn at_pointer(pointer_local: Vec2, size: f32) -> Self {
        let position = pointer_local - Vec2::splat(size * 0.5);
        Self {
            position,
            target: position,
            size,
        }
    }

    /// Re-centre the target on a new pointer position.
    pub fn retarget(&mut self, pointer_local: Vec2) {
        self.target = pointer_local - Vec2::splat(self.size * 0.5);
    }

    /// Eases the drawn position toward the target. Returns `true` if it moved.
    pub fn advance(&mut self, dt: f32, speed: f32) -> bool {
        let before = self.position;
        self.position = interp_to(self.position, self.target, dt, speed);
        self.position != before
    }

    /// Whether the drawn position has reached the target.
    #[must_use]
    pub fn settled(&self) -> bool {
        self.position == self.target
    }
}

/// Moves `current` a fraction `dt * speed` of the way to `target`.
///
/// Non-positive speed jumps straight to the target.
#[must_use]
pub fn interp_to(current: Vec2, target: Vec2, dt: f32, speed: f32) -> Vec2 {
    if speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist.length_squared() < SNAP_DISTANCE * SNAP_DISTANCE {
        return target;
    }
    let step = (dt * speed).clamp(0.0, 1.0);
    let next = current + dist * step;
    if (target - next).length() < SNAP_DISTANCE {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_centred_on_pointer() {
        let ghost = Ghost::at_pointer(Vec2::new(200.0, 120.0), 100.0);
        assert_eq!(ghost.position, Vec2::new(150.0, 70.0));
        assert!(ghost.settled());
    }

    #[test]
    fn test_advance_eases_toward_target() {
        let mut ghost = Ghost::at_pointer(Vec2::ZERO, 100.0);
        ghost.retarget(Vec2::new(100.0, 0.0));

        assert!(ghost.advance(0.02, 25.0));
        // half of the remaining 100px
        assert!((ghost.position.x - 0.0).abs() < 1e-3);
        assert!(!ghost.settled());

        ghost.advance(1.0, 25.0);
        assert!(ghost.settled());
    }

    #[test]
    fn test_interp_without_speed_snaps() {
        let next = interp_to(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.016, 0.0);
        assert_eq!(next, Vec2::new(10.0, 10.0));
    }
}
