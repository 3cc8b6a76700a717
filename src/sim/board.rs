//! Game board bounds on the play plane

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_HALF_LENGTH, BOARD_HALF_WIDTH};

/// Axis-aligned board rectangle (x across, y down the lane)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Board {
    fn default() -> Self {
        let half = Vec2::new(BOARD_HALF_WIDTH, BOARD_HALF_LENGTH);
        Self::new(-half, half)
    }
}

impl Board {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, position: Vec2, buffer: f32) -> bool {
        let grow = Vec2::splat(buffer);
        position.cmpge(self.min - grow).all() && position.cmple(self.max + grow).all()
    }

    /// Clamp `position` to the board grown by `buffer` on every side
    pub fn pin(&self, position: Vec2, buffer: f32) -> Vec2 {
        let grow = Vec2::splat(buffer);
        position.max(self.min - grow).min(self.max + grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_inside_is_unchanged() {
        let board = Board::new(Vec2::new(-1.0, -2.0), Vec2::new(1.0, 2.0));
        let p = Vec2::new(0.5, -1.5);
        assert_eq!(board.pin(p, 0.0), p);
    }

    #[test]
    fn test_pin_clamps_each_axis() {
        let board = Board::new(Vec2::new(-1.0, -2.0), Vec2::new(1.0, 2.0));
        assert_eq!(board.pin(Vec2::new(5.0, -9.0), 0.0), Vec2::new(1.0, -2.0));
        assert_eq!(board.pin(Vec2::new(5.0, -9.0), 0.5), Vec2::new(1.5, -2.5));
    }

    #[test]
    fn test_new_orders_corners() {
        let board = Board::new(Vec2::new(1.0, 2.0), Vec2::new(-1.0, -2.0));
        assert_eq!(board.min, Vec2::new(-1.0, -2.0));
        assert!(board.contains(Vec2::ZERO, 0.0));
        assert!(!board.contains(Vec2::new(1.2, 0.0), 0.0));
        assert!(board.contains(Vec2::new(1.2, 0.0), 0.5));
    }
}
