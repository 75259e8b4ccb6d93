//! Axis-aligned rectangles for the paddle and blocks
//!
//! Screen convention: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square cell with its top-left corner at `origin`
    pub fn square(origin: Vec2, size: f32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Point-in-rect test, edges inclusive
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_edges_inclusive() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert!(rect.contains_point(Vec2::new(10.0, 20.0)));
        assert!(rect.contains_point(Vec2::new(40.0, 60.0)));
        assert!(rect.contains_point(Vec2::new(25.0, 40.0)));

        assert!(!rect.contains_point(Vec2::new(9.99, 30.0)));
        assert!(!rect.contains_point(Vec2::new(25.0, 60.01)));
    }

    #[test]
    fn test_square() {
        let cell = Rect::square(Vec2::new(5.0, 7.0), 12.0);
        assert_eq!(cell.right(), 17.0);
        assert_eq!(cell.bottom(), 19.0);
    }
}
