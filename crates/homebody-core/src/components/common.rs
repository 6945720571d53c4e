//! Common components shared by the inhabitant and the companion.

use serde::Serialize;

use crate::components::ActionKind;
use crate::house::Location;

/// 2D position vector in house canvas units
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Spatial position component - a point plus the floor it sits on.
///
/// Floor is integral (1-3) in real rooms and fractional on stair midpoints,
/// so an entity mid-staircase reads as e.g. floor 1.4.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Position {
    pub point: Vec2,
    pub floor: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, floor: f32) -> Self {
        Self {
            point: Vec2::new(x, y),
            floor,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            point: Vec2::ZERO,
            floor: 1.0,
        }
    }
}

/// Horizontal facing. Updated only when horizontal displacement exceeds a
/// small dead-zone, so near-vertical stair traversal keeps the last facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Movement component - present only while an entity is walking.
///
/// The pending action is a plain field consumed exactly once on final
/// arrival; there is no stored callback.
#[derive(Debug, Clone)]
pub struct Movement {
    /// Remaining waypoints; the last entry is always the requested destination.
    pub path: Vec<Location>,
    /// Index of the waypoint currently being approached.
    pub cursor: usize,
    /// Action to begin once the path is exhausted.
    pub pending: Option<ActionKind>,
}

impl Movement {
    pub fn new(path: Vec<Location>, pending: Option<ActionKind>) -> Self {
        Self {
            path,
            cursor: 0,
            pending,
        }
    }

    pub fn current_target(&self) -> Option<Location> {
        self.path.get(self.cursor).copied()
    }

    /// The requested destination, i.e. the final waypoint.
    pub fn destination(&self) -> Option<Location> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 8.0);

        let diff = b - a;
        assert_eq!(diff.x, 3.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.y, 4.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let v = Vec2::new(3.0, 4.0);
        let n = v.normalize();
        assert!((n.length() - 1.0).abs() < 0.001);
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.sign(), -1.0);
    }
}
