//! The fixed three-floor house layout - a static, read-only registry of
//! named points the decision engine and pathfinder reference by name.
//!
//! Floor 1 is the kitchen, floor 2 the living room, floor 3 the bedroom.
//! Two stairwells join them: the lower one between floors 1-2 and the upper
//! one between 2-3, each a run of six waypoints with fractional floor
//! values at the midpoints.

use rand::Rng;
use serde::Serialize;

use crate::components::{Position, Vec2};

/// A named point in the house
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub floor: f32,
}

impl Location {
    const fn new(name: &'static str, x: f32, y: f32, floor: f32) -> Self {
        Self { name, x, y, floor }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.floor)
    }

    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_stair(&self) -> bool {
        self.name.starts_with("stairs_")
    }

    /// Companion-only points the inhabitant never targets
    pub fn is_companion_spot(&self) -> bool {
        self.name.starts_with("dog_")
    }
}

/// Horizontal/vertical clamping bounds for free-roaming entities
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Lower stairwell (floors 1-2), ordered bottom to top
const LOWER_STAIRS: [Location; 6] = [
    Location::new("stairs_1_bottom", 320.0, 280.0, 1.0),
    Location::new("stairs_1_mid1", 320.0, 274.0, 1.2),
    Location::new("stairs_1_mid2", 320.0, 268.0, 1.4),
    Location::new("stairs_1_mid3", 320.0, 262.0, 1.6),
    Location::new("stairs_1_mid4", 320.0, 256.0, 1.8),
    Location::new("stairs_1_top", 320.0, 250.0, 2.0),
];

/// Upper stairwell (floors 2-3), ordered bottom to top
const UPPER_STAIRS: [Location; 6] = [
    Location::new("stairs_2_bottom", 320.0, 170.0, 2.0),
    Location::new("stairs_2_mid1", 320.0, 164.0, 2.2),
    Location::new("stairs_2_mid2", 320.0, 158.0, 2.4),
    Location::new("stairs_2_mid3", 320.0, 152.0, 2.6),
    Location::new("stairs_2_mid4", 320.0, 146.0, 2.8),
    Location::new("stairs_2_top", 320.0, 140.0, 3.0),
];

const ROOMS: [Location; 13] = [
    // Floor 3 - bedroom
    Location::new("bed", 120.0, 110.0, 3.0),
    Location::new("nightstand", 200.0, 110.0, 3.0),
    Location::new("bedroom_center", 320.0, 110.0, 3.0),
    // Floor 2 - living room
    Location::new("chair", 120.0, 220.0, 2.0),
    Location::new("table", 250.0, 220.0, 2.0),
    Location::new("living_center", 320.0, 220.0, 2.0),
    Location::new("tv", 500.0, 220.0, 2.0),
    // Floor 1 - kitchen
    Location::new("counter", 150.0, 330.0, 1.0),
    Location::new("sink", 250.0, 330.0, 1.0),
    Location::new("kitchen_center", 320.0, 330.0, 1.0),
    Location::new("fridge", 500.0, 330.0, 1.0),
    // Companion fixtures
    Location::new("dog_water", 430.0, 332.0, 1.0),
    Location::new("dog_bed", 60.0, 332.0, 1.0),
];

/// The static location registry. Built once at startup; read-only to the
/// core thereafter.
#[derive(Debug, Clone)]
pub struct HouseLayout {
    locations: Vec<Location>,
    bounds: Bounds,
}

impl HouseLayout {
    /// The standard three-floor house
    pub fn standard() -> Self {
        let mut locations = Vec::with_capacity(ROOMS.len() + 12);
        locations.extend_from_slice(&ROOMS);
        locations.extend_from_slice(&LOWER_STAIRS);
        locations.extend_from_slice(&UPPER_STAIRS);

        Self {
            locations,
            bounds: Bounds {
                min: Vec2::new(30.0, 80.0),
                max: Vec2::new(610.0, 350.0),
            },
        }
    }

    /// Lookup by name. `None` for unknown keys - callers treat that as a
    /// no-op, not a fault.
    pub fn location(&self, name: &str) -> Option<Location> {
        self.locations.iter().find(|l| l.name == name).copied()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Lower stairwell waypoints, bottom to top
    pub fn lower_stairs(&self) -> &'static [Location] {
        &LOWER_STAIRS
    }

    /// Upper stairwell waypoints, bottom to top
    pub fn upper_stairs(&self) -> &'static [Location] {
        &UPPER_STAIRS
    }

    /// All locations the inhabitant may wander to: real rooms only, never
    /// stair waypoints or companion fixtures.
    pub fn wander_targets(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|l| !l.is_stair() && !l.is_companion_spot())
    }

    /// A random wander destination
    pub fn random_wander_target(&self, rng: &mut impl Rng) -> Location {
        let targets: Vec<&Location> = self.wander_targets().collect();
        *targets[rng.gen_range(0..targets.len())]
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }
}

impl Default for HouseLayout {
    fn default() -> Self {
        Self::standard()
    }
}
