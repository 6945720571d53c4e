//! Inter-floor pathfinder - a fixed lookup over the two stairwells.
//!
//! The house topology is closed and linear, so there is no graph search:
//! a path between floors is just the right stairwells concatenated in the
//! right direction. The requested destination is appended by the caller,
//! never by the pathfinder.

use crate::house::{HouseLayout, Location};

/// Ordered stairway waypoints connecting `current_floor` to `target_floor`.
/// Equal floors yield an empty path - one leg remaining, the destination
/// itself.
pub fn build_path(house: &HouseLayout, current_floor: i32, target_floor: i32) -> Vec<Location> {
    let mut path = Vec::new();

    if current_floor == target_floor {
        return path;
    }

    if target_floor > current_floor {
        // Ascending
        if current_floor == 1 {
            path.extend_from_slice(house.lower_stairs());
        }
        if target_floor == 3 {
            path.extend_from_slice(house.upper_stairs());
        }
    } else {
        // Descending
        if current_floor == 3 {
            path.extend(house.upper_stairs().iter().rev().copied());
        }
        if target_floor == 1 {
            path.extend(house.lower_stairs().iter().rev().copied());
        }
    }

    path
}
