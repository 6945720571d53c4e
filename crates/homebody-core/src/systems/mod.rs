//! Systems - logic that operates on components

mod activity;
mod companion;
mod decision;
mod movement;
mod needs;
mod pathfinding;

pub use activity::*;
pub use companion::*;
pub use decision::*;
pub use movement::*;
pub use needs::*;
pub use pathfinding::*;
