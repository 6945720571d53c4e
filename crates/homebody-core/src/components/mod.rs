//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod common;
mod companion;
mod inhabitant;

pub use common::*;
pub use companion::*;
pub use inhabitant::*;
