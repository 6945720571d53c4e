//! Homebody Core - Little House Simulation Engine
//!
//! An ECS-based simulation of a single autonomous inhabitant and a
//! companion dog living in a fixed three-floor house. The inhabitant has
//! decaying needs and a simulated clock; it decides what to do, walks there
//! through the stairwells, performs the activity, and publishes its mood
//! and activity for observers. The dog independently tracks and reacts.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: the inhabitant and the companion
//! - **Components**: pure data (Position, Needs, Activity, Companion, etc.)
//! - **Systems**: logic that queries and updates components
//!
//! Three cooperative tick rates drive everything from a single frame
//! counter: a fast animation tick (movement, activity countdown, the
//! companion), a medium decision tick, and a slow needs/clock tick.
//!
//! # Example
//!
//! ```rust
//! use homebody_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(SimConfig::default());
//!
//! // Run one simulated minute of frames
//! engine.run(3600);
//!
//! let view = engine.snapshot();
//! assert!(view.hunger >= 0.0 && view.hunger <= 100.0);
//! ```

pub mod clock;
pub mod components;
pub mod engine;
pub mod house;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::components::*;
    pub use crate::engine::{SimConfig, SimSnapshot, SimulationEngine};
    pub use crate::house::{HouseLayout, Location};
}
