//! Companion components - the dog that tracks and reacts to the inhabitant.

use serde::Serialize;

/// Behavior state of the companion's state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CompanionBehavior {
    #[default]
    Following,
    Resting,
    Playing,
    Drinking,
}

impl CompanionBehavior {
    pub fn label(&self) -> &'static str {
        match self {
            CompanionBehavior::Following => "following",
            CompanionBehavior::Resting => "resting",
            CompanionBehavior::Playing => "playing",
            CompanionBehavior::Drinking => "drinking",
        }
    }
}

/// Derived companion emotional label - never decided separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompanionMood {
    Playful,
    Sleepy,
    Happy,
    Alert,
}

impl CompanionMood {
    pub fn label(&self) -> &'static str {
        match self {
            CompanionMood::Playful => "playful",
            CompanionMood::Sleepy => "sleepy",
            CompanionMood::Happy => "happy",
            CompanionMood::Alert => "alert",
        }
    }
}

/// Companion state component
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Companion {
    pub behavior: CompanionBehavior,
    /// Phase of the play-circling orbit, advanced once per animation tick
    /// (never from wall-clock time).
    pub play_phase: f32,
    /// Ticks remaining of the "recently petted/fed" glow from a forced
    /// player interaction.
    pub happy_ticks: u32,
}

impl Companion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mood(&self) -> CompanionMood {
        match self.behavior {
            CompanionBehavior::Playing => CompanionMood::Playful,
            CompanionBehavior::Resting => CompanionMood::Sleepy,
            _ if self.happy_ticks > 0 => CompanionMood::Happy,
            _ => CompanionMood::Alert,
        }
    }
}
