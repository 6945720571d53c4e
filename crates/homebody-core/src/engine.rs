//! Simulation engine - main entry point for running the simulation
//!
//! The engine owns the ECS world, the clock, the house layout, the message
//! log, and a seeded random source. Everything is driven by `step()`, one
//! animation frame at a time; the slower needs and decision ticks fire on
//! fixed frame intervals derived from the frame counter, never wall-clock
//! time.

use std::collections::VecDeque;

use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::clock::Clock;
use crate::components::*;
use crate::house::HouseLayout;
use crate::systems::*;

/// Animation frames per needs/clock tick (~5s at 60 fps)
pub const NEEDS_TICK_FRAMES: u64 = 300;
/// Animation frames per decision tick (~4s at 60 fps)
pub const DECISION_TICK_FRAMES: u64 = 240;

/// How long the companion stays visibly pleased after a player interaction
const COMPANION_HAPPY_TICKS: u32 = 600;

/// Bounded log of flavor messages for the observer
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<String>,
}

impl MessageLog {
    const CAPACITY: usize = 32;

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Startup configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    /// Simulated minutes gained per needs-tick, divided by 60
    pub speed_multiplier: f64,
    /// Minute-of-day the clock starts at
    pub start_minute: u32,
    pub bedtime_minute: u32,
    pub waketime_minute: u32,
    pub starting_hunger: f32,
    pub starting_energy: f32,
    /// Fixed traits; `None` rolls them from the seed
    pub personality: Option<Personality>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            speed_multiplier: 60.0,
            start_minute: 8 * 60,
            bedtime_minute: 22 * 60 + 30,
            waketime_minute: 7 * 60,
            starting_hunger: 75.0,
            starting_energy: 85.0,
            personality: None,
        }
    }
}

/// Read-only view published to the rendering and UI collaborators
#[derive(Debug, Clone, Serialize)]
pub struct SimSnapshot {
    pub mood: &'static str,
    pub emotional_state: &'static str,
    pub activity: &'static str,
    pub hunger: f32,
    pub energy: f32,
    pub agent: Position,
    pub facing: f32,
    pub is_walking: bool,
    pub is_sleeping: bool,
    pub companion: Position,
    pub companion_behavior: &'static str,
    pub companion_mood: &'static str,
    pub hour: u32,
    pub day: &'static str,
    pub is_night: bool,
    pub latest_message: Option<String>,
    pub frame: u64,
}

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing the inhabitant and the companion
    pub world: World,
    pub house: HouseLayout,
    pub clock: Clock,
    pub messages: MessageLog,
    rng: StdRng,
    frame: u64,
    person: hecs::Entity,
    companion: hecs::Entity,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(config.seed);

        let personality = config
            .personality
            .unwrap_or_else(|| Personality::random(&mut rng));

        let start = house
            .location("kitchen_center")
            .map(|l| l.position())
            .unwrap_or_else(|| Position::new(320.0, 330.0, 1.0));

        let person = world.spawn((
            Person,
            Needs::new(config.starting_hunger, config.starting_energy),
            personality,
            start,
            Facing::Right,
        ));

        let companion = world.spawn((
            Companion::new(),
            Position::new(start.point.x - 40.0, start.point.y, start.floor),
        ));

        let clock = Clock::new(
            config.start_minute,
            config.speed_multiplier,
            config.bedtime_minute,
            config.waketime_minute,
        );

        let mut messages = MessageLog::default();
        messages.push("YOUR LITTLE COMPUTER PERSON HAS MOVED IN!");

        Self {
            world,
            house,
            clock,
            messages,
            rng,
            frame: 0,
            person,
            companion,
        }
    }

    /// Advance one animation frame. Movement (including arrival effects)
    /// always completes before the companion update reads the inhabitant's
    /// position.
    pub fn step(&mut self) {
        self.frame += 1;

        movement_system(&mut self.world, &mut self.messages, &mut self.rng);
        activity_system(&mut self.world);

        if self.frame % NEEDS_TICK_FRAMES == 0 {
            self.clock.advance();
            needs_system(&mut self.world, &self.clock, &mut self.messages);
        }

        if self.frame % DECISION_TICK_FRAMES == 0 {
            decision_system(&mut self.world, &self.house, &self.clock, &mut self.rng);
        }

        companion_system(&mut self.world, &self.house, &mut self.rng);
    }

    /// Run a batch of frames
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ── Published agent state ───────────────────────────────────────────

    pub fn needs(&self) -> Needs {
        self.world
            .get::<&Needs>(self.person)
            .map(|n| *n)
            .unwrap_or_default()
    }

    pub fn mood(&self) -> Mood {
        Mood::classify(&self.needs())
    }

    pub fn emotional_state(&self) -> EmotionalState {
        EmotionalState::classify(&self.needs())
    }

    pub fn current_action(&self) -> Option<ActionKind> {
        self.world
            .get::<&Activity>(self.person)
            .map(|a| a.kind)
            .ok()
    }

    pub fn is_walking(&self) -> bool {
        self.world.get::<&Movement>(self.person).is_ok()
    }

    pub fn is_sleeping(&self) -> bool {
        self.world.get::<&Sleeping>(self.person).is_ok()
    }

    /// Display label: the running action's label, "Walking" en route,
    /// "Idle" otherwise
    pub fn activity_label(&self) -> &'static str {
        match self.world.get::<&Activity>(self.person) {
            Ok(activity) if activity.started => activity.kind.label(),
            Ok(_) => "Walking",
            Err(_) => {
                if self.is_walking() {
                    "Walking"
                } else {
                    "Idle"
                }
            }
        }
    }

    pub fn agent_position(&self) -> Position {
        self.world
            .get::<&Position>(self.person)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn companion_position(&self) -> Position {
        self.world
            .get::<&Position>(self.companion)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn companion_behavior(&self) -> CompanionBehavior {
        self.world
            .get::<&Companion>(self.companion)
            .map(|c| c.behavior)
            .unwrap_or_default()
    }

    pub fn companion_mood(&self) -> CompanionMood {
        self.world
            .get::<&Companion>(self.companion)
            .map(|c| c.mood())
            .unwrap_or(CompanionMood::Alert)
    }

    pub fn person_entity(&self) -> hecs::Entity {
        self.person
    }

    pub fn companion_entity(&self) -> hecs::Entity {
        self.companion
    }

    /// Assemble the read-only observer view
    pub fn snapshot(&self) -> SimSnapshot {
        let needs = self.needs();
        let facing = self
            .world
            .get::<&Facing>(self.person)
            .map(|f| f.sign())
            .unwrap_or(1.0);

        SimSnapshot {
            mood: self.mood().label(),
            emotional_state: self.emotional_state().label(),
            activity: self.activity_label(),
            hunger: needs.hunger,
            energy: needs.energy,
            agent: self.agent_position(),
            facing,
            is_walking: self.is_walking(),
            is_sleeping: self.is_sleeping(),
            companion: self.companion_position(),
            companion_behavior: self.companion_behavior().label(),
            companion_mood: self.companion_mood().label(),
            hour: self.clock.hour_of_day(),
            day: self.clock.day_name(),
            is_night: self.clock.is_night(),
            latest_message: self.messages.latest().map(String::from),
            frame: self.frame,
        }
    }

    // ── Player interactions ─────────────────────────────────────────────
    //
    // Forced, synchronous adjustments that bypass the decision engine and
    // never touch the current action. Mood and emotion are derived on
    // read, so they reflect the change immediately.

    pub fn feed(&mut self) {
        self.interact("DELICIOUS! THANK YOU!", 40.0, 0.0);
    }

    pub fn give_letter(&mut self) {
        self.interact("READING YOUR LETTER!", 0.0, 15.0);
    }

    pub fn play_music(&mut self) {
        self.interact("ENJOYING THE MUSIC!", 0.0, 12.0);
    }

    pub fn greet(&mut self) {
        self.interact("WAVES AT YOU!", 0.0, 8.0);
    }

    fn interact(&mut self, message: &'static str, hunger_delta: f32, energy_delta: f32) {
        if let Ok(mut needs) = self.world.get::<&mut Needs>(self.person) {
            needs.adjust_hunger(hunger_delta);
            needs.adjust_energy(energy_delta);
        }
        if let Ok(mut companion) = self.world.get::<&mut Companion>(self.companion) {
            companion.happy_ticks = COMPANION_HAPPY_TICKS;
        }
        self.messages.push(message);
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = SimulationEngine::default();
        assert_eq!(engine.frame(), 0);
        assert_eq!(engine.needs(), Needs::new(75.0, 85.0));
        assert_eq!(engine.activity_label(), "Idle");
        assert!(!engine.is_walking());
        assert!(!engine.is_sleeping());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut a = SimulationEngine::new(SimConfig::default());
        let mut b = SimulationEngine::new(SimConfig::default());

        a.run(5_000);
        b.run(5_000);

        assert_eq!(a.needs(), b.needs());
        assert_eq!(a.agent_position(), b.agent_position());
        assert_eq!(a.companion_position(), b.companion_position());
        assert_eq!(a.current_action(), b.current_action());
    }

    #[test]
    fn test_feed_bypasses_decision_engine() {
        let mut engine = SimulationEngine::default();
        if let Ok(mut needs) = engine.world.get::<&mut Needs>(engine.person_entity()) {
            *needs = Needs::new(30.0, 20.0);
        }

        let mood_before = engine.mood();
        engine.feed();

        let needs = engine.needs();
        assert_eq!(needs.hunger, 70.0);
        // No action was scheduled
        assert_eq!(engine.current_action(), None);
        assert!(!engine.is_walking());
        // Mood reflects the change immediately
        assert_ne!(engine.mood(), mood_before);
        assert_eq!(engine.messages.latest(), Some("DELICIOUS! THANK YOU!"));
        assert_eq!(engine.companion_mood(), CompanionMood::Happy);
    }

    #[test]
    fn test_feed_clamps_at_full() {
        let mut engine = SimulationEngine::default();
        engine.feed();
        assert_eq!(engine.needs().hunger, 100.0);
    }

    #[test]
    fn test_decision_tick_commits_action() {
        let mut engine = SimulationEngine::default();
        if let Ok(mut needs) = engine.world.get::<&mut Needs>(engine.person_entity()) {
            *needs = Needs::new(15.0, 80.0);
        }

        engine.run(DECISION_TICK_FRAMES);
        assert_eq!(engine.current_action(), Some(ActionKind::Eat));
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut log = MessageLog::default();
        for i in 0..100 {
            log.push(format!("message {i}"));
        }
        assert_eq!(log.len(), 32);
        assert_eq!(log.latest(), Some("message 99"));
    }
}
