//! Inhabitant components: Person, Needs, Personality, Activity, and the
//! mood/emotion classifiers derived from needs.

use serde::Serialize;

/// Marker component identifying the primary inhabitant
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Person;

/// Decaying drives - both values 0.0 (desperate) to 100.0 (satisfied),
/// clamped at every mutation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Needs {
    pub hunger: f32,
    pub energy: f32,
}

impl Needs {
    pub fn new(hunger: f32, energy: f32) -> Self {
        Self {
            hunger: hunger.clamp(0.0, 100.0),
            energy: energy.clamp(0.0, 100.0),
        }
    }

    pub fn adjust_hunger(&mut self, delta: f32) {
        self.hunger = (self.hunger + delta).clamp(0.0, 100.0);
    }

    pub fn adjust_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, 100.0);
    }

    pub fn average(&self) -> f32 {
        (self.hunger + self.energy) / 2.0
    }
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: 75.0,
            energy: 85.0,
        }
    }
}

/// Coarse mood label shown to the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    VeryHappy,
    Happy,
    Content,
    Tired,
    Unhappy,
}

impl Mood {
    /// Classify from the average of both needs
    pub fn classify(needs: &Needs) -> Self {
        let avg = needs.average();
        if avg > 80.0 {
            Mood::VeryHappy
        } else if avg > 60.0 {
            Mood::Happy
        } else if avg > 40.0 {
            Mood::Content
        } else if avg > 25.0 {
            Mood::Tired
        } else {
            Mood::Unhappy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "Very Happy",
            Mood::Happy => "Happy",
            Mood::Content => "Content",
            Mood::Tired => "Tired",
            Mood::Unhappy => "Unhappy",
        }
    }
}

/// Finer-grained emotional state. Feeds the decision engine's stress
/// multiplier and movement animation; never stored, always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmotionalState {
    Happy,
    Content,
    Neutral,
    Tired,
    Stressed,
}

impl EmotionalState {
    pub fn classify(needs: &Needs) -> Self {
        let avg = needs.average();
        if avg > 75.0 {
            EmotionalState::Happy
        } else if avg > 50.0 {
            EmotionalState::Content
        } else if avg > 30.0 {
            EmotionalState::Neutral
        } else if avg > 15.0 {
            EmotionalState::Tired
        } else {
            EmotionalState::Stressed
        }
    }

    /// Critical decision candidates are boosted while stressed
    pub fn stress_multiplier(&self) -> f32 {
        match self {
            EmotionalState::Stressed => 1.5,
            _ => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmotionalState::Happy => "happy",
            EmotionalState::Content => "content",
            EmotionalState::Neutral => "neutral",
            EmotionalState::Tired => "tired",
            EmotionalState::Stressed => "stressed",
        }
    }
}

/// Fixed per-inhabitant traits in [0,1], set once at creation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Personality {
    pub hunger_tolerance: f32,
    pub energy_need: f32,
    pub tv_preference: f32,
    pub social_need: f32,
}

impl Personality {
    /// Generate a random personality
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self {
            hunger_tolerance: rng.gen_range(0.0..=1.0),
            energy_need: rng.gen_range(0.0..=1.0),
            tv_preference: rng.gen_range(0.0..=1.0),
            social_need: rng.gen_range(0.0..=1.0),
        }
    }

    /// Hunger level below which a snack becomes appealing
    pub fn hunger_threshold(&self) -> f32 {
        30.0 + self.hunger_tolerance * 40.0
    }

    /// Energy level below which sitting down becomes appealing
    pub fn energy_threshold(&self) -> f32 {
        25.0 + self.energy_need * 35.0
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            hunger_tolerance: 0.5,
            energy_need: 0.5,
            tv_preference: 0.5,
            social_need: 0.5,
        }
    }
}

/// Everything the inhabitant can decide to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    Eat,
    Cook,
    Sleep,
    Rest,
    WatchTv,
    Read,
    Browse,
    Wander,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Eat => "Eating",
            ActionKind::Cook => "Cooking",
            ActionKind::Sleep => "Sleeping",
            ActionKind::Rest => "Resting",
            ActionKind::WatchTv => "Watching TV",
            ActionKind::Read => "Reading",
            ActionKind::Browse => "Browsing",
            ActionKind::Wander => "Wandering",
        }
    }

    /// Animation ticks the action occupies once begun. Sleep is indefinite:
    /// only the wake-time condition ends it, never a countdown.
    pub fn duration_ticks(&self) -> Option<u32> {
        match self {
            ActionKind::Eat => Some(180),
            ActionKind::Cook => Some(160),
            ActionKind::Sleep => None,
            ActionKind::Rest => Some(200),
            ActionKind::WatchTv => Some(250),
            ActionKind::Read => Some(220),
            ActionKind::Browse => Some(140),
            ActionKind::Wander => Some(120),
        }
    }

    /// Hunger delta applied once at the start of the action
    pub fn hunger_delta(&self) -> f32 {
        match self {
            ActionKind::Eat => 35.0,
            ActionKind::Cook => 25.0,
            ActionKind::Browse => 5.0,
            _ => 0.0,
        }
    }

    /// Energy delta applied once at the start of the action. Sleep restores
    /// energy incrementally per needs-tick instead of a lump sum.
    pub fn energy_delta(&self) -> f32 {
        match self {
            ActionKind::Rest => 20.0,
            ActionKind::Read => 8.0,
            ActionKind::Cook => -5.0,
            _ => 0.0,
        }
    }

    /// Flavor message pool; one is chosen at random when the action begins
    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            ActionKind::Eat => &["ENJOYING A MEAL!", "THIS HITS THE SPOT!"],
            ActionKind::Cook => &["COOKING SOMETHING TASTY", "CHEF AT WORK!"],
            ActionKind::Sleep => &["TAKING A NAP...", "GOING TO BED..."],
            ActionKind::Rest => &["RELAXING IN THE CHAIR", "PUTTING FEET UP"],
            ActionKind::WatchTv => &["WATCHING TV", "THIS SHOW IS GREAT!"],
            ActionKind::Read => &["READING A GOOD BOOK", "JUST ONE MORE CHAPTER..."],
            ActionKind::Browse => &["LOOKING FOR A SNACK...", "ANYTHING GOOD IN HERE?"],
            ActionKind::Wander => &["STRETCHING THE LEGS"],
        }
    }
}

/// Current action component - present from the moment a decision is
/// committed until the action completes. `started` flips on arrival; the
/// countdown only runs after that.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Activity {
    pub kind: ActionKind,
    /// Remaining animation ticks once begun. `None` while still walking,
    /// and for sleep.
    pub timer: Option<u32>,
    pub started: bool,
}

impl Activity {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            timer: None,
            started: false,
        }
    }

    /// Called by the movement system on final arrival
    pub fn begin(&mut self) {
        self.started = true;
        self.timer = self.kind.duration_ticks();
    }
}

/// Marker component present while the inhabitant is asleep
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Sleeping;
