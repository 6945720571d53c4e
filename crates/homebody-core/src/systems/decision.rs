//! Decision engine - builds a weighted candidate-action list from needs,
//! personality, time-of-day, and randomness, then commits the winner.
//!
//! Every eligible guard contributes a candidate; overlapping rules stack
//! rather than shadow each other, and the same action kind may appear more
//! than once at different priorities - the highest-priority instance wins.
//! Selection is a stable descending sort, so ties fall back to insertion
//! order.

use hecs::World;
use rand::Rng;

use crate::clock::Clock;
use crate::components::{
    ActionKind, Activity, EmotionalState, Movement, Needs, Person, Personality, Sleeping,
};
use crate::house::HouseLayout;
use crate::systems::movement::start_walk;

/// A scored candidate action. Transient - produced and consumed within one
/// decision cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: ActionKind,
    pub priority: f32,
    pub location: &'static str,
}

impl Decision {
    fn new(action: ActionKind, priority: f32, location: &'static str) -> Self {
        Self {
            action,
            priority,
            location,
        }
    }
}

/// Priority of critical need candidates before the stress multiplier
const CRITICAL_PRIORITY: f32 = 150.0;
/// Bedtime walk-to-bed outranks everything on the candidate list
const BEDTIME_PRIORITY: f32 = 200.0;

/// Run one decision cycle. Only acts when the inhabitant is idle: not
/// walking, no current action, not asleep. Returns the committed decision,
/// if any.
pub fn decision_system(
    world: &mut World,
    house: &HouseLayout,
    clock: &Clock,
    rng: &mut impl Rng,
) -> Option<Decision> {
    let mut chosen: Option<(hecs::Entity, Decision)> = None;

    {
        let mut query = world.query::<(
            &Person,
            &Needs,
            &Personality,
            Option<&Movement>,
            Option<&Activity>,
            Option<&Sleeping>,
        )>();

        for (entity, (_, needs, personality, moving, acting, sleeping)) in query.iter() {
            if moving.is_some() || acting.is_some() || sleeping.is_some() {
                continue;
            }

            // Bedtime is a request, not forced sleep: it issues a normal
            // walk-to-bed decision through the same commit path.
            let decision = if clock.bedtime_due() && needs.energy < 70.0 {
                Decision::new(ActionKind::Sleep, BEDTIME_PRIORITY, "bed")
            } else {
                let candidates = build_candidates(needs, personality, clock, house, rng);
                match select(candidates) {
                    Some(decision) => decision,
                    None => continue,
                }
            };

            chosen = Some((entity, decision));
            break;
        }
    }

    let (entity, decision) = chosen?;

    if !start_walk(world, entity, house, decision.location, Some(decision.action)) {
        return None;
    }
    let _ = world.insert_one(entity, Activity::new(decision.action));
    Some(decision)
}

/// Build the full candidate list. Never empty: the wander fallback is
/// unconditional.
pub fn build_candidates(
    needs: &Needs,
    personality: &Personality,
    clock: &Clock,
    house: &HouseLayout,
    rng: &mut impl Rng,
) -> Vec<Decision> {
    let stress = EmotionalState::classify(needs).stress_multiplier();
    let hour = clock.hour_of_day();
    let mut candidates = Vec::new();

    // Critical needs
    if needs.hunger < 20.0 {
        candidates.push(Decision::new(
            ActionKind::Eat,
            CRITICAL_PRIORITY * stress,
            "fridge",
        ));
    }
    if needs.energy < 15.0 || (clock.is_night() && needs.energy < 50.0) {
        candidates.push(Decision::new(
            ActionKind::Sleep,
            CRITICAL_PRIORITY * stress,
            "bed",
        ));
    }

    // Personality-scaled thresholds
    if needs.hunger < personality.hunger_threshold() {
        candidates.push(Decision::new(
            ActionKind::Eat,
            80.0 + (70.0 - needs.hunger),
            "counter",
        ));
    }
    if needs.energy < personality.energy_threshold() {
        candidates.push(Decision::new(
            ActionKind::Rest,
            70.0 + (60.0 - needs.energy),
            "chair",
        ));
    }

    // Routine and comfort, gated by need levels, time windows, and a draw
    let meal_window = (7..9).contains(&hour) || (18..20).contains(&hour);
    if needs.hunger < 70.0 && meal_window && rng.gen::<f32>() < 0.6 {
        candidates.push(Decision::new(
            ActionKind::Cook,
            45.0 + rng.gen::<f32>() * 20.0,
            "counter",
        ));
    }
    if needs.hunger < 60.0 && rng.gen::<f32>() < 0.5 {
        candidates.push(Decision::new(
            ActionKind::Eat,
            35.0 + rng.gen::<f32>() * 15.0,
            "table",
        ));
    }
    if rng.gen::<f32>() < 0.7 {
        candidates.push(Decision::new(
            ActionKind::WatchTv,
            15.0 + personality.tv_preference * 25.0 + rng.gen::<f32>() * 10.0,
            "tv",
        ));
    }
    if (20..23).contains(&hour) && rng.gen::<f32>() < 0.4 {
        candidates.push(Decision::new(
            ActionKind::Read,
            20.0 + rng.gen::<f32>() * 15.0,
            "nightstand",
        ));
    }
    if rng.gen::<f32>() < 0.2 + personality.social_need * 0.2 {
        candidates.push(Decision::new(
            ActionKind::Browse,
            10.0 + rng.gen::<f32>() * 15.0,
            "fridge",
        ));
    }

    // Unconditional fallback so selection can never fail
    candidates.push(Decision::new(
        ActionKind::Wander,
        rng.gen::<f32>() * 20.0,
        house.random_wander_target(rng).name,
    ));

    candidates
}

/// Stable sort by priority descending; first wins, ties keep insertion
/// order.
pub fn select(mut candidates: Vec<Decision>) -> Option<Decision> {
    candidates.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn daytime_clock() -> Clock {
        // 10:00 - outside meal, reading, and night windows
        Clock::new(10 * 60, 60.0, 1350, 420)
    }

    #[test]
    fn test_hungry_agent_prefers_eating_over_wandering() {
        let house = HouseLayout::standard();
        let needs = Needs::new(15.0, 80.0);
        let personality = Personality::default();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let candidates =
                build_candidates(&needs, &personality, &daytime_clock(), &house, &mut rng);
            let winner = select(candidates).unwrap();
            assert_eq!(winner.action, ActionKind::Eat);
            assert!(winner.priority >= 150.0);
        }
    }

    #[test]
    fn test_candidate_list_never_empty() {
        let house = HouseLayout::standard();
        let needs = Needs::new(100.0, 100.0);
        let personality = Personality {
            hunger_tolerance: 0.0,
            energy_need: 0.0,
            tv_preference: 0.0,
            social_need: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..100 {
            let candidates =
                build_candidates(&needs, &personality, &daytime_clock(), &house, &mut rng);
            assert!(!candidates.is_empty());
            let fallback = candidates.last().unwrap();
            assert_eq!(fallback.action, ActionKind::Wander);
            assert!(fallback.priority <= 20.0);
        }
    }

    #[test]
    fn test_overlapping_eat_rules_both_contribute() {
        let house = HouseLayout::standard();
        // Hungry enough for both the critical and the threshold rule
        let needs = Needs::new(15.0, 80.0);
        let personality = Personality::default();
        let mut rng = StdRng::seed_from_u64(5);

        let candidates = build_candidates(&needs, &personality, &daytime_clock(), &house, &mut rng);
        let eats: Vec<&Decision> = candidates
            .iter()
            .filter(|d| d.action == ActionKind::Eat && d.location != "table")
            .collect();
        assert!(eats.len() >= 2);
        // The critical fridge rule outranks the counter snack
        assert!(eats.iter().any(|d| d.location == "fridge" && d.priority >= 150.0));
        assert!(eats.iter().any(|d| d.location == "counter"));
    }

    #[test]
    fn test_stress_boosts_critical_priority() {
        let house = HouseLayout::standard();
        // avg 12.5 -> stressed
        let needs = Needs::new(10.0, 15.0);
        let personality = Personality::default();
        let mut rng = StdRng::seed_from_u64(11);

        let candidates = build_candidates(&needs, &personality, &daytime_clock(), &house, &mut rng);
        let critical = candidates
            .iter()
            .find(|d| d.action == ActionKind::Eat && d.location == "fridge")
            .unwrap();
        assert_eq!(critical.priority, 225.0);
    }

    #[test]
    fn test_select_is_stable_on_ties() {
        let first = Decision::new(ActionKind::Eat, 50.0, "fridge");
        let second = Decision::new(ActionKind::Rest, 50.0, "chair");
        let winner = select(vec![first, second]).unwrap();
        assert_eq!(winner, first);
    }

    #[test]
    fn test_night_low_energy_triggers_sleep_candidate() {
        let house = HouseLayout::standard();
        let clock = Clock::new(23 * 60, 60.0, 1350, 420);
        let needs = Needs::new(80.0, 45.0);
        let personality = Personality::default();
        let mut rng = StdRng::seed_from_u64(13);

        let candidates = build_candidates(&needs, &personality, &clock, &house, &mut rng);
        assert!(candidates
            .iter()
            .any(|d| d.action == ActionKind::Sleep && d.location == "bed"));
    }

    #[test]
    fn test_decision_system_commits_exactly_one_action() {
        use crate::components::{Facing, Position};

        let mut world = World::new();
        let house = HouseLayout::standard();
        let clock = daytime_clock();
        let mut rng = StdRng::seed_from_u64(17);

        let entity = world.spawn((
            Person,
            Needs::new(15.0, 80.0),
            Personality::default(),
            Position::new(320.0, 330.0, 1.0),
            Facing::Right,
        ));

        let decision = decision_system(&mut world, &house, &clock, &mut rng);
        assert!(decision.is_some());

        // Committed: walking with a current action attached
        assert!(world.get::<&Activity>(entity).is_ok());
        assert!(world.get::<&Movement>(entity).is_ok());

        // No longer idle - a second cycle must not commit again
        assert!(decision_system(&mut world, &house, &clock, &mut rng).is_none());
    }

    #[test]
    fn test_bedtime_request_walks_to_bed() {
        use crate::components::{Facing, Position};

        let mut world = World::new();
        let house = HouseLayout::standard();
        let clock = Clock::new(22 * 60 + 45, 60.0, 1350, 420);
        let mut rng = StdRng::seed_from_u64(19);

        let entity = world.spawn((
            Person,
            Needs::new(80.0, 60.0),
            Personality::default(),
            Position::new(320.0, 330.0, 1.0),
            Facing::Right,
        ));

        let decision = decision_system(&mut world, &house, &clock, &mut rng).unwrap();
        assert_eq!(decision.action, ActionKind::Sleep);
        assert_eq!(decision.location, "bed");

        // Requested, not forced: still awake until arrival
        assert!(world.get::<&Sleeping>(entity).is_err());
        let movement = world.get::<&Movement>(entity).unwrap();
        assert_eq!(movement.destination().unwrap().name, "bed");
    }
}
