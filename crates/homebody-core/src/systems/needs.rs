//! Needs system - decays hunger and energy each needs-tick, restores them
//! during sleep, and wakes sleepers once the wake window opens.

use hecs::World;

use crate::clock::Clock;
use crate::components::{ActionKind, Activity, Needs, Person, Sleeping};
use crate::engine::MessageLog;

const HUNGER_DECAY: f32 = 1.5;
const ENERGY_DECAY: f32 = 0.8;
const SLEEP_ENERGY_GAIN: f32 = 1.5;
const SLEEP_HUNGER_DRAIN: f32 = 0.5;

/// Apply one needs-tick. The clock has already been advanced by the engine.
pub fn needs_system(world: &mut World, clock: &Clock, log: &mut MessageLog) {
    let night = clock.night_multiplier();

    for (_, (_, needs, sleeping, activity)) in
        world.query_mut::<(&Person, &mut Needs, Option<&Sleeping>, Option<&Activity>)>()
    {
        let asleep =
            sleeping.is_some() && activity.is_some_and(|a| a.kind == ActionKind::Sleep);

        if asleep {
            needs.adjust_energy(SLEEP_ENERGY_GAIN);
            needs.adjust_hunger(-SLEEP_HUNGER_DRAIN);
        } else {
            needs.adjust_hunger(-HUNGER_DECAY * night);
            needs.adjust_energy(-ENERGY_DECAY * night);
        }
    }

    if clock.wake_due() {
        wake_sleepers(world, log);
    }
}

/// Clear the sleeping marker and the sleep activity. Sleep has no countdown;
/// this is the only thing that ends it.
fn wake_sleepers(world: &mut World, log: &mut MessageLog) {
    let sleepers: Vec<hecs::Entity> = world
        .query_mut::<(&Person, &Sleeping)>()
        .into_iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in sleepers {
        let _ = world.remove_one::<Sleeping>(entity);
        let _ = world.remove_one::<Activity>(entity);
        log.push("GOOD MORNING!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sleeper(world: &mut World) -> hecs::Entity {
        let entity = world.spawn((Person, Needs::new(50.0, 30.0)));
        let mut activity = Activity::new(ActionKind::Sleep);
        activity.begin();
        let _ = world.insert(entity, (activity, Sleeping));
        entity
    }

    #[test]
    fn test_daytime_decay() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let clock = Clock::default(); // 08:00

        let entity = world.spawn((Person, Needs::new(75.0, 85.0)));
        needs_system(&mut world, &clock, &mut log);

        let needs = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(needs.hunger, 73.5);
        assert!((needs.energy - 84.2).abs() < 1e-4);
    }

    #[test]
    fn test_night_decay_is_halved() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let clock = Clock::new(23 * 60, 60.0, 1350, 420);

        let entity = world.spawn((Person, Needs::new(75.0, 85.0)));
        needs_system(&mut world, &clock, &mut log);

        let needs = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(needs.hunger, 74.25);
        assert!((needs.energy - 84.6).abs() < 1e-4);
    }

    #[test]
    fn test_sleep_restores_energy() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let clock = Clock::new(23 * 60, 60.0, 1350, 420);

        let entity = sleeper(&mut world);
        needs_system(&mut world, &clock, &mut log);

        let needs = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(needs.energy, 31.5);
        assert_eq!(needs.hunger, 49.5);
        // Still asleep at 23:00
        assert!(world.get::<&Sleeping>(entity).is_ok());
    }

    #[test]
    fn test_wake_time_clears_sleep() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        // 07:00 exactly - the wake window opens
        let clock = Clock::new(7 * 60, 60.0, 1350, 420);

        let entity = sleeper(&mut world);
        needs_system(&mut world, &clock, &mut log);

        assert!(world.get::<&Sleeping>(entity).is_err());
        assert!(world.get::<&Activity>(entity).is_err());
        assert_eq!(log.latest(), Some("GOOD MORNING!"));
    }

    #[test]
    fn test_needs_never_leave_bounds() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let clock = Clock::default();

        let entity = world.spawn((Person, Needs::new(1.0, 1.0)));
        for _ in 0..100 {
            needs_system(&mut world, &clock, &mut log);
        }

        let needs = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(needs.hunger, 0.0);
        assert_eq!(needs.energy, 0.0);
    }
}
