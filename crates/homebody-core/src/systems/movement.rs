//! Movement system - advances walking entities toward the current waypoint,
//! detects arrival, and begins the pending action when the path runs out.

use hecs::World;
use rand::Rng;

use crate::components::{ActionKind, Activity, Facing, Movement, Needs, Position, Sleeping, Vec2};
use crate::engine::MessageLog;
use crate::house::HouseLayout;
use crate::systems::pathfinding::build_path;

/// Within this distance the walker snaps exactly onto the waypoint
pub const ARRIVAL_THRESHOLD: f32 = 3.0;
/// Proportional ease-out starts inside this radius
pub const EASE_RADIUS: f32 = 20.0;
/// Facing only flips once horizontal displacement exceeds this dead-zone
pub const FACING_DEAD_ZONE: f32 = 0.5;

const BASE_SPEED: f32 = 2.5;

/// Advance all walking entities by one animation tick.
///
/// Arrival at the final waypoint removes the `Movement` component and
/// consumes its pending action exactly once, so a walk can never fire its
/// action effects twice.
pub fn movement_system(world: &mut World, log: &mut MessageLog, rng: &mut impl Rng) {
    let mut finished: Vec<hecs::Entity> = Vec::new();
    let mut arrivals: Vec<(hecs::Entity, ActionKind)> = Vec::new();

    for (entity, (pos, facing, movement, needs)) in
        world.query_mut::<(&mut Position, &mut Facing, &mut Movement, &Needs)>()
    {
        let Some(target) = movement.current_target() else {
            // Empty path - nothing to walk toward
            finished.push(entity);
            continue;
        };

        let dx = target.x - pos.point.x;
        let dy = target.y - pos.point.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < ARRIVAL_THRESHOLD {
            pos.point = Vec2::new(target.x, target.y);
            pos.floor = target.floor;
            movement.cursor += 1;

            if movement.cursor >= movement.path.len() {
                if let Some(kind) = movement.pending.take() {
                    arrivals.push((entity, kind));
                }
                finished.push(entity);
            }
        } else {
            let mut speed = BASE_SPEED * (0.8 + needs.energy / 100.0 * 0.4);
            if needs.hunger < 30.0 {
                // Hungry people hurry
                speed *= 1.25;
            }
            if distance < EASE_RADIUS {
                speed *= distance / EASE_RADIUS;
            }

            pos.point.x += dx / distance * speed;
            pos.point.y += dy / distance * speed;

            if dx.abs() > FACING_DEAD_ZONE {
                *facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
            }
        }
    }

    for entity in finished {
        let _ = world.remove_one::<Movement>(entity);
    }

    for (entity, kind) in arrivals {
        begin_action(world, entity, kind, log, rng);
    }
}

/// Apply an action's start-of-action effects: need deltas once, the
/// activity timer, the sleeping marker for sleep, and one flavor message.
pub fn begin_action(
    world: &mut World,
    entity: hecs::Entity,
    kind: ActionKind,
    log: &mut MessageLog,
    rng: &mut impl Rng,
) {
    if let Ok(mut needs) = world.get::<&mut Needs>(entity) {
        needs.adjust_hunger(kind.hunger_delta());
        needs.adjust_energy(kind.energy_delta());
    }

    if let Ok(mut activity) = world.get::<&mut Activity>(entity) {
        activity.begin();
    }

    if kind == ActionKind::Sleep {
        let _ = world.insert_one(entity, Sleeping);
    }

    let pool = kind.messages();
    if !pool.is_empty() {
        log.push(pool[rng.gen_range(0..pool.len())]);
    }
}

/// Start a walk toward a named location, routing through the stairwells
/// when floors differ. Unknown names are a no-op (caller bug, not a fault).
pub fn start_walk(
    world: &mut World,
    entity: hecs::Entity,
    house: &HouseLayout,
    destination: &str,
    pending: Option<ActionKind>,
) -> bool {
    let Some(dest) = house.location(destination) else {
        return false;
    };

    let current_floor = match world.get::<&Position>(entity) {
        Ok(pos) => pos.floor.round() as i32,
        Err(_) => return false,
    };

    let mut path = build_path(house, current_floor, dest.floor.round() as i32);
    path.push(dest);

    let _ = world.insert_one(entity, Movement::new(path, pending));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Person;
    use crate::house::Location;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn walker(world: &mut World, x: f32, y: f32) -> hecs::Entity {
        world.spawn((
            Person,
            Position::new(x, y, 1.0),
            Facing::Right,
            Needs::new(75.0, 85.0),
        ))
    }

    #[test]
    fn test_walker_advances_toward_target() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let mut rng = StdRng::seed_from_u64(1);

        let entity = walker(&mut world, 100.0, 330.0);
        let target = Location {
            name: "fridge",
            x: 500.0,
            y: 330.0,
            floor: 1.0,
        };
        let _ = world.insert_one(entity, Movement::new(vec![target], None));

        movement_system(&mut world, &mut log, &mut rng);

        let pos = *world.get::<&Position>(entity).unwrap();
        assert!(pos.point.x > 100.0);
        assert!(world.get::<&Movement>(entity).is_ok());
    }

    #[test]
    fn test_arrival_snaps_and_is_idempotent() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let mut rng = StdRng::seed_from_u64(1);

        let entity = walker(&mut world, 498.5, 330.0);
        let target = Location {
            name: "fridge",
            x: 500.0,
            y: 330.0,
            floor: 1.0,
        };
        let _ = world.insert_one(entity, Movement::new(vec![target], None));

        movement_system(&mut world, &mut log, &mut rng);

        let pos = *world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.point, Vec2::new(500.0, 330.0));
        // Movement removed - further ticks leave the position untouched
        assert!(world.get::<&Movement>(entity).is_err());

        movement_system(&mut world, &mut log, &mut rng);
        let pos = *world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.point, Vec2::new(500.0, 330.0));
    }

    #[test]
    fn test_pending_action_fires_once_on_arrival() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let mut rng = StdRng::seed_from_u64(1);

        let entity = walker(&mut world, 499.0, 330.0);
        let _ = world.insert_one(entity, Activity::new(ActionKind::Eat));
        let target = Location {
            name: "fridge",
            x: 500.0,
            y: 330.0,
            floor: 1.0,
        };
        let _ = world.insert_one(entity, Movement::new(vec![target], Some(ActionKind::Eat)));

        let hunger_before = world.get::<&Needs>(entity).unwrap().hunger;
        movement_system(&mut world, &mut log, &mut rng);

        let needs = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(needs.hunger, (hunger_before + 35.0).min(100.0));

        let activity = *world.get::<&Activity>(entity).unwrap();
        assert!(activity.started);
        assert_eq!(activity.timer, Some(180));
        assert!(log.latest().is_some());

        // A second tick must not re-apply the deltas
        movement_system(&mut world, &mut log, &mut rng);
        let after = *world.get::<&Needs>(entity).unwrap();
        assert_eq!(after.hunger, needs.hunger);
    }

    #[test]
    fn test_facing_holds_through_vertical_movement() {
        let mut world = World::new();
        let mut log = MessageLog::default();
        let mut rng = StdRng::seed_from_u64(1);

        let entity = walker(&mut world, 320.0, 280.0);
        // Straight up the stairwell: dx is 0, inside the dead-zone
        let target = Location {
            name: "stairs_1_top",
            x: 320.0,
            y: 250.0,
            floor: 2.0,
        };
        let _ = world.insert_one(entity, Movement::new(vec![target], None));

        movement_system(&mut world, &mut log, &mut rng);
        assert_eq!(*world.get::<&Facing>(entity).unwrap(), Facing::Right);
    }

    #[test]
    fn test_start_walk_unknown_location_is_noop() {
        let mut world = World::new();
        let house = HouseLayout::standard();

        let entity = walker(&mut world, 320.0, 330.0);
        assert!(!start_walk(&mut world, entity, &house, "helipad", None));
        assert!(world.get::<&Movement>(entity).is_err());
    }

    #[test]
    fn test_start_walk_cross_floor_terminates_at_destination() {
        let mut world = World::new();
        let house = HouseLayout::standard();

        let entity = walker(&mut world, 320.0, 330.0);
        assert!(start_walk(
            &mut world,
            entity,
            &house,
            "bed",
            Some(ActionKind::Sleep)
        ));

        let movement = world.get::<&Movement>(entity).unwrap();
        // Two stairwells plus the bed itself
        assert_eq!(movement.path.len(), 13);
        assert_eq!(movement.destination().unwrap().name, "bed");
        assert_eq!(movement.path[0].name, "stairs_1_bottom");
    }
}
