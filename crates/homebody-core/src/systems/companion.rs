//! Companion behavior system - a simple state machine that tracks the
//! inhabitant and reacts with following, resting, playing, and drinking.
//!
//! Runs after the movement system each animation tick, so it always reads
//! the inhabitant's post-movement position.

use hecs::World;
use rand::Rng;

use crate::components::{Companion, CompanionBehavior, Movement, Person, Position, Vec2};
use crate::house::HouseLayout;

/// Radius around the water bowl that allows a drink
pub const WATER_RADIUS: f32 = 25.0;
/// Radius around the dog bed that triggers resting
pub const REST_RADIUS: f32 = 20.0;
/// The inhabitant coming this close wakes a resting companion
const WAKE_RADIUS: f32 = 30.0;
/// A walking inhabitant passing this close also wakes it
const DISTURB_RADIUS: f32 = 45.0;
/// Orbit radius while playing
const PLAY_RADIUS: f32 = 18.0;

const CATCH_UP_SPEED: f32 = 1.8;
const TROT_SPEED: f32 = 1.0;
const STROLL_SPEED: f32 = 0.45;

/// Per-tick chance of wandering over for a drink when near the bowl
const DRINK_START_CHANCE: f32 = 0.01;
const DRINK_STOP_CHANCE: f32 = 0.02;
const PLAY_STOP_CHANCE: f32 = 0.03;
/// Per-tick chance of doing something other than sitting when close by
const IDLE_FIDGET_CHANCE: f32 = 0.05;

/// Update the companion by one animation tick
pub fn companion_system(world: &mut World, house: &HouseLayout, rng: &mut impl Rng) {
    let mut agent: Option<(Vec2, f32, bool)> = None;
    for (_, (_, pos, moving)) in world
        .query::<(&Person, &Position, Option<&Movement>)>()
        .iter()
    {
        agent = Some((pos.point, pos.floor, moving.is_some()));
    }
    let Some((agent_point, agent_floor, agent_walking)) = agent else {
        return;
    };

    let (Some(water), Some(bed)) = (house.location("dog_water"), house.location("dog_bed"))
    else {
        return;
    };
    let bounds = house.bounds();

    for (_, (companion, pos)) in world.query_mut::<(&mut Companion, &mut Position)>() {
        if companion.happy_ticks > 0 {
            companion.happy_ticks -= 1;
        }

        let to_agent = agent_point - pos.point;
        let agent_distance = to_agent.length();

        match companion.behavior {
            CompanionBehavior::Drinking => {
                // Lap at the bowl with a little shuffle
                pos.point.x = water.x + (rng.gen::<f32>() - 0.5) * 2.0;
                pos.point.y = water.y + (rng.gen::<f32>() - 0.5) * 1.0;
                if rng.gen::<f32>() < DRINK_STOP_CHANCE {
                    companion.behavior = CompanionBehavior::Following;
                }
            }
            CompanionBehavior::Resting => {
                if agent_distance < WAKE_RADIUS
                    || (agent_walking && agent_distance < DISTURB_RADIUS)
                {
                    companion.behavior = CompanionBehavior::Following;
                }
            }
            CompanionBehavior::Playing => {
                companion.play_phase += 0.15;
                pos.point.x = agent_point.x + companion.play_phase.cos() * PLAY_RADIUS;
                pos.point.y = agent_point.y + companion.play_phase.sin() * PLAY_RADIUS * 0.5;
                if rng.gen::<f32>() < PLAY_STOP_CHANCE {
                    companion.behavior = CompanionBehavior::Following;
                }
            }
            CompanionBehavior::Following => {
                let water_distance = pos.point.distance(&water.point());
                let bed_distance = pos.point.distance(&bed.point());

                if water_distance < WATER_RADIUS && rng.gen::<f32>() < DRINK_START_CHANCE {
                    companion.behavior = CompanionBehavior::Drinking;
                } else if bed_distance < REST_RADIUS && agent_distance > WAKE_RADIUS {
                    companion.behavior = CompanionBehavior::Resting;
                } else if agent_distance > 100.0 {
                    let step = to_agent.normalize() * CATCH_UP_SPEED;
                    pos.point = pos.point + step;
                } else if agent_distance > 60.0 {
                    let step = to_agent.normalize() * TROT_SPEED;
                    pos.point = pos.point + step;
                } else if agent_distance > 35.0 {
                    let step = to_agent.normalize() * STROLL_SPEED;
                    pos.point.x += step.x + (rng.gen::<f32>() - 0.5);
                    pos.point.y += step.y + (rng.gen::<f32>() - 0.5);
                } else if agent_distance <= 25.0 && rng.gen::<f32>() < IDLE_FIDGET_CHANCE {
                    let roll = rng.gen::<f32>();
                    if roll < 0.5 {
                        // Fall into orbit from wherever it stands
                        let offset = pos.point - agent_point;
                        companion.play_phase = offset.y.atan2(offset.x);
                        companion.behavior = CompanionBehavior::Playing;
                    } else if roll < 0.8 {
                        // Drift toward the dog bed; Resting triggers on arrival
                        let to_bed = (bed.point() - pos.point).normalize();
                        pos.point = pos.point + to_bed * 0.8;
                    } else {
                        pos.point.x += (rng.gen::<f32>() - 0.5) * 2.0;
                        pos.point.y += (rng.gen::<f32>() - 0.5) * 2.0;
                    }
                }
            }
        }

        pos.point = bounds.clamp(pos.point);
        // The companion trails the inhabitant between floors
        pos.floor = agent_floor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Facing, Needs};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_pair(world: &mut World, agent: Position, dog: Position) -> hecs::Entity {
        world.spawn((Person, agent, Facing::Right, Needs::default()));
        world.spawn((Companion::new(), dog))
    }

    #[test]
    fn test_catch_up_when_far() {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(21);

        let dog = spawn_pair(
            &mut world,
            Position::new(500.0, 220.0, 2.0),
            Position::new(100.0, 330.0, 1.0),
        );

        let before = world.get::<&Position>(dog).unwrap().point;
        companion_system(&mut world, &house, &mut rng);
        let after = world.get::<&Position>(dog).unwrap().point;

        let agent_point = Vec2::new(500.0, 220.0);
        assert!(after.distance(&agent_point) < before.distance(&agent_point));
        // Fast catch-up stride
        assert!((after.distance(&before) - CATCH_UP_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_drinking_near_water_bowl() {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(23);

        // Pin both at the bowl so following steps are no-ops
        let dog = spawn_pair(
            &mut world,
            Position::new(430.0, 332.0, 1.0),
            Position::new(432.0, 332.0, 1.0),
        );

        let mut drank = false;
        for _ in 0..5_000 {
            companion_system(&mut world, &house, &mut rng);
            if world.get::<&Companion>(dog).unwrap().behavior == CompanionBehavior::Drinking {
                drank = true;
                break;
            }
        }
        assert!(drank);
    }

    #[test]
    fn test_resting_dog_woken_by_approach() {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(25);

        let dog = spawn_pair(
            &mut world,
            Position::new(70.0, 332.0, 1.0),
            Position::new(60.0, 332.0, 1.0),
        );
        world.get::<&mut Companion>(dog).unwrap().behavior = CompanionBehavior::Resting;

        companion_system(&mut world, &house, &mut rng);
        assert_eq!(
            world.get::<&Companion>(dog).unwrap().behavior,
            CompanionBehavior::Following
        );
    }

    #[test]
    fn test_position_stays_in_bounds() {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(27);

        let dog = spawn_pair(
            &mut world,
            Position::new(320.0, 220.0, 2.0),
            Position::new(35.0, 345.0, 1.0),
        );

        for _ in 0..2_000 {
            companion_system(&mut world, &house, &mut rng);
            let point = world.get::<&Position>(dog).unwrap().point;
            let bounds = house.bounds();
            assert!(point.x >= bounds.min.x && point.x <= bounds.max.x);
            assert!(point.y >= bounds.min.y && point.y <= bounds.max.y);
        }
    }

    #[test]
    fn test_play_orbit_is_tick_driven() {
        let mut world = World::new();
        let house = HouseLayout::standard();
        let mut rng = StdRng::seed_from_u64(29);

        let dog = spawn_pair(
            &mut world,
            Position::new(320.0, 220.0, 2.0),
            Position::new(330.0, 222.0, 2.0),
        );
        {
            let mut companion = world.get::<&mut Companion>(dog).unwrap();
            companion.behavior = CompanionBehavior::Playing;
            companion.play_phase = 0.0;
        }

        companion_system(&mut world, &house, &mut rng);
        let companion = *world.get::<&Companion>(dog).unwrap();
        if companion.behavior == CompanionBehavior::Playing {
            assert!((companion.play_phase - 0.15).abs() < 1e-5);
        }

        let point = world.get::<&Position>(dog).unwrap().point;
        let center = Vec2::new(320.0, 220.0);
        assert!(point.distance(&center) <= PLAY_RADIUS + 0.01);
    }
}
