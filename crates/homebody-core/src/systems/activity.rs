//! Activity system - counts down started actions and returns the
//! inhabitant to idle when they complete.

use hecs::World;

use crate::components::Activity;

/// Decrement running activity timers by one animation tick. Activities that
/// have not started (still walking) and sleep (no countdown) are untouched.
pub fn activity_system(world: &mut World) {
    let mut completed = Vec::new();

    for (entity, activity) in world.query_mut::<&mut Activity>() {
        if !activity.started {
            continue;
        }
        if let Some(timer) = activity.timer.as_mut() {
            *timer = timer.saturating_sub(1);
            if *timer == 0 {
                completed.push(entity);
            }
        }
    }

    for entity in completed {
        let _ = world.remove_one::<Activity>(entity);
    }
}
