//! Applies scheduled actions that have come due.

use hecs::World;

use blitz_core::components::{DecorativeMark, Transform, Weapon};
use blitz_core::enums::WeaponState;
use blitz_core::events::CombatEvent;

use crate::scheduler::{DeferredAction, ScheduledAction, Scheduler};

/// Run every action due at `now_secs`. Actions whose target no longer
/// exists (or no longer carries the affected component) are skipped.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    now_secs: f64,
    combat_events: &mut Vec<CombatEvent>,
) {
    for scheduled in scheduler.drain_due(now_secs) {
        apply(world, scheduled, combat_events);
    }
}

fn apply(world: &mut World, scheduled: ScheduledAction, combat_events: &mut Vec<CombatEvent>) {
    let target = scheduled.target;
    match scheduled.action {
        DeferredAction::EndCooldown => match world.get::<&mut Weapon>(target) {
            Ok(mut weapon) => weapon.state = WeaponState::Ready,
            Err(_) => tracing::debug!(?target, "cooldown target gone, skipping"),
        },
        DeferredAction::HideMuzzleFlash => match world.get::<&mut Weapon>(target) {
            Ok(mut weapon) => weapon.muzzle_flash = false,
            Err(_) => tracing::debug!(?target, "muzzle flash target gone, skipping"),
        },
        DeferredAction::Despawn => {
            let mark_position = match world.query_one_mut::<(&DecorativeMark, &Transform)>(target)
            {
                Ok((_, transform)) => Some(transform.position),
                Err(_) => None,
            };
            if world.despawn(target).is_err() {
                tracing::debug!(?target, "despawn target already gone, skipping");
                return;
            }
            if let Some(position) = mark_position {
                combat_events.push(CombatEvent::MarkExpired { position });
            }
        }
    }
}
