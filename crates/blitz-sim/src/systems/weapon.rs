//! Weapon system: the player's fire/cooldown state machine and hit resolution.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blitz_core::components::*;
use blitz_core::constants::*;
use blitz_core::enums::{WeaponState, Waveform};
use blitz_core::events::{AudioEvent, CombatEvent};
use blitz_core::health::DamageOutcome;
use blitz_core::types::{look_direction, yaw_towards, Ray};

use crate::config::WeaponTuning;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::spatial::{RayHit, SpatialQuery};

/// Sample the trigger for one tick. Fires only when held and Ready.
/// Returns whether a shot was fired.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    spatial: &dyn SpatialQuery,
    scheduler: &mut Scheduler,
    rng: &mut ChaCha8Rng,
    tuning: &WeaponTuning,
    player: Entity,
    fire_held: bool,
    now_secs: f64,
    audio_events: &mut Vec<AudioEvent>,
    combat_events: &mut Vec<CombatEvent>,
) -> bool {
    if !fire_held {
        return false;
    }

    // The state flag is the only gate; Cooling makes the trigger a no-op.
    match world.get::<&mut Weapon>(player) {
        Ok(mut weapon) if weapon.state == WeaponState::Ready => {
            weapon.state = WeaponState::Cooling;
            weapon.muzzle_flash = true;
        }
        _ => return false,
    }
    scheduler.schedule(player, DeferredAction::EndCooldown, tuning.cooldown_secs, now_secs);
    scheduler.schedule(
        player,
        DeferredAction::HideMuzzleFlash,
        tuning.muzzle_flash_secs,
        now_secs,
    );
    audio_events.push(gunshot(rng));

    let Some(ray) = view_ray(world, player) else {
        return true;
    };
    let hit = spatial.cast(world, ray, tuning.range, &[player]);
    tracing::debug!(hit = hit.is_some(), "weapon fired");
    combat_events.push(CombatEvent::ShotFired {
        origin: ray.origin,
        direction: ray.direction,
        hit_point: hit.map(|h| h.point),
    });

    let Some(hit) = hit else {
        return true;
    };
    match hit.entity.filter(|&e| is_damageable(world, e)) {
        Some(target) => apply_hit(world, target, tuning.damage, combat_events),
        None => spawn_mark(world, scheduler, &hit, tuning, now_secs, combat_events),
    }
    true
}

/// Ray from the player's eye along the view direction.
pub fn view_ray(world: &World, player: Entity) -> Option<Ray> {
    let mut query = world.query_one::<(&Transform, &Player)>(player).ok()?;
    let (transform, rig) = query.get()?;
    let origin = transform.position + glam::DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0);
    Some(Ray::new(origin, look_direction(transform.yaw, rig.pitch)))
}

fn is_damageable(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|e| e.has::<Damageable>() && e.has::<Health>())
        .unwrap_or(false)
}

/// Apply damage to a damageable target, destroying it immediately when
/// its health is depleted.
fn apply_hit(world: &mut World, target: Entity, amount: i32, combat_events: &mut Vec<CombatEvent>) {
    let (result, enemy_index) =
        match world.query_one_mut::<(&mut Health, Option<&Enemy>)>(target) {
            Ok((health, enemy)) => (health.apply_damage(amount), enemy.map(|e| e.index)),
            Err(_) => return,
        };

    match result {
        Ok(DamageOutcome::Damaged { remaining }) => {
            tracing::debug!(?enemy_index, amount, remaining, "target damaged");
            if let Some(enemy_index) = enemy_index {
                combat_events.push(CombatEvent::EnemyDamaged {
                    enemy_index,
                    amount,
                    remaining,
                });
            }
        }
        Ok(DamageOutcome::Destroyed) => {
            let _ = world.despawn(target);
            tracing::info!(?enemy_index, "target destroyed");
            if let Some(enemy_index) = enemy_index {
                combat_events.push(CombatEvent::EnemyDestroyed { enemy_index });
            }
        }
        Err(error) => tracing::warn!(?enemy_index, %error, "damage rejected"),
    }
}

/// Place a decorative mark just off the struck surface, facing out along
/// its normal, and schedule its removal.
fn spawn_mark(
    world: &mut World,
    scheduler: &mut Scheduler,
    hit: &RayHit,
    tuning: &WeaponTuning,
    now_secs: f64,
    combat_events: &mut Vec<CombatEvent>,
) {
    let position = hit.point + hit.normal * tuning.mark_offset;
    let mark = world.spawn((
        DecorativeMark {
            normal: hit.normal,
            spawned_at_secs: now_secs,
            expires_at_secs: now_secs + tuning.mark_lifetime_secs,
        },
        Transform {
            position,
            yaw: yaw_towards(position, position + hit.normal),
        },
    ));
    scheduler.schedule(
        mark,
        DeferredAction::Despawn,
        tuning.mark_lifetime_secs,
        now_secs,
    );
    combat_events.push(CombatEvent::MarkSpawned {
        position,
        normal: hit.normal,
    });
}

fn gunshot(rng: &mut ChaCha8Rng) -> AudioEvent {
    AudioEvent::Gunshot {
        envelope: GUNSHOT_ENVELOPE.to_vec(),
        volume: GUNSHOT_VOLUME,
        wave: Waveform::Noise,
        pitch: rng.gen_range(GUNSHOT_PITCH_MIN..GUNSHOT_PITCH_MAX),
        pitch_change: GUNSHOT_PITCH_CHANGE,
        speed: GUNSHOT_SPEED,
    }
}
