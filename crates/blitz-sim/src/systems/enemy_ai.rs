//! Enemy AI system: runs the enemy FSM for every enemy each tick.
//!
//! Each enemy's update is applied to the world before the next enemy is
//! evaluated, so later enemies see earlier enemies' new positions.

use hecs::{Entity, World};

use blitz_core::components::{Enemy, Health, Transform};
use blitz_core::enums::AiState;
use blitz_core::types::Ray;

use blitz_enemy_ai::fsm::{classify, orient, steer, EnemyContext};

use crate::spatial::SpatialQuery;

/// Run enemy AI against the player's current position.
pub fn run(world: &mut World, spatial: &dyn SpatialQuery, player: Entity, dt: f64) {
    let Ok(player_position) = world.get::<&Transform>(player).map(|t| t.position) else {
        return;
    };

    let enemies: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in enemies {
        update_enemy(world, spatial, entity, player, player_position, dt);
    }
}

fn update_enemy(
    world: &mut World,
    spatial: &dyn SpatialQuery,
    entity: Entity,
    player: Entity,
    player_position: glam::DVec3,
    dt: f64,
) {
    let (ctx, index, previous_state) =
        match world.query_one_mut::<(&Enemy, &Transform)>(entity) {
            Ok((enemy, transform)) => (
                EnemyContext {
                    profile: enemy.profile,
                    position: transform.position,
                    target: player_position,
                },
                enemy.index,
                enemy.state,
            ),
            // Removed earlier this tick.
            Err(_) => return,
        };

    let state = classify(ctx.planar_distance(), &ctx.profile);
    if state != previous_state {
        tracing::debug!(enemy = index, ?state, "enemy AI state changed");
        if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
            enemy.state = state;
        }
    }
    if state == AiState::Dormant {
        return;
    }

    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        health.tick(dt);
    }

    let orientation = orient(&ctx);
    let sight = spatial.cast(
        world,
        Ray::new(orientation.eye, orientation.forward),
        ctx.profile.sight_range,
        &[entity],
    );
    let player_in_sight = sight.and_then(|hit| hit.entity) == Some(player);
    let step = steer(&ctx, &orientation, player_in_sight, dt);

    if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
        transform.yaw = orientation.yaw;
        transform.position += step;
    }
}
