//! Entity spawn factories for setting up the scenario world.
//!
//! Creates the ground, map obstacles, the player rig and the enemy line
//! with their component bundles.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blitz_core::components::*;
use blitz_core::constants::*;
use blitz_core::enums::AiState;

use crate::config::{ObstacleConfig, SimConfig, SpawnConfig};

/// Set up the scenario world. Returns the player entity.
pub fn setup_scenario(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> hecs::Entity {
    spawn_ground(world);
    for obstacle in &config.obstacles {
        spawn_obstacle(world, obstacle);
    }
    let player = spawn_player(world, config.player_start);
    spawn_enemies(
        world,
        rng,
        &config.spawn,
        config.enemy,
        config.enemy_max_health,
    );
    player
}

/// Spawn the ground slab. Its top face is the plane y = 0.
pub fn spawn_ground(world: &mut World) -> hecs::Entity {
    world.spawn((
        StaticGeometry,
        Transform::at(DVec3::new(0.0, -GROUND_HALF_THICKNESS, 0.0)),
        Collider {
            offset: DVec3::ZERO,
            half_extents: DVec3::new(GROUND_HALF_SIZE, GROUND_HALF_THICKNESS, GROUND_HALF_SIZE),
        },
    ))
}

pub fn spawn_obstacle(world: &mut World, obstacle: &ObstacleConfig) -> hecs::Entity {
    world.spawn((
        StaticGeometry,
        Transform::at(obstacle.center),
        Collider {
            offset: DVec3::ZERO,
            half_extents: obstacle.half_extents,
        },
    ))
}

/// Spawn the player rig (body collider, view, weapon) with its feet at `position`.
pub fn spawn_player(world: &mut World, position: DVec3) -> hecs::Entity {
    let half = DVec3::from_array(PLAYER_HALF_EXTENTS);
    world.spawn((
        Player::default(),
        Weapon::default(),
        Transform::at(position),
        Collider {
            offset: DVec3::new(0.0, half.y, 0.0),
            half_extents: half,
        },
    ))
}

/// Place `spawn.count` enemies along the x axis at `index * spacing`.
///
/// With a non-zero jitter each enemy's z offset is drawn from the seeded
/// RNG, so placement is still identical for identical seeds.
pub fn spawn_enemies(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    spawn: &SpawnConfig,
    profile: EnemyProfile,
    max_health: i32,
) -> Vec<hecs::Entity> {
    (0..spawn.count)
        .map(|index| {
            let z = if spawn.jitter > 0.0 {
                rng.gen_range(-spawn.jitter..=spawn.jitter)
            } else {
                0.0
            };
            let position = DVec3::new(index as f64 * spawn.spacing, 0.0, z);
            spawn_enemy(world, index, position, profile, max_health)
        })
        .collect()
}

/// Spawn a single enemy with full health.
pub fn spawn_enemy(
    world: &mut World,
    index: u32,
    position: DVec3,
    profile: EnemyProfile,
    max_health: i32,
) -> hecs::Entity {
    let half = DVec3::from_array(ENEMY_HALF_EXTENTS);
    world.spawn((
        Enemy {
            index,
            state: AiState::Dormant,
            profile,
        },
        Damageable,
        Health::new(max_health),
        Transform::at(position),
        Collider {
            offset: DVec3::new(0.0, half.y, 0.0),
            half_extents: half,
        },
    ))
}
