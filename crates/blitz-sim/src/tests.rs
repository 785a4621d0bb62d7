//! Scenario tests for the simulation engine: determinism, weapon timing,
//! hit resolution, enemy pursuit and pause handling.

use std::f64::consts::{FRAC_PI_4, PI};

use glam::DVec3;
use hecs::{Entity, World};

use blitz_core::commands::PlayerCommand;
use blitz_core::constants::*;
use blitz_core::enums::*;
use blitz_core::events::CombatEvent;
use blitz_core::state::{EnemyView, GameStateSnapshot};
use blitz_core::types::{aim_angles, Ray};

use crate::config::{ObstacleConfig, SimConfig, SpawnConfig};
use crate::engine::SimulationEngine;
use crate::spatial::{RayHit, SpatialQuery};

fn player_start() -> DVec3 {
    DVec3::from_array(PLAYER_START)
}

/// Engine with the scenario started and the player posed, after one tick.
fn started(
    config: SimConfig,
    position: DVec3,
    yaw: f64,
    pitch: f64,
) -> (SimulationEngine, GameStateSnapshot) {
    let mut engine = SimulationEngine::new(config);
    engine.queue_commands([
        PlayerCommand::StartScenario,
        PlayerCommand::SetPlayerPose {
            position,
            yaw,
            pitch,
        },
    ]);
    let snapshot = engine.tick();
    (engine, snapshot)
}

/// Pose aiming from the player's eye at an enemy's body centre.
fn pose_at_enemy(position: DVec3, enemy: DVec3) -> PlayerCommand {
    let eye = position + DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0);
    let (yaw, pitch) = aim_angles(eye, enemy + DVec3::new(0.0, ENEMY_HALF_EXTENTS[1], 0.0));
    PlayerCommand::SetPlayerPose {
        position,
        yaw,
        pitch,
    }
}

/// Looking away from the enemy line, 45 degrees down.
fn pose_at_ground() -> PlayerCommand {
    PlayerCommand::SetPlayerPose {
        position: player_start(),
        yaw: PI,
        pitch: -FRAC_PI_4,
    }
}

fn enemy(snapshot: &GameStateSnapshot, index: u32) -> Option<&EnemyView> {
    snapshot.enemies.iter().find(|e| e.index == index)
}

fn count_events(snapshot: &GameStateSnapshot, f: impl Fn(&CombatEvent) -> bool) -> usize {
    snapshot.combat_events.iter().filter(|e| f(e)).count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        spawn: SpawnConfig {
            jitter: 3.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_commands([
            PlayerCommand::StartScenario,
            pose_at_enemy(player_start(), DVec3::ZERO),
            PlayerCommand::SetFireHeld { held: true },
        ]);
    }

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_spawn_jitter_follows_seed() {
    let spawn = SpawnConfig {
        jitter: 2.0,
        ..Default::default()
    };
    let positions = |seed: u64| -> Vec<DVec3> {
        let (_, snapshot) = started(
            SimConfig {
                seed,
                spawn,
                ..Default::default()
            },
            DVec3::new(500.0, 0.0, 0.0),
            0.0,
            0.0,
        );
        snapshot.enemies.iter().map(|e| e.position).collect()
    };

    let a = positions(7);
    assert_eq!(a, positions(7));
    assert_ne!(a, positions(8));
    for (index, position) in a.iter().enumerate() {
        assert_eq!(position.x, index as f64 * SPAWN_SPACING);
        assert!(position.z.abs() <= 2.0);
    }
}

// ---- Phases and commands ----

#[test]
fn test_setup_phase_is_inert() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([pose_at_ground(), PlayerCommand::Pause]);
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Setup);
    assert_eq!(snapshot.time.tick, 0);
    assert!(snapshot.player.is_none());
    assert!(snapshot.enemies.is_empty());
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_start_scenario_spawns_once() {
    let (mut engine, snapshot) = started(SimConfig::default(), player_start(), 0.0, 0.0);
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.enemies.len(), SPAWN_COUNT as usize);
    let entities = engine.world().len();

    engine.queue_command(PlayerCommand::StartScenario);
    let snapshot = engine.tick();
    assert_eq!(snapshot.enemies.len(), SPAWN_COUNT as usize);
    assert_eq!(engine.world().len(), entities);
}

#[test]
fn test_pose_pitch_clamped() {
    let (_, snapshot) = started(SimConfig::default(), player_start(), 0.5, 3.0);
    let player = snapshot.player.unwrap();
    assert_eq!(player.yaw, 0.5);
    assert_eq!(player.pitch, std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_pause_stops_time_and_ai() {
    let (mut engine, _) = started(SimConfig::default(), player_start(), 0.0, 0.0);
    for _ in 0..9 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);
    assert_eq!(paused.time.tick, 10);

    for _ in 0..30 {
        let snapshot = engine.tick();
        assert_eq!(snapshot.time, paused.time);
        assert_eq!(
            enemy(&snapshot, 0).unwrap().position,
            enemy(&paused, 0).unwrap().position
        );
    }

    engine.queue_command(PlayerCommand::TogglePause);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, 11);

    engine.queue_command(PlayerCommand::TogglePause);
    assert_eq!(engine.tick().phase, GamePhase::Paused);
}

// ---- Weapon ----

#[test]
fn test_shot_damages_enemy_without_mark() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartScenario,
        pose_at_enemy(player_start(), DVec3::ZERO),
        PlayerCommand::SetFireHeld { held: true },
    ]);
    let snapshot = engine.tick();

    let target = enemy(&snapshot, 0).unwrap();
    assert_eq!(target.health, 70);
    assert!((target.bar_width_fraction - 0.7).abs() < 1e-12);
    assert!((target.bar_width - 0.7 * HEALTH_BAR_FULL_WIDTH).abs() < 1e-12);
    assert_eq!(target.bar_alpha, 1.0);
    assert!(snapshot.marks.is_empty());
    assert_eq!(snapshot.weapon.state, WeaponState::Cooling);
    assert!(snapshot.weapon.muzzle_flash);
    assert_eq!(snapshot.audio_events.len(), 1);
    assert!(snapshot.combat_events.contains(&CombatEvent::EnemyDamaged {
        enemy_index: 0,
        amount: WEAPON_DAMAGE,
        remaining: 70,
    }));
    for other in snapshot.enemies.iter().filter(|e| e.index != 0) {
        assert_eq!(other.health, ENEMY_MAX_HEALTH);
    }
}

#[test]
fn test_cooldown_returns_to_ready() {
    let (mut engine, _) = started(SimConfig::default(), player_start(), PI, -FRAC_PI_4);
    engine.queue_commands([pose_at_ground(), PlayerCommand::SetFireHeld { held: true }]);
    let fired = engine.tick();
    assert_eq!(fired.weapon.state, WeaponState::Cooling);
    engine.queue_command(PlayerCommand::SetFireHeld { held: false });

    let cooldown_ticks = (WEAPON_COOLDOWN_SECS * TICK_RATE as f64).round() as u64;
    let ready_at = (0..30)
        .map(|_| engine.tick())
        .find(|s| s.weapon.state == WeaponState::Ready)
        .map(|s| s.time.tick)
        .unwrap();
    assert_eq!(ready_at, fired.time.tick + cooldown_ticks);
}

#[test]
fn test_held_fire_respects_cooldown() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartScenario,
        pose_at_ground(),
        PlayerCommand::SetFireHeld { held: true },
    ]);

    let mut shots = 0;
    let mut last = GameStateSnapshot::default();
    for _ in 0..TICK_RATE {
        last = engine.tick();
        shots += count_events(&last, |e| matches!(e, CombatEvent::ShotFired { .. }));
    }
    // Fires at ticks 1, 13 and 25.
    assert_eq!(shots, 3);
    assert_eq!(last.marks.len(), 3);
}

#[test]
fn test_ground_shot_leaves_expiring_mark() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartScenario,
        pose_at_ground(),
        PlayerCommand::SetFireHeld { held: true },
    ]);
    let fired = engine.tick();
    engine.queue_command(PlayerCommand::SetFireHeld { held: false });

    assert_eq!(fired.marks.len(), 1);
    let mark = &fired.marks[0];
    assert_eq!(mark.normal, DVec3::Y);
    assert!((mark.position - DVec3::new(0.0, MARK_SURFACE_OFFSET, -12.0)).length() < 1e-9);
    assert_eq!(
        count_events(&fired, |e| matches!(e, CombatEvent::MarkSpawned { .. })),
        1
    );

    let lifetime_ticks = (MARK_LIFETIME_SECS * TICK_RATE as f64).round() as u64;
    let mut expired_at = None;
    for _ in 0..lifetime_ticks + 5 {
        let snapshot = engine.tick();
        for e in &snapshot.enemies {
            assert_eq!(e.health, ENEMY_MAX_HEALTH);
        }
        if snapshot.marks.is_empty() && expired_at.is_none() {
            assert_eq!(
                count_events(&snapshot, |e| matches!(e, CombatEvent::MarkExpired { .. })),
                1
            );
            expired_at = Some(snapshot.time.tick);
        }
    }
    assert_eq!(expired_at, Some(fired.time.tick + lifetime_ticks));
}

#[test]
fn test_muzzle_flash_outlives_cooldown() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::StartScenario,
        pose_at_ground(),
        PlayerCommand::SetFireHeld { held: true },
    ]);
    let fired = engine.tick();
    engine.queue_command(PlayerCommand::SetFireHeld { held: false });

    let flash_ticks = (MUZZLE_FLASH_SECS * TICK_RATE as f64).round() as u64;
    let cooldown_ticks = (WEAPON_COOLDOWN_SECS * TICK_RATE as f64).round() as u64;
    for _ in 0..flash_ticks + 5 {
        let snapshot = engine.tick();
        let since = snapshot.time.tick - fired.time.tick;
        if since >= cooldown_ticks {
            assert_eq!(snapshot.weapon.state, WeaponState::Ready);
        }
        assert_eq!(snapshot.weapon.muzzle_flash, since < flash_ticks, "tick {since}");
    }
}

#[test]
fn test_four_shots_destroy_enemy_once() {
    let (mut engine, mut snapshot) = started(SimConfig::default(), player_start(), 0.0, 0.0);
    engine.queue_command(PlayerCommand::SetFireHeld { held: true });

    let mut damaged = 0;
    let mut destroyed = 0;
    for _ in 0..(3 * TICK_RATE) {
        if let Some(target) = enemy(&snapshot, 0) {
            engine.queue_command(pose_at_enemy(player_start(), target.position));
        }
        snapshot = engine.tick();
        damaged += count_events(&snapshot, |e| {
            matches!(e, CombatEvent::EnemyDamaged { enemy_index: 0, .. })
        });
        destroyed += count_events(&snapshot, |e| {
            matches!(e, CombatEvent::EnemyDestroyed { enemy_index: 0 })
        });
    }

    assert_eq!(damaged, 3);
    assert_eq!(destroyed, 1);
    assert!(enemy(&snapshot, 0).is_none());
    assert_eq!(snapshot.enemies.len(), SPAWN_COUNT as usize - 1);
}

// ---- Enemy AI ----

#[test]
fn test_dormant_enemies_idle_and_keep_bar() {
    let far = DVec3::new(100.0, 0.0, 0.0);
    let (mut engine, first) = started(SimConfig::default(), far, 0.0, 0.0);
    for e in &first.enemies {
        assert_eq!(e.ai_state, AiState::Dormant);
    }

    let target = enemy(&first, 4).unwrap().position;
    engine.queue_commands([
        pose_at_enemy(far, target),
        PlayerCommand::SetFireHeld { held: true },
    ]);
    let shot = engine.tick();
    engine.queue_command(PlayerCommand::SetFireHeld { held: false });
    assert_eq!(enemy(&shot, 4).unwrap().health, 70);

    let mut last = shot.clone();
    for _ in 0..TICK_RATE {
        last = engine.tick();
    }
    for (before, after) in first.enemies.iter().zip(&last.enemies) {
        assert_eq!(before.position, after.position);
        assert_eq!(before.yaw, after.yaw);
        assert_eq!(after.ai_state, AiState::Dormant);
    }
    assert_eq!(enemy(&last, 4).unwrap().bar_alpha, 1.0);
}

#[test]
fn test_tracking_enemy_pursues_player() {
    let (mut engine, first) = started(SimConfig::default(), player_start(), 0.0, 0.0);
    let start = enemy(&first, 0).unwrap();
    assert_eq!(start.ai_state, AiState::Tracking);
    assert!((start.yaw - PI).abs() < 1e-12);

    let mut last = first.clone();
    for _ in 1..TICK_RATE {
        last = engine.tick();
    }
    // One second at ENEMY_MOVE_SPEED along -z.
    let position = enemy(&last, 0).unwrap().position;
    assert!(position.x.abs() < 1e-6);
    assert!((position.z + ENEMY_MOVE_SPEED).abs() < 1e-6, "z = {}", position.z);
}

#[test]
fn test_tracking_bar_fades() {
    let (mut engine, _) = started(SimConfig::default(), player_start(), 0.0, 0.0);
    let mut last = GameStateSnapshot::default();
    for _ in 0..(2 * TICK_RATE) {
        last = engine.tick();
    }
    let e = enemy(&last, 0).unwrap();
    assert_eq!(e.health, ENEMY_MAX_HEALTH);
    assert_eq!(e.bar_alpha, 0.0);
}

#[test]
fn test_enemy_holds_at_melee_range() {
    let close = DVec3::new(0.0, 0.0, -1.5);
    let (mut engine, first) = started(SimConfig::default(), close, 0.0, 0.0);
    let start = enemy(&first, 0).unwrap().position;
    assert_eq!(start, DVec3::ZERO);

    let mut last = first.clone();
    for _ in 0..TICK_RATE {
        last = engine.tick();
    }
    let e = enemy(&last, 0).unwrap();
    assert_eq!(e.position, start);
    assert_eq!(e.ai_state, AiState::Tracking);
    assert!((e.yaw - PI).abs() < 1e-12);
}

#[test]
fn test_wall_blocks_pursuit() {
    let config = SimConfig {
        obstacles: vec![ObstacleConfig {
            center: DVec3::new(0.0, 1.5, -5.0),
            half_extents: DVec3::new(20.0, 1.5, 0.5),
        }],
        ..Default::default()
    };
    let (mut engine, first) = started(config, player_start(), 0.0, 0.0);

    let mut last = first.clone();
    for _ in 0..(2 * TICK_RATE) {
        last = engine.tick();
    }
    for (before, after) in first.enemies.iter().zip(&last.enemies) {
        assert_eq!(after.ai_state, AiState::Tracking);
        assert_eq!(before.position, after.position, "enemy {}", after.index);
    }
}

/// Ray query that never hits anything.
struct Void;

impl SpatialQuery for Void {
    fn cast(&self, _: &World, _: Ray, _: f64, _: &[Entity]) -> Option<RayHit> {
        None
    }
}

#[test]
fn test_custom_spatial_query() {
    let mut engine = SimulationEngine::new(SimConfig::default()).with_spatial_query(Void);
    engine.queue_commands([
        PlayerCommand::StartScenario,
        pose_at_ground(),
        PlayerCommand::SetFireHeld { held: true },
    ]);

    let first = engine.tick();
    assert!(first.marks.is_empty());
    assert!(matches!(
        first.combat_events.as_slice(),
        [CombatEvent::ShotFired { hit_point: None, .. }]
    ));

    let mut last = first.clone();
    for _ in 0..TICK_RATE {
        last = engine.tick();
    }
    // Nothing is ever in sight, so nobody moves.
    assert_eq!(
        enemy(&first, 0).unwrap().position,
        enemy(&last, 0).unwrap().position
    );
}
