//! Snapshot system: builds a GameStateSnapshot from the ECS world.

use hecs::{Entity, World};

use blitz_core::components::*;
use blitz_core::constants::HEALTH_BAR_FULL_WIDTH;
use blitz_core::enums::GamePhase;
use blitz_core::events::{AudioEvent, CombatEvent};
use blitz_core::state::*;
use blitz_core::types::SimTime;

/// Build a complete snapshot of the current game state.
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    phase: GamePhase,
    player: Option<Entity>,
    audio_events: Vec<AudioEvent>,
    combat_events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    let (player_view, weapon_view) = match player {
        Some(player) => build_player(world, player),
        None => (None, WeaponView::default()),
    };

    GameStateSnapshot {
        time,
        phase,
        player: player_view,
        weapon: weapon_view,
        enemies: build_enemies(world),
        marks: build_marks(world),
        audio_events,
        combat_events,
    }
}

fn build_player(world: &World, player: Entity) -> (Option<PlayerView>, WeaponView) {
    let Ok(mut query) = world.query_one::<(&Transform, &Player, &Weapon)>(player) else {
        return (None, WeaponView::default());
    };
    match query.get() {
        Some((transform, rig, weapon)) => (
            Some(PlayerView {
                position: transform.position,
                yaw: transform.yaw,
                pitch: rig.pitch,
            }),
            WeaponView {
                state: weapon.state,
                muzzle_flash: weapon.muzzle_flash,
            },
        ),
        None => (None, WeaponView::default()),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Transform, &Health)>()
        .iter()
        .map(|(_, (enemy, transform, health))| EnemyView {
            index: enemy.index,
            position: transform.position,
            yaw: transform.yaw,
            ai_state: enemy.state,
            health: health.current(),
            max_health: health.max(),
            bar_alpha: health.bar_alpha(),
            bar_width_fraction: health.bar_width(),
            bar_width: health.bar_width() * HEALTH_BAR_FULL_WIDTH,
        })
        .collect();
    enemies.sort_by_key(|e| e.index);
    enemies
}

fn build_marks(world: &World) -> Vec<MarkView> {
    let mut marks: Vec<MarkView> = world
        .query::<(&DecorativeMark, &Transform)>()
        .iter()
        .map(|(_, (mark, transform))| MarkView {
            position: transform.position,
            normal: mark.normal,
            expires_at_secs: mark.expires_at_secs,
        })
        .collect();
    marks.sort_by(|a, b| a.expires_at_secs.total_cmp(&b.expires_at_secs));
    marks
}
