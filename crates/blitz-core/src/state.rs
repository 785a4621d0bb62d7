//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, CombatEvent};
use crate::types::SimTime;

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// `None` before the scenario starts.
    pub player: Option<PlayerView>,
    pub weapon: WeaponView,
    /// Living enemies, ordered by spawn index.
    pub enemies: Vec<EnemyView>,
    pub marks: Vec<MarkView>,
    pub audio_events: Vec<AudioEvent>,
    pub combat_events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub state: WeaponState,
    pub muzzle_flash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub index: u32,
    pub position: DVec3,
    pub yaw: f64,
    pub ai_state: AiState,
    pub health: i32,
    pub max_health: i32,
    /// Health bar opacity in [0, 1].
    pub bar_alpha: f64,
    /// Health bar width as a fraction of full width.
    pub bar_width_fraction: f64,
    /// Health bar width in world units.
    pub bar_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkView {
    pub position: DVec3,
    pub normal: DVec3,
    pub expires_at_secs: f64,
}
