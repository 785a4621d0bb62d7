//! ECS components for hecs entities.
//!
//! Components are plain data. Capabilities are expressed by which
//! components an entity carries (a `Damageable` tag plus `Health`, an
//! `Enemy` behavior, a `Collider`), never by type hierarchy. `Health`
//! is the one component with behavior of its own; see [`crate::health`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AiState, WeaponState};
use crate::types::forward_from_yaw;

pub use crate::health::Health;

/// World placement. Orientation is yaw-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    /// Rotation around the y axis (radians, 0 = +Z).
    pub yaw: f64,
}

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Unit forward vector on the horizontal plane.
    pub fn forward(&self) -> DVec3 {
        forward_from_yaw(self.yaw)
    }
}

/// Axis-aligned collision box, centered at `position + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub offset: DVec3,
    pub half_extents: DVec3,
}

impl Collider {
    /// World-space (min, max) corners for an entity at `position`.
    pub fn bounds(&self, position: DVec3) -> (DVec3, DVec3) {
        let center = position + self.offset;
        (center - self.half_extents, center + self.half_extents)
    }
}

/// Marks the player rig. The view (camera) pitch lives here; yaw is on the Transform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player {
    pub pitch: f64,
}

/// Player weapon.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Weapon {
    pub state: WeaponState,
    pub muzzle_flash: bool,
}

/// Per-enemy tuning, fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub aggro_radius: f64,
    pub melee_radius: f64,
    pub move_speed: f64,
    pub sight_range: f64,
    pub head_height: f64,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            aggro_radius: ENEMY_AGGRO_RADIUS,
            melee_radius: ENEMY_MELEE_RADIUS,
            move_speed: ENEMY_MOVE_SPEED,
            sight_range: ENEMY_SIGHT_RANGE,
            head_height: ENEMY_HEAD_HEIGHT,
        }
    }
}

/// Hostile behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Spawn index, stable for the enemy's lifetime.
    pub index: u32,
    pub state: AiState,
    pub profile: EnemyProfile,
}

/// Capability tag: shots that strike this entity apply damage to its `Health`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Damageable;

/// Ground, walls and other level geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaticGeometry;

/// Purely visual mark left where a shot struck a non-damageable surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecorativeMark {
    /// Outward surface normal the mark faces along.
    pub normal: DVec3,
    pub spawned_at_secs: f64,
    pub expires_at_secs: f64,
}
