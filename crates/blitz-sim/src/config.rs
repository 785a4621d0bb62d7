//! Scenario configuration.
//!
//! Every field has a default matching the stock sandbox, so a JSON file
//! only needs to name what it changes.

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use blitz_core::components::EnemyProfile;
use blitz_core::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Player weapon tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub damage: i32,
    pub range: f64,
    pub cooldown_secs: f64,
    pub muzzle_flash_secs: f64,
    pub mark_lifetime_secs: f64,
    pub mark_offset: f64,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            damage: WEAPON_DAMAGE,
            range: WEAPON_RANGE,
            cooldown_secs: WEAPON_COOLDOWN_SECS,
            muzzle_flash_secs: MUZZLE_FLASH_SECS,
            mark_lifetime_secs: MARK_LIFETIME_SECS,
            mark_offset: MARK_SURFACE_OFFSET,
        }
    }
}

/// Enemy placement at scenario start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: u32,
    /// Distance between enemies along the x axis.
    pub spacing: f64,
    /// Maximum random z offset per enemy. 0 places every enemy on z = 0.
    pub jitter: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: SPAWN_COUNT,
            spacing: SPAWN_SPACING,
            jitter: 0.0,
        }
    }
}

/// A static box blocking shots and sight lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub center: DVec3,
    pub half_extents: DVec3,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub enemy: EnemyProfile,
    pub enemy_max_health: i32,
    pub weapon: WeaponTuning,
    pub spawn: SpawnConfig,
    pub player_start: DVec3,
    pub obstacles: Vec<ObstacleConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            enemy: EnemyProfile::default(),
            enemy_max_health: ENEMY_MAX_HEALTH,
            weapon: WeaponTuning::default(),
            spawn: SpawnConfig::default(),
            player_start: DVec3::from_array(PLAYER_START),
            obstacles: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the combat systems treat as caller contract violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.enemy_max_health <= 0 {
            return invalid(format!(
                "enemy_max_health must be positive, got {}",
                self.enemy_max_health
            ));
        }
        if self.weapon.damage <= 0 {
            return invalid(format!(
                "weapon.damage must be positive, got {}",
                self.weapon.damage
            ));
        }
        if self.enemy.aggro_radius <= 0.0 || self.enemy.melee_radius < 0.0 {
            return invalid("enemy radii must be positive".into());
        }
        if self.enemy.melee_radius >= self.enemy.aggro_radius {
            return invalid(format!(
                "enemy.melee_radius ({}) must be smaller than enemy.aggro_radius ({})",
                self.enemy.melee_radius, self.enemy.aggro_radius
            ));
        }
        if self.enemy.move_speed < 0.0 || self.enemy.sight_range <= 0.0 {
            return invalid(
                "enemy move_speed must not be negative and sight_range must be positive".into(),
            );
        }
        let w = &self.weapon;
        if w.range <= 0.0
            || w.cooldown_secs < 0.0
            || w.muzzle_flash_secs < 0.0
            || w.mark_lifetime_secs < 0.0
            || w.mark_offset < 0.0
        {
            return invalid("weapon range must be positive and durations non-negative".into());
        }
        if self.spawn.spacing < 0.0 || self.spawn.jitter < 0.0 {
            return invalid("spawn spacing and jitter must not be negative".into());
        }
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if obstacle.half_extents.min_element() <= 0.0 {
                return invalid(format!("obstacle {i} has a non-positive half extent"));
            }
        }
        Ok(())
    }
}
