//! Events emitted by the simulation for audio and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::Waveform;

/// Fire-and-forget sound cues for the host's audio synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Weapon discharge.
    Gunshot {
        /// (time, amplitude) pairs shaping the sound.
        envelope: Vec<(f64, f64)>,
        volume: f64,
        wave: Waveform,
        /// Starting pitch (semitones).
        pitch: f64,
        /// Pitch glide over the sound's duration (semitones).
        pitch_change: f64,
        /// Playback speed multiplier.
        speed: f64,
    },
}

/// Gameplay events for UI feedback and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// The player's weapon fired. `hit_point` is `None` on a miss.
    ShotFired {
        origin: DVec3,
        direction: DVec3,
        hit_point: Option<DVec3>,
    },
    /// An enemy took damage and survived.
    EnemyDamaged {
        enemy_index: u32,
        amount: i32,
        remaining: i32,
    },
    /// An enemy's health was depleted and it was removed from the world.
    EnemyDestroyed { enemy_index: u32 },
    /// A decorative mark was placed on a non-damageable surface.
    MarkSpawned { position: DVec3, normal: DVec3 },
    /// A decorative mark reached the end of its lifetime.
    MarkExpired { position: DVec3 },
}
