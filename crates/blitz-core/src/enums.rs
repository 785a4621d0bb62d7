//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy AI state, re-evaluated every tick from the planar distance to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Beyond the aggro radius. Nothing is processed; state is preserved.
    #[default]
    Dormant,
    /// Within the aggro radius: facing, sight checks, pursuit.
    Tracking,
}

/// Player weapon fire state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponState {
    #[default]
    Ready,
    /// Recently fired; the trigger is ignored until the cooldown elapses.
    Cooling,
}

/// Oscillator shape for synthesized sound cues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    #[default]
    Noise,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, scenario not started yet.
    #[default]
    Setup,
    Active,
    Paused,
}
