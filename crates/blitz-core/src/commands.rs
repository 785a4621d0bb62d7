//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Input ---
    /// Continuous primary-fire signal. Stays latched until changed.
    SetFireHeld { held: bool },
    /// Player position (feet) and view orientation, written by the host's
    /// movement and camera controllers.
    SetPlayerPose { position: DVec3, yaw: f64, pitch: f64 },

    // --- Simulation control ---
    /// Spawn the scenario and start the simulation.
    StartScenario,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Pause if active, resume if paused.
    TogglePause,
}
