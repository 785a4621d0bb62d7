//! Fundamental geometric and simulation types.
//!
//! World space is y-up. Yaw is measured around the y axis, with yaw 0
//! facing +Z and positive yaw turning toward +X. Pitch is positive upward.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Accumulated simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt.max(0.0);
    }
}

/// A ray in world space. The direction need not be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }
}

/// Horizontal (xz-plane) distance between two points, ignoring height.
pub fn planar_distance(a: DVec3, b: DVec3) -> f64 {
    DVec2::new(b.x - a.x, b.z - a.z).length()
}

/// Yaw that faces from `from` toward `to` on the horizontal plane.
/// Returns 0 when the points coincide horizontally.
pub fn yaw_towards(from: DVec3, to: DVec3) -> f64 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    dx.atan2(dz)
}

/// Unit forward vector on the horizontal plane for a yaw.
pub fn forward_from_yaw(yaw: f64) -> DVec3 {
    DVec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Unit view direction for a yaw and pitch.
pub fn look_direction(yaw: f64, pitch: f64) -> DVec3 {
    let (sin_p, cos_p) = pitch.sin_cos();
    DVec3::new(yaw.sin() * cos_p, sin_p, yaw.cos() * cos_p)
}

/// Yaw and pitch that aim from `from` at `to`.
pub fn aim_angles(from: DVec3, to: DVec3) -> (f64, f64) {
    let delta = to - from;
    let horizontal = DVec2::new(delta.x, delta.z).length();
    let yaw = yaw_towards(from, to);
    let pitch = delta.y.atan2(horizontal);
    (yaw, pitch)
}
