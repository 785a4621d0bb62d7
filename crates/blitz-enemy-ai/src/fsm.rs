//! Enemy behavior finite state machine.
//!
//! Pure functions that compute the AI state, facing and pursuit step for
//! one enemy from plain data. No ECS dependency and no ray casting: the
//! caller casts the sight ray described by [`Orientation`] and feeds the
//! result back into [`steer`].

use glam::DVec3;

use blitz_core::components::EnemyProfile;
use blitz_core::enums::AiState;
use blitz_core::types::{forward_from_yaw, planar_distance, yaw_towards};

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext {
    pub profile: EnemyProfile,
    pub position: DVec3,
    pub target: DVec3,
}

impl EnemyContext {
    pub fn planar_distance(&self) -> f64 {
        planar_distance(self.position, self.target)
    }
}

/// Facing and sight ray for a tracking enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    /// Unit forward vector after turning.
    pub forward: DVec3,
    /// Origin of the sight ray.
    pub eye: DVec3,
}

/// Dormant beyond the aggro radius, Tracking at or inside it.
pub fn classify(planar_distance: f64, profile: &EnemyProfile) -> AiState {
    if planar_distance > profile.aggro_radius {
        AiState::Dormant
    } else {
        AiState::Tracking
    }
}

/// Turn to face the target on the horizontal plane (yaw only).
pub fn orient(ctx: &EnemyContext) -> Orientation {
    let yaw = yaw_towards(ctx.position, ctx.target);
    Orientation {
        yaw,
        forward: forward_from_yaw(yaw),
        eye: ctx.position + DVec3::new(0.0, ctx.profile.head_height, 0.0),
    }
}

/// Displacement for this tick.
///
/// Advances along `forward` only when the sight ray's first hit was the
/// target and the enemy is still outside melee range; otherwise stays put.
pub fn steer(
    ctx: &EnemyContext,
    orientation: &Orientation,
    target_in_sight: bool,
    dt: f64,
) -> DVec3 {
    if !target_in_sight || ctx.planar_distance() <= ctx.profile.melee_radius {
        return DVec3::ZERO;
    }
    orientation.forward * ctx.profile.move_speed * dt
}
