//! Ray queries against the world.
//!
//! `SpatialQuery` is the host-replaceable seam; `ColliderQuery` is the
//! built-in implementation, testing rays against every entity's
//! axis-aligned `Collider` with the slab method.

use glam::DVec3;
use hecs::{Entity, World};

use blitz_core::components::{Collider, Transform};
use blitz_core::types::Ray;

/// Nearest blocking surface struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: DVec3,
    /// Unit outward normal of the struck face.
    pub normal: DVec3,
    pub distance: f64,
    /// The struck entity, if the surface belongs to one.
    pub entity: Option<Entity>,
}

/// Ray intersection service.
pub trait SpatialQuery {
    /// Cast `ray` up to `max_distance`, ignoring `excluded` entities.
    /// `None` means nothing was hit.
    fn cast(
        &self,
        world: &World,
        ray: Ray,
        max_distance: f64,
        excluded: &[Entity],
    ) -> Option<RayHit>;
}

/// Ray casts against `Transform + Collider` entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColliderQuery;

impl SpatialQuery for ColliderQuery {
    fn cast(
        &self,
        world: &World,
        ray: Ray,
        max_distance: f64,
        excluded: &[Entity],
    ) -> Option<RayHit> {
        let dir = ray.direction.normalize_or_zero();
        if dir == DVec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let mut closest: Option<RayHit> = None;
        let mut query = world.query::<(&Transform, &Collider)>();
        for (entity, (transform, collider)) in query.iter() {
            if excluded.contains(&entity) {
                continue;
            }
            let (min, max) = collider.bounds(transform.position);
            let Some((distance, normal)) = ray_aabb(ray.origin, dir, min, max, max_distance)
            else {
                continue;
            };
            if closest.is_some_and(|c| c.distance <= distance) {
                continue;
            }
            closest = Some(RayHit {
                point: ray.origin + dir * distance,
                normal,
                distance,
                entity: Some(entity),
            });
        }
        closest
    }
}

/// Ray-AABB intersection (slab method). `dir` must be normalized.
///
/// Returns the hit distance and the outward normal of the face hit. A ray
/// starting inside the box reports the face it exits through.
pub fn ray_aabb(
    origin: DVec3,
    dir: DVec3,
    min: DVec3,
    max: DVec3,
    max_distance: f64,
) -> Option<(f64, DVec3)> {
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut enter_axis = 0;
    let mut exit_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-12 {
            // Parallel to this slab: must already be within it.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let t1 = (min[axis] - o) * inv;
        let t2 = (max[axis] - o) * inv;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            enter_axis = axis;
        }
        if far < t_exit {
            t_exit = far;
            exit_axis = axis;
        }
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }

    let (t, axis, sign) = if t_enter >= 0.0 {
        (t_enter, enter_axis, -dir[enter_axis].signum())
    } else {
        (t_exit, exit_axis, dir[exit_axis].signum())
    };
    if t > max_distance {
        return None;
    }

    let mut normal = DVec3::ZERO;
    normal[axis] = sign;
    Some((t, normal))
}
