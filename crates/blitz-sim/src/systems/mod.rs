//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only). Timing state lives in components and the scheduler.

pub mod enemy_ai;
pub mod scheduled;
pub mod snapshot;
pub mod weapon;
