//! Simulation engine for BLITZ.
//!
//! Owns the hecs ECS world, runs the combat systems once per tick,
//! and produces GameStateSnapshots for the host.

pub mod clock;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use blitz_core as core;
pub use config::SimConfig;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
