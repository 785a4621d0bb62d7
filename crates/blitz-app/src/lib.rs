//! BLITZ host driver.
//!
//! Runs the simulation engine on its own thread at the fixed tick rate
//! and exposes a command channel plus the latest snapshot to callers.

pub mod game_loop;
pub mod state;

pub use blitz_core as core;
