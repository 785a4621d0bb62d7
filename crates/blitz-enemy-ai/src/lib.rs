//! Enemy AI for BLITZ.
//!
//! Implements the per-enemy Dormant/Tracking state machine and
//! reactive pursuit steering.

pub mod fsm;

pub use blitz_core as core;
