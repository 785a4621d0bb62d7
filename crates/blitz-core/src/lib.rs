//! Core types and definitions for the BLITZ combat sandbox.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the health state machine, commands, state snapshots,
//! events, and constants. It has no dependency on the ECS runtime or
//! any host engine.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod health;
pub mod state;
pub mod types;
