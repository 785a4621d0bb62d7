//! Per-tick elapsed time sources.

use std::time::Instant;

use blitz_core::constants::DT;

/// Supplies the time elapsed since the previous tick.
pub trait Clock {
    /// Seconds since the last call. Called exactly once per active tick.
    fn elapsed_since_last_tick(&mut self) -> f64;

    /// Start measuring from now. Called when the simulation (re)enters
    /// the active phase.
    fn restart(&mut self) {}
}

/// Constant step. Deterministic; the default for the engine.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    pub step_secs: f64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self { step_secs: DT }
    }
}

impl Clock for FixedStepClock {
    fn elapsed_since_last_tick(&mut self) -> f64 {
        self.step_secs
    }
}

/// Real elapsed time, measured with `Instant`. The first call reports the
/// time since construction.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn elapsed_since_last_tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        elapsed
    }

    fn restart(&mut self) {
        self.last = Instant::now();
    }
}
