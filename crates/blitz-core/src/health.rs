//! Health and damage state machine.
//!
//! `apply_damage` is the only mutator of `current`. It validates the
//! amount, subtracts, and makes the destroy decision in one step; the
//! caller removes the owning entity when it sees
//! [`DamageOutcome::Destroyed`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::HEALTH_BAR_FADE_RATE;

/// Result of a successful `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still alive with `remaining` health.
    Damaged { remaining: i32 },
    /// Health reached zero or below. The owner must be destroyed now.
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HealthError {
    #[error("damage must be positive, got {0}")]
    NonPositiveDamage(i32),
    #[error("health was already depleted")]
    AlreadyDestroyed,
}

/// Hit points plus the health bar's visual state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
    /// Health bar opacity in [0, 1].
    bar_alpha: f64,
    /// Health bar width as a fraction of full width, in [0, 1].
    bar_width: f64,
}

impl Health {
    /// Full health with a fully visible, full-width bar.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            bar_alpha: 1.0,
            bar_width: 1.0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn bar_alpha(&self) -> f64 {
        self.bar_alpha
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Subtract `amount` and decide whether the owner survives.
    ///
    /// A surviving owner gets a fully visible bar scaled to `current / max`.
    /// Rejected calls leave the state untouched.
    pub fn apply_damage(&mut self, amount: i32) -> Result<DamageOutcome, HealthError> {
        if amount <= 0 {
            return Err(HealthError::NonPositiveDamage(amount));
        }
        if self.is_depleted() {
            return Err(HealthError::AlreadyDestroyed);
        }

        self.current = self.current.saturating_sub(amount);
        if self.current <= 0 {
            return Ok(DamageOutcome::Destroyed);
        }

        self.bar_alpha = 1.0;
        self.bar_width = (self.current as f64 / self.max as f64).clamp(0.0, 1.0);
        Ok(DamageOutcome::Damaged {
            remaining: self.current,
        })
    }

    /// Fade the health bar by `dt` seconds. Hit points are unaffected.
    pub fn tick(&mut self, dt: f64) {
        self.bar_alpha = (self.bar_alpha - dt * HEALTH_BAR_FADE_RATE).max(0.0);
    }
}
