//! Power-up timers
//!
//! Invincibility and the score multiplier are two independent countdowns.
//! Collecting a power-up resets its countdown to the full duration; it
//! never stacks.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;
use crate::consts::*;

/// Which timers ran out during a countdown step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub invincibility: bool,
    pub multiplier: bool,
}

/// Active power-up effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub invincible: bool,
    pub invincibility_remaining: f32,
    /// 1 normally, `BOOSTED_MULTIPLIER` while boosted
    pub multiplier: u32,
    pub multiplier_remaining: f32,
}

impl Default for PowerUpTimers {
    fn default() -> Self {
        Self {
            invincible: false,
            invincibility_remaining: 0.0,
            multiplier: 1,
            multiplier_remaining: 0.0,
        }
    }
}

impl PowerUpTimers {
    /// Apply a collected power-up
    pub fn grant(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Invincibility => {
                self.invincible = true;
                self.invincibility_remaining = INVINCIBILITY_SECS;
            }
            PowerUpKind::Multiplier => {
                self.multiplier = BOOSTED_MULTIPLIER;
                self.multiplier_remaining = MULTIPLIER_SECS;
            }
        }
    }

    /// Count both timers down by `dt`
    pub fn tick(&mut self, dt: f32) -> Expired {
        let mut expired = Expired::default();

        if self.invincible {
            self.invincibility_remaining -= dt;
            if self.invincibility_remaining <= TIMER_EPSILON {
                self.invincible = false;
                self.invincibility_remaining = 0.0;
                expired.invincibility = true;
            }
        }

        if self.multiplier > 1 {
            self.multiplier_remaining -= dt;
            if self.multiplier_remaining <= TIMER_EPSILON {
                self.multiplier = 1;
                self.multiplier_remaining = 0.0;
                expired.multiplier = true;
            }
        }

        expired
    }

    /// Factor applied to every score increment
    #[inline]
    pub fn score_factor(&self) -> f32 {
        self.multiplier as f32
    }
}
