//! Run controller - lifecycle state machine
//!
//! Idle -> Active -> Ended -> (restart) Active, or Ended -> Idle via the
//! menu. Binds a `RunState` to its random source and clock so drivers only
//! pass `dt` and input each frame.

use rand_pcg::Pcg32;
use thiserror::Error;

use super::clock::{Clock, SystemClock};
use super::difficulty::Difficulty;
use super::random::{RandomSource, seeded};
use super::snapshot::RunSnapshot;
use super::state::{RunEvent, RunPhase, RunState, RunSummary};
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Lifecycle actions a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Start,
    Tick,
    ReturnToMenu,
}

/// Lifecycle misuse. Returning one never changes the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("cannot {action:?} while the run is {from:?}")]
    InvalidTransition { from: RunPhase, action: RunAction },
}

/// Owns one run plus the sources it draws randomness and time from
#[derive(Debug)]
pub struct RunController<R = Pcg32, C = SystemClock> {
    state: RunState,
    rng: R,
    clock: C,
}

impl RunController<Pcg32, SystemClock> {
    /// Seeded PCG on the system clock
    pub fn new(seed: u64) -> Self {
        Self::with_sources(Tuning::default(), seeded(seed), SystemClock::new())
    }

    /// Fresh random seed on the system clock
    pub fn unseeded() -> Self {
        Self::new(rand::random())
    }
}

impl<R: RandomSource, C: Clock> RunController<R, C> {
    pub fn with_sources(tuning: Tuning, rng: R, clock: C) -> Self {
        Self {
            state: RunState::new(tuning),
            rng,
            clock,
        }
    }

    /// Reset everything and begin a run (valid from Idle or Ended)
    pub fn start(&mut self, difficulty: Difficulty, theme: impl Into<String>) -> Result<(), RunError> {
        self.check(RunAction::Start, &[RunPhase::Idle, RunPhase::Ended])?;
        let now = self.clock.now_secs();
        self.state.begin(difficulty, theme.into(), now);
        Ok(())
    }

    /// Advance the run by one frame (valid only while Active)
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> Result<(), RunError> {
        self.check(RunAction::Tick, &[RunPhase::Active])?;
        let now = self.clock.now_secs();
        tick(&mut self.state, input, dt, now, &mut self.rng);
        Ok(())
    }

    /// Leave the game-over screen (valid only when Ended)
    pub fn return_to_menu(&mut self) -> Result<(), RunError> {
        self.check(RunAction::ReturnToMenu, &[RunPhase::Ended])?;
        self.state.phase = RunPhase::Idle;
        Ok(())
    }

    fn check(&self, action: RunAction, allowed: &[RunPhase]) -> Result<(), RunError> {
        if allowed.contains(&self.state.phase) {
            return Ok(());
        }
        log::warn!("Rejected {:?} while {:?}", action, self.state.phase);
        Err(RunError::InvalidTransition {
            from: self.state.phase,
            action,
        })
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Frozen result, once the run has ended
    pub fn summary(&self) -> Option<&RunSummary> {
        self.state.summary.as_ref()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot::capture(&self.state)
    }

    /// Take events queued since the last call
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        self.state.drain_events()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
