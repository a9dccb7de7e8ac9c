//! Simulation module
//!
//! All gameplay logic lives here. This module must stay presentation-free:
//! - Single owned `RunState`, mutated only inside `tick`
//! - Randomness and time come from injected sources
//! - No rendering, audio or DOM dependencies; adapters read snapshots and events

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod physics;
pub mod random;
pub mod run;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{ObstacleContact, obstacle_contact, padded_overlap, rects_overlap};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use effects::PowerUpTimers;
pub use random::{RandomSource, SequenceSource};
pub use run::{RunAction, RunController, RunError};
pub use snapshot::RunSnapshot;
pub use spawn::SpawnPolicy;
pub use state::{
    Obstacle, ObstacleKind, Player, PowerUp, PowerUpKind, Rect, RunEvent, RunPhase, RunState,
    RunSummary,
};
pub use tick::{TickInput, tick};
