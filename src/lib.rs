//! Dash Runner - an endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, power-ups, run lifecycle)
//! - `tuning`: Data-driven play-field and player physics
//! - `records`: Best score / best time comparison

pub mod records;
pub mod sim;
pub mod tuning;

pub use records::{BestRecords, RecordUpdate};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Maximum simulation step; longer frames are clamped to this
    pub const MAX_DT: f32 = 0.05;
    /// Timers at or below this many seconds count as expired
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Play-field defaults
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 360.0;
    /// Distance from the bottom of the field to the ground line
    pub const GROUND_INSET: f32 = 48.0;

    /// Player defaults
    pub const PLAYER_LANE_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1400.0;
    /// Upward velocity applied on jump (pixels/s)
    pub const JUMP_POWER: f32 = 480.0;
    /// Seconds per run-cycle frame while grounded
    pub const RUN_FRAME_SECS: f32 = 0.12;

    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 60.0;
    /// Entities are culled once their right edge passes this x
    pub const CULL_X: f32 = -50.0;

    /// Obstacle spawn rules
    pub const OBSTACLE_CHANCE: f32 = 0.85;
    pub const OBSTACLE_KIND_COUNT: u8 = 3;
    pub const OBSTACLE_MIN_WIDTH: f32 = 40.0;
    pub const OBSTACLE_WIDTH_RANGE: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 220.0;
    pub const OBSTACLE_SPEED_JITTER: f32 = 0.2;

    /// Power-up spawn rules
    pub const INVINCIBILITY_CHANCE: f32 = 0.6;
    pub const POWER_UP_SIZE: f32 = 40.0;
    /// Height of a power-up's top edge above the ground line
    pub const POWER_UP_ELEVATION: f32 = 130.0;
    pub const POWER_UP_SPEED: f32 = 160.0;
    /// Out-of-band power-up roll interval (seconds of run time)
    pub const BONUS_SPAWN_INTERVAL_SECS: f64 = 8.0;
    pub const BONUS_SPAWN_CHANCE: f32 = 0.5;

    /// Collision boxes shrink by this much on every side
    pub const COLLISION_PADDING: f32 = 6.0;

    /// Power-up durations (seconds)
    pub const INVINCIBILITY_SECS: f32 = 5.0;
    pub const MULTIPLIER_SECS: f32 = 8.0;
    pub const BOOSTED_MULTIPLIER: u32 = 2;

    /// Continuous score per second at multiplier 1
    pub const SCORE_PER_SEC: f32 = 12.0;
    /// Bonus for smashing an obstacle at multiplier 1
    pub const SMASH_BONUS: f32 = 20.0;

    /// Autopilot lead on top of the time it takes to rise clear of an obstacle
    pub const AUTOPILOT_REACTION_SECS: f32 = 0.02;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 1024;
}
