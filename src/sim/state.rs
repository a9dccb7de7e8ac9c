//! Run state and entity types
//!
//! `RunState` is the single mutable aggregate of the simulation. It owns
//! the player, every obstacle and power-up, the power-up timers and the
//! spawn timers. Presentation layers read it through `RunSnapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};
use super::effects::PowerUpTimers;
use super::spawn::SpawnPolicy;
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Not started, or returned to the menu
    Idle,
    /// Simulation ticking
    Active,
    /// Run over, final score frozen
    Ended,
}

/// Axis-aligned box, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x stays on the lane for the whole run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, downward positive
    pub vy: f32,
    pub gravity: f32,
    pub jump_power: f32,
    /// `pos.y` while standing on the ground
    pub rest_y: f32,
    /// Set exactly when `pos.y == rest_y`
    pub on_ground: bool,
    /// Sprite frame: 0/1 running, 2 rising, 3 falling
    pub frame: u8,
    /// Seconds since the last run-cycle frame change
    #[serde(skip)]
    pub frame_timer: f32,
}

impl Player {
    /// A player standing on the ground at the lane position
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::new(tuning.player_lane_x, 0.0),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            gravity: tuning.gravity,
            jump_power: tuning.jump_power,
            rest_y: tuning.player_rest_y(),
            on_ground: true,
            frame: 0,
            frame_timer: 0.0,
        };
        player.place_on_ground();
        player
    }

    /// Snap feet to the ground line and stop vertical motion
    pub fn place_on_ground(&mut self) {
        self.pos.y = self.rest_y;
        self.vy = 0.0;
        self.on_ground = true;
    }

    /// Y of the bottom edge
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Cosmetic obstacle variant (1..=3), no gameplay effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleKind(u8);

impl ObstacleKind {
    /// Clamp into the valid range
    pub fn new(index: u8) -> Self {
        Self(index.clamp(1, OBSTACLE_KIND_COUNT))
    }

    pub fn index(&self) -> u8 {
        self.0
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (pixels/s)
    pub speed: f32,
    pub kind: ObstacleKind,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
    Multiplier,
}

/// A floating power-up scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
}

/// Shared movement for everything that scrolls left
pub trait Scrolling {
    fn bounds(&self) -> Rect;
    fn scroll(&mut self, dt: f32);

    /// Fully past the left edge
    fn is_off_field(&self) -> bool {
        self.bounds().right() < CULL_X
    }
}

impl Scrolling for Obstacle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn scroll(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
    }
}

impl Scrolling for PowerUp {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn scroll(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
    }
}

/// Final result of a run, frozen when it ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Floored score
    pub final_score: u64,
    pub elapsed_secs: f32,
    pub difficulty: Difficulty,
}

/// Things that happened during a tick, for audio/UI adapters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunEvent {
    Started { difficulty: Difficulty },
    Jumped,
    ObstacleSpawned { id: u32 },
    /// `bonus` marks the out-of-band periodic spawn
    PowerUpSpawned { id: u32, kind: PowerUpKind, bonus: bool },
    ObstacleSmashed { id: u32, bonus: f32 },
    PowerUpCollected { id: u32, kind: PowerUpKind },
    InvincibilityExpired,
    MultiplierExpired,
    Ended(RunSummary),
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    /// Opaque presentation tag, carried through untouched
    pub theme: String,
    pub phase: RunPhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub effects: PowerUpTimers,
    pub spawner: SpawnPolicy,
    /// Unfloored score
    pub score: f32,
    pub elapsed_secs: f32,
    /// Clock reading captured at `begin`
    pub started_at: f64,
    /// Set once the run ends
    pub summary: Option<RunSummary>,
    /// Pending events. Drivers drain these every frame; past
    /// `MAX_PENDING_EVENTS` the oldest are dropped.
    #[serde(skip)]
    pub events: Vec<RunEvent>,
    next_id: u32,
}

impl RunState {
    /// An idle run waiting for `begin`
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        Self {
            tuning,
            difficulty: Difficulty::default(),
            theme: String::new(),
            phase: RunPhase::Idle,
            player,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            effects: PowerUpTimers::default(),
            spawner: SpawnPolicy::new(),
            score: 0.0,
            elapsed_secs: 0.0,
            started_at: 0.0,
            summary: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Full reset into a fresh Active run
    pub fn begin(&mut self, difficulty: Difficulty, theme: String, now_secs: f64) {
        self.difficulty = difficulty;
        self.theme = theme;
        self.phase = RunPhase::Active;
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.power_ups.clear();
        self.effects = PowerUpTimers::default();
        self.spawner.reset();
        self.score = 0.0;
        self.elapsed_secs = 0.0;
        self.started_at = now_secs;
        self.summary = None;
        self.events.clear();
        self.push_event(RunEvent::Started { difficulty });
        log::info!("Run started: difficulty={}, theme={:?}", difficulty.as_str(), self.theme);
    }

    /// Freeze the result and move to Ended
    pub fn end(&mut self, now_secs: f64) {
        if self.phase != RunPhase::Active {
            return;
        }
        self.update_elapsed(now_secs);
        let summary = RunSummary {
            final_score: self.display_score(),
            elapsed_secs: self.elapsed_secs,
            difficulty: self.difficulty,
        };
        log::info!(
            "Run ended: score={}, time={:.1}s",
            summary.final_score,
            summary.elapsed_secs
        );
        self.phase = RunPhase::Ended;
        self.summary = Some(summary.clone());
        self.push_event(RunEvent::Ended(summary));
    }

    /// Recompute elapsed time from the start timestamp
    pub fn update_elapsed(&mut self, now_secs: f64) {
        let elapsed = (now_secs - self.started_at).max(0.0) as f32;
        self.elapsed_secs = self.elapsed_secs.max(elapsed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Integer score shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Queue an event, dropping the oldest when the driver isn't draining
    pub fn push_event(&mut self, event: RunEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let overflow = self.events.len() + 1 - MAX_PENDING_EVENTS;
            self.events.drain(..overflow);
            log::warn!("Event queue full, dropped {} oldest event(s)", overflow);
        }
        self.events.push(event);
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_with_grounded_player() {
        let state = RunState::new(Tuning::default());
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.player.pos, Vec2::new(80.0, 264.0));
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_begin_resets_everything() {
        let mut state = RunState::new(Tuning::default());
        state.score = 99.0;
        state.player.pos.y = 100.0;
        state.player.vy = -300.0;
        state.effects.grant(PowerUpKind::Multiplier);
        state.obstacles.push(Obstacle {
            id: 1,
            pos: Vec2::new(300.0, 272.0),
            size: Vec2::new(50.0, 40.0),
            speed: 220.0,
            kind: ObstacleKind::new(2),
        });

        state.begin(Difficulty::Hard, "school".into(), 12.0);

        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.player.pos.y, 264.0);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.effects.multiplier, 1);
        assert_eq!(state.started_at, 12.0);
        assert_eq!(state.theme, "school");
        assert_eq!(
            state.drain_events(),
            vec![RunEvent::Started {
                difficulty: Difficulty::Hard
            }]
        );
    }

    #[test]
    fn test_end_freezes_floored_score_once() {
        let mut state = RunState::new(Tuning::default());
        state.begin(Difficulty::Normal, String::new(), 0.0);
        state.score = 41.9;
        state.end(3.25);
        state.end(10.0);

        let summary = state.summary.clone().unwrap();
        assert_eq!(summary.final_score, 41);
        assert_eq!(summary.elapsed_secs, 3.25);
        let ended = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, RunEvent::Ended(_)))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = RunState::new(Tuning::default());
        state.begin(Difficulty::Normal, String::new(), 0.0);
        for id in 0..(MAX_PENDING_EVENTS as u32 + 10) {
            state.push_event(RunEvent::ObstacleSpawned { id });
        }
        state.end(1.0);

        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);
        assert!(matches!(state.events.last(), Some(RunEvent::Ended(_))));
        // Started and the first spawns were the ones dropped
        assert_eq!(state.events[0], RunEvent::ObstacleSpawned { id: 11 });
    }

    #[test]
    fn test_grounded_player_rests_on_the_line() {
        let tuning = Tuning {
            field_height: 360.1,
            ground_inset: 47.3,
            player_height: 47.123,
            ..Tuning::default()
        };
        let mut player = Player::new(&tuning);
        assert_eq!(player.pos.y, player.rest_y);
        assert!(player.feet() <= tuning.ground_y());

        player.pos.y = 10.0;
        player.vy = 120.0;
        player.on_ground = false;
        player.place_on_ground();
        assert_eq!(player.pos.y, tuning.player_rest_y());
        assert_eq!(player.vy, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_obstacle_kind_clamped() {
        assert_eq!(ObstacleKind::new(0).index(), 1);
        assert_eq!(ObstacleKind::new(9).index(), 3);
    }

    #[test]
    fn test_obstacle_scrolls_by_speed_times_dt() {
        let mut obstacle = Obstacle {
            id: 1,
            pos: Vec2::new(500.0, 272.0),
            size: Vec2::new(50.0, 40.0),
            speed: 220.0,
            kind: ObstacleKind::new(1),
        };
        obstacle.scroll(1.0);
        assert!((obstacle.pos.x - 280.0).abs() < 1e-4);
        assert_eq!(obstacle.pos.y, 272.0);
    }

    #[test]
    fn test_scrolling_and_cull_edge() {
        let mut power_up = PowerUp {
            id: 1,
            pos: Vec2::new(-90.0, 182.0),
            size: Vec2::new(40.0, 40.0),
            speed: 160.0,
            kind: PowerUpKind::Invincibility,
        };
        // Right edge exactly at the cull line is still on the field
        assert!(!power_up.is_off_field());
        power_up.scroll(0.01);
        assert!(power_up.is_off_field());
    }
}
