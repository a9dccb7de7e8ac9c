//! Procedural spawning
//!
//! Two independent sources feed the field:
//! - an interval timer driven by the difficulty profile (obstacle or power-up)
//! - a periodic bonus roll every few seconds of run time (power-up only)
//!
//! Both are polled from inside the tick; nothing spawns asynchronously.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::random::RandomSource;
use super::state::{Obstacle, ObstacleKind, PowerUp, PowerUpKind, RunEvent, RunState};
use crate::consts::*;

/// Rolled parameters for a new obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRoll {
    pub kind: ObstacleKind,
    pub width: f32,
    pub speed: f32,
}

/// What the interval timer decided to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    Obstacle(ObstacleRoll),
    PowerUp(PowerUpKind),
}

/// Spawn timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Milliseconds accumulated since the last interval spawn
    pub timer_ms: f32,
    /// Run time (seconds) of the next bonus roll
    pub next_bonus_at: f64,
}

impl SpawnPolicy {
    pub fn new() -> Self {
        Self {
            timer_ms: 0.0,
            next_bonus_at: BONUS_SPAWN_INTERVAL_SECS,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Accumulate `dt` and spawn once the profile's interval is exceeded
    pub fn poll_interval(
        &mut self,
        dt: f32,
        profile: &DifficultyProfile,
        rng: &mut impl RandomSource,
    ) -> Option<Spawn> {
        self.timer_ms += dt * 1000.0;
        if self.timer_ms <= profile.spawn_interval_ms {
            return None;
        }
        self.timer_ms = 0.0;

        if rng.next_f32() < OBSTACLE_CHANCE {
            Some(Spawn::Obstacle(roll_obstacle(profile, rng)))
        } else {
            Some(Spawn::PowerUp(roll_power_up_kind(rng)))
        }
    }

    /// Periodic bonus roll, keyed on seconds since the run started
    ///
    /// A hitch that skips several intervals still yields a single roll.
    pub fn poll_bonus(&mut self, run_secs: f64, rng: &mut impl RandomSource) -> Option<PowerUpKind> {
        if run_secs < self.next_bonus_at {
            return None;
        }
        while self.next_bonus_at <= run_secs {
            self.next_bonus_at += BONUS_SPAWN_INTERVAL_SECS;
        }

        if rng.next_f32() < BONUS_SPAWN_CHANCE {
            Some(roll_power_up_kind(rng))
        } else {
            None
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind uniform in 1..=3, width in [40, 70), speed jittered up to +20%
pub fn roll_obstacle(profile: &DifficultyProfile, rng: &mut impl RandomSource) -> ObstacleRoll {
    let kind_roll = (rng.next_f32() * OBSTACLE_KIND_COUNT as f32).floor() as u8;
    let kind = ObstacleKind::new(kind_roll + 1);
    let width = OBSTACLE_MIN_WIDTH + rng.next_f32() * OBSTACLE_WIDTH_RANGE;
    let jitter = 1.0 + rng.next_f32() * OBSTACLE_SPEED_JITTER;
    let speed = OBSTACLE_BASE_SPEED * profile.speed_factor.max(0.0) * jitter;
    ObstacleRoll { kind, width, speed }
}

pub fn roll_power_up_kind(rng: &mut impl RandomSource) -> PowerUpKind {
    if rng.next_f32() < INVINCIBILITY_CHANCE {
        PowerUpKind::Invincibility
    } else {
        PowerUpKind::Multiplier
    }
}

impl RunState {
    /// Place a rolled obstacle on the ground just past the right edge
    pub fn spawn_obstacle(&mut self, roll: ObstacleRoll) -> u32 {
        let id = self.next_entity_id();
        let ground_y = self.tuning.ground_y();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(self.tuning.spawn_x(), ground_y - OBSTACLE_HEIGHT),
            size: Vec2::new(roll.width, OBSTACLE_HEIGHT),
            speed: roll.speed,
            kind: roll.kind,
        });
        log::debug!("Spawned obstacle {} (w={:.0}, speed={:.0})", id, roll.width, roll.speed);
        self.push_event(RunEvent::ObstacleSpawned { id });
        id
    }

    /// Place a power-up at jump height just past the right edge
    pub fn spawn_power_up(&mut self, kind: PowerUpKind, bonus: bool) -> u32 {
        let id = self.next_entity_id();
        let ground_y = self.tuning.ground_y();
        self.power_ups.push(PowerUp {
            id,
            pos: Vec2::new(self.tuning.spawn_x(), ground_y - POWER_UP_ELEVATION),
            size: Vec2::splat(POWER_UP_SIZE),
            speed: POWER_UP_SPEED,
            kind,
        });
        log::debug!("Spawned {:?} power-up {} (bonus={})", kind, id, bonus);
        self.push_event(RunEvent::PowerUpSpawned { id, kind, bonus });
        id
    }

    /// Run both spawn sources for this tick
    pub fn update_spawns(&mut self, dt: f32, now_secs: f64, rng: &mut impl RandomSource) {
        let profile = self.profile();
        match self.spawner.poll_interval(dt, &profile, rng) {
            Some(Spawn::Obstacle(roll)) => {
                self.spawn_obstacle(roll);
            }
            Some(Spawn::PowerUp(kind)) => {
                self.spawn_power_up(kind, false);
            }
            None => {}
        }

        let run_secs = now_secs - self.started_at;
        if let Some(kind) = self.spawner.poll_bonus(run_secs, rng) {
            self.spawn_power_up(kind, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::random::{SequenceSource, seeded};
    use crate::tuning::Tuning;

    #[test]
    fn test_no_spawn_until_interval_exceeded() {
        let profile = Difficulty::Normal.profile();
        let mut policy = SpawnPolicy::new();
        let mut rng = SequenceSource::new(vec![0.0]);

        policy.timer_ms = 1300.0;
        assert_eq!(policy.poll_interval(0.05, &profile, &mut rng), None);
        assert_eq!(rng.draws(), 0);

        let spawn = policy.poll_interval(0.06, &profile, &mut rng);
        assert!(matches!(spawn, Some(Spawn::Obstacle(_))));
        assert_eq!(policy.timer_ms, 0.0);
    }

    #[test]
    fn test_obstacle_roll_uses_documented_ranges() {
        let profile = Difficulty::Hard.profile();
        // kind draw, width draw, jitter draw
        let mut rng = SequenceSource::new(vec![0.5, 0.5, 0.5]);
        let roll = roll_obstacle(&profile, &mut rng);
        assert_eq!(roll.kind.index(), 2);
        assert_eq!(roll.width, 55.0);
        assert!((roll.speed - 220.0 * 1.35 * 1.1).abs() < 0.001);
    }

    #[test]
    fn test_obstacle_roll_extremes_stay_in_range() {
        let profile = Difficulty::Extreme.profile();
        let mut low = SequenceSource::new(vec![0.0]);
        let roll = roll_obstacle(&profile, &mut low);
        assert_eq!(roll.kind.index(), 1);
        assert_eq!(roll.width, 40.0);
        assert!((roll.speed - 220.0 * 1.8).abs() < 0.001);

        let mut high = SequenceSource::new(vec![0.999_999]);
        let roll = roll_obstacle(&profile, &mut high);
        assert_eq!(roll.kind.index(), 3);
        assert!(roll.width < 70.0);
        assert!(roll.speed <= 220.0 * 1.8 * 1.2);
    }

    #[test]
    fn test_power_up_split() {
        let profile = Difficulty::Normal.profile();
        let mut policy = SpawnPolicy::new();
        policy.timer_ms = 1400.0;
        // 0.9 >= 0.85 -> power-up, then 0.7 >= 0.6 -> multiplier
        let mut rng = SequenceSource::new(vec![0.9, 0.7]);
        assert_eq!(
            policy.poll_interval(0.01, &profile, &mut rng),
            Some(Spawn::PowerUp(PowerUpKind::Multiplier))
        );

        policy.timer_ms = 1400.0;
        let mut rng = SequenceSource::new(vec![0.9, 0.2]);
        assert_eq!(
            policy.poll_interval(0.01, &profile, &mut rng),
            Some(Spawn::PowerUp(PowerUpKind::Invincibility))
        );
    }

    #[test]
    fn test_bonus_roll_every_interval() {
        let mut policy = SpawnPolicy::new();
        let mut rng = SequenceSource::new(vec![0.1, 0.1]);

        assert_eq!(policy.poll_bonus(7.9, &mut rng), None);
        assert_eq!(rng.draws(), 0);

        assert_eq!(
            policy.poll_bonus(8.0, &mut rng),
            Some(PowerUpKind::Invincibility)
        );
        assert_eq!(policy.next_bonus_at, 16.0);
        assert_eq!(policy.poll_bonus(8.5, &mut rng), None);
    }

    #[test]
    fn test_bonus_roll_can_miss() {
        let mut policy = SpawnPolicy::new();
        let mut rng = SequenceSource::new(vec![0.5]);
        assert_eq!(policy.poll_bonus(8.0, &mut rng), None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_bonus_hitch_rolls_once() {
        let mut policy = SpawnPolicy::new();
        let mut rng = SequenceSource::new(vec![0.9]);
        policy.poll_bonus(30.0, &mut rng);
        assert_eq!(rng.draws(), 1);
        assert_eq!(policy.next_bonus_at, 32.0);
    }

    #[test]
    fn test_spawned_entities_placement() {
        let mut state = RunState::new(Tuning::default());
        state.begin(Difficulty::Normal, String::new(), 0.0);
        state.spawn_obstacle(ObstacleRoll {
            kind: ObstacleKind::new(1),
            width: 50.0,
            speed: 220.0,
        });
        state.spawn_power_up(PowerUpKind::Multiplier, false);

        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.pos, Vec2::new(860.0, 272.0));
        assert_eq!(obstacle.pos.y + obstacle.size.y, state.tuning.ground_y());

        let power_up = &state.power_ups[0];
        assert_eq!(power_up.pos, Vec2::new(860.0, 182.0));
        assert_eq!(power_up.size, Vec2::splat(40.0));
        assert_eq!(power_up.speed, 160.0);
        assert_ne!(obstacle.id, power_up.id);
    }

    #[test]
    fn test_seeded_rolls_never_go_negative() {
        let mut rng = seeded(1234);
        for tier in Difficulty::ALL {
            let profile = tier.profile();
            for _ in 0..500 {
                let roll = roll_obstacle(&profile, &mut rng);
                assert!(roll.width >= 40.0 && roll.width < 70.0);
                assert!(roll.speed > 0.0);
                assert!((1..=3).contains(&roll.kind.index()));
            }
        }
    }
}
