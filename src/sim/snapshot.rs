//! Read-only view of a run for renderers and UI layers

use glam::Vec2;
use serde::Serialize;

use super::difficulty::Difficulty;
use super::state::{ObstacleKind, PowerUpKind, RunPhase, RunState, RunSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub size: Vec2,
    pub vy: f32,
    pub on_ground: bool,
    pub frame: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstaclePose {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpPose {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
}

/// Everything a frame needs to draw the run and its HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub difficulty: Difficulty,
    pub theme: String,
    pub player: PlayerPose,
    pub obstacles: Vec<ObstaclePose>,
    pub power_ups: Vec<PowerUpPose>,
    pub score: f32,
    /// Floored score for display
    pub display_score: u64,
    pub elapsed_secs: f32,
    pub invincible: bool,
    pub invincibility_remaining: f32,
    pub multiplier: u32,
    pub multiplier_remaining: f32,
    /// Present once the run has ended
    pub summary: Option<RunSummary>,
}

impl RunSnapshot {
    pub fn capture(state: &RunState) -> Self {
        let player = &state.player;
        Self {
            phase: state.phase,
            difficulty: state.difficulty,
            theme: state.theme.clone(),
            player: PlayerPose {
                pos: player.pos,
                size: player.size,
                vy: player.vy,
                on_ground: player.on_ground,
                frame: player.frame,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstaclePose {
                    id: o.id,
                    pos: o.pos,
                    size: o.size,
                    kind: o.kind,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpPose {
                    id: p.id,
                    pos: p.pos,
                    size: p.size,
                    kind: p.kind,
                })
                .collect(),
            score: state.score,
            display_score: state.display_score(),
            elapsed_secs: state.elapsed_secs,
            invincible: state.effects.invincible,
            invincibility_remaining: state.effects.invincibility_remaining,
            multiplier: state.effects.multiplier,
            multiplier_remaining: state.effects.multiplier_remaining,
            summary: state.summary.clone(),
        }
    }

    /// JSON for UI layers on the other side of a language boundary
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
