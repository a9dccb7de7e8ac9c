//! Difficulty tiers and their fixed tunables

use serde::{Deserialize, Serialize};

/// Difficulty tier selected at run start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

/// Tunables for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyProfile {
    /// Multiplier on obstacle base speed (> 0)
    pub speed_factor: f32,
    /// Milliseconds between interval-driven spawns (> 0)
    pub spawn_interval_ms: f32,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "extreme" | "hod" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// Fixed tunables for this tier
    pub fn profile(&self) -> DifficultyProfile {
        let (speed_factor, spawn_interval_ms) = match self {
            Difficulty::Easy => (0.8, 1600.0),
            Difficulty::Normal => (1.0, 1400.0),
            Difficulty::Hard => (1.35, 1100.0),
            Difficulty::Extreme => (1.8, 800.0),
        };
        DifficultyProfile {
            speed_factor,
            spawn_interval_ms,
        }
    }
}
