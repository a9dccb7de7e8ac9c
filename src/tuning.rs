//! Play-field and player physics tuning
//!
//! Loaded from JSON by the embedding layer. Missing fields keep their
//! defaults; the difficulty table is fixed and not part of tuning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be positive and finite, got {value}")]
    InvalidValue { field: &'static str, value: f32 },
    #[error("ground inset {inset} leaves no room for a {player_height}px player")]
    GroundOutOfField { inset: f32, player_height: f32 },
    #[error("max_dt {0} exceeds the step ceiling of {}s", MAX_DT)]
    StepTooLong(f32),
}

/// Play-field and player physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play-field ===
    /// Visible field width (pixels)
    pub field_width: f32,
    /// Visible field height (pixels)
    pub field_height: f32,
    /// Ground line sits this far above the bottom edge
    pub ground_inset: f32,

    // === Player ===
    /// Fixed horizontal lane of the player
    pub player_lane_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Upward launch velocity (pixels/s)
    pub jump_power: f32,

    // === Stepping ===
    /// Ceiling applied to every tick's dt, at most `MAX_DT`
    pub max_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_inset: GROUND_INSET,

            player_lane_x: PLAYER_LANE_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,

            max_dt: MAX_DT,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground line (downward is positive)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_inset
    }

    /// Top edge of a grounded player
    ///
    /// `ground_y - player_height` can round so that adding the height back
    /// lands a hair below the ground line. Nudge it to the lowest y whose
    /// feet still sit on or above the line, so every grounded check compares
    /// against this one value.
    pub fn player_rest_y(&self) -> f32 {
        let ground_y = self.ground_y();
        let height = self.player_height;
        let mut y = ground_y - height;
        if !(y.is_finite() && ground_y.is_finite() && height.is_finite()) {
            return y;
        }
        while y + height > ground_y {
            y = next_down(y);
        }
        while next_up(y) + height <= ground_y {
            y = next_up(y);
        }
        y
    }

    /// X coordinate where new entities appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.field_width + SPAWN_MARGIN
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ground_inset", self.ground_inset),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("jump_power", self.jump_power),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::InvalidValue { field, value });
            }
        }
        if !self.player_lane_x.is_finite() {
            return Err(TuningError::InvalidValue {
                field: "player_lane_x",
                value: self.player_lane_x,
            });
        }
        if self.max_dt > MAX_DT {
            return Err(TuningError::StepTooLong(self.max_dt));
        }
        if self.ground_y() - self.player_height < 0.0 {
            return Err(TuningError::GroundOutOfField {
                inset: self.ground_inset,
                player_height: self.player_height,
            });
        }
        Ok(())
    }
}

/// Adjacent representable f32 toward negative infinity (finite input)
fn next_down(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// Adjacent representable f32 toward positive infinity (finite input)
fn next_up(x: f32) -> f32 {
    if x == 0.0 {
        f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        f32::from_bits(x.to_bits() - 1)
    }
}
