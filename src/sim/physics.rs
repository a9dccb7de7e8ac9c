//! Player vertical physics
//!
//! One degree of freedom: gravity, jump impulse and a ground clamp.

use super::state::Player;
use crate::consts::RUN_FRAME_SECS;

/// Normalize a raw frame delta: non-positive or non-finite becomes 0,
/// anything above `max_dt` is clamped
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Integrate the player for one step. Returns true if a jump launched.
///
/// `jump` only takes effect while grounded, and replaces this step's
/// gravity-adjusted velocity outright. Reaching the rest position snaps the
/// player onto the ground.
pub fn step_player(player: &mut Player, dt: f32, jump: bool) -> bool {
    if dt <= 0.0 {
        return false;
    }

    player.vy += player.gravity * dt;
    let jumped = jump && player.on_ground;
    if jumped {
        player.vy = -player.jump_power;
    }
    player.pos.y += player.vy * dt;

    if player.pos.y >= player.rest_y {
        player.place_on_ground();
    } else {
        player.on_ground = false;
    }

    animate(player, dt);
    jumped
}

/// Advance the sprite frame (cosmetic only)
fn animate(player: &mut Player, dt: f32) {
    player.frame_timer += dt;
    if player.on_ground {
        if player.frame_timer > RUN_FRAME_SECS {
            player.frame = (player.frame + 1) % 2;
            player.frame_timer = 0.0;
        }
    } else {
        player.frame = if player.vy < 0.0 { 2 } else { 3 };
    }
}
