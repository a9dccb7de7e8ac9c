//! Per-frame simulation tick
//!
//! Order within a tick: physics, spawning, scrolling and culling,
//! collisions, power-up countdown, then scoring and elapsed time.

use super::collision::{ObstacleContact, obstacle_contact, power_up_contact};
use super::physics::{clamp_dt, step_player};
use super::random::RandomSource;
use super::state::{Player, RunEvent, RunPhase, RunState, Scrolling};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested (already debounced by the input layer)
    pub jump: bool,
    /// Demo mode - jump automatically in front of obstacles
    pub autopilot: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }
}

/// Advance an Active run by `dt` seconds; inert in any other phase
///
/// `now_secs` is the clock reading used for elapsed time and the periodic
/// bonus spawn.
pub fn tick(
    state: &mut RunState,
    input: &TickInput,
    dt: f32,
    now_secs: f64,
    rng: &mut impl RandomSource,
) {
    if state.phase != RunPhase::Active {
        return;
    }
    let dt = clamp_dt(dt, state.tuning.max_dt.min(MAX_DT));

    let jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if step_player(&mut state.player, dt, jump) {
        state.push_event(RunEvent::Jumped);
    }

    state.update_spawns(dt, now_secs, rng);

    for obstacle in &mut state.obstacles {
        obstacle.scroll(dt);
    }
    for power_up in &mut state.power_ups {
        power_up.scroll(dt);
    }
    state.obstacles.retain(|o| !o.is_off_field());
    state.power_ups.retain(|p| !p.is_off_field());

    if resolve_obstacle_contacts(state) {
        state.end(now_secs);
        return;
    }
    resolve_power_up_contacts(state);

    let expired = state.effects.tick(dt);
    if expired.invincibility {
        log::debug!("Invincibility expired");
        state.push_event(RunEvent::InvincibilityExpired);
    }
    if expired.multiplier {
        log::debug!("Multiplier expired");
        state.push_event(RunEvent::MultiplierExpired);
    }

    state.score += dt * SCORE_PER_SEC * state.effects.score_factor();
    state.update_elapsed(now_secs);
}

/// Player vs obstacles. Returns true on a fatal hit.
///
/// Reverse scan so removals don't skip entries.
fn resolve_obstacle_contacts(state: &mut RunState) -> bool {
    let player = state.player.bounds();
    for i in (0..state.obstacles.len()).rev() {
        let bounds = state.obstacles[i].bounds();
        match obstacle_contact(&player, &bounds, state.effects.invincible) {
            None => {}
            Some(ObstacleContact::Fatal) => return true,
            Some(ObstacleContact::Smash) => {
                let obstacle = state.obstacles.remove(i);
                let bonus = SMASH_BONUS * state.effects.score_factor();
                state.score += bonus;
                log::debug!("Smashed obstacle {} (+{})", obstacle.id, bonus);
                state.push_event(RunEvent::ObstacleSmashed {
                    id: obstacle.id,
                    bonus,
                });
            }
        }
    }
    false
}

/// Player vs power-ups
fn resolve_power_up_contacts(state: &mut RunState) {
    let player = state.player.bounds();
    for i in (0..state.power_ups.len()).rev() {
        if !power_up_contact(&player, &state.power_ups[i].bounds()) {
            continue;
        }
        let power_up = state.power_ups.remove(i);
        state.effects.grant(power_up.kind);
        log::debug!("Collected {:?} power-up {}", power_up.kind, power_up.id);
        state.push_event(RunEvent::PowerUpCollected {
            id: power_up.id,
            kind: power_up.kind,
        });
    }
}

/// Jump when an obstacle ahead will reach the player just after the player
/// could rise clear of it
///
/// Obstacles that invincibility will smash are ignored.
fn autopilot_wants_jump(state: &RunState) -> bool {
    if !state.player.on_ground {
        return false;
    }
    let player = state.player.bounds();
    let pad = COLLISION_PADDING;
    state
        .obstacles
        .iter()
        .filter(|o| o.speed > 0.0 && o.pos.x + o.size.x - pad > player.pos.x + pad)
        .any(|o| {
            let secs_to_contact = (o.pos.x + pad - (player.right() - pad)) / o.speed;
            if state.effects.invincible
                && state.effects.invincibility_remaining > secs_to_contact + AUTOPILOT_REACTION_SECS
            {
                return false;
            }
            let rise = player.bottom() - pad - (o.pos.y + pad);
            secs_to_contact <= secs_to_rise(&state.player, rise) + AUTOPILOT_REACTION_SECS
        })
}

/// Seconds after take-off until the feet are `height` above the ground,
/// or the time to apex if the jump never gets that high
fn secs_to_rise(player: &Player, height: f32) -> f32 {
    if height <= 0.0 || player.gravity <= 0.0 {
        return 0.0;
    }
    let launch = player.jump_power;
    let disc = launch * launch - 2.0 * player.gravity * height;
    if disc < 0.0 {
        launch / player.gravity
    } else {
        (launch - disc.sqrt()) / player.gravity
    }
}
