//! Collision detection and outcome rules
//!
//! Boxes are shrunk by a fixed padding on every side before the overlap
//! test, so sprites have to visibly touch before anything happens.

use super::state::Rect;
use crate::consts::COLLISION_PADDING;

/// What a player/obstacle overlap means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleContact {
    /// Not invincible: the run ends
    Fatal,
    /// Invincible: the obstacle is destroyed for a bonus
    Smash,
}

/// Overlap test after shrinking both boxes by `padding` on all sides
#[inline]
pub fn padded_overlap(a: &Rect, b: &Rect, padding: f32) -> bool {
    a.pos.x + padding < b.right() - padding
        && a.right() - padding > b.pos.x + padding
        && a.pos.y + padding < b.bottom() - padding
        && a.bottom() - padding > b.pos.y + padding
}

/// Overlap test with the standard gameplay padding
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    padded_overlap(a, b, COLLISION_PADDING)
}

/// Classify a player/obstacle pair
pub fn obstacle_contact(player: &Rect, obstacle: &Rect, invincible: bool) -> Option<ObstacleContact> {
    if !rects_overlap(player, obstacle) {
        return None;
    }
    Some(if invincible {
        ObstacleContact::Smash
    } else {
        ObstacleContact::Fatal
    })
}

/// Power-ups are collected on any overlap, regardless of invincibility
#[inline]
pub fn power_up_contact(player: &Rect, power_up: &Rect) -> bool {
    rects_overlap(player, power_up)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Rect {
        Rect::new(80.0, 264.0, 48.0, 48.0)
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(rects_overlap(&a, &Rect::new(20.0, 20.0, 50.0, 50.0)));
        // Overlaps on x only
        assert!(!rects_overlap(&a, &Rect::new(20.0, 100.0, 50.0, 50.0)));
        // Overlaps on y only
        assert!(!rects_overlap(&a, &Rect::new(100.0, 20.0, 50.0, 50.0)));
    }

    #[test]
    fn test_padding_ignores_grazing_contact() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        // Raw boxes overlap by 10px, padded boxes by -2px
        let b = Rect::new(40.0, 0.0, 50.0, 50.0);
        assert!(padded_overlap(&a, &b, 0.0));
        assert!(!rects_overlap(&a, &b));

        // 13px raw overlap survives 12px of combined padding
        let c = Rect::new(37.0, 0.0, 50.0, 50.0);
        assert!(rects_overlap(&a, &c));
    }

    #[test]
    fn test_touching_padded_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        // Padded a ends at 44, padded b starts at 44
        let b = Rect::new(38.0, 0.0, 50.0, 50.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_obstacle_contact_outcomes() {
        let obstacle = Rect::new(100.0, 272.0, 50.0, 40.0);
        assert_eq!(
            obstacle_contact(&player(), &obstacle, false),
            Some(ObstacleContact::Fatal)
        );
        assert_eq!(
            obstacle_contact(&player(), &obstacle, true),
            Some(ObstacleContact::Smash)
        );

        let far = Rect::new(400.0, 272.0, 50.0, 40.0);
        assert_eq!(obstacle_contact(&player(), &far, false), None);
    }

    #[test]
    fn test_grounded_player_misses_power_up() {
        // Power-ups float at 130px above the ground
        let power_up = Rect::new(90.0, 182.0, 40.0, 40.0);
        assert!(!power_up_contact(&player(), &power_up));

        let mut jumping = player();
        jumping.pos.y = 190.0;
        assert!(power_up_contact(&jumping, &power_up));
    }
}
