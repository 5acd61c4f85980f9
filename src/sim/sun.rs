//! The sun orbiting above the board
//!
//! Captured marbles fly into it, and it swells and reddens as the board
//! empties. At the end of a won game it collapses to a small remnant.

use glam::Vec3;

use crate::consts::{
    MAX_SUN_DEATH_TICKS, MAX_VICTORY_ANIMATION_TICKS, STARTING_COUNT, SUN_ANGULAR_SPEED,
    SUN_HEIGHT, SUN_ORBIT_RADIUS,
};

/// Radius the sun shrinks to after the last capture
pub const FINAL_SUN_RADIUS: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SunState {
    pub angle: f32,
}

impl SunState {
    pub fn advance(&mut self) {
        self.angle += SUN_ANGULAR_SPEED;
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * SUN_ORBIT_RADIUS,
            self.angle.sin() * SUN_ORBIT_RADIUS,
            SUN_HEIGHT,
        )
    }

    /// 0 for a busy board, rising to 1 once two marbles remain.
    /// `count` is the number of marbles alive or still animating.
    pub fn red_giant_amount(count: usize) -> f32 {
        (1.0 - (count as f32 - 2.0) / 12.0).clamp(0.0, 1.0)
    }

    pub fn radius(count: usize) -> f32 {
        2.0 + 0.25 * (STARTING_COUNT as f32 - count as f32)
    }

    /// Radius with the end-of-game collapse applied.
    ///
    /// With at most one marble left the sun is a small remnant. During the
    /// last stretch of the victory cutscene it shrinks linearly from its full
    /// size down to [`FINAL_SUN_RADIUS`].
    pub fn current_radius(count: usize, victory_tick: Option<u32>) -> f32 {
        let full = Self::radius(count);
        if count > 1 {
            return full;
        }
        let collapse_start = MAX_VICTORY_ANIMATION_TICKS - MAX_SUN_DEATH_TICKS;
        match victory_tick {
            Some(tick) if tick > collapse_start => {
                let t = ((tick - collapse_start) as f32 / MAX_SUN_DEATH_TICKS as f32).min(1.0);
                FINAL_SUN_RADIUS + (1.0 - t) * (full - FINAL_SUN_RADIUS)
            }
            _ => FINAL_SUN_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit() {
        let mut sun = SunState::default();
        assert_eq!(sun.position(), Vec3::new(SUN_ORBIT_RADIUS, 0.0, SUN_HEIGHT));
        for _ in 0..10 {
            sun.advance();
        }
        assert!((sun.angle - 0.07).abs() < 1e-5);
        assert!((sun.position().truncate().length() - SUN_ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_red_giant_ramp() {
        assert_eq!(SunState::red_giant_amount(37), 0.0);
        assert_eq!(SunState::red_giant_amount(14), 0.0);
        assert!((SunState::red_giant_amount(8) - 0.5).abs() < 1e-6);
        assert_eq!(SunState::red_giant_amount(2), 1.0);
        assert_eq!(SunState::red_giant_amount(1), 1.0);
    }

    #[test]
    fn test_radius_grows_as_board_empties() {
        assert_eq!(SunState::radius(37), 2.0);
        assert_eq!(SunState::radius(1), 11.0);
    }

    #[test]
    fn test_collapse() {
        let start = MAX_VICTORY_ANIMATION_TICKS - MAX_SUN_DEATH_TICKS;
        assert_eq!(SunState::current_radius(1, Some(start)), FINAL_SUN_RADIUS);
        assert!(SunState::current_radius(1, Some(start + 1)) > 10.9);
        let halfway = SunState::current_radius(1, Some(start + 60));
        assert!((halfway - (FINAL_SUN_RADIUS + 0.5 * (11.0 - FINAL_SUN_RADIUS))).abs() < 1e-4);
        assert_eq!(
            SunState::current_radius(1, Some(MAX_VICTORY_ANIMATION_TICKS)),
            FINAL_SUN_RADIUS
        );
        assert_eq!(
            SunState::current_radius(1, Some(MAX_VICTORY_ANIMATION_TICKS + 50)),
            FINAL_SUN_RADIUS
        );
    }

    #[test]
    fn test_remnant_without_cutscene() {
        assert_eq!(SunState::current_radius(1, None), FINAL_SUN_RADIUS);
        assert_eq!(SunState::current_radius(0, None), FINAL_SUN_RADIUS);
        assert_eq!(SunState::current_radius(2, None), SunState::radius(2));
        assert_eq!(SunState::current_radius(2, Some(200)), SunState::radius(2));
    }
}
