//! A single playing piece

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use super::animation::{Animation, animated_position, animation_tilt};
use super::body::CelestialBodyType;
use super::slot::Slot;
use crate::consts::SPIN_SPEED;

/// Stable handle to one of the 37 marbles on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarbleId(pub(crate) usize);

impl MarbleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A marble entity.
///
/// Marbles are created once per board and reused across games. Fields are
/// read-only outside the `sim` module; the board is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Marble {
    pub(crate) body: CelestialBodyType,
    pub(crate) slot: Slot,
    pub(crate) alive: bool,
    pub(crate) yaw: f32,
    pub(crate) rotating_clockwise: bool,
    pub(crate) animation: Animation,
}

impl Marble {
    pub(crate) fn new(body: CelestialBodyType, slot: Slot) -> Self {
        Self {
            body,
            slot,
            alive: true,
            yaw: 0.0,
            rotating_clockwise: true,
            animation: Animation::IDLE,
        }
    }

    pub fn body(&self) -> CelestialBodyType {
        self.body
    }

    /// Logical slot; only meaningful while alive
    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Drawn while alive or while still flying off after a capture
    pub fn is_visible(&self) -> bool {
        self.alive || self.animation.is_active()
    }

    /// Put the marble back on the board for a fresh game
    pub(crate) fn initialise(&mut self, slot: Slot, rng: &mut impl Rng) {
        self.alive = true;
        self.yaw = rng.random::<f32>() * TAU;
        self.rotating_clockwise = rng.random_bool(0.5);
        self.animation.clear();
        self.slot = slot;
    }

    /// Per-tick update: animation first, then spin
    pub(crate) fn update(&mut self, spin: bool) {
        self.animation.advance(self.alive);
        if !self.alive || !spin {
            return;
        }
        if self.rotating_clockwise {
            self.yaw -= SPIN_SPEED;
        } else {
            self.yaw += SPIN_SPEED;
        }
    }

    /// Animated world position (without the selection bob)
    pub fn position(&self, sun: Vec3) -> Vec3 {
        animated_position(self.slot, &self.animation, self.alive, sun)
    }

    /// Yaw about the board normal plus any roll from a jump in progress
    pub fn rotation(&self) -> Quat {
        animation_tilt(self.slot, &self.animation, self.alive) * Quat::from_rotation_z(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initialise_resets_state() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut marble = Marble::new(CelestialBodyType::Mars, Slot::CENTRE);
        marble.alive = false;
        marble.animation.start(Slot::CENTRE);

        let target = Slot::new(3).unwrap();
        marble.initialise(target, &mut rng);
        assert!(marble.is_alive());
        assert_eq!(marble.slot(), target);
        assert!(!marble.animation().is_active());
        assert!((0.0..TAU).contains(&marble.yaw()));
    }

    #[test]
    fn test_spin_only_when_alive() {
        let mut marble = Marble::new(CelestialBodyType::Earth, Slot::CENTRE);
        marble.update(true);
        assert!((marble.yaw() + SPIN_SPEED).abs() < 1e-6);

        marble.update(false);
        assert!((marble.yaw() + SPIN_SPEED).abs() < 1e-6);

        marble.alive = false;
        marble.update(true);
        assert!((marble.yaw() + SPIN_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_visibility_follows_animation() {
        let mut marble = Marble::new(CelestialBodyType::Moon, Slot::CENTRE);
        marble.alive = false;
        assert!(!marble.is_visible());
        marble.animation.start(Slot::CENTRE);
        assert!(marble.is_visible());
    }
}
