//! Per-marble move animation
//!
//! A marble is animating while it has a source slot. The logical slot and the
//! alive flag always hold the committed result of the move; everything in this
//! module only derives display values from them.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec3};

use super::slot::{Direction, Slot};
use crate::consts::{DROP_DOWN_DEAD, MAX_ANIMATION_TICKS, MAX_DEATH_ANIMATION_TICKS};

/// Animation state embedded in each marble.
///
/// Only the board mutates it; renderers read it through the marble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Animation {
    source: Option<Slot>,
    tick: u32,
    initial_removal: bool,
}

impl Animation {
    pub const IDLE: Animation = Animation {
        source: None,
        tick: 0,
        initial_removal: false,
    };

    #[inline]
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// Slot the marble is animating from
    #[inline]
    pub fn source_slot(&self) -> Option<Slot> {
        self.source
    }

    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Removal of the first marble from a full board skips the drop phase
    #[inline]
    pub fn is_initial_removal(&self) -> bool {
        self.initial_removal
    }

    /// Begin a jump arc or a capture drop from `from`
    pub(crate) fn start(&mut self, from: Slot) {
        *self = Animation {
            source: Some(from),
            tick: 0,
            initial_removal: false,
        };
    }

    /// Begin the opening removal: straight into the fling toward the sun
    pub(crate) fn start_initial_removal(&mut self, at: Slot) {
        *self = Animation {
            source: Some(at),
            tick: MAX_ANIMATION_TICKS,
            initial_removal: true,
        };
    }

    pub(crate) fn clear(&mut self) {
        *self = Animation::IDLE;
    }

    /// Advance one tick; returns to idle once past the bound for `alive`
    pub(crate) fn advance(&mut self, alive: bool) {
        if self.source.is_none() {
            return;
        }
        self.tick += 1;
        let bound = MAX_ANIMATION_TICKS + if alive { 0 } else { MAX_DEATH_ANIMATION_TICKS };
        if self.tick > bound {
            self.clear();
        }
    }
}

/// World position of a marble at `slot`, including any animation offset.
///
/// `sun` is the current sun position; captured marbles fly into it.
pub fn animated_position(slot: Slot, animation: &Animation, alive: bool, sun: Vec3) -> Vec3 {
    let mut position = slot.world_position();
    let Some(source) = animation.source else {
        return position;
    };
    let tick = animation.tick as f32;
    let max_ticks = MAX_ANIMATION_TICKS as f32;

    if alive {
        // Hop: horizontal ease-in-out with a lift proportional to the distance
        let old_position = source.world_position();
        let displacement = position - old_position;
        let angle = PI * tick / max_ticks - FRAC_PI_2;
        let horiz = (angle.sin() + 1.0) / 2.0;
        position = old_position
            + Vec3::new(
                displacement.x * horiz,
                displacement.y * horiz,
                displacement.length() * angle.cos() / 2.0,
            );
    } else if animation.tick <= MAX_ANIMATION_TICKS {
        position -= Vec3::Z * DROP_DOWN_DEAD * (tick / max_ticks).powf(1.0 / 3.0);
    } else {
        if !animation.initial_removal {
            position.z -= DROP_DOWN_DEAD;
        }
        let displacement = sun - position;
        position += displacement * (tick - max_ticks) / MAX_DEATH_ANIMATION_TICKS as f32;
    }
    position
}

/// Tilt applied on top of the marble's yaw while it rolls through a jump
pub fn animation_tilt(slot: Slot, animation: &Animation, alive: bool) -> Quat {
    let Some(source) = animation.source.filter(|_| alive) else {
        return Quat::IDENTITY;
    };
    let angle = TAU * animation.tick as f32 / MAX_ANIMATION_TICKS as f32;
    match slot.orthogonal_direction(source) {
        Some(Direction::Left) => Quat::from_rotation_x(-angle),
        Some(Direction::Right) => Quat::from_rotation_x(angle),
        Some(Direction::Down) => Quat::from_rotation_y(-angle),
        Some(Direction::Up) => Quat::from_rotation_y(angle),
        None => Quat::IDENTITY,
    }
}
