//! The player body
//!
//! An axis-aligned box integrated with plain Euler steps: horizontal velocity
//! comes straight from input, vertical velocity accumulates gravity and is
//! overwritten by bounces.

use glam::Vec2;
use serde::Serialize;

use crate::tuning::{PlayerTuning, Viewport};

/// Held horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

impl Steer {
    /// Resolve held keys; left wins when both are held
    pub fn from_held(left: bool, right: bool) -> Self {
        if left {
            Steer::Left
        } else if right {
            Steer::Right
        } else {
            Steer::None
        }
    }

    #[inline]
    fn sign(self) -> f32 {
        match self {
            Steer::None => 0.0,
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub move_speed: f32,
    pub bounce_impulse: f32,
    pub gravity: f32,
}

impl Player {
    /// Centered horizontally, `spawn_offset` above the viewport bottom, at rest
    pub fn new(tuning: &PlayerTuning, viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - tuning.width / 2.0,
                viewport.height - tuning.spawn_offset,
            ),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.width, tuning.height),
            move_speed: tuning.move_speed,
            bounce_impulse: tuning.bounce_impulse,
            gravity: tuning.gravity,
        }
    }

    /// Set horizontal velocity directly from input (no acceleration)
    pub fn steer(&mut self, steer: Steer) {
        self.vel.x = steer.sign() * self.move_speed;
    }

    /// One Euler step: gravity, then position
    pub fn integrate(&mut self) {
        self.vel.y += self.gravity;
        self.pos += self.vel;
    }

    /// Leaving fully past one side re-enters from the other
    pub fn wrap_horizontal(&mut self, viewport_width: f32) {
        if self.right() < 0.0 {
            self.pos.x = viewport_width;
        } else if self.pos.x > viewport_width {
            self.pos.x = -self.size.x;
        }
    }

    /// Land on a surface at `surface_y` and launch upward
    pub fn bounce_from(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size.y;
        self.vel.y = self.bounce_impulse;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.vel.y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerTuning::default(), &Viewport::default())
    }

    #[test]
    fn test_spawn_position() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(180.0, 500.0));
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_one_step_from_rest() {
        let mut p = player();
        p.integrate();
        assert_eq!(p.vel.y, 0.5);
        assert_eq!(p.pos.y, 500.5);
    }

    #[test]
    fn test_steer_sets_velocity_directly() {
        let mut p = player();
        p.steer(Steer::Left);
        assert_eq!(p.vel.x, -5.0);
        p.steer(Steer::Right);
        assert_eq!(p.vel.x, 5.0);
        p.steer(Steer::None);
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(Steer::from_held(true, true), Steer::Left);
    }

    #[test]
    fn test_horizontal_wrap() {
        let mut p = player();
        p.pos.x = -41.0;
        p.wrap_horizontal(400.0);
        assert_eq!(p.pos.x, 400.0);

        p.pos.x = 401.0;
        p.wrap_horizontal(400.0);
        assert_eq!(p.pos.x, -40.0);

        // Partially off-screen stays put
        p.pos.x = -20.0;
        p.wrap_horizontal(400.0);
        assert_eq!(p.pos.x, -20.0);
    }

    #[test]
    fn test_bounce_snaps_and_launches() {
        let mut p = player();
        p.vel.y = 9.0;
        p.bounce_from(300.0);
        assert_eq!(p.bottom(), 300.0);
        assert_eq!(p.vel.y, -15.0);
    }
}
