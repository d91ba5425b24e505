//! Shooting stars
//!
//! Streaks enter from the top or right edge, fade in, cross the sky toward
//! the bottom-left and fade out once past the left or bottom edge. The step
//! loop is the only writer: spawning appends, updating filters.

use rand::Rng;
use serde::Serialize;

use crate::tuning::Viewport;

const FADE_IN: f32 = 0.05;
const FADE_OUT: f32 = 0.02;
/// Distance outside the viewport where streaks appear
const ENTRY_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootingStar {
    /// Head position
    pub x: f32,
    pub y: f32,
    /// Streak angle in radians, between -60° and -30°; the head travels
    /// opposite to it and the tail extends along it
    pub angle: f32,
    pub speed: f32,
    pub length: f32,
    pub opacity: f32,
    pub active: bool,
}

impl ShootingStar {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Self {
        let angle = (-30.0 - rng.random::<f32>() * 30.0).to_radians();
        let speed = 15.0 + rng.random::<f32>() * 25.0;
        let length = 150.0 + rng.random::<f32>() * 200.0;

        let (x, y) = if rng.random_bool(0.5) {
            (rng.random::<f32>() * viewport.width, -ENTRY_MARGIN)
        } else {
            (viewport.width + ENTRY_MARGIN, rng.random::<f32>() * viewport.height)
        };

        Self {
            x,
            y,
            angle,
            speed,
            length,
            opacity: 0.0,
            active: true,
        }
    }

    /// Head velocity (down and to the left)
    pub fn velocity(&self) -> (f32, f32) {
        (-self.angle.cos() * self.speed, -self.angle.sin() * self.speed)
    }

    /// End of the streak's tail
    pub fn tail(&self) -> (f32, f32) {
        (
            self.x + self.angle.cos() * self.length,
            self.y + self.angle.sin() * self.length,
        )
    }

    pub fn update(&mut self, viewport: &Viewport) {
        if !self.active {
            return;
        }

        let (vx, vy) = self.velocity();
        self.x += vx;
        self.y += vy;

        // Motion is monotone toward the bottom-left, so once outside it stays outside
        if self.x < 0.0 || self.y > viewport.height {
            self.opacity -= FADE_OUT;
            if self.opacity <= 0.0 {
                self.opacity = 0.0;
                self.active = false;
            }
        } else if self.opacity < 1.0 {
            self.opacity = (self.opacity + FADE_IN).min(1.0);
        }
    }
}
