//! Platforms: the climbable field
//!
//! The working set is pruned once platforms fall below the screen and is
//! always replenished above the current highest platform, so the path upward
//! is never broken.

use rand::Rng;
use serde::Serialize;

use super::field::{FieldContext, FieldItem, Recycle};

/// Scoring identity: creation x plus creation height in world space
///
/// World height is screen y minus cumulative scroll, which stays fixed while
/// the platform scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformKey {
    x_bits: u32,
    world_y_bits: u32,
}

impl PlatformKey {
    pub fn new(x: f32, world_y: f32) -> Self {
        Self {
            x_bits: x.to_bits(),
            world_y_bits: world_y.to_bits(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub key: PlatformKey,
}

impl Platform {
    pub fn new(x: f32, y: f32, ctx: &FieldContext) -> Self {
        let tuning = &ctx.config.platforms;
        Self {
            x,
            y,
            width: tuning.width,
            height: tuning.height,
            key: PlatformKey::new(x, y - ctx.scroll_distance),
        }
    }

    /// Centered starting platform just above the viewport bottom
    pub fn starting(ctx: &FieldContext) -> Self {
        let tuning = &ctx.config.platforms;
        let x = ctx.width() / 2.0 - tuning.width / 2.0;
        let y = ctx.height() - tuning.first_offset;
        Self::new(x, y, ctx)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl FieldItem for Platform {
    fn spawn<R: Rng + ?Sized>(existing: &[Self], rng: &mut R, ctx: &FieldContext) -> Self {
        let Some(highest) = existing
            .iter()
            .map(|p| p.y)
            .min_by(|a, b| a.total_cmp(b))
        else {
            return Platform::starting(ctx);
        };

        let tuning = &ctx.config.platforms;
        let span = (ctx.width() - tuning.width).max(0.0);
        let x = rng.random::<f32>() * span;
        Platform::new(x, highest - tuning.gap, ctx)
    }

    fn shift(&mut self, dy: f32, _ctx: &FieldContext) {
        self.y += dy;
    }

    fn is_off_screen(&self, ctx: &FieldContext) -> bool {
        self.y >= ctx.height() + ctx.config.platforms.cull_margin
    }

    fn recycle<R: Rng + ?Sized>(&mut self, _rng: &mut R, _ctx: &FieldContext) -> Recycle {
        Recycle::Drop
    }
}
