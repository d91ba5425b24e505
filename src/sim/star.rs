//! Background starfield
//!
//! The pool size never changes. Stars wrap vertically when they scroll past
//! either edge; density only decides how many of them are drawn.

use rand::Rng;
use serde::Serialize;

use super::color::Rgb;
use super::field::{FieldContext, FieldItem, Recycle};

/// Near-white tints a star can take
pub const STAR_TINTS: [Rgb; 5] = [
    Rgb::new(255, 255, 255),
    Rgb::new(255, 255, 230),
    Rgb::new(230, 255, 255),
    Rgb::new(255, 240, 230),
    Rgb::new(240, 240, 255),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub base_size: f32,
    /// Radians per millisecond
    pub pulse_speed: f32,
    pub pulse_offset: f32,
    /// Milliseconds added to the clock so stars don't pulse in sync
    pub time_offset: f32,
    pub tint: Rgb,
}

/// Rendered size and opacity of a star at some instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twinkle {
    pub size: f32,
    pub alpha: f32,
}

impl Star {
    pub fn twinkle(&self, time_ms: f64) -> Twinkle {
        let phase = (time_ms + self.time_offset as f64) * self.pulse_speed as f64
            + self.pulse_offset as f64;
        let pulse = phase.sin() as f32;
        Twinkle {
            size: self.base_size * (1.0 + pulse * 0.2),
            alpha: 0.6 + pulse * 0.4,
        }
    }

    /// Number of pool members drawn at a given density
    pub fn visible_count(pool_size: usize, density: f32) -> usize {
        ((pool_size as f32 * density.clamp(0.0, 1.0)).floor() as usize).min(pool_size)
    }
}

impl FieldItem for Star {
    fn spawn<R: Rng + ?Sized>(_existing: &[Self], rng: &mut R, ctx: &FieldContext) -> Self {
        Star {
            x: rng.random::<f32>() * ctx.width(),
            y: rng.random::<f32>() * ctx.height(),
            base_size: rng.random::<f32>() * 2.0 + 0.5,
            pulse_speed: rng.random::<f32>() * 0.005 + 0.002,
            pulse_offset: rng.random::<f32>() * std::f32::consts::TAU,
            time_offset: rng.random::<f32>() * 1000.0,
            tint: STAR_TINTS[rng.random_range(0..STAR_TINTS.len())],
        }
    }

    fn shift(&mut self, dy: f32, _ctx: &FieldContext) {
        self.y += dy;
    }

    fn is_off_screen(&self, ctx: &FieldContext) -> bool {
        self.y > ctx.height() + self.base_size || self.y < -self.base_size
    }

    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, ctx: &FieldContext) -> Recycle {
        if self.y > ctx.height() + self.base_size {
            self.y = -self.base_size;
        } else {
            self.y = ctx.height() + self.base_size;
        }
        self.x = rng.random::<f32>() * ctx.width();
        Recycle::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::ProceduralField;
    use crate::tuning::GameConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pool_size_constant_under_scroll() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(21);
        let ctx = FieldContext::new(&config, 0.0);
        let mut field: ProceduralField<Star> = ProceduralField::new(0);
        field.populate(200, &mut rng, &ctx);

        let mut scroll = 0.0;
        for _ in 0..100 {
            scroll += 37.0;
            let ctx = FieldContext::new(&config, scroll);
            field.advance(37.0, &ctx);
            field.recycle(&mut rng, &ctx);
            assert_eq!(field.len(), 200);
        }
        for star in field.iter() {
            assert!(star.y >= -star.base_size && star.y <= config.viewport.height + star.base_size);
        }
    }

    #[test]
    fn test_wrap_bottom_to_top() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut star = Star::spawn(&[], &mut rng, &ctx);
        star.y = ctx.height() + 10.0;
        star.recycle(&mut rng, &ctx);
        assert_eq!(star.y, -star.base_size);
    }

    #[test]
    fn test_twinkle_bounds() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(2);
        let star = Star::spawn(&[], &mut rng, &ctx);
        assert!(STAR_TINTS.contains(&star.tint));
        for t in (0..10_000).step_by(97) {
            let tw = star.twinkle(t as f64);
            assert!(tw.alpha >= 0.2 - 1e-6 && tw.alpha <= 1.0 + 1e-6);
            assert!(tw.size >= star.base_size * 0.8 - 1e-5);
            assert!(tw.size <= star.base_size * 1.2 + 1e-5);
        }
    }

    #[test]
    fn test_visible_count() {
        assert_eq!(Star::visible_count(200, 0.0), 0);
        assert_eq!(Star::visible_count(200, 0.5), 100);
        assert_eq!(Star::visible_count(200, 0.999), 199);
        assert_eq!(Star::visible_count(200, 1.0), 200);
        assert_eq!(Star::visible_count(200, 3.0), 200);
    }
}
