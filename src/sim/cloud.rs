//! Drifting parallax clouds
//!
//! Clouds are recycled in place. A cloud that scrolls off the bottom only
//! comes back with probability equal to the current cloud density; otherwise
//! it is parked off-screen and re-evaluated when it scrolls down again.

use rand::Rng;
use serde::Serialize;

use super::color::Rgb;
use super::field::{FieldContext, FieldItem, Recycle};

/// Number of parallax layers
pub const CLOUD_LAYERS: u8 = 3;

/// Horizontal drift limit per layer (px/step, symmetric)
const LAYER_DRIFT: [f32; CLOUD_LAYERS as usize] = [0.3, 0.5, 0.7];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal drift per step
    pub speed: f32,
    /// 0 = farthest/slowest, 2 = nearest/fastest
    pub layer: u8,
    /// Grey level as a percentage (80-99)
    pub shade: u8,
    pub alpha: f32,
}

impl Cloud {
    /// Zero-size cloud waiting off-screen
    pub fn parked(ctx: &FieldContext) -> Self {
        Self {
            x: 0.0,
            y: ctx.config.clouds.park_y,
            width: 0.0,
            height: 0.0,
            speed: 0.0,
            layer: 0,
            shade: 0,
            alpha: 0.0,
        }
    }

    pub fn color(&self) -> Rgb {
        let level = (self.shade as f32 * 255.0 / 100.0).round() as u8;
        Rgb::new(level, level, level)
    }

    /// Move horizontally and wrap around the viewport edges
    pub fn drift(&mut self, viewport_width: f32) {
        self.x += self.speed;
        if self.x > viewport_width + self.width {
            self.x = -self.width;
        } else if self.x < -self.width {
            self.x = viewport_width + self.width;
        }
    }

    pub fn is_visible(&self, viewport_height: f32, cull_margin: f32) -> bool {
        self.width > 0.0 && self.y < viewport_height + cull_margin && self.y > -self.height
    }

    /// Redraw size and color for the given density
    fn reshape<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f32) {
        let base_width = rng.random::<f32>() * 120.0 + 60.0;
        let base_height = rng.random::<f32>() * 60.0 + 30.0;
        self.width = base_width * density;
        self.height = base_height * density;
        self.shade = rng.random_range(80..100);
        self.alpha = density * 0.8;
    }

    fn faded_out(ctx: &FieldContext) -> bool {
        ctx.altitude.feet >= ctx.config.clouds.fade.end
    }
}

impl FieldItem for Cloud {
    fn spawn<R: Rng + ?Sized>(_existing: &[Self], rng: &mut R, ctx: &FieldContext) -> Self {
        if Self::faded_out(ctx) {
            return Cloud::parked(ctx);
        }

        let density = ctx.altitude.cloud_density;
        let layer = rng.random_range(0..CLOUD_LAYERS);
        let limit = LAYER_DRIFT[layer as usize];
        let speed = rng.random_range(-limit..limit);

        let mut cloud = Cloud {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            speed,
            layer,
            shade: 0,
            alpha: 0.0,
        };
        cloud.reshape(rng, density);
        cloud.x = rng.random::<f32>() * ctx.width();
        cloud.y = rng.random::<f32>() * ctx.height();
        cloud
    }

    /// Nearer layers scroll faster
    fn scroll_factor(&self) -> f32 {
        1.0 + self.layer as f32 * 0.2
    }

    fn shift(&mut self, dy: f32, ctx: &FieldContext) {
        if Self::faded_out(ctx) {
            self.y = ctx.config.clouds.park_y;
        } else {
            self.y += dy;
        }
    }

    fn is_off_screen(&self, ctx: &FieldContext) -> bool {
        self.y > ctx.height() + ctx.config.clouds.cull_margin
    }

    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, ctx: &FieldContext) -> Recycle {
        let density = ctx.altitude.cloud_density;
        if density > 0.0 && rng.random::<f32>() < density {
            self.reshape(rng, density);
            self.y = -self.height;
            self.x = rng.random::<f32>() * ctx.width();
        } else {
            // Layer and drift carry over to the next respawn
            let parked = Cloud::parked(ctx);
            self.y = parked.y;
            self.width = parked.width;
            self.height = parked.height;
            self.alpha = parked.alpha;
        }
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

    /// Scroll distance that puts the altitude at `feet`
    fn scroll_for(feet: f32) -> f32 {
        feet / crate::consts::FEET_PER_UNIT
    }

    #[test]
    fn test_spawn_at_ground_is_full_size() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field: ProceduralField<Cloud> = ProceduralField::new(0);
        field.populate(15, &mut rng, &ctx);
        for cloud in field.iter() {
            assert!(cloud.layer < CLOUD_LAYERS);
            assert!(cloud.width >= 60.0 && cloud.width <= 180.0);
            assert!(cloud.height >= 30.0 && cloud.height <= 90.0);
            assert!((80..100).contains(&cloud.shade));
            assert!((cloud.alpha - 0.8).abs() < 1e-6);
            assert!(cloud.speed.abs() <= LAYER_DRIFT[cloud.layer as usize]);
        }
    }

    #[test]
    fn test_spawn_above_fade_end_is_parked() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, scroll_for(61_000.0));
        let mut rng = Pcg32::seed_from_u64(11);
        let cloud = Cloud::spawn(&[], &mut rng, &ctx);
        assert_eq!(cloud.width, 0.0);
        assert_eq!(cloud.y, -1000.0);
    }

    #[test]
    fn test_parallax_factor() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut cloud = Cloud::parked(&ctx);
        cloud.y = 0.0;
        cloud.layer = 2;
        assert!((cloud.scroll_factor() - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_recycle_at_full_density_respawns_above() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut cloud = Cloud::spawn(&[], &mut rng, &ctx);
        cloud.y = ctx.height() + 150.0;
        assert!(cloud.is_off_screen(&ctx));
        assert_eq!(cloud.recycle(&mut rng, &ctx), Recycle::Keep);
        assert_eq!(cloud.y, -cloud.height);
        assert!(cloud.width >= 60.0);
    }

    #[test]
    fn test_recycle_at_zero_density_parks() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, scroll_for(60_000.0) + 1.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut cloud = Cloud::parked(&ctx);
        cloud.y = ctx.height() + 150.0;
        cloud.recycle(&mut rng, &ctx);
        assert_eq!(cloud.y, config.clouds.park_y);
    }

    #[test]
    fn test_parked_cloud_drops_its_old_shape() {
        // A ground-level cloud that fails the roll high up must not scroll back in full size
        let config = GameConfig::default();
        let ground = FieldContext::new(&config, 0.0);
        let high = FieldContext::new(&config, scroll_for(50_000.0));
        let mut rng = Pcg32::seed_from_u64(3);

        let mut parked = None;
        for _ in 0..200 {
            let mut cloud = Cloud::spawn(&[], &mut rng, &ground);
            cloud.y = high.height() + 150.0;
            cloud.recycle(&mut rng, &high);
            if cloud.y == config.clouds.park_y {
                parked = Some(cloud);
                break;
            }
        }
        let mut cloud = parked.expect("density 0.25 should park some clouds");
        assert_eq!(cloud.width, 0.0);
        assert_eq!(cloud.height, 0.0);
        assert_eq!(cloud.alpha, 0.0);

        cloud.shift(1300.0, &high);
        assert!(!cloud.is_visible(high.height(), config.clouds.cull_margin));
    }

    #[test]
    fn test_thinning_uses_current_density() {
        // Halfway through the fade only some recycled clouds come back, at half size
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, scroll_for(40_000.0));
        let mut rng = Pcg32::seed_from_u64(99);
        let mut respawned = 0;
        for _ in 0..400 {
            let mut cloud = Cloud::parked(&ctx);
            cloud.y = ctx.height() + 150.0;
            cloud.recycle(&mut rng, &ctx);
            if cloud.y != config.clouds.park_y {
                respawned += 1;
                assert!(cloud.width <= 90.0 + 0.01);
            }
        }
        assert!((120..280).contains(&respawned), "respawned {}", respawned);
    }

    #[test]
    fn test_drift_wraps() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut cloud = Cloud::parked(&ctx);
        cloud.width = 100.0;
        cloud.speed = 0.5;
        cloud.x = 500.0;
        cloud.drift(400.0);
        assert_eq!(cloud.x, -100.0);

        cloud.speed = -0.5;
        cloud.x = -100.0;
        cloud.drift(400.0);
        assert_eq!(cloud.x, 500.0);
    }
}
