//! Recycling window of procedurally generated items
//!
//! Platforms, clouds and stars all live in a [`ProceduralField`]: a bounded
//! working set that scrolls with the camera, recycles members that leave the
//! screen and tops itself back up to a floor. The item type decides how it is
//! generated and what "recycling" means for it.

use rand::Rng;

use super::altitude::AltitudeSample;
use crate::tuning::GameConfig;

/// World parameters visible to item factories during one step
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub config: &'a GameConfig,
    /// Altitude after this step's camera move
    pub altitude: AltitudeSample,
    /// Cumulative scroll distance after this step's camera move
    pub scroll_distance: f32,
}

impl<'a> FieldContext<'a> {
    pub fn new(config: &'a GameConfig, scroll_distance: f32) -> Self {
        Self {
            config,
            altitude: AltitudeSample::at(config, scroll_distance),
            scroll_distance,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.config.viewport.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.config.viewport.height
    }
}

/// What happens to an item that left the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recycle {
    /// Item was repositioned in place
    Keep,
    /// Item is removed from the working set
    Drop,
}

/// An item that can live in a [`ProceduralField`]
pub trait FieldItem: Sized {
    /// Generate a fresh item. `existing` is the current working set, for kinds
    /// whose placement depends on their neighbours.
    fn spawn<R: Rng + ?Sized>(existing: &[Self], rng: &mut R, ctx: &FieldContext) -> Self;

    /// Multiplier applied to the camera delta for this item
    fn scroll_factor(&self) -> f32 {
        1.0
    }

    /// Move vertically by an already-scaled delta
    fn shift(&mut self, dy: f32, ctx: &FieldContext);

    fn is_off_screen(&self, ctx: &FieldContext) -> bool;

    /// Handle an item that left the screen
    fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, ctx: &FieldContext) -> Recycle;
}

/// Bounded, randomized working set of items positioned relative to the camera
#[derive(Debug, Clone)]
pub struct ProceduralField<T> {
    items: Vec<T>,
    min_count: usize,
}

impl<T: FieldItem> ProceduralField<T> {
    /// Empty field that will refill to at least `min_count` on every recycle
    pub fn new(min_count: usize) -> Self {
        Self {
            items: Vec::with_capacity(min_count),
            min_count,
        }
    }

    /// Fill to `count` items
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R, ctx: &FieldContext) {
        while self.items.len() < count {
            let item = T::spawn(&self.items, rng, ctx);
            self.items.push(item);
        }
    }

    /// Shift every item by the camera delta scaled by its own factor
    pub fn advance(&mut self, camera_delta: f32, ctx: &FieldContext) {
        for item in &mut self.items {
            let dy = camera_delta * item.scroll_factor();
            item.shift(dy, ctx);
        }
    }

    /// Recycle off-screen items, then replenish up to the floor
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, ctx: &FieldContext) {
        self.items.retain_mut(|item| {
            if !item.is_off_screen(ctx) {
                return true;
            }
            item.recycle(rng, ctx) == Recycle::Keep
        });
        self.populate(self.min_count, rng, ctx);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Minimal item: drops below the screen, wraps above it
    #[derive(Debug, Clone, PartialEq)]
    struct Marker {
        y: f32,
        factor: f32,
    }

    impl FieldItem for Marker {
        fn spawn<R: Rng + ?Sized>(existing: &[Self], _rng: &mut R, _ctx: &FieldContext) -> Self {
            Marker {
                y: -(existing.len() as f32) * 10.0,
                factor: 1.0,
            }
        }

        fn scroll_factor(&self) -> f32 {
            self.factor
        }

        fn shift(&mut self, dy: f32, _ctx: &FieldContext) {
            self.y += dy;
        }

        fn is_off_screen(&self, ctx: &FieldContext) -> bool {
            self.y > ctx.height() || self.y < -1000.0
        }

        fn recycle<R: Rng + ?Sized>(&mut self, _rng: &mut R, _ctx: &FieldContext) -> Recycle {
            if self.y > 0.0 {
                Recycle::Drop
            } else {
                self.y = 0.0;
                Recycle::Keep
            }
        }
    }

    #[test]
    fn test_populate_fills_to_count() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field: ProceduralField<Marker> = ProceduralField::new(3);
        field.populate(5, &mut rng, &ctx);
        assert_eq!(field.len(), 5);
        assert_eq!(field.items()[4].y, -40.0);
    }

    #[test]
    fn test_advance_applies_scroll_factor() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut field: ProceduralField<Marker> = ProceduralField::new(0);
        field.push(Marker { y: 0.0, factor: 1.0 });
        field.push(Marker { y: 0.0, factor: 1.4 });
        field.advance(10.0, &ctx);
        assert_eq!(field.items()[0].y, 10.0);
        assert!((field.items()[1].y - 14.0).abs() < 1e-5);
    }

    #[test]
    fn test_recycle_drops_then_replenishes_to_floor() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field: ProceduralField<Marker> = ProceduralField::new(3);
        field.populate(3, &mut rng, &ctx);
        field.advance(ctx.height() + 50.0, &ctx);
        field.recycle(&mut rng, &ctx);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_recycle_keeps_wrapped_items() {
        let config = GameConfig::default();
        let ctx = FieldContext::new(&config, 0.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field: ProceduralField<Marker> = ProceduralField::new(1);
        field.push(Marker { y: -5000.0, factor: 1.0 });
        field.push(Marker { y: 5.0, factor: 1.0 });
        field.recycle(&mut rng, &ctx);
        assert_eq!(field.len(), 2);
        assert_eq!(field.items()[0].y, 0.0);
    }
}
