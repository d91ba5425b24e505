//! Altitude model
//!
//! Maps cumulative scroll distance to altitude in feet and derives the
//! continuous visual parameters from it: cloud cover, star density and the
//! two-stop sky gradient. Everything here is a pure function of its inputs.

use serde::Serialize;

use super::color::Rgb;
use crate::tuning::{GameConfig, Ramp, SkyPalette};
use crate::{altitude_feet, ramp};

/// Top and bottom stops of the vertical sky gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkyGradient {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Everything altitude-dependent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AltitudeSample {
    pub feet: f32,
    pub cloud_density: f32,
    pub star_density: f32,
    pub sky: SkyGradient,
}

impl AltitudeSample {
    pub fn at(config: &GameConfig, scroll_distance: f32) -> Self {
        let feet = altitude_feet(scroll_distance);
        Self {
            feet,
            cloud_density: cloud_density(feet, config.clouds.fade),
            star_density: star_density(feet, config.stars.ramp),
            sky: sky_gradient(feet, &config.sky),
        }
    }
}

/// 1 below `fade.start`, 0 at or above `fade.end`, linear between
pub fn cloud_density(feet: f32, fade: Ramp) -> f32 {
    1.0 - ramp(feet, fade.start, fade.end)
}

/// 0 below `stars.start`, 1 at or above `stars.end`, linear between
pub fn star_density(feet: f32, stars: Ramp) -> f32 {
    ramp(feet, stars.start, stars.end)
}

/// Sky colors at an altitude
///
/// The first band is solid. Each later band blends from the previous band's
/// colors to its own over the span between the two band ends. In the topmost
/// band the top stop is pinned to black and the blend stops at full darkness.
pub fn sky_gradient(feet: f32, palette: &SkyPalette) -> SkyGradient {
    let bands = &palette.bands;
    let Some(first) = bands.first() else {
        return SkyGradient {
            top: Rgb::BLACK,
            bottom: Rgb::BLACK,
        };
    };

    if feet <= first.end_feet || bands.len() == 1 {
        return SkyGradient {
            top: first.top,
            bottom: first.bottom,
        };
    }

    let last = bands.len() - 1;
    for i in 1..last {
        let (from, to) = (&bands[i - 1], &bands[i]);
        if feet <= to.end_feet {
            let factor = (feet - from.end_feet) / (to.end_feet - from.end_feet);
            return SkyGradient {
                top: from.top.lerp(to.top, factor),
                bottom: from.bottom.lerp(to.bottom, factor),
            };
        }
    }

    let (from, to) = (&bands[last - 1], &bands[last]);
    let factor = ramp(feet, from.end_feet, to.end_feet);
    SkyGradient {
        top: Rgb::BLACK,
        bottom: from.bottom.lerp(to.bottom, factor),
    }
}
