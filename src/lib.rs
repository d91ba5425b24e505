//! Skyward - an endless altitude-climbing platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling fields, collisions, session state)
//! - `renderer`: WebGPU rendering of the per-frame snapshot
//! - `platform`: Input mapping from host key events to simulation intents
//! - `persistence`: Key/value storage used by high score and settings
//! - `tuning`: Data-driven game constants and named profiles

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::{BounceMode, GameConfig, Profile};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (canvas pixels)
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Scroll units are meters; altitude is reported in feet
    pub const FEET_PER_UNIT: f32 = 3.28084;

    /// Nominal frame duration used by hosts without a real clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Seconds shown by the resume countdown
    pub const COUNTDOWN_START: u8 = 3;
    /// Wall-clock duration of one countdown tick
    pub const COUNTDOWN_TICK_MS: f64 = 1000.0;
}

/// Convert cumulative scroll distance to altitude in feet
#[inline]
pub fn altitude_feet(scroll_distance: f32) -> f32 {
    scroll_distance * consts::FEET_PER_UNIT
}

/// Linear ramp position of `value` between `start` and `end`, clamped to [0, 1]
#[inline]
pub fn ramp(value: f32, start: f32, end: f32) -> f32 {
    if value <= start {
        0.0
    } else if value >= end {
        1.0
    } else {
        ((value - start) / (end - start)).clamp(0.0, 1.0)
    }
}
