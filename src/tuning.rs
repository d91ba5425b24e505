//! Data-driven game constants
//!
//! Every number that distinguishes one flavor of the game from another lives
//! in [`GameConfig`]. Named [`Profile`]s produce ready-made configs; custom
//! ones can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::{Error, Result};
use crate::sim::color::Rgb;

/// How bounces interact with input and scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BounceMode {
    /// Full air control; each platform scores once per session
    #[default]
    Manual,
    /// Direction is latched at each bounce; every bounce scores
    AutoJump,
}

/// A linear ramp between two altitudes (feet)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub start: f32,
    pub end: f32,
}

impl Ramp {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Vertical midpoint; the camera keeps the player at or below this line
    #[inline]
    pub fn midpoint(&self) -> f32 {
        self.height / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed while a direction is held (px/step)
    pub move_speed: f32,
    /// Vertical velocity set on every bounce (negative = up)
    pub bounce_impulse: f32,
    /// Added to vertical velocity each step
    pub gravity: f32,
    /// Spawn height measured up from the viewport bottom
    pub spawn_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            move_speed: 5.0,
            bounce_impulse: -15.0,
            gravity: 0.5,
            spawn_offset: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformTuning {
    pub width: f32,
    pub height: f32,
    /// Vertical distance between consecutive platforms
    pub gap: f32,
    /// Working-set floor restored after every prune
    pub min_count: usize,
    /// Platforms are dropped once this far below the viewport bottom
    pub cull_margin: f32,
    /// Starting platform height above the viewport bottom
    pub first_offset: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 15.0,
            gap: 100.0,
            min_count: 7,
            cull_margin: 100.0,
            first_offset: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudTuning {
    pub count: usize,
    /// Full cover below `start`, none above `end`
    pub fade: Ramp,
    /// Clouds recycle once this far below the viewport bottom
    pub cull_margin: f32,
    /// Off-screen parking height for clouds that were not respawned
    pub park_y: f32,
}

impl Default for CloudTuning {
    fn default() -> Self {
        Self {
            count: 15,
            fade: Ramp::new(20_000.0, 60_000.0),
            cull_margin: 100.0,
            park_y: -1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarTuning {
    pub pool_size: usize,
    /// No stars below `start`, the whole pool above `end`
    pub ramp: Ramp,
}

impl Default for StarTuning {
    fn default() -> Self {
        Self {
            pool_size: 200,
            ramp: Ramp::new(25_000.0, 70_000.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootingStarTuning {
    /// Spawn attempt cadence in simulation milliseconds
    pub interval_ms: f64,
    /// Chance each attempt spawns
    pub probability: f64,
    pub max_active: usize,
}

impl Default for ShootingStarTuning {
    fn default() -> Self {
        Self {
            interval_ms: 1000.0,
            probability: 1.0,
            max_active: 10,
        }
    }
}

/// One altitude band of the sky
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyBand {
    pub name: String,
    /// Upper bound of this band in feet
    pub end_feet: f32,
    pub top: Rgb,
    pub bottom: Rgb,
}

impl SkyBand {
    fn new(name: &str, end_feet: f32, top: Rgb, bottom: Rgb) -> Self {
        Self {
            name: name.to_string(),
            end_feet,
            top,
            bottom,
        }
    }
}

/// Ordered sky bands, lowest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyPalette {
    pub bands: Vec<SkyBand>,
}

impl SkyPalette {
    /// Ground to deep space in six bands
    pub fn six_band() -> Self {
        Self {
            bands: vec![
                SkyBand::new("ground", 3_000.0, Rgb::new(0x87, 0xce, 0xeb), Rgb::new(0xb0, 0xe2, 0xff)),
                SkyBand::new("middle", 10_000.0, Rgb::new(0x4a, 0x90, 0xe2), Rgb::new(0x76, 0xb4, 0xff)),
                SkyBand::new("high", 25_000.0, Rgb::new(0x1a, 0x1a, 0x4c), Rgb::new(0x2d, 0x2d, 0x7a)),
                SkyBand::new("space", 45_000.0, Rgb::new(0x0d, 0x0d, 0x2b), Rgb::new(0x1a, 0x1a, 0x3c)),
                SkyBand::new("outer-space", 80_000.0, Rgb::BLACK, Rgb::new(0x1a, 0x1a, 0x4c)),
                SkyBand::new("deep-space", 100_000.0, Rgb::BLACK, Rgb::BLACK),
            ],
        }
    }

    /// Compressed palette with a faster climb into darkness
    pub fn four_band() -> Self {
        Self {
            bands: vec![
                SkyBand::new("ground", 5_000.0, Rgb::new(0x87, 0xce, 0xeb), Rgb::new(0xb0, 0xe2, 0xff)),
                SkyBand::new("high", 25_000.0, Rgb::new(0x1a, 0x1a, 0x4c), Rgb::new(0x2d, 0x2d, 0x7a)),
                SkyBand::new("space", 60_000.0, Rgb::BLACK, Rgb::new(0x1a, 0x1a, 0x3c)),
                SkyBand::new("deep-space", 90_000.0, Rgb::BLACK, Rgb::BLACK),
            ],
        }
    }
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self::six_band()
    }
}

/// Complete tunable configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: Viewport,
    pub player: PlayerTuning,
    pub platforms: PlatformTuning,
    pub clouds: CloudTuning,
    pub stars: StarTuning,
    pub shooting_stars: ShootingStarTuning,
    pub sky: SkyPalette,
    pub mode: BounceMode,
    /// A milestone cue fires every time the score reaches a multiple of this
    pub milestone_every: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            player: PlayerTuning::default(),
            platforms: PlatformTuning::default(),
            clouds: CloudTuning::default(),
            stars: StarTuning::default(),
            shooting_stars: ShootingStarTuning::default(),
            sky: SkyPalette::default(),
            mode: BounceMode::Manual,
            milestone_every: 10,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing sections take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the simulation cannot run sensibly
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return fail("viewport must have positive size");
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return fail("player must have positive size");
        }
        if self.platforms.width <= 0.0 || self.platforms.width > self.viewport.width {
            return fail("platform width must fit the viewport");
        }
        if self.platforms.gap <= 0.0 {
            return fail("platform gap must be positive");
        }
        if self.platforms.min_count < 2 {
            return fail("platform min_count must be at least 2");
        }
        if self.clouds.fade.start >= self.clouds.fade.end {
            return fail("cloud fade must start below where it ends");
        }
        if self.stars.ramp.start >= self.stars.ramp.end {
            return fail("star ramp must start below where it ends");
        }
        if self.shooting_stars.interval_ms <= 0.0 {
            return fail("shooting star interval must be positive");
        }
        if self.milestone_every == 0 {
            return fail("milestone_every must be at least 1");
        }
        if self.sky.bands.len() < 2 {
            return fail("sky needs at least two bands");
        }
        let ascending = self
            .sky
            .bands
            .windows(2)
            .all(|pair| pair[0].end_feet < pair[1].end_feet);
        if !ascending || self.sky.bands[0].end_feet < 0.0 {
            return fail("sky band ends must be non-negative and strictly increasing");
        }
        // The topmost band pins its top stop to black, so the band below must end there
        let penultimate = &self.sky.bands[self.sky.bands.len() - 2];
        if penultimate.top != Rgb::BLACK {
            return fail("second-to-last sky band must have a black top");
        }
        Ok(())
    }
}

/// Named configurations for the shipped game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Profile {
    /// Six-band sky, clouds thin out from 20k ft, stars from 25k ft
    #[default]
    Classic,
    /// Four-band sky, wider gaps, stars from 30k ft
    HighFrontier,
    /// Classic constants with auto-jump bouncing
    AutoJump,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Classic, Profile::HighFrontier, Profile::AutoJump];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Classic => "Classic",
            Profile::HighFrontier => "High Frontier",
            Profile::AutoJump => "Auto Jump",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "classic" => Some(Profile::Classic),
            "high-frontier" | "frontier" => Some(Profile::HighFrontier),
            "auto-jump" | "autojump" | "auto" => Some(Profile::AutoJump),
            _ => None,
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Profile::Classic => GameConfig::default(),
            Profile::HighFrontier => GameConfig {
                platforms: PlatformTuning {
                    gap: 110.0,
                    ..PlatformTuning::default()
                },
                clouds: CloudTuning {
                    fade: Ramp::new(15_000.0, 50_000.0),
                    ..CloudTuning::default()
                },
                stars: StarTuning {
                    ramp: Ramp::new(30_000.0, 70_000.0),
                    ..StarTuning::default()
                },
                sky: SkyPalette::four_band(),
                ..GameConfig::default()
            },
            Profile::AutoJump => GameConfig {
                mode: BounceMode::AutoJump,
                ..GameConfig::default()
            },
        }
    }
}
