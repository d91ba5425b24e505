//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each field)
//! - No rendering or platform dependencies

pub mod altitude;
pub mod clock;
pub mod cloud;
pub mod collision;
pub mod color;
pub mod field;
pub mod platform;
pub mod player;
pub mod shooting_star;
pub mod snapshot;
pub mod star;
pub mod state;
pub mod tick;

pub use altitude::{AltitudeSample, SkyGradient, cloud_density, sky_gradient, star_density};
pub use clock::{AudioCue, CueSink, HighScoreStore, SilentCues, SimulationClock};
pub use cloud::Cloud;
pub use collision::{ScoreKeeper, resolve_landing, sweeps_onto};
pub use color::{Rgb, hex_to_rgb, interpolate_hex, rgb_to_hex};
pub use field::{FieldContext, FieldItem, ProceduralField, Recycle};
pub use platform::{Platform, PlatformKey};
pub use player::{Player, Steer};
pub use shooting_star::ShootingStar;
pub use snapshot::{RenderSnapshot, Status};
pub use star::Star;
pub use state::{GameEvent, GamePhase, PauseState, SimulationState};
pub use tick::{TickInput, tick};
