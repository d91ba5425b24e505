//! Player preferences
//!
//! Persisted as JSON separately from the high score.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persistence::KeyValueStore;
use crate::sim::AudioCue;
use crate::tuning::Profile;

/// Audio volumes (0.0 - 1.0) and the selected game profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background loop volume
    pub music_volume: f32,
    pub bounce_volume: f32,
    pub milestone_volume: f32,
    pub profile: Profile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            bounce_volume: 0.25,
            milestone_volume: 1.0,
            profile: Profile::Classic,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "skyward_settings";

    pub fn reset_defaults(&mut self) {
        *self = Self::default();
    }

    /// Force every volume into [0, 1]; NaN becomes 0
    pub fn clamp(&mut self) {
        for volume in [
            &mut self.music_volume,
            &mut self.bounce_volume,
            &mut self.milestone_volume,
        ] {
            *volume = if volume.is_nan() {
                0.0
            } else {
                (*volume).clamp(0.0, 1.0)
            };
        }
    }

    /// Volume a cue should play at
    pub fn volume_for(&self, cue: AudioCue) -> f32 {
        match cue {
            AudioCue::Bounce => self.bounce_volume,
            AudioCue::Milestone => self.milestone_volume,
            AudioCue::MusicStart | AudioCue::MusicStop => self.music_volume,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp();
        Ok(settings)
    }

    /// Load from storage, falling back to defaults on any failure
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings: {}", err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        let written = serde_json::to_string(self)
            .map_err(Error::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match written {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {}", err),
        }
    }
}
