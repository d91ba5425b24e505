//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{AudioCue, CueSink};

/// Nodes of the running background loop
struct MusicLoop {
    voices: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    music: Option<MusicLoop>,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Apply new volumes; the music loop follows immediately
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Some(music) = &self.music {
            music.gain.gain().set_value(self.settings.music_volume * 0.15);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Bounce - springy upward chirp
    fn play_bounce(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Milestone - rising major arpeggio
    fn play_milestone(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }

    /// Background loop - two slightly detuned drones sharing one gain
    fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        gain.gain().set_value(self.settings.music_volume * 0.15);
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            log::warn!("Could not route music output");
            return;
        }

        let mut voices = Vec::new();
        for freq in [110.0, 110.8, 164.8] {
            let Ok(osc) = ctx.create_oscillator() else {
                continue;
            };
            osc.set_type(OscillatorType::Triangle);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&gain).is_ok() && osc.start().is_ok() {
                voices.push(osc);
            }
        }
        log::debug!("Music started ({} voices)", voices.len());
        self.music = Some(MusicLoop { voices, gain });
    }

    fn stop_music(&mut self) {
        let Some(music) = self.music.take() else {
            return;
        };
        for osc in &music.voices {
            osc.stop().ok();
        }
        music.gain.disconnect().ok();
        log::debug!("Music stopped");
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::MusicStart => self.start_music(),
            AudioCue::MusicStop => self.stop_music(),
            AudioCue::Bounce | AudioCue::Milestone => {
                let vol = self.settings.volume_for(cue);
                if vol <= 0.0 {
                    return;
                }
                let Some(ctx) = &self.ctx else { return };

                // Browsers start contexts suspended until a user gesture
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }

                if cue == AudioCue::Bounce {
                    Self::play_bounce(ctx, vol);
                } else {
                    Self::play_milestone(ctx, vol);
                }
            }
        }
    }
}
