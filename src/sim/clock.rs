//! Session lifecycle and collaborator dispatch
//!
//! [`SimulationClock`] owns the [`SimulationState`] and is the single entry
//! point hosts drive: `start`, `step`, `pause`/`resume`, `reset` and `stop`.
//! Events coming out of a step are turned into audio cues and high-score
//! writes here, so the step itself never touches the outside world.

use serde::Serialize;

use super::snapshot::RenderSnapshot;
use super::state::{GameEvent, SimulationState};
use super::tick::{TickInput, tick};
use crate::error::Result;
use crate::tuning::GameConfig;

/// Where the best score lives between sessions
///
/// Implementations swallow their own failures; a store that cannot read
/// reports 0.
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> u64;
    fn save_high_score(&mut self, score: u64);
}

/// Discrete sounds the core asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AudioCue {
    Bounce,
    Milestone,
    MusicStart,
    MusicStop,
}

/// Fire-and-forget audio output
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

/// Audio sink that drops every cue (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, cue: AudioCue) {
        log::trace!("cue {:?} (silent)", cue);
    }
}

pub struct SimulationClock<S: HighScoreStore, A: CueSink> {
    state: SimulationState,
    store: S,
    cues: A,
    music_playing: bool,
    stopped: bool,
}

impl<S: HighScoreStore, A: CueSink> SimulationClock<S, A> {
    /// Validate the config, load the high score once and build a `Ready` world
    pub fn new(config: GameConfig, seed: u64, mut store: S, cues: A) -> Result<Self> {
        config.validate()?;
        let high_score = store.load_high_score();
        log::info!("New session (seed {}, high score {})", seed, high_score);
        Ok(Self {
            state: SimulationState::new(config, seed, high_score),
            store,
            cues,
            music_playing: false,
            stopped: false,
        })
    }

    /// Ready -> Running
    pub fn start(&mut self) -> bool {
        if self.stopped || !self.state.start() {
            return false;
        }
        log::info!("Session started");
        self.flush_events();
        true
    }

    /// Back to `Ready` with a fresh world; the high score survives
    pub fn reset(&mut self) {
        if self.stopped {
            return;
        }
        self.state.reset();
        log::info!("Session reset");
    }

    /// Advance one frame; returns what happened so hosts can update their UI
    ///
    /// A no-op after [`stop`](Self::stop).
    pub fn step(&mut self, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
        if self.stopped {
            return Vec::new();
        }
        tick(&mut self.state, input, dt_ms);
        self.flush_events()
    }

    pub fn pause(&mut self) -> bool {
        if self.stopped || !self.state.pause() {
            return false;
        }
        log::info!("Paused");
        self.flush_events();
        true
    }

    /// Begin the resume countdown
    pub fn resume(&mut self) -> bool {
        if self.stopped || !self.state.begin_countdown() {
            return false;
        }
        log::info!("Resume countdown started");
        self.flush_events();
        true
    }

    /// Tear the session down for good
    ///
    /// Later calls to `step` and the lifecycle methods do nothing. Music is
    /// stopped once and no further cues or writes are issued.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.state.shooting_stars.clear();
        self.state.drain_events();
        if self.music_playing {
            self.music_playing = false;
            self.cues.play(AudioCue::MusicStop);
        }
        log::info!("Session stopped at score {}", self.state.score());
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cues(&self) -> &A {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut A {
        &mut self.cues
    }

    fn flush_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::Started | GameEvent::Restarted => {
                    if !self.music_playing {
                        self.music_playing = true;
                        self.cues.play(AudioCue::MusicStart);
                    }
                }
                GameEvent::Bounce => self.cues.play(AudioCue::Bounce),
                GameEvent::Milestone { score } => {
                    log::debug!("Milestone at {}", score);
                    self.cues.play(AudioCue::Milestone);
                }
                GameEvent::GameOver {
                    score,
                    new_high_score: true,
                } => self.store.save_high_score(score),
                _ => {}
            }
        }
        events
    }
}
