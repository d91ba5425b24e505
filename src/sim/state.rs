//! Simulation state and core session types
//!
//! [`SimulationState`] owns everything that changes during a session. Only the
//! step function and the clock mutate it; renderers read snapshots.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::cloud::Cloud;
use super::collision::ScoreKeeper;
use super::field::{FieldContext, ProceduralField};
use super::platform::Platform;
use super::player::{Player, Steer};
use super::shooting_star::ShootingStar;
use super::star::Star;
use crate::altitude_feet;
use crate::consts::COUNTDOWN_START;
use crate::tuning::GameConfig;

/// Sub-state while paused
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PauseState {
    /// Frozen until the player resumes
    Idle,
    /// Ticking down to resume; `elapsed_ms` is time since the last tick
    Counting { remaining: u8, elapsed_ms: f64 },
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GamePhase {
    /// World generated, waiting for start
    Ready,
    /// Active gameplay
    Running,
    Paused(PauseState),
    /// Player fell off the bottom; waits for restart
    GameOver,
}

/// Discrete things that happened during a step, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Started,
    Bounce,
    Scored { score: u64 },
    Milestone { score: u64 },
    Paused,
    CountdownTick { remaining: u8 },
    Resumed,
    GameOver { score: u64, new_high_score: bool },
    Restarted,
}

/// Everything the simulation mutates, owned by one clock
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: GameConfig,
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub platforms: ProceduralField<Platform>,
    pub clouds: ProceduralField<Cloud>,
    pub stars: ProceduralField<Star>,
    pub shooting_stars: Vec<ShootingStar>,
    pub scoring: ScoreKeeper,
    /// Cumulative camera travel ("total height")
    pub scroll_distance: f32,
    /// Best score ever; survives restarts
    pub high_score: u64,
    pub phase: GamePhase,
    /// Simulation clock in milliseconds; drives star twinkle
    pub time_ms: f64,
    /// Time banked toward the next shooting-star spawn attempt
    pub spawn_accumulator_ms: f64,
    /// Direction captured at the last bounce (auto-jump mode)
    pub latched_steer: Steer,
    pub(crate) events: Vec<GameEvent>,
}

impl SimulationState {
    /// Fresh session in the `Ready` phase
    pub fn new(config: GameConfig, seed: u64, high_score: u64) -> Self {
        let player = Player::new(&config.player, &config.viewport);
        let platforms = ProceduralField::new(config.platforms.min_count);
        let clouds = ProceduralField::new(config.clouds.count);
        let stars = ProceduralField::new(config.stars.pool_size);

        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player,
            platforms,
            clouds,
            stars,
            shooting_stars: Vec::new(),
            scoring: ScoreKeeper::new(),
            scroll_distance: 0.0,
            high_score,
            phase: GamePhase::Ready,
            time_ms: 0.0,
            spawn_accumulator_ms: 0.0,
            latched_steer: Steer::None,
            events: Vec::new(),
        };
        state.populate_world();
        state
    }

    /// Regenerate the world from scratch, keeping config, RNG stream and high score
    pub fn reset(&mut self) {
        self.player = Player::new(&self.config.player, &self.config.viewport);
        self.scoring.reset();
        self.scroll_distance = 0.0;
        self.time_ms = 0.0;
        self.spawn_accumulator_ms = 0.0;
        self.latched_steer = Steer::None;
        self.phase = GamePhase::Ready;
        self.events.clear();
        self.populate_world();
    }

    fn populate_world(&mut self) {
        let ctx = FieldContext::new(&self.config, self.scroll_distance);

        self.platforms.clear();
        self.platforms
            .populate(self.config.platforms.min_count, &mut self.rng, &ctx);

        self.clouds.clear();
        self.clouds
            .populate(self.config.clouds.count, &mut self.rng, &ctx);

        self.stars.clear();
        self.stars
            .populate(self.config.stars.pool_size, &mut self.rng, &ctx);

        self.shooting_stars.clear();
        self.shooting_stars
            .push(ShootingStar::spawn(&mut self.rng, &self.config.viewport));
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    pub fn altitude_feet(&self) -> f32 {
        altitude_feet(self.scroll_distance)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused(_))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ready -> Running
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        true
    }

    /// Running -> Paused(Idle)
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused(PauseState::Idle);
        self.events.push(GameEvent::Paused);
        true
    }

    /// Paused -> Paused(Counting) from the top of the countdown
    pub fn begin_countdown(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.phase = GamePhase::Paused(PauseState::Counting {
            remaining: COUNTDOWN_START,
            elapsed_ms: 0.0,
        });
        self.events.push(GameEvent::CountdownTick {
            remaining: COUNTDOWN_START,
        });
        true
    }

    /// Pause if running, otherwise (re)start the resume countdown
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused(_) => self.begin_countdown(),
            GamePhase::Ready | GamePhase::GameOver => false,
        }
    }

    /// GameOver -> Running with a fresh world
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_ready_and_populated() {
        let state = SimulationState::new(GameConfig::default(), 42, 17);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.platforms.len(), 7);
        assert_eq!(state.clouds.len(), 15);
        assert_eq!(state.stars.len(), 200);
        assert_eq!(state.shooting_stars.len(), 1);
        assert_eq!(state.high_score, 17);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reset_clears_session_clock() {
        let mut state = SimulationState::new(GameConfig::default(), 42, 5);
        state.time_ms = 12_345.0;
        state.spawn_accumulator_ms = 800.0;
        state.scroll_distance = 90.0;
        state.reset();
        assert_eq!(state.time_ms, 0.0);
        assert_eq!(state.spawn_accumulator_ms, 0.0);
        assert_eq!(state.scroll_distance, 0.0);
        assert_eq!(state.high_score, 5);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = SimulationState::new(GameConfig::default(), 1, 0);
        assert!(!state.pause());
        assert!(state.start());
        assert!(!state.start());
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused(PauseState::Idle));
        assert!(state.toggle_pause());
        assert!(matches!(
            state.phase,
            GamePhase::Paused(PauseState::Counting { remaining: 3, .. })
        ));
        assert!(!state.restart());

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Started,
                GameEvent::Paused,
                GameEvent::CountdownTick { remaining: 3 }
            ]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = SimulationState::new(GameConfig::default(), 2024, 0);
        let b = SimulationState::new(GameConfig::default(), 2024, 0);
        assert_eq!(a.platforms.items(), b.platforms.items());
        assert_eq!(a.clouds.items(), b.clouds.items());
        assert_eq!(a.stars.items(), b.stars.items());
    }
}
