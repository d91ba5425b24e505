//! One simulation step
//!
//! `tick` advances the session by one frame: discrete intents, then (while
//! running) input, physics, camera scroll, field updates, collision and the
//! terminal check. Shooting-star spawning rides on an accumulator inside the
//! same step instead of a separate timer.

use rand::Rng;

use super::collision::resolve_landing;
use super::field::FieldContext;
use super::player::Steer;
use super::shooting_star::ShootingStar;
use super::state::{GameEvent, GamePhase, PauseState, SimulationState};
use crate::consts::COUNTDOWN_TICK_MS;
use crate::tuning::BounceMode;

/// Input for a single step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    /// One-shot: pause, or resume via countdown
    pub pause_toggle: bool,
    /// One-shot: restart after game over
    pub restart: bool,
}

impl TickInput {
    pub fn steer(&self) -> Steer {
        Steer::from_held(self.left, self.right)
    }
}

/// Advance the session by one frame that took `dt_ms` of wall-clock time
pub fn tick(state: &mut SimulationState, input: &TickInput, dt_ms: f64) {
    state.time_ms += dt_ms;

    if input.restart && state.restart() {
        log::info!("Session restarted (high score {})", state.high_score);
        return;
    }

    if input.pause_toggle {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::Ready | GamePhase::GameOver => {}
        GamePhase::Paused(PauseState::Idle) => {}
        GamePhase::Paused(PauseState::Counting {
            remaining,
            elapsed_ms,
        }) => advance_countdown(state, remaining, elapsed_ms + dt_ms),
        GamePhase::Running => step_world(state, input, dt_ms),
    }
}

/// Tick the resume countdown on elapsed time, not frame count
fn advance_countdown(state: &mut SimulationState, mut remaining: u8, mut elapsed_ms: f64) {
    while elapsed_ms >= COUNTDOWN_TICK_MS {
        elapsed_ms -= COUNTDOWN_TICK_MS;
        remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Resumed);
            log::info!("Countdown finished, resuming");
            return;
        }
        state.events.push(GameEvent::CountdownTick { remaining });
    }
    state.phase = GamePhase::Paused(PauseState::Counting {
        remaining,
        elapsed_ms,
    });
}

fn step_world(state: &mut SimulationState, input: &TickInput, dt_ms: f64) {
    let held = input.steer();
    let viewport = state.config.viewport;

    // Input -> physics
    let steer = match state.config.mode {
        BounceMode::Manual => held,
        BounceMode::AutoJump => state.latched_steer,
    };
    state.player.steer(steer);
    state.player.integrate();
    state.player.wrap_horizontal(viewport.width);

    for cloud in state.clouds.iter_mut() {
        cloud.drift(viewport.width);
    }

    // Camera: keep the player at or below the midpoint
    let midpoint = viewport.midpoint();
    if state.player.pos.y < midpoint {
        let camera_delta = midpoint - state.player.pos.y;
        state.scroll_distance += camera_delta;
        state.player.pos.y += camera_delta;

        let ctx = FieldContext::new(&state.config, state.scroll_distance);
        state.platforms.advance(camera_delta, &ctx);
        state.clouds.advance(camera_delta, &ctx);
        state.clouds.recycle(&mut state.rng, &ctx);
        state.platforms.recycle(&mut state.rng, &ctx);
        state.stars.advance(camera_delta, &ctx);
        state.stars.recycle(&mut state.rng, &ctx);
        log::trace!(
            "scrolled {:.2} (total {:.1}, {} platforms)",
            camera_delta,
            state.scroll_distance,
            state.platforms.len()
        );
    }

    // Collision and scoring
    if let Some(key) = resolve_landing(&mut state.player, state.platforms.items()) {
        state.events.push(GameEvent::Bounce);
        if state.config.mode == BounceMode::AutoJump {
            state.latched_steer = held;
        }

        let award = state
            .scoring
            .award(key, state.config.mode, state.config.milestone_every);
        let score = state.scoring.score();
        if award.scored {
            state.events.push(GameEvent::Scored { score });
        }
        if award.milestone {
            state.events.push(GameEvent::Milestone { score });
        }
    }

    // Terminal check: top edge below the viewport bottom
    if state.player.top() > viewport.height {
        end_session(state);
        return;
    }

    update_shooting_stars(state, dt_ms);
}

fn end_session(state: &mut SimulationState) {
    let score = state.scoring.score();
    let new_high_score = score > state.high_score;
    if new_high_score {
        state.high_score = score;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score,
        new_high_score,
    });
    log::info!(
        "Game over: score {} at {:.0} ft{}",
        score,
        state.altitude_feet(),
        if new_high_score { " (new high score)" } else { "" }
    );
}

/// Spawn on the accumulator cadence (append only), then move and prune
fn update_shooting_stars(state: &mut SimulationState, dt_ms: f64) {
    let tuning = state.config.shooting_stars;
    let viewport = state.config.viewport;
    let above_star_line = state.altitude_feet() > state.config.stars.ramp.start;

    state.spawn_accumulator_ms += dt_ms;
    while tuning.interval_ms > 0.0 && state.spawn_accumulator_ms >= tuning.interval_ms {
        state.spawn_accumulator_ms -= tuning.interval_ms;
        if above_star_line
            && state.shooting_stars.len() < tuning.max_active
            && state.rng.random_bool(tuning.probability.clamp(0.0, 1.0))
        {
            let star = ShootingStar::spawn(&mut state.rng, &viewport);
            state.shooting_stars.push(star);
        }
    }

    for star in &mut state.shooting_stars {
        star.update(&viewport);
    }
    state.shooting_stars.retain(|s| s.active);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::field::FieldItem;
    use crate::sim::platform::Platform;
    use crate::tuning::{GameConfig, Profile};
    use proptest::prelude::*;

    fn running(seed: u64) -> SimulationState {
        let mut state = SimulationState::new(GameConfig::default(), seed, 0);
        state.start();
        state.drain_events();
        state
    }

    /// Put a fresh platform directly under the player's feet at `gap` below
    fn platform_under(state: &mut SimulationState, gap: f32) -> Platform {
        let ctx = FieldContext::new(&state.config, state.scroll_distance);
        let x = state.player.pos.x;
        let y = state.player.bottom() + gap;
        let platform = Platform::new(x, y, &ctx);
        state.platforms.push(platform.clone());
        platform
    }

    #[test]
    fn test_first_step_from_rest() {
        let mut state = running(5);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.player.vel.y, 0.5);
        assert_eq!(state.player.pos.y, 500.5);
        assert_eq!(state.scroll_distance, 0.0);
    }

    #[test]
    fn test_ready_does_not_simulate() {
        let mut state = SimulationState::new(GameConfig::default(), 5, 0);
        let before = state.player.clone();
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_bounce_sets_exact_impulse_and_scores() {
        let mut state = running(5);
        state.player.vel.y = 9.5;
        platform_under(&mut state, 5.0);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.player.vel.y, -15.0);
        assert_eq!(state.score(), 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Bounce));
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
    }

    #[test]
    fn test_repeat_bounces_score_once() {
        let mut state = running(5);
        let platform = platform_under(&mut state, 5.0);
        for _ in 0..3 {
            state.player.pos.y = platform.y - state.player.size.y - 5.0;
            state.player.vel.y = 9.5;
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_auto_jump_scores_every_bounce_and_latches_direction() {
        let mut state = SimulationState::new(Profile::AutoJump.config(), 5, 0);
        state.start();
        let platform = platform_under(&mut state, 5.0);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..3 {
            state.player.pos.x = platform.x;
            state.player.pos.y = platform.y - state.player.size.y - 5.0;
            state.player.vel.y = 9.5;
            tick(&mut state, &right, FRAME_MS);
        }
        assert_eq!(state.score(), 3);
        assert_eq!(state.latched_steer, Steer::Right);

        // Mid-air input changes are ignored; the latched direction applies
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, FRAME_MS);
        assert_eq!(state.player.vel.x, 5.0);
    }

    #[test]
    fn test_milestone_fires_once_at_ten() {
        let mut state = running(5);
        let mut milestones = 0;
        for i in 0..11 {
            // One fresh platform per bounce, each with its own identity
            state.platforms.clear();
            platform_under(&mut state, 1.0 + i as f32 * 0.5);
            state.player.vel.y = 9.5;
            tick(&mut state, &TickInput::default(), FRAME_MS);
            for event in state.drain_events() {
                if let GameEvent::Milestone { score } = event {
                    assert_eq!(score, 10);
                    milestones += 1;
                }
            }
            // Reset the body so the next step falls onto the next platform
            state.player.pos.y = 400.0;
        }
        assert_eq!(state.score(), 11);
        assert_eq!(milestones, 1);
    }

    #[test]
    fn test_camera_scrolls_when_above_midpoint() {
        let mut state = running(5);
        state.player.pos.y = 250.0;
        state.player.vel.y = -10.0;
        let platform_y = state.platforms.items()[0].y;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        // Player went to 240.5, camera pulls it back to 300
        assert!((state.scroll_distance - 59.5).abs() < 1e-4);
        assert_eq!(state.player.pos.y, 300.0);
        assert!((state.platforms.items()[0].y - (platform_y + 59.5)).abs() < 1e-4);
    }

    #[test]
    fn test_fall_ends_session_and_records_high_score() {
        let mut state = running(5);
        state.high_score = 0;
        state.scoring.award(
            crate::sim::platform::PlatformKey::new(0.0, 0.0),
            BounceMode::Manual,
            10,
        );
        state.player.pos.y = 700.0;
        state.player.vel.y = 1.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 1);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 1,
            new_high_score: true
        }));

        // Game over is terminal until restart
        let frozen = state.player.clone();
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_restart_resets_session_but_keeps_high_score() {
        let mut state = running(5);
        state.high_score = 12;
        state.scroll_distance = 5000.0;
        state.phase = GamePhase::GameOver;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.scroll_distance, 0.0);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.platforms.len(), 7);
        assert_eq!(state.platforms.items()[0].y, 550.0);
        assert_eq!(state.platforms.items()[0].x, 160.0);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = running(5);
        state.scroll_distance = 10.0;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.scroll_distance, 10.0);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = running(5);
        let toggle = TickInput {
            pause_toggle: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Paused(PauseState::Idle));
        let frozen = state.player.clone();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_countdown_uses_elapsed_time_not_frames() {
        let toggle = TickInput {
            pause_toggle: true,
            ..Default::default()
        };

        // Same wall-clock time split into very different frame counts
        for dt in [10.0, 250.0, 999.0] {
            let mut state = running(5);
            tick(&mut state, &toggle, dt);
            tick(&mut state, &toggle, 0.0);
            state.drain_events();

            let mut elapsed = 0.0;
            while state.phase != GamePhase::Running {
                tick(&mut state, &TickInput::default(), dt);
                elapsed += dt;
                assert!(elapsed < 3000.0 + dt, "countdown overran at dt {}", dt);
            }
            assert!(elapsed >= 3000.0);
            let ticks: Vec<_> = state
                .drain_events()
                .into_iter()
                .filter(|e| matches!(e, GameEvent::CountdownTick { .. } | GameEvent::Resumed))
                .collect();
            assert_eq!(
                ticks,
                vec![
                    GameEvent::CountdownTick { remaining: 2 },
                    GameEvent::CountdownTick { remaining: 1 },
                    GameEvent::Resumed
                ]
            );
        }
    }

    #[test]
    fn test_toggle_during_countdown_restarts_it() {
        let mut state = running(5);
        let toggle = TickInput {
            pause_toggle: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, 0.0);
        tick(&mut state, &toggle, 0.0);
        tick(&mut state, &TickInput::default(), 1500.0);
        assert!(matches!(
            state.phase,
            GamePhase::Paused(PauseState::Counting { remaining: 2, .. })
        ));
        tick(&mut state, &toggle, 0.0);
        assert!(matches!(
            state.phase,
            GamePhase::Paused(PauseState::Counting { remaining: 3, .. })
        ));
    }

    #[test]
    fn test_shooting_stars_spawn_only_above_star_line() {
        let mut state = running(5);
        state.shooting_stars.clear();
        // Hover in place so nothing else changes
        for _ in 0..5 {
            state.player.vel.y = -0.5;
            tick(&mut state, &TickInput::default(), 1000.0);
        }
        assert!(state.shooting_stars.is_empty());

        state.scroll_distance = 30_000.0 / crate::consts::FEET_PER_UNIT;
        for _ in 0..5 {
            state.player.vel.y = -0.5;
            tick(&mut state, &TickInput::default(), 1000.0);
        }
        assert!(!state.shooting_stars.is_empty());
    }

    #[test]
    fn test_shooting_star_cap() {
        let mut state = running(5);
        state.scroll_distance = 30_000.0 / crate::consts::FEET_PER_UNIT;
        state.player.vel.y = -0.5;
        // Twenty spawn intervals in a single step
        tick(&mut state, &TickInput::default(), 20_000.0);
        assert!(state.shooting_stars.len() <= 10);
    }

    #[test]
    fn test_same_seed_same_inputs_same_outcome() {
        let inputs: Vec<TickInput> = (0..600)
            .map(|i| TickInput {
                left: (i / 40) % 3 == 0,
                right: (i / 40) % 3 == 1,
                ..Default::default()
            })
            .collect();

        let mut a = running(77);
        let mut b = running(77);
        for input in &inputs {
            tick(&mut a, input, FRAME_MS);
            tick(&mut b, input, FRAME_MS);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.platforms.items(), b.platforms.items());
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_recycled_clouds_use_current_density() {
        let mut state = running(5);
        // Jump straight to the top of the fade: nothing may respawn
        state.scroll_distance = 60_000.0 / crate::consts::FEET_PER_UNIT;
        state.player.pos.y = 100.0;
        state.player.vel.y = -1.0;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        let ctx = FieldContext::new(&state.config, state.scroll_distance);
        for cloud in state.clouds.iter() {
            assert_eq!(cloud.y, state.config.clouds.park_y);
            assert!(!cloud.is_off_screen(&ctx));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_platform_floor_holds(seed: u64, moves in proptest::collection::vec(0u8..3, 1..400)) {
            let mut state = running(seed);
            for m in moves {
                let input = TickInput {
                    left: m == 1,
                    right: m == 2,
                    ..Default::default()
                };
                tick(&mut state, &input, FRAME_MS);
                prop_assert!(state.platforms.len() >= 7);
                prop_assert_eq!(state.stars.len(), 200);
                if state.is_game_over() {
                    break;
                }
            }
        }
    }
}
