//! Read-only per-frame view of the simulation for renderers and HUDs

use serde::Serialize;

use super::altitude::{AltitudeSample, SkyGradient};
use super::color::Rgb;
use super::star::Star;
use super::state::{GamePhase, PauseState, SimulationState};
use crate::tuning::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudSprite {
    pub rect: Rect,
    pub layer: u8,
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarSprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub tint: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Streak {
    pub head: [f32; 2],
    pub tail: [f32; 2],
    pub opacity: f32,
}

/// Session status as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Ready,
    Running,
    Paused,
    Counting(u8),
    GameOver,
}

impl Status {
    pub fn label(&self) -> String {
        match self {
            Status::Ready => "Ready".to_string(),
            Status::Running => String::new(),
            Status::Paused => "Paused".to_string(),
            Status::Counting(n) => n.to_string(),
            Status::GameOver => "Game Over".to_string(),
        }
    }
}

impl From<GamePhase> for Status {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Ready => Status::Ready,
            GamePhase::Running => Status::Running,
            GamePhase::Paused(PauseState::Idle) => Status::Paused,
            GamePhase::Paused(PauseState::Counting { remaining, .. }) => Status::Counting(remaining),
            GamePhase::GameOver => Status::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub viewport: Viewport,
    pub player: Rect,
    pub platforms: Vec<Rect>,
    /// On-screen clouds, back layer first
    pub clouds: Vec<CloudSprite>,
    /// The visible prefix of the star pool, already twinkled
    pub stars: Vec<StarSprite>,
    pub star_density: f32,
    /// Empty below the altitude where stars begin
    pub shooting_stars: Vec<Streak>,
    pub sky: SkyGradient,
    pub score: u64,
    pub high_score: u64,
    /// Whole feet
    pub altitude_feet: u64,
    pub status: Status,
}

impl RenderSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let config = &state.config;
        let viewport = config.viewport;
        let altitude = AltitudeSample::at(config, state.scroll_distance);

        let player = Rect {
            x: state.player.pos.x,
            y: state.player.pos.y,
            width: state.player.size.x,
            height: state.player.size.y,
        };

        let platforms = state
            .platforms
            .iter()
            .map(|p| Rect {
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
            })
            .collect();

        let mut clouds: Vec<CloudSprite> = state
            .clouds
            .iter()
            .filter(|c| c.is_visible(viewport.height, config.clouds.cull_margin))
            .map(|c| CloudSprite {
                rect: Rect {
                    x: c.x,
                    y: c.y,
                    width: c.width,
                    height: c.height,
                },
                layer: c.layer,
                color: c.color(),
                alpha: c.alpha,
            })
            .collect();
        clouds.sort_by_key(|c| c.layer);

        let visible = Star::visible_count(state.stars.len(), altitude.star_density);
        let stars = state
            .stars
            .iter()
            .take(visible)
            .map(|s| {
                let twinkle = s.twinkle(state.time_ms);
                StarSprite {
                    x: s.x,
                    y: s.y,
                    size: twinkle.size,
                    alpha: twinkle.alpha,
                    tint: s.tint,
                }
            })
            .collect();

        let shooting_stars = if altitude.feet > config.stars.ramp.start {
            state
                .shooting_stars
                .iter()
                .filter(|s| s.active)
                .map(|s| {
                    let (tx, ty) = s.tail();
                    Streak {
                        head: [s.x, s.y],
                        tail: [tx, ty],
                        opacity: s.opacity,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            viewport,
            player,
            platforms,
            clouds,
            stars,
            star_density: altitude.star_density,
            shooting_stars,
            sky: altitude.sky,
            score: state.score(),
            high_score: state.high_score,
            altitude_feet: altitude.feet.max(0.0).floor() as u64,
            status: state.phase.into(),
        }
    }
}
