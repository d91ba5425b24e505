//! Snapshot -> triangle list
//!
//! Draw order, back to front: sky, stars, clouds (layer 0 first), platforms,
//! player glow and body, shooting stars, then the pause/game-over dim.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::snapshot::{CloudSprite, RenderSnapshot, Status};

/// Ellipses per cloud
const CLOUD_PUFFS: usize = 5;
/// Padding around the player's glow
const GLOW_SIZE: f32 = 5.0;

pub fn build(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let viewport = snapshot.viewport;
    let mut vertices = Vec::with_capacity(4096);

    vertices.extend(shapes::gradient_rect(
        0.0,
        0.0,
        viewport.width,
        viewport.height,
        snapshot.sky.top.to_rgba(1.0),
        snapshot.sky.bottom.to_rgba(1.0),
    ));

    for star in &snapshot.stars {
        let center = Vec2::new(star.x, star.y);
        let alpha = star.alpha.clamp(0.0, 1.0);
        vertices.extend(shapes::glow(
            center,
            star.size * 3.0,
            star.tint.to_rgba(alpha * 0.3),
            8,
        ));
        vertices.extend(shapes::circle(center, star.size, star.tint.to_rgba(alpha), 6));
    }

    for cloud in &snapshot.clouds {
        vertices.extend(cloud_puffs(cloud));
    }

    for platform in &snapshot.platforms {
        vertices.extend(shapes::rect(
            platform.x,
            platform.y,
            platform.width,
            platform.height,
            colors::PLATFORM,
        ));
    }

    let player = snapshot.player;
    vertices.extend(shapes::rect(
        player.x - GLOW_SIZE,
        player.y - GLOW_SIZE,
        player.width + GLOW_SIZE * 2.0,
        player.height + GLOW_SIZE * 2.0,
        colors::PLAYER_GLOW,
    ));
    vertices.extend(shapes::rect(
        player.x,
        player.y,
        player.width,
        player.height,
        colors::PLAYER,
    ));

    for streak in &snapshot.shooting_stars {
        let mut head = colors::STREAK_HEAD;
        head[3] *= streak.opacity;
        vertices.extend(shapes::streak(
            Vec2::from(streak.head),
            Vec2::from(streak.tail),
            2.0,
            head,
            colors::STREAK_TAIL,
        ));
    }

    if matches!(
        snapshot.status,
        Status::Paused | Status::Counting(_) | Status::GameOver
    ) {
        vertices.extend(shapes::rect(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
            colors::OVERLAY,
        ));
    }

    vertices
}

/// A row of overlapping ellipses with a gentle vertical wave
fn cloud_puffs(cloud: &CloudSprite) -> Vec<Vertex> {
    let rect = cloud.rect;
    let center = Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    let radii = Vec2::new(rect.width / 4.0, rect.height / 4.0);
    let color = cloud.color.to_rgba(cloud.alpha);

    let mut vertices = Vec::new();
    for i in 0..CLOUD_PUFFS {
        let offset = Vec2::new(
            (i as f32 - 2.0) * radii.x,
            (i as f32 * std::f32::consts::PI / 3.0).sin() * radii.y / 2.0,
        );
        vertices.extend(shapes::ellipse(center + offset, radii, color, 16));
    }
    vertices
}
