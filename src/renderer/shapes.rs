//! Shape generation for 2D primitives
//!
//! Every builder returns a plain triangle list in viewport pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(x, y, width, height, color, color)
}

/// Rectangle blending from `top` to `bottom`
pub fn gradient_rect(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    let (x2, y2) = (x + width, y + height);
    vec![
        Vertex::new(x, y, top),
        Vertex::new(x2, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y, top),
        Vertex::new(x2, y2, bottom),
    ]
}

/// Filled ellipse fanned from its center
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Disc that fades from `color` at the center to transparent at the rim
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let rim = [color[0], color[1], color[2], 0.0];
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            rim,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            rim,
        ));
    }

    vertices
}

/// Tapered line from `head` (full width, `head_color`) to `tail` (a point)
pub fn streak(
    head: Vec2,
    tail: Vec2,
    width: f32,
    head_color: [f32; 4],
    tail_color: [f32; 4],
) -> Vec<Vertex> {
    let dir = (tail - head).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    let a = head + perp;
    let b = head - perp;

    vec![
        Vertex::new(a.x, a.y, head_color),
        Vertex::new(b.x, b.y, head_color),
        Vertex::new(tail.x, tail.y, tail_color),
    ]
}
