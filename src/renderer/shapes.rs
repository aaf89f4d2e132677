//! Triangle-list builders for 2D primitives
//!
//! Every builder appends to an existing buffer so a whole frame ends up in a
//! single vertex list. Coordinates are in world units.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    push_tri(out, a, b, c, color);
    push_tri(out, c, b, d, color);
}

fn on_circle(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        push_tri(
            out,
            center,
            on_circle(center, radius, i, segments),
            on_circle(center, radius, i + 1, segments),
            color,
        );
    }
}

/// Hollow circle between two radii
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 6) as usize);
    for i in 0..segments {
        push_quad(
            out,
            [
                on_circle(center, inner_radius, i, segments),
                on_circle(center, outer_radius, i, segments),
                on_circle(center, inner_radius, i + 1, segments),
                on_circle(center, outer_radius, i + 1, segments),
            ],
            color,
        );
    }
}

/// Straight stroke of the given width from `a` to `b`
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let side = dir.perp() * (width * 0.5);
    push_quad(out, [a + side, a - side, b + side, b - side], color);
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(out: &mut Vec<Vertex>, top_left: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let br = top_left + size;
    push_quad(
        out,
        [
            top_left,
            Vec2::new(br.x, top_left.y),
            Vec2::new(top_left.x, br.y),
            br,
        ],
        color,
    );
}
