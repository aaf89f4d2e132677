//! Frame composition
//!
//! Turns a `GameState` into one triangle list in world units, painted back
//! to front: path, towers, placement ghost, enemies, projectiles.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, preview};

const CIRCLE_SEGMENTS: u32 = 24;
const RING_SEGMENTS: u32 = 48;
const RING_THICKNESS: f32 = 1.5;

/// Build the vertex list for the current frame
pub fn build_scene(state: &GameState, cursor: Option<Vec2>, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    for (a, b) in state.path.segments() {
        shapes::line(&mut out, a, b, PATH_WIDTH, colors::PATH);
    }
    // Round the joints so corners don't notch
    for &w in state.path.waypoints() {
        shapes::circle(&mut out, w, PATH_WIDTH * 0.5, colors::PATH, 8);
    }

    for (_, tower) in state.towers.iter() {
        shapes::circle(&mut out, tower.pos, TOWER_RADIUS, tower.color, CIRCLE_SEGMENTS);
        if settings.show_range_rings {
            range_ring(&mut out, tower.pos, tower.range, colors::RANGE_RING);
        }
    }

    if settings.show_placement_preview {
        if let Some(cell) = cursor.and_then(|c| preview(state, c)) {
            shapes::circle(&mut out, cell, TOWER_RADIUS, colors::PREVIEW, CIRCLE_SEGMENTS);
            range_ring(&mut out, cell, state.tuning.tower_range, colors::PREVIEW);
        }
    }

    for (_, enemy) in state.enemies.iter() {
        shapes::circle(&mut out, enemy.pos, ENEMY_RADIUS, enemy.color, CIRCLE_SEGMENTS);
        health_bar(&mut out, enemy.pos, enemy.health_ratio());
    }

    for (_, projectile) in state.projectiles.iter() {
        shapes::circle(&mut out, projectile.pos, PROJECTILE_RADIUS, colors::PROJECTILE, 8);
    }

    out
}

fn range_ring(out: &mut Vec<Vertex>, center: Vec2, range: f32, color: [f32; 4]) {
    shapes::ring(
        out,
        center,
        range - RING_THICKNESS,
        range,
        color,
        RING_SEGMENTS,
    );
}

fn health_bar(out: &mut Vec<Vertex>, enemy_pos: Vec2, ratio: f32) {
    let origin = enemy_pos + HEALTH_BAR_OFFSET;
    let filled = HEALTH_BAR_WIDTH * ratio;
    shapes::rect(
        out,
        origin,
        Vec2::new(filled, HEALTH_BAR_HEIGHT),
        colors::HEALTH_REMAINING,
    );
    shapes::rect(
        out,
        origin + Vec2::new(filled, 0.0),
        Vec2::new(HEALTH_BAR_WIDTH - filled, HEALTH_BAR_HEIGHT),
        colors::HEALTH_LOST,
    );
}
