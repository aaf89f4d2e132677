//! Mapping between world units and the canvas
//!
//! The playfield keeps its aspect ratio and is centred in the canvas with
//! letterbox bars on the long side. World y grows downward, like screen
//! pixels.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Canvas size in pixels (CSS or device pixels, as long as callers agree)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        (self.width / SCREEN_WIDTH).min(self.height / SCREEN_HEIGHT)
    }

    /// Top-left corner of the playfield in canvas pixels
    fn offset(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - SCREEN_WIDTH * s) * 0.5,
            (self.height - SCREEN_HEIGHT * s) * 0.5,
        )
    }

    /// World position to canvas pixels
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        self.offset() + p * self.scale()
    }

    /// Canvas pixels to world position (may fall outside the playfield)
    pub fn screen_to_world(&self, px: Vec2) -> Vec2 {
        (px - self.offset()) / self.scale()
    }

    /// World position to normalized device coordinates
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let px = self.world_to_screen(p);
        Vec2::new(px.x / self.width * 2.0 - 1.0, 1.0 - px.y / self.height * 2.0)
    }
}
