//! Tower Defense - A minimal real-time tower defense game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (spawning, movement, targeting, collisions, placement)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound effects driven by simulation events
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `demo`: Seeded autoplayer for idle mode and headless runs

pub mod audio;
pub mod demo;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions (world units, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Target frame rate of the update loop
    pub const TARGET_FPS: u32 = 60;
    /// Largest delta time fed to a single tick (survives tab stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Slot array capacities
    pub const MAX_ENEMIES: usize = 50;
    pub const MAX_TOWERS: usize = 20;
    pub const MAX_PROJECTILES: usize = 100;
    pub const MAX_PATH_WAYPOINTS: usize = 20;

    /// Placement grid cell size
    pub const GRID_SIZE: f32 = 40.0;

    /// An enemy this close to its next waypoint advances to the following one
    pub const WAYPOINT_SNAP_RADIUS: f32 = 5.0;
    /// A projectile this close to an enemy hits it
    pub const PROJECTILE_HIT_RADIUS: f32 = 15.0;

    /// Draw sizes
    pub const TOWER_RADIUS: f32 = 15.0;
    pub const ENEMY_RADIUS: f32 = 12.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const PATH_WIDTH: f32 = 8.0;
    pub const HEALTH_BAR_WIDTH: f32 = 30.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 4.0;
    /// Health bar offset from the enemy center (top-left corner)
    pub const HEALTH_BAR_OFFSET: Vec2 = Vec2::new(-15.0, -20.0);
}

/// Center of the placement grid cell containing `pos`
#[inline]
pub fn grid_cell_center(pos: Vec2) -> Vec2 {
    use consts::GRID_SIZE;
    Vec2::new(
        (pos.x / GRID_SIZE).floor() * GRID_SIZE + GRID_SIZE / 2.0,
        (pos.y / GRID_SIZE).floor() * GRID_SIZE + GRID_SIZE / 2.0,
    )
}

/// True when `pos` lies inside the playfield (edges included)
#[inline]
pub fn in_playfield(pos: Vec2) -> bool {
    use consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    pos.x >= 0.0 && pos.x <= SCREEN_WIDTH && pos.y >= 0.0 && pos.y <= SCREEN_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_center() {
        assert_eq!(grid_cell_center(Vec2::new(220.0, 220.0)), Vec2::new(220.0, 220.0));
        assert_eq!(grid_cell_center(Vec2::new(0.0, 0.0)), Vec2::new(20.0, 20.0));
        assert_eq!(grid_cell_center(Vec2::new(39.9, 79.0)), Vec2::new(20.0, 60.0));
        assert_eq!(grid_cell_center(Vec2::new(40.0, 80.0)), Vec2::new(60.0, 100.0));
    }

    #[test]
    fn test_in_playfield_edges() {
        assert!(in_playfield(Vec2::new(0.0, 0.0)));
        assert!(in_playfield(Vec2::new(1200.0, 800.0)));
        assert!(!in_playfield(Vec2::new(1200.1, 400.0)));
        assert!(!in_playfield(Vec2::new(600.0, -0.1)));
    }
}
