//! Data-driven game balance
//!
//! Every gameplay number that is not geometry lives here. Tuning files are
//! JSON; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, WAYPOINT_SNAP_RADIUS};

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    /// Health of a freshly spawned enemy
    pub enemy_health: f32,
    /// Enemy speed (world units per second)
    pub enemy_speed: f32,
    /// Money awarded per kill
    pub kill_reward: i32,
    /// Money deducted per tower placed
    pub tower_cost: i32,
    pub tower_range: f32,
    pub tower_damage: f32,
    /// Shots per second
    pub tower_fire_rate: f32,
    /// Projectile speed (world units per second)
    pub projectile_speed: f32,
    pub starting_money: i32,
    pub starting_lives: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: 1.5,
            enemy_health: 50.0,
            enemy_speed: 50.0,
            kill_reward: 10,
            tower_cost: 50,
            tower_range: 100.0,
            tower_damage: 25.0,
            tower_fire_rate: 1.0,
            projectile_speed: 400.0,
            starting_money: 100,
            starting_lives: 20,
        }
    }
}

impl Tuning {
    /// Smallest accepted fire rate / spawn interval
    const MIN_RATE: f32 = 0.01;

    /// Fastest enemy that cannot step over a waypoint's snap radius in one
    /// clamped frame (one step stays under twice the radius)
    pub const MAX_ENEMY_SPEED: f32 = 2.0 * WAYPOINT_SNAP_RADIUS / MAX_FRAME_DT * 0.99;

    /// Parse a JSON tuning document and sanitize it
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load a tuning file from disk (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("parse tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values that would stall or break the simulation
    pub fn sanitized(mut self) -> Self {
        if !(self.spawn_interval >= Self::MIN_RATE) {
            log::warn!("spawn_interval {} too small, clamping", self.spawn_interval);
            self.spawn_interval = Self::MIN_RATE;
        }
        if !(self.tower_fire_rate >= Self::MIN_RATE) {
            log::warn!("tower_fire_rate {} too small, clamping", self.tower_fire_rate);
            self.tower_fire_rate = Self::MIN_RATE;
        }
        if !(self.enemy_health > 0.0) {
            self.enemy_health = 1.0;
        }
        if !(self.enemy_speed <= Self::MAX_ENEMY_SPEED) {
            log::warn!(
                "enemy_speed {} would overshoot waypoints, clamping to {}",
                self.enemy_speed,
                Self::MAX_ENEMY_SPEED
            );
            self.enemy_speed = Self::MAX_ENEMY_SPEED;
        }
        self.enemy_speed = self.enemy_speed.max(0.0);
        self.tower_range = self.tower_range.max(0.0);
        self.projectile_speed = self.projectile_speed.max(0.0);
        self.tower_cost = self.tower_cost.max(0);
        self
    }
}
