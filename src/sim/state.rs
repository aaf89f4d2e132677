//! Game state and core simulation types
//!
//! One `GameState` owns everything the simulation touches; frontends hold it
//! and pass it by reference to `tick`, the renderer and the HUD.

use glam::Vec2;

use super::events::GameEvent;
use super::slots::Slots;
use crate::consts::*;
use crate::tuning::Tuning;

/// Display colors (RGBA, 0-1)
pub mod palette {
    pub const ENEMY: [f32; 4] = [0.902, 0.161, 0.216, 1.0];
    pub const TOWER: [f32; 4] = [0.0, 0.475, 0.945, 1.0];
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Game is paused
    Paused,
}

/// The route enemies follow, as an ordered list of waypoints
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Default for Path {
    /// The classic S-shaped route across the playfield
    fn default() -> Self {
        Self {
            waypoints: vec![
                Vec2::new(0.0, 400.0),
                Vec2::new(200.0, 400.0),
                Vec2::new(200.0, 200.0),
                Vec2::new(600.0, 200.0),
                Vec2::new(600.0, 600.0),
                Vec2::new(1000.0, 600.0),
                Vec2::new(1000.0, 400.0),
                Vec2::new(1200.0, 400.0),
            ],
        }
    }
}

impl Path {
    /// Build a custom route. Needs at least two and at most
    /// `MAX_PATH_WAYPOINTS` waypoints.
    pub fn new(waypoints: Vec<Vec2>) -> Option<Self> {
        if waypoints.len() < 2 || waypoints.len() > MAX_PATH_WAYPOINTS {
            return None;
        }
        Some(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Index of the final waypoint
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Consecutive waypoint pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.waypoints.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total route length
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }
}

/// An enemy walking the path
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Index of the waypoint most recently reached
    pub path_index: usize,
    pub color: [f32; 4],
}

impl Enemy {
    /// Fresh enemy at the start of `path`
    pub fn spawn(path: &Path, tuning: &Tuning) -> Self {
        Self {
            pos: path.start(),
            health: tuning.enemy_health,
            max_health: tuning.enemy_health,
            speed: tuning.enemy_speed,
            path_index: 0,
            color: palette::ENEMY,
        }
    }

    /// Remaining health as a 0-1 fraction (for health bars)
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// A player-placed tower
#[derive(Debug, Clone)]
pub struct Tower {
    /// Grid cell center
    pub pos: Vec2,
    pub range: f32,
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    /// Seconds since the last shot
    pub last_shot: f32,
    pub color: [f32; 4],
}

impl Tower {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            range: tuning.tower_range,
            damage: tuning.tower_damage,
            fire_rate: tuning.tower_fire_rate,
            last_shot: 0.0,
            color: palette::TOWER,
        }
    }

    /// True once the cooldown has elapsed
    #[inline]
    pub fn ready(&self) -> bool {
        self.last_shot >= 1.0 / self.fire_rate
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// Slot of the enemy this was fired at. Advisory only: collisions are
    /// resolved by distance against every active enemy.
    pub target: usize,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values for this run
    pub tuning: Tuning,
    /// Enemy route
    pub path: Path,
    pub enemies: Slots<Enemy>,
    pub towers: Slots<Tower>,
    pub projectiles: Slots<Projectile>,
    /// Player money (never clamped)
    pub money: i32,
    /// Player lives (never clamped, may go negative)
    pub lives: i32,
    /// Wave counter (display only)
    pub wave: u32,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a new game with default tuning on the default route
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Create a new game with the given balance values
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self::with_path(tuning, Path::default())
    }

    /// Create a new game on a custom route. Balance values are sanitized first.
    pub fn with_path(tuning: Tuning, path: Path) -> Self {
        let tuning = tuning.sanitized();
        Self {
            money: tuning.starting_money,
            lives: tuning.starting_lives,
            tuning,
            path,
            enemies: Slots::with_capacity(MAX_ENEMIES),
            towers: Slots::with_capacity(MAX_TOWERS),
            projectiles: Slots::with_capacity(MAX_PROJECTILES),
            wave: 1,
            spawn_timer: 0.0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Activate an enemy at the path start in the first free slot.
    /// Returns `None` when every enemy slot is taken.
    pub fn spawn_enemy(&mut self) -> Option<usize> {
        let enemy = Enemy::spawn(&self.path, &self.tuning);
        let slot = self.enemies.insert(enemy)?;
        self.events.push(GameEvent::EnemySpawned { enemy: slot });
        Some(slot)
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True when the player can afford another tower
    pub fn can_afford_tower(&self) -> bool {
        self.money >= self.tuning.tower_cost
    }
}
