//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec2;

/// Something noteworthy that happened during a tick.
///
/// Slot indices refer to the slot arrays on `GameState` at the moment the
/// event was emitted; the slot may have been reused since.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// An enemy entered the path start
    EnemySpawned { enemy: usize },
    /// An enemy reached the path end and cost a life
    EnemyLeaked { enemy: usize },
    /// An enemy ran out of health and paid its bounty
    EnemyKilled { enemy: usize, position: Vec2 },
    /// A tower launched a projectile
    ProjectileFired {
        tower: usize,
        projectile: usize,
        target: usize,
    },
    /// A projectile struck an enemy
    ProjectileHit { projectile: usize, enemy: usize },
    /// The player bought a tower
    TowerPlaced { tower: usize, position: Vec2 },
}
