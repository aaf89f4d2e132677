//! Tower placement on the grid
//!
//! A click snaps to the center of its grid cell. The cell is buildable when
//! no path waypoint and no existing tower lies within one cell of it.

use glam::Vec2;

use super::events::GameEvent;
use super::state::{GameState, Tower};
use crate::consts::GRID_SIZE;
use crate::grid_cell_center;

/// Why a grid cell cannot take a tower
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// A path waypoint is within one grid cell
    Path,
    /// An existing tower is within one grid cell
    Tower,
}

/// What is stopping a tower at `cell`, if anything
pub fn blocker_at(state: &GameState, cell: Vec2) -> Option<Blocker> {
    if state
        .path
        .waypoints()
        .iter()
        .any(|&wp| cell.distance(wp) < GRID_SIZE)
    {
        return Some(Blocker::Path);
    }
    if state
        .towers
        .iter()
        .any(|(_, tower)| cell.distance(tower.pos) < GRID_SIZE)
    {
        return Some(Blocker::Tower);
    }
    None
}

/// Grid cell a tower would occupy if the player clicked at `cursor` now,
/// or `None` when the click would be rejected (blocked or unaffordable).
pub fn preview(state: &GameState, cursor: Vec2) -> Option<Vec2> {
    let cell = grid_cell_center(cursor);
    (blocker_at(state, cell).is_none() && state.can_afford_tower()).then_some(cell)
}

/// Buy a tower at the cell under `cursor`.
///
/// Returns the tower's slot, or `None` when the cell is blocked, the player
/// cannot afford it, or every tower slot is taken. Rejections change nothing.
pub fn try_place_tower(state: &mut GameState, cursor: Vec2) -> Option<usize> {
    let cell = grid_cell_center(cursor);

    // Same test as the preview, towers included, so clicks cannot stack towers
    if let Some(blocker) = blocker_at(state, cell) {
        log::trace!("Placement at {cell} blocked by {blocker:?}");
        return None;
    }
    if !state.can_afford_tower() {
        log::trace!("Placement at {cell} unaffordable (money {})", state.money);
        return None;
    }

    let slot = state.towers.insert(Tower::new(cell, &state.tuning))?;
    state.money -= state.tuning.tower_cost;
    state.events.push(GameEvent::TowerPlaced {
        tower: slot,
        position: cell,
    });
    log::debug!("Tower {slot} placed at {cell}, money left {}", state.money);
    Some(slot)
}
