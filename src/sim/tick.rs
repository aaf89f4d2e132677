//! Per-frame simulation tick
//!
//! Sub-steps run in a fixed order every frame:
//! spawn timer -> enemies -> towers -> projectiles -> placement input.

use glam::Vec2;

use super::events::GameEvent;
use super::placement::try_place_tower;
use super::state::{GamePhase, GameState, Projectile};
use crate::consts::*;
use crate::in_playfield;

/// Input polled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in world coordinates
    pub cursor: Option<Vec2>,
    /// Place a tower at the cursor (edge-triggered: true for one frame per click)
    pub place_tower: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
        log::info!("Phase -> {:?}", state.phase);
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    update_spawner(state, dt);
    update_enemies(state, dt);
    update_towers(state, dt);
    update_projectiles(state, dt);

    if input.place_tower {
        if let Some(cursor) = input.cursor {
            try_place_tower(state, cursor);
        }
    }
}

/// Accumulate the spawn timer and release one enemy per elapsed interval.
/// A spawn with no free slot is dropped; the timer resets either way.
fn update_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer > state.tuning.spawn_interval {
        state.spawn_enemy();
        state.spawn_timer = 0.0;
    }
}

/// Walk enemies along the path, charging a life for leaks and paying the
/// bounty for kills. The health check runs after movement.
fn update_enemies(state: &mut GameState, dt: f32) {
    let last_index = state.path.last_index();

    for i in 0..state.enemies.capacity() {
        let Some(enemy) = state.enemies.get_mut(i) else {
            continue;
        };

        if enemy.path_index >= last_index {
            state.enemies.remove(i);
            state.lives -= 1;
            state.events.push(GameEvent::EnemyLeaked { enemy: i });
            log::debug!("Enemy {i} leaked, lives {}", state.lives);
            continue;
        }

        let target = state.path.waypoints()[enemy.path_index + 1];
        let to_target = target - enemy.pos;
        let distance = to_target.length();

        if distance < WAYPOINT_SNAP_RADIUS {
            enemy.path_index += 1;
        } else {
            enemy.pos += to_target / distance * enemy.speed * dt;
        }

        if enemy.health <= 0.0 {
            let position = enemy.pos;
            state.enemies.remove(i);
            state.money += state.tuning.kill_reward;
            state.events.push(GameEvent::EnemyKilled { enemy: i, position });
        }
    }
}

/// Cool towers down and fire at the nearest enemy in range
fn update_towers(state: &mut GameState, dt: f32) {
    let GameState {
        towers,
        enemies,
        projectiles,
        events,
        tuning,
        ..
    } = state;

    for (tower_index, tower) in towers.iter_mut() {
        tower.last_shot += dt;
        if !tower.ready() {
            continue;
        }

        // Nearest enemy strictly inside range; first slot wins ties
        let mut closest: Option<(usize, Vec2)> = None;
        let mut closest_distance = tower.range;
        for (enemy_index, enemy) in enemies.iter() {
            let distance = tower.pos.distance(enemy.pos);
            if distance < closest_distance {
                closest_distance = distance;
                closest = Some((enemy_index, enemy.pos));
            }
        }

        let Some((target, target_pos)) = closest else {
            continue;
        };

        // A full projectile pool drops the shot and leaves the cooldown
        // elapsed, so the tower retries next frame
        let projectile = Projectile {
            pos: tower.pos,
            vel: (target_pos - tower.pos).normalize_or_zero() * tuning.projectile_speed,
            damage: tower.damage,
            target,
        };
        if let Some(projectile_index) = projectiles.insert(projectile) {
            tower.last_shot = 0.0;
            events.push(GameEvent::ProjectileFired {
                tower: tower_index,
                projectile: projectile_index,
                target,
            });
        }
    }
}

/// Move projectiles, drop those leaving the playfield, and apply hits
fn update_projectiles(state: &mut GameState, dt: f32) {
    let GameState {
        projectiles,
        enemies,
        events,
        ..
    } = state;

    for i in 0..projectiles.capacity() {
        let Some(projectile) = projectiles.get_mut(i) else {
            continue;
        };

        projectile.pos += projectile.vel * dt;

        if !in_playfield(projectile.pos) {
            projectiles.remove(i);
            continue;
        }

        // First enemy in slot order within the hit radius, not the nearest
        let pos = projectile.pos;
        let damage = projectile.damage;
        let hit = enemies
            .iter_mut()
            .find(|(_, enemy)| pos.distance(enemy.pos) < PROJECTILE_HIT_RADIUS);

        if let Some((enemy_index, enemy)) = hit {
            enemy.health -= damage;
            projectiles.remove(i);
            events.push(GameEvent::ProjectileHit {
                projectile: i,
                enemy: enemy_index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Tower};
    use crate::tuning::Tuning;

    /// A game that never spawns on its own
    fn quiet_state() -> GameState {
        GameState::with_tuning(Tuning {
            spawn_interval: 1.0e9,
            ..Default::default()
        })
    }

    /// Stationary enemy at `pos` (speed 0, heading for waypoint 1)
    fn parked_enemy(state: &mut GameState, pos: Vec2, health: f32) -> usize {
        let mut enemy = Enemy::spawn(&state.path, &state.tuning);
        enemy.pos = pos;
        enemy.speed = 0.0;
        enemy.health = health;
        enemy.max_health = health;
        state.enemies.insert(enemy).unwrap()
    }

    fn add_tower(state: &mut GameState, pos: Vec2) -> usize {
        let tower = Tower::new(pos, &state.tuning);
        state.towers.insert(tower).unwrap()
    }

    fn fired_count(state: &GameState) -> usize {
        state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileFired { .. }))
            .count()
    }

    #[test]
    fn test_spawn_requires_strictly_greater_than_interval() {
        let mut state = GameState::new();
        let input = TickInput::default();

        for _ in 0..3 {
            tick(&mut state, &input, 0.5);
        }
        // Timer sits at exactly 1.5
        assert_eq!(state.enemies.active_count(), 0);

        tick(&mut state, &input, 0.5);
        assert_eq!(state.enemies.active_count(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawn_dropped_when_full_still_resets_timer() {
        let mut state = GameState::new();
        for _ in 0..MAX_ENEMIES {
            let slot = state.spawn_enemy().unwrap();
            state.enemies.get_mut(slot).unwrap().speed = 0.0;
        }
        state.spawn_timer = 1.49;
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.enemies.active_count(), MAX_ENEMIES);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_leak_costs_exactly_one_life_regardless_of_health() {
        let mut state = quiet_state();
        let slot = parked_enemy(&mut state, Vec2::new(1200.0, 400.0), 0.0);
        state.enemies.get_mut(slot).unwrap().path_index = state.path.last_index();

        tick(&mut state, &TickInput::default(), 1.0 / 60.0);

        assert!(state.enemies.get(slot).is_none());
        assert_eq!(state.lives, 19);
        // Dead on arrival still pays nothing when it leaks
        assert_eq!(state.money, 100);
        assert!(state.events.contains(&GameEvent::EnemyLeaked { enemy: slot }));
    }

    #[test]
    fn test_kill_pays_exactly_ten() {
        let mut state = quiet_state();
        let slot = state.spawn_enemy().unwrap();
        state.enemies.get_mut(slot).unwrap().health = 0.0;

        tick(&mut state, &TickInput::default(), 0.1);

        assert!(state.enemies.get(slot).is_none());
        assert_eq!(state.money, 110);
        assert_eq!(state.lives, 20);
        // It still took its step before being removed
        let killed_at = state.events.iter().find_map(|e| match e {
            GameEvent::EnemyKilled { position, .. } => Some(*position),
            _ => None,
        });
        let killed_at = killed_at.unwrap();
        assert!((killed_at.x - 5.0).abs() < 1e-4);
        assert_eq!(killed_at.y, 400.0);
    }

    #[test]
    fn test_enemy_moves_toward_next_waypoint() {
        let mut state = quiet_state();
        let slot = state.spawn_enemy().unwrap();
        tick(&mut state, &TickInput::default(), 0.5);
        let enemy = state.enemies.get(slot).unwrap();
        assert!((enemy.pos - Vec2::new(25.0, 400.0)).length() < 1e-4);
        assert_eq!(enemy.path_index, 0);
    }

    #[test]
    fn test_waypoint_snap_advances_without_moving() {
        let mut state = quiet_state();
        let slot = state.spawn_enemy().unwrap();
        state.enemies.get_mut(slot).unwrap().pos = Vec2::new(197.0, 400.0);

        tick(&mut state, &TickInput::default(), 0.1);

        let enemy = state.enemies.get(slot).unwrap();
        assert_eq!(enemy.path_index, 1);
        assert_eq!(enemy.pos, Vec2::new(197.0, 400.0));
    }

    #[test]
    fn test_tower_fires_once_per_interval() {
        let mut state = quiet_state();
        add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(470.0, 300.0), 1.0e6);

        let input = TickInput::default();
        let mut shots = 0;
        for step in 1..=40 {
            tick(&mut state, &input, 0.25);
            let fired = fired_count(&state);
            if fired > 0 {
                // First shot after one full second, then every four steps
                assert_eq!(step % 4, 0, "fired at step {step}");
            }
            shots += fired;
            state.events.clear();
        }
        assert_eq!(shots, 10);
    }

    #[test]
    fn test_tower_ignores_enemy_at_exact_range() {
        let mut state = quiet_state();
        let tower = add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(520.0, 300.0), 50.0);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(fired_count(&state), 0);
        // Cooldown keeps accumulating while idle
        assert_eq!(state.towers.get(tower).unwrap().last_shot, 1.0);

        state.enemies.get_mut(0).unwrap().pos = Vec2::new(519.0, 300.0);
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(fired_count(&state), 1);
        assert_eq!(state.towers.get(tower).unwrap().last_shot, 0.0);
    }

    #[test]
    fn test_target_is_nearest_with_first_slot_tiebreak() {
        let mut state = quiet_state();
        add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(370.0, 300.0), 50.0);
        parked_enemy(&mut state, Vec2::new(470.0, 300.0), 50.0);

        tick(&mut state, &TickInput::default(), 1.0);
        let projectile = state.projectiles.get(0).unwrap();
        assert_eq!(projectile.target, 0);

        let mut state = quiet_state();
        add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(340.0, 300.0), 50.0);
        parked_enemy(&mut state, Vec2::new(470.0, 300.0), 50.0);

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.projectiles.get(0).unwrap().target, 1);
    }

    #[test]
    fn test_projectile_aims_at_target_current_position() {
        let mut state = quiet_state();
        add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(420.0, 360.0), 50.0);

        tick(&mut state, &TickInput::default(), 1.0);
        // Fired this frame, then integrated once by the projectile step
        let projectile = state.projectiles.get(0).unwrap();
        assert!((projectile.vel - Vec2::new(0.0, 400.0)).length() < 1e-3);
        assert_eq!(projectile.damage, 25.0);
    }

    #[test]
    fn test_full_projectile_pool_keeps_cooldown_elapsed() {
        let mut state = quiet_state();
        for _ in 0..MAX_PROJECTILES {
            state.projectiles.insert(Projectile {
                pos: Vec2::new(1100.0, 50.0),
                vel: Vec2::ZERO,
                damage: 0.0,
                target: 0,
            });
        }
        let tower = add_tower(&mut state, Vec2::new(420.0, 300.0));
        parked_enemy(&mut state, Vec2::new(450.0, 300.0), 1.0e6);

        tick(&mut state, &TickInput::default(), 1.0);
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(fired_count(&state), 0);
        assert!(state.towers.get(tower).unwrap().last_shot >= 1.0);

        state.projectiles.remove(5);
        tick(&mut state, &TickInput::default(), 0.01);
        assert_eq!(fired_count(&state), 1);
        assert_eq!(state.towers.get(tower).unwrap().last_shot, 0.0);
        assert_eq!(state.projectiles.get(5).unwrap().target, 0);
    }

    #[test]
    fn test_projectile_leaving_bounds_does_no_damage() {
        let mut state = quiet_state();
        // Enemy sits just past the right edge where the projectile lands
        let enemy = parked_enemy(&mut state, Vec2::new(1230.0, 400.0), 50.0);
        state.projectiles.insert(Projectile {
            pos: Vec2::new(1195.0, 400.0),
            vel: Vec2::new(400.0, 0.0),
            damage: 25.0,
            target: enemy,
        });

        tick(&mut state, &TickInput::default(), 0.1);

        assert_eq!(state.projectiles.active_count(), 0);
        assert_eq!(state.enemies.get(enemy).unwrap().health, 50.0);
    }

    #[test]
    fn test_projectile_hits_first_slot_not_nearest() {
        let mut state = quiet_state();
        let far = parked_enemy(&mut state, Vec2::new(512.0, 500.0), 50.0);
        let near = parked_enemy(&mut state, Vec2::new(502.0, 500.0), 50.0);
        state.projectiles.insert(Projectile {
            pos: Vec2::new(500.0, 500.0),
            vel: Vec2::ZERO,
            damage: 25.0,
            target: near,
        });

        tick(&mut state, &TickInput::default(), 0.01);

        assert_eq!(state.enemies.get(far).unwrap().health, 25.0);
        assert_eq!(state.enemies.get(near).unwrap().health, 50.0);
        assert_eq!(state.projectiles.active_count(), 0);
        assert!(state.events.contains(&GameEvent::ProjectileHit {
            projectile: 0,
            enemy: far
        }));
    }

    #[test]
    fn test_placement_runs_after_combat() {
        let mut state = quiet_state();
        let input = TickInput {
            cursor: Some(Vec2::new(410.0, 290.0)),
            place_tower: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);

        let tower = state.towers.get(0).unwrap();
        assert_eq!(tower.pos, Vec2::new(420.0, 300.0));
        // Placed after the tower step, so no cooldown accrued this frame
        assert_eq!(tower.last_shot, 0.0);
        assert_eq!(state.money, 50);
    }

    #[test]
    fn test_place_without_cursor_is_noop() {
        let mut state = quiet_state();
        let input = TickInput {
            place_tower: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        assert_eq!(state.towers.active_count(), 0);
        assert_eq!(state.money, 100);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = GameState::new();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.1);
        assert_eq!(state.phase, GamePhase::Paused);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.enemies.active_count(), 0);

        tick(&mut state, &pause, 0.1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.spawn_timer - 0.1).abs() < 1e-6);
    }
}
