//! Property tests for the simulation's capacity and cooldown rules

use glam::Vec2;
use proptest::prelude::*;

use tower_defense::Tuning;
use tower_defense::consts::{MAX_ENEMIES, MAX_PROJECTILES, MAX_TOWERS};
use tower_defense::sim::{Enemy, GameEvent, GameState, Path, TickInput, Tower, tick};

#[derive(Debug, Clone)]
enum Action {
    Frame(f32),
    Click(f32, f32),
    Spawn,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0.001f32..0.1).prop_map(Action::Frame),
        2 => (0.0f32..1200.0, 0.0f32..800.0).prop_map(|(x, y)| Action::Click(x, y)),
        1 => Just(Action::Spawn),
    ]
}

proptest! {
    #[test]
    fn active_counts_never_exceed_capacity(actions in prop::collection::vec(action(), 1..300)) {
        let mut state = GameState::with_tuning(Tuning {
            spawn_interval: 0.02,
            starting_money: 10_000,
            ..Default::default()
        });
        let mut placed = 0i32;
        let mut kills = 0i32;

        for action in actions {
            let input = match action {
                Action::Frame(_) => TickInput::default(),
                Action::Click(x, y) => TickInput {
                    cursor: Some(Vec2::new(x, y)),
                    place_tower: true,
                    ..Default::default()
                },
                Action::Spawn => {
                    state.spawn_enemy();
                    TickInput::default()
                }
            };
            let dt = match action {
                Action::Frame(dt) => dt,
                _ => 1.0 / 60.0,
            };
            tick(&mut state, &input, dt);

            for event in state.drain_events() {
                match event {
                    GameEvent::TowerPlaced { .. } => placed += 1,
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    _ => {}
                }
            }

            prop_assert!(state.enemies.active_count() <= MAX_ENEMIES);
            prop_assert!(state.towers.active_count() <= MAX_TOWERS);
            prop_assert!(state.projectiles.active_count() <= MAX_PROJECTILES);
            prop_assert_eq!(state.money, 10_000 + 10 * kills - 50 * placed);
        }
    }

    #[test]
    fn towers_respect_fire_rate(
        fire_rate in 0.5f32..20.0,
        dts in prop::collection::vec(0.001f32..0.2, 50..400),
    ) {
        let tuning = Tuning {
            spawn_interval: 1.0e9,
            tower_fire_rate: fire_rate,
            ..Default::default()
        };
        let path = Path::new(vec![Vec2::new(0.0, 20.0), Vec2::new(1200.0, 20.0)]).unwrap();
        let mut state = GameState::with_path(tuning.clone(), path);

        state.towers.insert(Tower::new(Vec2::new(600.0, 420.0), &tuning));
        // A target that never moves or dies
        let mut dummy = Enemy::spawn(&state.path, &tuning);
        dummy.pos = Vec2::new(650.0, 420.0);
        dummy.speed = 0.0;
        dummy.health = f32::MAX;
        state.enemies.insert(dummy);

        let interval = 1.0 / fire_rate as f64;
        let mut now = 0.0f64;
        let mut last_fire: Option<f64> = None;
        for dt in dts {
            now += dt as f64;
            tick(&mut state, &TickInput::default(), dt);
            for event in state.drain_events() {
                if let GameEvent::ProjectileFired { .. } = event {
                    if let Some(prev) = last_fire {
                        prop_assert!(now - prev >= interval - 1e-3);
                    }
                    last_fire = Some(now);
                }
            }
        }
    }
}
