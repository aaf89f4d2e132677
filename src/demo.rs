//! Seeded autoplayer
//!
//! Drives the game without a human: whenever it can afford a tower it looks
//! for a free cell hugging the path and clicks there. Used by the browser's
//! idle mode and by the native headless run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{GRID_SIZE, TARGET_FPS};
use crate::sim::{GameEvent, GameState, TickInput, preview, tick};
use crate::tuning::Tuning;

/// Candidate cells tried per decision
const ATTEMPTS: usize = 12;

/// Automatic tower buyer
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    /// Frames to wait between decisions
    think_frames: u32,
    countdown: u32,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            think_frames: 30,
            countdown: 0,
        }
    }

    /// Input for the coming frame
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if self.countdown > 0 {
            self.countdown -= 1;
            return TickInput::default();
        }
        self.countdown = self.think_frames;

        if !state.can_afford_tower() || state.towers.is_full() {
            return TickInput::default();
        }

        match self.pick_cell(state) {
            Some(cell) => TickInput {
                cursor: Some(cell),
                place_tower: true,
                ..Default::default()
            },
            None => TickInput::default(),
        }
    }

    /// Random buildable cell one or two cells off a random path segment
    fn pick_cell(&mut self, state: &GameState) -> Option<Vec2> {
        let segments: Vec<_> = state.path.segments().collect();
        for _ in 0..ATTEMPTS {
            let (a, b) = segments[self.rng.random_range(0..segments.len())];
            let along = a.lerp(b, self.rng.random_range(0.0..1.0));
            let normal = (b - a).perp().normalize_or_zero();
            let side = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let offset = self.rng.random_range(1.5..2.5) * GRID_SIZE;
            let candidate = along + normal * side * offset;
            if !crate::in_playfield(candidate) {
                continue;
            }
            if let Some(cell) = preview(state, candidate) {
                return Some(cell);
            }
        }
        None
    }
}

/// Tallies from a headless session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks the simulation advanced (`GameState::time_ticks`)
    pub frames: u64,
    pub towers_built: u32,
    pub shots: u32,
    pub hits: u32,
    pub kills: u32,
    pub leaks: u32,
    pub money: i32,
    pub lives: i32,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TowerPlaced { .. } => self.towers_built += 1,
            GameEvent::ProjectileFired { .. } => self.shots += 1,
            GameEvent::ProjectileHit { .. } => self.hits += 1,
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::EnemyLeaked { .. } => self.leaks += 1,
            GameEvent::EnemySpawned { .. } => {}
        }
    }
}

/// Play `seconds` of game time at the target frame rate with an autoplayer.
/// Logs a progress line every ten simulated seconds.
pub fn run_headless(tuning: Tuning, seed: u64, seconds: u32) -> RunSummary {
    let mut state = GameState::with_tuning(tuning);
    let mut player = AutoPlayer::new(seed);
    let mut summary = RunSummary::default();
    let dt = 1.0 / TARGET_FPS as f32;
    let frames = u64::from(seconds) * u64::from(TARGET_FPS);

    for frame in 1..=frames {
        let input = player.next_input(&state);
        tick(&mut state, &input, dt);
        for event in state.drain_events() {
            summary.record(&event);
        }

        if frame % (10 * u64::from(TARGET_FPS)) == 0 {
            log::info!(
                "t={:>3}s tick={} money={} lives={} enemies={} towers={} kills={}",
                frame / u64::from(TARGET_FPS),
                state.time_ticks,
                state.money,
                state.lives,
                state.enemies.active_count(),
                state.towers.active_count(),
                summary.kills,
            );
        }
    }

    summary.frames = state.time_ticks;
    summary.money = state.money;
    summary.lives = state.lives;
    summary
}
