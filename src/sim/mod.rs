//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module is single-threaded and
//! deterministic for a given sequence of inputs and frame times:
//! - Stable iteration order (by slot index)
//! - First-fit slot allocation
//! - No rendering or platform dependencies

pub mod events;
pub mod placement;
pub mod slots;
pub mod state;
pub mod tick;

pub use events::GameEvent;
pub use placement::{Blocker, blocker_at, preview, try_place_tower};
pub use slots::Slots;
pub use state::{Enemy, GamePhase, GameState, Path, Projectile, Tower};
pub use tick::{TickInput, tick};
