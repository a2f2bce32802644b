//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - The tick is the only unit of time (no wall-clock reads)
//! - Seeded RNG only, owned by the session state
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{overlap, overlap_inset};
pub use state::{Coin, GamePhase, GameState, Lane, Obstacle, Player, Rect, Viewport};
pub use tick::{TickInput, tick};
