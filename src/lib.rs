//! Money Run - a side-scrolling coin-run arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `render`: Drawing-surface capability and the per-frame painter
//! - `engine`: Session driver, frame scheduling, host boundary
//!
//! The engine is meant to be embedded as a full-screen takeover: the host
//! supplies a drawing surface and a frame scheduler, forwards taps as jump
//! requests, and gets the final score back when a run ends.

pub mod engine;
pub mod render;
pub mod sim;

pub use engine::{AvatarImage, Engine, FrameToken, HostConfig, TickScheduler};
pub use render::{DrawSurface, Palette, paint};
pub use sim::{GamePhase, GameState, TickInput, Viewport, tick};

/// Game design constants
///
/// Tuned values, not configuration. The tick is the unit of time; the
/// constants assume the nominal display refresh below.
pub mod consts {
    /// Downward acceleration (px/tick^2)
    pub const GRAVITY: f32 = 0.6;
    /// Jump impulse (px/tick, negative is up); tuned weak for a heavy feel
    pub const JUMP_IMPULSE: f32 = -10.0;
    /// World scroll speed at session start (px/tick)
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    /// Scroll speed gain per tick
    pub const SCROLL_SPEED_INCREMENT: f32 = 0.001;
    /// Height of the ground band at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Player sprite side length
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Fixed horizontal position of the player; the world scrolls, not the player
    pub const PLAYER_X: f32 = 50.0;

    /// Obstacle sprite side length
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// Air-lane obstacles float this far above their ground-lane position
    pub const AIR_LANE_OFFSET: f32 = 90.0;
    /// Probability an obstacle spawns in the air lane
    pub const AIR_LANE_PROB: f32 = 0.4;
    /// Obstacle spawn interval is K / (scroll_speed * C) ticks, floored at 1
    pub const SPAWN_INTERVAL_K: f32 = 1500.0;
    pub const SPAWN_INTERVAL_C: f32 = 6.0;

    /// Coin sprite side length
    pub const COIN_SIZE: f32 = 30.0;
    /// Coin trigger cadence in ticks
    pub const COIN_INTERVAL: u64 = 60;
    /// Probability the coin trigger actually spawns
    pub const COIN_SPAWN_PROB: f64 = 0.5;
    /// Coins spawn between COIN_BAND_MIN and COIN_BAND_MIN + COIN_BAND_SPAN
    /// px above the ground band
    pub const COIN_BAND_MIN: f32 = 40.0;
    pub const COIN_BAND_SPAN: f32 = 100.0;
    /// Score added per collected coin
    pub const COIN_VALUE: u64 = 10;

    /// Forgiving hit margin: obstacle boxes shrink by this much per edge
    pub const HIT_INSET: f32 = 10.0;

    /// Nominal display refresh the constants are tuned for
    pub const NOMINAL_TICK_HZ: u32 = 60;
}
