//! Session state and core simulation types
//!
//! Everything a run mutates lives here. State is serializable with the RNG
//! included, so equal seeds and equal inputs replay identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine constructed, not yet ticking
    Idle,
    /// Active run
    Playing,
    /// Run ended on an obstacle hit; score is frozen
    GameOver,
}

/// Axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point (glyphs draw centered in their rect)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Render surface dimensions in pixels
///
/// Re-read from the surface every frame it is available; never cached
/// across host resizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top edge of the ground band
    pub fn ground_top(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Y for an entity of the given height resting on the ground line
    pub fn ground_y(&self, entity_height: f32) -> f32 {
        self.ground_top() - entity_height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Obstacle lane: a fixed vertical placement band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    /// Sits on the ground line; jump over it
    Ground,
    /// Floats above the ground line; run under it, or eat it mid-jump
    Air,
}

/// Glyph set for ground-lane obstacles
pub const GROUND_GLYPHS: [char; 4] = ['⏰', '📉', '🧱', '💩'];
/// Glyph set for air-lane obstacles
pub const AIR_GLYPHS: [char; 3] = ['🥞', '🍳', '🔨'];
/// Coin glyph
pub const COIN_GLYPH: char = '💰';
/// Player glyph when no avatar image is set
pub const FALLBACK_PLAYER_GLYPH: char = '🐂';

/// The player: fixed x, gravity-driven y
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (px/tick, positive is down)
    pub vy: f32,
    /// True while in contact with the ground line
    pub grounded: bool,
}

impl Player {
    /// Player resting on the ground line of `view`
    pub fn new(view: Viewport) -> Self {
        Self {
            rect: Rect::new(
                PLAYER_X,
                view.ground_y(PLAYER_SIZE),
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            vy: 0.0,
            grounded: true,
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub lane: Lane,
    pub glyph: char,
}

/// A collectible coin
///
/// The collected flag flips and the coin is compacted out in the same tick;
/// collected coins never persist as debris.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG; the sole randomness source for spawning
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks elapsed this session
    pub frame: u64,
    /// Coins banked this session
    pub score: u64,
    /// World scroll speed (px/tick); only ever increases within a session
    pub scroll_speed: f32,
    /// The one player of this session
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Live coins, oldest first
    pub coins: Vec<Coin>,
}

impl GameState {
    /// Fresh session in `Idle`, player grounded in `view`
    pub fn new(seed: u64, view: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            frame: 0,
            score: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            player: Player::new(view),
            obstacles: Vec::new(),
            coins: Vec::new(),
        }
    }
}
