//! Axis-aligned collision tests for the runner
//!
//! Obstacles use a forgiving inset margin so near-misses go unpunished;
//! coins use strict overlap. Obstacles resolve first and a hit ends the
//! tick, so nothing is collected on the frame the run ends.

use super::state::{GamePhase, GameState, Rect};
use crate::consts::{COIN_VALUE, HIT_INSET};

/// Strict AABB overlap. Edge-touching rectangles do not overlap.
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// AABB overlap with `b` shrunk by `inset` on every edge, so a true hit
/// requires penetration beyond the visual bounding box.
pub fn overlap_inset(a: &Rect, b: &Rect, inset: f32) -> bool {
    a.x < b.right() - inset
        && a.right() > b.x + inset
        && a.y < b.bottom() - inset
        && a.bottom() > b.y + inset
}

/// Test the player against every live obstacle. The first hit transitions
/// the session to GameOver and stops the scan. Returns true if the run
/// ended.
pub fn resolve_obstacles(state: &mut GameState) -> bool {
    let player = state.player.rect;
    for obstacle in &state.obstacles {
        if overlap_inset(&player, &obstacle.rect, HIT_INSET) {
            state.phase = GamePhase::GameOver;
            return true;
        }
    }
    false
}

/// Collect every coin strictly overlapping the player: mark it collected,
/// bank its value, compact the live set. Several coins can land in one
/// tick; each banks independently.
pub fn collect_coins(state: &mut GameState) {
    let player = state.player.rect;
    for coin in &mut state.coins {
        if overlap(&player, &coin.rect) {
            coin.collected = true;
            state.score += COIN_VALUE;
        }
    }
    state.coins.retain(|c| !c.collected);
}
