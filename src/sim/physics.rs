//! Vertical physics for the player
//!
//! Constant gravity per tick, discrete jump impulses, ground clamp. The
//! tick is the integration unit; nothing here scales by wall-clock time.

use super::state::{Player, Viewport};
use crate::consts::{GRAVITY, JUMP_IMPULSE};

/// Apply a buffered jump request. Honored only while grounded; airborne
/// requests are dropped (no queuing, no double-jump). Returns whether the
/// impulse was applied.
pub fn apply_jump(player: &mut Player) -> bool {
    if !player.grounded {
        return false;
    }
    player.vy = JUMP_IMPULSE;
    player.grounded = false;
    true
}

/// Advance one tick of vertical motion and resolve contact against the
/// ground line of `view`.
pub fn integrate(player: &mut Player, view: Viewport) {
    player.vy += GRAVITY;
    player.rect.y += player.vy;

    let floor_y = view.ground_y(player.rect.height);
    if player.rect.y >= floor_y {
        player.rect.y = floor_y;
        player.vy = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }
}
