//! Per-tick simulation step
//!
//! Advances one session tick: physics, then world scroll/spawn, then
//! collisions. Only a Playing session ticks; a stray call in any other
//! phase is a no-op, so a late frame can never mutate a finished run.

use super::state::{GamePhase, GameState, Viewport};
use super::{collision, physics, spawn};
use crate::consts::SCROLL_SPEED_INCREMENT;

/// Input for a single tick
///
/// `jump` is the buffered accepted/rejected decision from the host,
/// consumed at the start of the physics step. Requests never queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// Advance the session by one tick.
pub fn tick(state: &mut GameState, input: &TickInput, view: Viewport) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    state.scroll_speed += SCROLL_SPEED_INCREMENT;

    if input.jump {
        physics::apply_jump(&mut state.player);
    }
    physics::integrate(&mut state.player, view);

    spawn::advance(state, view);

    if collision::resolve_obstacles(state) {
        // Game over: the score is frozen, nothing collects this frame
        return;
    }
    collision::collect_coins(state);
}
