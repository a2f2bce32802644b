//! Procedural spawning and world scroll
//!
//! One pass per tick: every live entity moves left by the scroll speed,
//! whatever fell off the left edge is pruned, then the two spawn triggers
//! roll. Spawning is the only way content enters the world and the scroll
//! here is the only way it moves; rendering applies no transform of its own.

use rand::Rng;

use super::state::{AIR_GLYPHS, Coin, GROUND_GLYPHS, GameState, Lane, Obstacle, Rect, Viewport};
use crate::consts::*;

/// Ticks between obstacle spawns at the given scroll speed. Shrinks as the
/// world speeds up, so difficulty ramps continuously. Floored at 1 so the
/// modulus stays defined however long a session runs.
pub fn obstacle_interval(scroll_speed: f32) -> u64 {
    let interval = (SPAWN_INTERVAL_K / (scroll_speed * SPAWN_INTERVAL_C)) as u64;
    interval.max(1)
}

/// Advance the world by one tick: scroll, prune, spawn.
///
/// There is no population cap; the offscreen prune keeps the live set
/// proportional to scroll distance per spawn interval, which the interval
/// floor bounds.
pub fn advance(state: &mut GameState, view: Viewport) {
    let speed = state.scroll_speed;

    for obstacle in &mut state.obstacles {
        obstacle.rect.x -= speed;
    }
    state.obstacles.retain(|o| o.rect.right() >= 0.0);

    for coin in &mut state.coins {
        coin.rect.x -= speed;
    }
    state.coins.retain(|c| c.rect.right() >= 0.0);

    if state.frame % obstacle_interval(speed) == 0 {
        spawn_obstacle(state, view);
    }

    if state.frame % COIN_INTERVAL == 0 && state.rng.random_bool(COIN_SPAWN_PROB) {
        spawn_coin(state, view);
    }
}

fn spawn_obstacle(state: &mut GameState, view: Viewport) {
    let lane = if state.rng.random::<f32>() < AIR_LANE_PROB {
        Lane::Air
    } else {
        Lane::Ground
    };
    let glyphs: &[char] = match lane {
        Lane::Ground => &GROUND_GLYPHS,
        Lane::Air => &AIR_GLYPHS,
    };
    let glyph = glyphs[state.rng.random_range(0..glyphs.len())];

    let ground_y = view.ground_y(OBSTACLE_SIZE);
    let y = match lane {
        Lane::Ground => ground_y,
        Lane::Air => ground_y - AIR_LANE_OFFSET,
    };

    state.obstacles.push(Obstacle {
        rect: Rect::new(view.width, y, OBSTACLE_SIZE, OBSTACLE_SIZE),
        lane,
        glyph,
    });
}

fn spawn_coin(state: &mut GameState, view: Viewport) {
    let lift = COIN_BAND_MIN + state.rng.random::<f32>() * COIN_BAND_SPAN;
    state.coins.push(Coin {
        rect: Rect::new(view.width, view.ground_top() - lift, COIN_SIZE, COIN_SIZE),
        collected: false,
    });
}
