//! Obstacle spawning at a score-scaled cadence

use glam::Vec2;
use rand::Rng;

use super::state::Obstacle;
use crate::consts::*;

/// Milliseconds between spawns at a given score (never below the floor)
pub fn spawn_interval_ms(score: u32) -> f32 {
    (BASE_SPAWN_INTERVAL_MS - score as f32 * SPAWN_INTERVAL_STEP_MS).max(MIN_SPAWN_INTERVAL_MS)
}

/// Obstacle dimensions for a canvas width
pub fn obstacle_size(canvas_width: f32) -> Vec2 {
    Vec2::new(
        OBSTACLE_WIDTH_FACTOR * canvas_width,
        OBSTACLE_HEIGHT_FACTOR * canvas_width,
    )
}

/// Advance the spawn accumulator by `dt` seconds and spawn at most one
/// obstacle at the right edge when the interval has elapsed.
pub fn update_spawner<R: Rng>(
    spawn_timer_ms: &mut f32,
    dt: f32,
    score: u32,
    canvas: Vec2,
    rng: &mut R,
) -> Option<Obstacle> {
    *spawn_timer_ms += dt * 1000.0;
    if *spawn_timer_ms < spawn_interval_ms(score) {
        return None;
    }
    *spawn_timer_ms = 0.0;

    let size = obstacle_size(canvas.x);
    let range = canvas.y - size.y;
    let y = if range > 0.0 {
        rng.random_range(0.0..range)
    } else {
        0.0
    };

    Some(Obstacle::new(Vec2::new(canvas.x, y), size))
}
