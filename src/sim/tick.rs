//! Per-frame simulation step
//!
//! Order within one tick is fixed: player physics, obstacle movement and
//! scoring, despawn, spawn, collision. Score always lands before a
//! collision that could end the session in the same tick.

use rand::Rng;

use super::physics::{Rect, advance_obstacles, integrate_player, obstacle_speed};
use super::spawner::update_spawner;
use super::state::{Phase, Session};
use crate::consts::{FIRST_FRAME_DT, MAX_FRAME_DT};

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// An obstacle was cleared; carries the new score
    Scored(u32),
    Spawned,
    /// Player hit an obstacle; carries remaining lives
    Collision { lives: u8 },
    /// Lives reached zero, the session must be finalized
    OutOfLives,
}

/// Turns animation-frame timestamps into bounded simulation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame (call when a session starts)
    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }

    /// Seconds to simulate for a frame stamped `now_ms`
    pub fn step(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_frame_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => FIRST_FRAME_DT,
        };
        self.last_frame_ms = Some(now_ms);
        dt
    }
}

/// Advance the session by `dt` seconds. No-op unless `Playing`.
pub fn tick<R: Rng>(session: &mut Session, dt: f32, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();
    if session.phase != Phase::Playing {
        return events;
    }

    let canvas = session.canvas;

    integrate_player(&mut session.player, dt, canvas.y);

    let speed = obstacle_speed(session.score, canvas.x);
    advance_obstacles(&mut session.obstacles, speed, dt);

    let player_x = session.player.pos.x;
    for obstacle in session.obstacles.iter_mut() {
        if !obstacle.passed && obstacle.pos.x + obstacle.size.x < player_x {
            obstacle.passed = true;
            session.score += 1;
            events.push(TickEvent::Scored(session.score));
        }
    }

    session.obstacles.retain(|o| !o.is_off_screen());

    if let Some(obstacle) = update_spawner(
        &mut session.spawn_timer_ms,
        dt,
        session.score,
        canvas,
        rng,
    ) {
        log::debug!("Spawned obstacle at y={:.1}", obstacle.pos.y);
        session.obstacles.push(obstacle);
        events.push(TickEvent::Spawned);
    }

    let player_rect = Rect::from(&session.player);
    if let Some(hit) = session
        .obstacles
        .iter_mut()
        .find(|o| player_rect.overlaps(&Rect::from(&**o)))
    {
        session.lives = session.lives.saturating_sub(1);
        events.push(TickEvent::Collision {
            lives: session.lives,
        });
        log::debug!("Collision, {} lives left", session.lives);

        if session.lives == 0 {
            // Terminal: leave the player where it died
            session.phase = Phase::Ended;
            events.push(TickEvent::OutOfLives);
        } else {
            // Move the obstacle out of play; it will never be scored
            hit.pos.x = -hit.size.x;
            hit.passed = true;
            session.player.recenter(canvas.y);
        }
    }

    events
}
