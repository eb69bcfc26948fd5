//! Session state and core simulation types

use glam::Vec2;

use crate::consts::*;

/// Lifecycle of one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No session has been started yet
    #[default]
    Idle,
    /// Active gameplay, ticks are running
    Playing,
    /// Lives exhausted, score finalized
    Ended,
}

/// The player sprite. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
}

impl Player {
    /// Player sized and placed for a canvas, vertically centered
    pub fn for_canvas(canvas: Vec2) -> Self {
        let side = canvas.x * PLAYER_SIZE_FACTOR;
        let mut player = Self {
            pos: Vec2::new(canvas.x * PLAYER_X_FACTOR, 0.0),
            size: Vec2::splat(side),
            vel_y: 0.0,
        };
        player.recenter(canvas.y);
        player
    }

    /// Put the player at the vertical center with no velocity
    pub fn recenter(&mut self, canvas_height: f32) {
        self.pos.y = ((canvas_height - self.size.y) / 2.0).max(0.0);
        self.vel_y = 0.0;
    }
}

/// A scrolling obstacle. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the player has fully cleared it
    pub passed: bool,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            passed: false,
        }
    }

    /// Fully scrolled past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Result of a finished session, before rewards are attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
}

/// Everything mutated by the per-frame tick
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub score: u32,
    pub lives: u8,
    pub player: Player,
    /// Ordered by spawn time
    pub obstacles: Vec<Obstacle>,
    /// Time since the last spawn (ms)
    pub spawn_timer_ms: f32,
    /// Logical canvas size the session is simulated in
    pub canvas: Vec2,
}

impl Session {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            player: Player::for_canvas(canvas),
            obstacles: Vec::new(),
            spawn_timer_ms: 0.0,
            canvas,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Reset everything for a fresh play-through and enter `Playing`
    pub fn begin(&mut self, canvas: Vec2) {
        *self = Self::new(canvas);
        self.phase = Phase::Playing;
    }

    /// Leave `Playing`; the score is final from here on
    pub fn finish(&mut self) -> SessionSummary {
        self.phase = Phase::Ended;
        SessionSummary { score: self.score }
    }

    /// Track a viewport change. The player keeps its size until the next
    /// session but is pulled back inside the new bounds.
    pub fn resize(&mut self, canvas: Vec2) {
        self.canvas = canvas;
        let max_y = (canvas.y - self.player.size.y).max(0.0);
        self.player.pos.y = self.player.pos.y.clamp(0.0, max_y);
        if self.phase != Phase::Playing {
            self.player = Player::for_canvas(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_for_canvas_is_centered() {
        let player = Player::for_canvas(Vec2::new(400.0, 300.0));
        assert!(player.size.abs_diff_eq(Vec2::splat(32.0), 1e-4));
        assert!(player.pos.abs_diff_eq(Vec2::new(60.0, 134.0), 1e-4));
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_begin_resets_everything() {
        let canvas = Vec2::new(400.0, 300.0);
        let mut session = Session::new(canvas);
        session.score = 17;
        session.lives = 1;
        session.player.vel_y = 90.0;
        session.obstacles.push(Obstacle::new(Vec2::ZERO, Vec2::ONE));
        session.spawn_timer_ms = 1500.0;

        session.begin(canvas);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.spawn_timer_ms, 0.0);
        assert_eq!(session.player, Player::for_canvas(canvas));
    }

    #[test]
    fn test_finish_reports_score() {
        let mut session = Session::new(Vec2::new(400.0, 300.0));
        session.begin(Vec2::new(400.0, 300.0));
        session.score = 8;
        assert_eq!(session.finish(), SessionSummary { score: 8 });
        assert_eq!(session.phase, Phase::Ended);
    }

    #[test]
    fn test_resize_while_playing_clamps_player() {
        let mut session = Session::new(Vec2::new(400.0, 300.0));
        session.begin(Vec2::new(400.0, 300.0));
        session.player.pos.y = 260.0;
        let size = session.player.size;

        let smaller = Vec2::new(300.0, 120.0);
        session.resize(smaller);
        assert_eq!(session.canvas, smaller);
        assert_eq!(session.player.size, size);
        assert!(session.player.pos.y >= 0.0);
        assert!(session.player.pos.y + session.player.size.y <= smaller.y);
    }

    #[test]
    fn test_resize_while_idle_rederives_player() {
        let mut session = Session::new(Vec2::new(400.0, 300.0));
        let wider = Vec2::new(800.0, 500.0);
        session.resize(wider);
        assert_eq!(session.canvas, wider);
        assert_eq!(session.player, Player::for_canvas(wider));
    }

    #[test]
    fn test_obstacle_off_screen_boundary() {
        let mut o = Obstacle::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 5.0));
        assert!(o.is_off_screen());
        o.pos.x = -9.5;
        assert!(!o.is_off_screen());
    }
}
