//! Player integration, obstacle motion and overlap tests

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.pos, self.max());
        let (b_min, b_max) = (other.pos, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

impl From<&Player> for Rect {
    fn from(p: &Player) -> Self {
        Rect::new(p.pos, p.size)
    }
}

impl From<&Obstacle> for Rect {
    fn from(o: &Obstacle) -> Self {
        Rect::new(o.pos, o.size)
    }
}

/// Apply gravity for `dt` seconds and clamp the player inside the canvas
pub fn integrate_player(player: &mut Player, dt: f32, canvas_height: f32) {
    let gravity = GRAVITY_FACTOR * canvas_height;
    player.vel_y += gravity * dt;
    player.pos.y += player.vel_y * dt;

    // No bounce at either edge
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel_y = 0.0;
    }
    if player.pos.y + player.size.y > canvas_height {
        player.pos.y = (canvas_height - player.size.y).max(0.0);
        player.vel_y = 0.0;
    }
}

/// Replace vertical velocity with the jump impulse
pub fn jump(player: &mut Player, canvas_height: f32) {
    player.vel_y = -JUMP_FACTOR * canvas_height;
}

/// Horizontal obstacle speed for the current score (units/s)
pub fn obstacle_speed(score: u32, canvas_width: f32) -> f32 {
    BASE_SPEED_FACTOR * canvas_width + score as f32 * SPEED_PER_SCORE_FACTOR * canvas_width
}

/// Scroll every obstacle left by `speed * dt`
pub fn advance_obstacles(obstacles: &mut [Obstacle], speed: f32, dt: f32) {
    for obstacle in obstacles {
        obstacle.pos.x -= speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player_at(y: f32) -> Player {
        Player {
            pos: Vec2::new(60.0, y),
            size: Vec2::splat(32.0),
            vel_y: 0.0,
        }
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut player = player_at(100.0);
        integrate_player(&mut player, 0.1, 500.0);
        // g = 600, vy = 60, y += 6
        assert!((player.vel_y - 60.0).abs() < 1e-4);
        assert!((player.pos.y - 106.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_at_floor_zeroes_velocity() {
        let mut player = player_at(460.0);
        player.vel_y = 400.0;
        integrate_player(&mut player, 0.1, 500.0);
        assert_eq!(player.pos.y, 468.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_clamp_at_ceiling_zeroes_velocity() {
        let mut player = player_at(5.0);
        jump(&mut player, 500.0);
        integrate_player(&mut player, 0.1, 500.0);
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_jumps_overwrite_rather_than_stack() {
        let mut player = player_at(200.0);
        jump(&mut player, 500.0);
        jump(&mut player, 500.0);
        assert_eq!(player.vel_y, -175.0);
    }

    #[test]
    fn test_speed_scales_with_score() {
        assert!((obstacle_speed(0, 400.0) - 120.0).abs() < 1e-3);
        assert!((obstacle_speed(10, 400.0) - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_obstacles() {
        let mut obstacles = vec![
            Obstacle::new(Vec2::new(400.0, 0.0), Vec2::new(48.0, 72.0)),
            Obstacle::new(Vec2::new(100.0, 50.0), Vec2::new(48.0, 72.0)),
        ];
        advance_obstacles(&mut obstacles, 120.0, 0.5);
        assert_eq!(obstacles[0].pos.x, 340.0);
        assert_eq!(obstacles[1].pos.x, 40.0);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));

        let inside = Rect::new(Vec2::new(9.9, 9.9), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside_canvas(
            start in 0.0f32..468.0,
            vel in -2000.0f32..2000.0,
            steps in prop::collection::vec((0.0f32..0.1, any::<bool>()), 1..200),
        ) {
            let h = 500.0;
            let mut player = player_at(start);
            player.vel_y = vel;
            for (dt, jumped) in steps {
                if jumped {
                    jump(&mut player, h);
                }
                integrate_player(&mut player, dt, h);
                prop_assert!(player.pos.y >= 0.0);
                prop_assert!(player.pos.y <= h - player.size.y);
            }
        }
    }
}
