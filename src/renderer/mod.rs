//! 2D rendering module
//!
//! The simulation never draws. Each frame `scene::draw_frame` walks the
//! session and issues primitive calls on a `DrawSurface` (a canvas 2D
//! context on web).

pub mod scene;

pub use scene::{RecordingSurface, draw_frame};

use crate::sim::Rect;

/// Images the scene may ask the surface to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
}

/// Text anchoring along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// Drawing primitives, top-left origin, units match the logical size
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Draw a sprite into `rect`; false if it is not loaded yet
    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> bool;
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: &str);
}
