//! Per-frame scene: background, obstacles, player, HUD

use glam::Vec2;

use super::{DrawSurface, Sprite, TextAlign};
use crate::config::Palette;
use crate::sim::{Rect, Session};

/// HUD strip height as a fraction of canvas height
const HUD_HEIGHT_FACTOR: f32 = 0.09;

pub fn draw_frame<D: DrawSurface>(surface: &mut D, session: &Session, palette: &Palette) {
    let size = Vec2::new(surface.width(), surface.height());
    surface.clear(palette.background);

    for obstacle in &session.obstacles {
        surface.fill_rect(Rect::from(obstacle), palette.obstacle);
    }

    let player = Rect::from(&session.player);
    if !surface.draw_image(Sprite::Player, player) {
        surface.fill_rect(player, palette.player);
    }

    let hud_h = (size.y * HUD_HEIGHT_FACTOR).max(18.0);
    let text_size = hud_h * 0.6;
    let baseline = hud_h * 0.75;
    let pad = hud_h * 0.4;
    surface.fill_rect(Rect::new(Vec2::ZERO, Vec2::new(size.x, hud_h)), palette.hud);
    surface.draw_text(
        &format!("Score: {}", session.score),
        pad,
        baseline,
        text_size,
        TextAlign::Left,
        palette.text,
    );
    surface.draw_text(
        &format!("Lives: {}", session.lives),
        size.x - pad,
        baseline,
        text_size,
        TextAlign::Right,
        palette.text,
    );
}

/// A draw call captured by `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(String),
    FillRect(Rect, String),
    Image(Sprite, Rect),
    Text(String),
}

/// Surface that records calls instead of drawing (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub sprite_loaded: bool,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            sprite_loaded: false,
            calls: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn clear(&mut self, color: &str) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear(color.to_string()));
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::FillRect(rect, color.to_string()));
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> bool {
        if self.sprite_loaded {
            self.calls.push(DrawCall::Image(sprite, rect));
        }
        self.sprite_loaded
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _align: TextAlign, _color: &str) {
        self.calls.push(DrawCall::Text(text.to_string()));
    }
}
