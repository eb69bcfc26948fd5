//! Canvas 2D drawing surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::dom::document;
use crate::error::{GameError, Result};
use crate::renderer::{DrawSurface, Sprite, TextAlign};
use crate::sim::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Requested URL and the image loading it
    player_sprite: Option<(String, HtmlImageElement)>,
}

impl CanvasSurface {
    /// Acquire the canvas and its 2D context. Failure here is fatal.
    pub fn acquire(canvas_id: &str) -> Result<Self> {
        let canvas: HtmlCanvasElement = document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| GameError::SurfaceUnavailable(format!("no #{canvas_id} element")))?
            .dyn_into()
            .map_err(|_| GameError::SurfaceUnavailable(format!("#{canvas_id} is not a canvas")))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .ok_or_else(|| GameError::SurfaceUnavailable("2d context unavailable".into()))?;

        let mut surface = Self {
            canvas,
            ctx,
            player_sprite: None,
        };
        surface.fit_to_client();
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the displayed size. Returns true if it changed.
    pub fn fit_to_client(&mut self) -> bool {
        let w = self.canvas.client_width().max(1) as u32;
        let h = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() == w && self.canvas.height() == h {
            return false;
        }
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        true
    }

    /// Start loading the player sprite; drawing falls back to a rect until ready
    pub fn set_player_image(&mut self, url: Option<&str>) {
        let current = self.player_sprite.as_ref().map(|(src, _)| src.as_str());
        if current == url {
            return;
        }
        self.player_sprite = url.and_then(|url| match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(url);
                Some((url.to_string(), img))
            }
            Err(_) => {
                log::warn!("Could not create image element");
                None
            }
        });
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) -> bool {
        let image = match sprite {
            Sprite::Player => self.player_sprite.as_ref().map(|(_, img)| img),
        };
        let Some(image) = image.filter(|img| img.complete() && img.natural_width() > 0) else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            )
            .is_ok()
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(&format!("bold {}px sans-serif", size.round()));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
        });
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
