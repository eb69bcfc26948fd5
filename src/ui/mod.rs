//! Overlay screens
//!
//! The flow controller only produces a `Screen` view-model. Turning it into
//! markup and wiring buttons is the job of `markup` and an `Overlay`
//! implementation (DOM on web).

pub mod markup;
pub mod screen;

pub use markup::render_markup;
pub use screen::{Action, GameOverView, PendingAction, ScoreRow, Screen};

/// Presentation surface for overlay markup
pub trait Overlay {
    fn set_content(&mut self, markup: &str);
    fn show(&mut self);
    fn hide(&mut self);
    /// Route clicks on the element with `element_id` to `action`
    fn attach(&mut self, element_id: &str, action: Action);
}

/// Render `screen` onto `overlay`, or hide it while a session is playing
pub fn present<O: Overlay>(overlay: &mut O, screen: Option<&Screen>, theme: crate::Theme) {
    match screen {
        Some(screen) => {
            overlay.set_content(&render_markup(screen, theme));
            for action in screen.actions() {
                overlay.attach(action.element_id(), action);
            }
            overlay.show();
        }
        None => overlay.hide(),
    }
}
