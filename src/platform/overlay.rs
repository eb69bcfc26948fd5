//! DOM overlay with delegated click routing
//!
//! Handlers are not attached to the generated buttons themselves: a single
//! listener on the overlay root looks up the clicked element's id in the
//! routes table. Replacing the markup therefore never drops a live closure.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use super::dom::document;
use crate::error::{GameError, Result};
use crate::persistence::{DetailsField, UserDetails};
use crate::ui::{Action, Overlay};

pub struct DomOverlay {
    root: HtmlElement,
    routes: HashMap<String, Action>,
}

impl DomOverlay {
    /// Use the element with `id`, creating it next to the canvas if missing
    pub fn acquire(id: &str) -> Result<Self> {
        let document = document()?;
        let root = match document.get_element_by_id(id) {
            Some(el) => el,
            None => {
                let el = document
                    .create_element("div")
                    .map_err(|_| GameError::SurfaceUnavailable("cannot create overlay".into()))?;
                el.set_id(id);
                document
                    .body()
                    .ok_or_else(|| GameError::SurfaceUnavailable("no body".into()))?
                    .append_child(&el)
                    .map_err(|_| GameError::SurfaceUnavailable("cannot attach overlay".into()))?;
                el
            }
        };
        let root: HtmlElement = root
            .dyn_into()
            .map_err(|_| GameError::SurfaceUnavailable("overlay is not an HTML element".into()))?;

        Ok(Self {
            root,
            routes: HashMap::new(),
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub fn is_visible(&self) -> bool {
        !self.root.hidden()
    }

    /// Rendered height of the overlay content (px)
    pub fn content_height(&self) -> u32 {
        self.root.scroll_height().max(0) as u32
    }

    /// Action routed to the clicked element, if any
    pub fn route(&self, event: &Event) -> Option<Action> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let button = target.closest("button[id]").ok()??;
        if button.has_attribute("disabled") {
            return None;
        }
        self.routes.get(&button.id()).copied()
    }

    /// Current values of the details form inputs
    pub fn read_details(&self) -> UserDetails {
        let value = |field: DetailsField| {
            document()
                .ok()
                .and_then(|d| d.get_element_by_id(field.input_id()))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default()
        };
        UserDetails::new(
            value(DetailsField::Name),
            value(DetailsField::Email),
            value(DetailsField::Phone),
        )
    }
}

impl Overlay for DomOverlay {
    fn set_content(&mut self, markup: &str) {
        self.routes.clear();
        self.root.set_inner_html(markup);
    }

    fn show(&mut self) {
        self.root.set_hidden(false);
    }

    fn hide(&mut self) {
        self.root.set_hidden(true);
        self.routes.clear();
    }

    fn attach(&mut self, element_id: &str, action: Action) {
        self.routes.insert(element_id.to_string(), action);
    }
}
