//! Browser wiring
//!
//! One `App` per page, kept in a thread-local. Calling `init` again only
//! merges config into the existing app, so listeners and the frame loop are
//! never registered twice. The frame loop requests at most one animation
//! frame at a time and stops rescheduling once the session has ended.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec2;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, MessageEvent};

use super::canvas::CanvasSurface;
use super::dom::{to_json_value, window};
use super::messaging::ParentChannel;
use super::overlay::DomOverlay;
use super::storage::LocalStore;
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::flow::FlowController;
use crate::host::config_patch;
use crate::renderer::{DrawSurface, draw_frame};
use crate::ui::{Action, present};

pub const CANVAS_ID: &str = "we-game-canvas";
pub const OVERLAY_ID: &str = "we-game-overlay";
/// Global the host page may define before the module loads
pub const BOOTSTRAP_CONFIG_GLOBAL: &str = "WE_GAME_CONFIG";

const JUMP_KEYS: [&str; 4] = [" ", "ArrowUp", "w", "W"];

type Flow = FlowController<LocalStore, ParentChannel>;

pub struct App {
    flow: RefCell<Flow>,
    surface: RefCell<CanvasSurface>,
    overlay: RefCell<DomOverlay>,
    rendered_version: Cell<Option<u64>>,
    /// Pending animation frame request, if any
    raf_id: Cell<Option<i32>>,
    frame_cb: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (module re-evaluated) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);

    let bootstrap = window()
        .ok()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(BOOTSTRAP_CONFIG_GLOBAL)).ok())
        .and_then(|v| to_json_value(&v));

    if let Err(e) = init(bootstrap) {
        log::error!("Initialization failed: {e}");
    }
}

/// Host-callable (re)initialization with an optional config object
#[wasm_bindgen(js_name = init)]
pub fn js_init(config: JsValue) -> std::result::Result<(), JsValue> {
    init(to_json_value(&config)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Initialize the widget, or re-apply config if it is already running
pub fn init(patch: Option<Value>) -> Result<()> {
    if let Some(app) = APP.with(|a| a.borrow().clone()) {
        if let Some(patch) = patch {
            app.flow.borrow_mut().apply_config(&patch);
            app.refresh();
        }
        log::info!("Already initialized, config re-applied");
        return Ok(());
    }

    log::info!("Dodge Promo starting...");
    let config = patch.as_ref().map(Config::from_patch).unwrap_or_default();

    let surface = CanvasSurface::acquire(CANVAS_ID)?;
    let overlay = DomOverlay::acquire(OVERLAY_ID)?;
    let canvas = Vec2::new(surface.width(), surface.height());
    let seed = js_sys::Date::now() as u64;
    let flow = FlowController::new(
        config,
        LocalStore::open(),
        ParentChannel::open(),
        canvas,
        seed,
    );

    let app = Rc::new(App {
        flow: RefCell::new(flow),
        surface: RefCell::new(surface),
        overlay: RefCell::new(overlay),
        rendered_version: Cell::new(None),
        raf_id: Cell::new(None),
        frame_cb: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
    });
    app.install_frame_callback();
    app.install_listeners()?;
    APP.with(|a| *a.borrow_mut() = Some(app.clone()));

    app.refresh();
    log::info!("Dodge Promo running!");
    Ok(())
}

impl App {
    /// Bring overlay, canvas, height report and frame loop in line with
    /// the flow state. Called after every input and frame.
    fn refresh(&self) {
        let overlay_visible;
        {
            let flow = self.flow.borrow();
            let config = flow.config();
            let mut surface = self.surface.borrow_mut();
            surface.set_player_image(config.player_image.as_deref());

            let mut overlay = self.overlay.borrow_mut();
            if self.rendered_version.get() != Some(flow.screen_version()) {
                present(&mut *overlay, flow.screen(), config.theme);
                self.rendered_version.set(Some(flow.screen_version()));
            }

            if !flow.is_running() {
                draw_frame(&mut *surface, flow.session(), &config.theme.palette());
            }
            overlay_visible = overlay.is_visible();
        }

        let height = self.desired_height(overlay_visible);
        self.flow.borrow_mut().report_height(height, overlay_visible);

        if self.flow.borrow().is_running() {
            self.ensure_frame();
        }
    }

    fn desired_height(&self, overlay_visible: bool) -> u32 {
        let canvas_h = self.surface.borrow().canvas().client_height().max(0) as u32;
        if overlay_visible {
            canvas_h.max(self.overlay.borrow().content_height())
        } else {
            canvas_h
        }
    }

    fn install_frame_callback(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let cb = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(app) = weak.upgrade() {
                app.on_frame(time);
            }
        });
        *self.frame_cb.borrow_mut() = Some(cb);
    }

    /// Request an animation frame unless one is already pending
    fn ensure_frame(&self) {
        if self.raf_id.get().is_some() {
            return;
        }
        let cb = self.frame_cb.borrow();
        let Some(cb) = cb.as_ref() else {
            return;
        };
        match window().map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref())) {
            Ok(Ok(id)) => self.raf_id.set(Some(id)),
            Ok(Err(_)) | Err(_) => log::error!("requestAnimationFrame failed"),
        }
    }

    fn on_frame(&self, time: f64) {
        self.raf_id.set(None);
        {
            let mut flow = self.flow.borrow_mut();
            flow.frame(time);
            let palette = flow.config().theme.palette();
            draw_frame(&mut *self.surface.borrow_mut(), flow.session(), &palette);
        }
        self.refresh();
    }

    fn on_action(&self, action: Action) {
        let details = (action == Action::SubmitDetails).then(|| self.overlay.borrow().read_details());
        self.flow.borrow_mut().dispatch(action, details);
        self.refresh();
    }

    fn on_resize(&self) {
        let changed = self.surface.borrow_mut().fit_to_client();
        if changed {
            let surface = self.surface.borrow();
            let size = Vec2::new(surface.width(), surface.height());
            drop(surface);
            self.flow.borrow_mut().resize(size);
        }
        self.refresh();
    }

    fn on_message(&self, event: &MessageEvent) {
        {
            let flow = self.flow.borrow();
            let origin = &flow.config().parent_origin;
            if origin != "*" && event.origin() != *origin {
                log::debug!("Ignoring message from {}", event.origin());
                return;
            }
        }
        let Some(message) = to_json_value(&event.data()) else {
            return;
        };
        if let Some(patch) = config_patch(&message) {
            self.flow.borrow_mut().apply_config(patch);
            self.refresh();
        }
    }

    fn install_listeners(self: &Rc<Self>) -> Result<()> {
        let window = window()?;
        let canvas: EventTarget = self.surface.borrow().canvas().clone().into();
        let overlay: EventTarget = self.overlay.borrow().root().clone().into();

        self.listen(&window, "keydown", |app, event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if JUMP_KEYS.contains(&key.as_str()) && app.flow.borrow().session().is_playing() {
                event.prevent_default();
                app.flow.borrow_mut().jump();
            }
        })?;
        self.listen(&canvas, "pointerdown", |app, _event| {
            app.flow.borrow_mut().jump();
        })?;
        self.listen(&canvas, "touchstart", |app, event| {
            event.prevent_default();
            app.flow.borrow_mut().jump();
        })?;
        self.listen(&overlay, "click", |app, event| {
            let action = app.overlay.borrow().route(&event);
            if let Some(action) = action {
                app.on_action(action);
            }
        })?;
        self.listen(&window, "message", |app, event| {
            if let Some(message) = event.dyn_ref::<MessageEvent>() {
                app.on_message(message);
            }
        })?;
        self.listen(&window, "resize", |app, _event| app.on_resize())?;

        Ok(())
    }

    fn listen<F>(self: &Rc<Self>, target: &EventTarget, kind: &str, handler: F) -> Result<()>
    where
        F: Fn(&App, Event) + 'static,
    {
        let weak: Weak<App> = Rc::downgrade(self);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(app) = weak.upgrade() {
                handler(&app, event);
            }
        });
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|_| GameError::SurfaceUnavailable(format!("cannot listen for {kind}")))?;
        self.listeners.borrow_mut().push(closure);
        Ok(())
    }
}
