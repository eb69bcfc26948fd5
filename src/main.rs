//! Dodge Promo entry point
//!
//! On the web the widget starts from `platform::app::wasm_start`. Natively
//! this runs a headless session with in-memory collaborators, which is
//! handy for checking tuning changes from a terminal.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodge_promo::host::RecordingChannel;
    use dodge_promo::persistence::MemoryStore;
    use dodge_promo::renderer::{RecordingSurface, draw_frame};
    use dodge_promo::{Config, FlowController};
    use glam::Vec2;

    env_logger::init();
    log::info!("Dodge Promo (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    let config = Config::from_patch(&serde_json::json!({ "maxSpins": 1, "userId": "native" }));
    let canvas = Vec2::new(480.0, 320.0);
    let mut flow = FlowController::new(config, MemoryStore::new(), RecordingChannel::new(), canvas, 2024);
    let mut surface = RecordingSurface::new(canvas.x, canvas.y);

    flow.start();

    // Bot: flap whenever the player sinks below the middle
    let mut now_ms = 0.0;
    while flow.frame(now_ms) {
        let session = flow.session();
        if session.player.pos.y > session.canvas.y * 0.5 && session.player.vel_y > 0.0 {
            flow.jump();
        }
        draw_frame(&mut surface, flow.session(), &flow.config().theme.palette());
        now_ms += 1000.0 / 60.0;
        if now_ms > 10.0 * 60.0 * 1000.0 {
            log::warn!("Stopping after ten simulated minutes");
            break;
        }
    }

    match flow.last_result() {
        Some(result) => println!(
            "Score {} after {:.1}s: {}% off, code {}",
            result.score,
            now_ms / 1000.0,
            result.reward.discount,
            result.code
        ),
        None => println!("Session still running"),
    }
    println!("Events: {:?}", flow.host().event_names());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::app::wasm_start, this is just to satisfy the compiler
}
