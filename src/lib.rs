//! Dodge Promo - an embeddable dodge-the-obstacles reward game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, rewards)
//! - `flow`: Screen/flow state machine gating play and redemption
//! - `persistence`: Typed profile storage over a key-value capability
//! - `host`: Messages exchanged with the embedding page
//! - `renderer`: Per-frame scene drawing onto a 2D surface
//! - `ui`: Overlay view-model and markup
//! - `platform`: Browser adapters (wasm32 only)

pub mod config;
pub mod error;
pub mod flow;
pub mod host;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scoreboard;
pub mod sim;
pub mod ui;

pub use config::{Config, Theme};
pub use error::{GameError, Result};
pub use flow::FlowController;
pub use scoreboard::Scoreboard;

/// Game tuning constants
///
/// Distances are fractions of the canvas dimensions, so gameplay feels the
/// same at every embed size.
pub mod consts {
    /// Gravity as a fraction of canvas height (units/s²)
    pub const GRAVITY_FACTOR: f32 = 1.2;
    /// Jump velocity as a fraction of canvas height (applied upward)
    pub const JUMP_FACTOR: f32 = 0.35;

    /// Base obstacle speed as a fraction of canvas width (units/s)
    pub const BASE_SPEED_FACTOR: f32 = 0.3;
    /// Extra obstacle speed per point of score, fraction of canvas width
    pub const SPEED_PER_SCORE_FACTOR: f32 = 0.01;

    /// Spawn interval at score 0 (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 2000.0;
    /// Spawn interval reduction per point of score (ms)
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 50.0;
    /// Spawn interval floor (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 900.0;

    /// Obstacle size as fractions of canvas width
    pub const OBSTACLE_WIDTH_FACTOR: f32 = 0.12;
    pub const OBSTACLE_HEIGHT_FACTOR: f32 = 0.18;

    /// Player size and fixed x as fractions of canvas width
    pub const PLAYER_SIZE_FACTOR: f32 = 0.08;
    pub const PLAYER_X_FACTOR: f32 = 0.15;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;
    /// Scoreboard capacity
    pub const SCOREBOARD_SIZE: usize = 3;
    /// Default maximum number of sessions per profile
    pub const DEFAULT_MAX_PLAYS: u32 = 3;
    /// Redemption code length
    pub const CODE_LENGTH: usize = 6;

    /// Longest frame step the simulation will integrate (s)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Step used for the first frame of a session (s)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
}
