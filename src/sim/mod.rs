//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as an explicit `dt`
//! - Randomness comes in as an explicit RNG
//! - No rendering, storage or host dependencies

pub mod physics;
pub mod reward;
pub mod spawner;
pub mod state;
pub mod tick;

pub use physics::{Rect, advance_obstacles, integrate_player, jump, obstacle_speed};
pub use reward::{REWARD_BANDS, Reward, RewardBand, redemption_code, reward_for};
pub use spawner::{obstacle_size, spawn_interval_ms, update_spawner};
pub use state::{Obstacle, Phase, Player, Session, SessionSummary};
pub use tick::{FrameClock, TickEvent, tick};
