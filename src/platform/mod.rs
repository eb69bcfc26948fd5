//! Platform abstraction layer
//!
//! Browser adapters for the capabilities the core needs:
//! - Storage (LocalStorage)
//! - Host channel (`postMessage` to the parent frame)
//! - Drawing surface (canvas 2D context)
//! - Overlay (DOM element with delegated click routing)
//! - Frame loop and input listeners (`app`)

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod messaging;
#[cfg(target_arch = "wasm32")]
pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod storage;
