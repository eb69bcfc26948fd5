//! Local profile persistence
//!
//! Features:
//! - `KeyValueStore` capability (LocalStorage on web, in-memory elsewhere)
//! - Typed `Profile` over three logical keys plus a details-present flag
//! - Corrupt or unavailable storage falls back to defaults, never surfaces

pub mod details;
pub mod profile;
pub mod store;

pub use details::{DetailsField, UserDetails};
pub use profile::Profile;
pub use store::{KeyValueStore, MemoryStore};
