//! Error taxonomy
//!
//! Only `SurfaceUnavailable` is ever fatal. Storage and host failures are
//! swallowed by the layer that owns them; invalid details become an inline
//! prompt on the details screen.

use thiserror::Error;

use crate::persistence::DetailsField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("host channel failure: {0}")]
    Host(String),
    #[error("{0} is required")]
    InvalidDetails(DetailsField),
}

pub type Result<T> = std::result::Result<T, GameError>;
