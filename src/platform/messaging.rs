//! `postMessage` channel to the parent frame

use web_sys::Window;

use super::dom::{js_error_message, window};
use crate::error::{GameError, Result};
use crate::host::{HostChannel, HostMessage};

/// Posts structured messages to the parent frame
pub struct ParentChannel {
    parent: Option<Window>,
}

impl ParentChannel {
    pub fn open() -> Self {
        let parent = window().ok().and_then(|w| w.parent().ok().flatten());
        Self { parent }
    }
}

impl HostChannel for ParentChannel {
    fn post(&mut self, message: &HostMessage, target_origin: &str) -> Result<()> {
        let parent = self
            .parent
            .as_ref()
            .ok_or_else(|| GameError::Host("no parent window".into()))?;
        let json = message
            .to_json()
            .map_err(|e| GameError::Host(e.to_string()))?;
        let value = js_sys::JSON::parse(&json).map_err(|e| GameError::Host(js_error_message(&e)))?;
        parent
            .post_message(&value, target_origin)
            .map_err(|e| GameError::Host(js_error_message(&e)))
    }
}
