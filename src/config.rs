//! Widget configuration
//!
//! Built from defaults, then patched by the bootstrap config and by any
//! `we:game:config` message the host sends later. Patching is a shallow
//! merge and can be repeated safely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::DEFAULT_MAX_PLAYS;

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Dark,
    Neon,
}

/// Colors used by the renderer for one theme (CSS color strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub player: &'static str,
    pub obstacle: &'static str,
    pub text: &'static str,
    pub hud: &'static str,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Dark => "dark",
            Theme::Neon => "neon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "default" | "light" => Some(Theme::Classic),
            "dark" => Some(Theme::Dark),
            "neon" => Some(Theme::Neon),
            _ => None,
        }
    }

    /// CSS class applied to the overlay root
    pub fn css_class(&self) -> String {
        format!("theme-{}", self.as_str())
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Classic => Palette {
                background: "#bfe8f5",
                player: "#f5c842",
                obstacle: "#4a7a1a",
                text: "#1e1e1e",
                hud: "rgba(255,255,255,0.85)",
            },
            Theme::Dark => Palette {
                background: "#111418",
                player: "#e0e0e0",
                obstacle: "#c0392b",
                text: "#f5f5f5",
                hud: "rgba(0,0,0,0.6)",
            },
            Theme::Neon => Palette {
                background: "#0b0221",
                player: "#39ff14",
                obstacle: "#ff2bd6",
                text: "#00f0ff",
                hud: "rgba(11,2,33,0.7)",
            },
        }
    }
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub theme: Theme,
    /// Maximum sessions per profile (`maxSpins` on the wire)
    pub max_plays: u32,
    /// Target origin for messages posted to the host
    pub parent_origin: String,
    /// Opaque host-side user identifier, echoed in analytics
    pub user_id: Option<String>,
    /// Optional sprite URL for the player; a filled rect is drawn otherwise
    pub player_image: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            max_plays: DEFAULT_MAX_PLAYS,
            parent_origin: "*".to_string(),
            user_id: None,
            player_image: None,
        }
    }
}

impl Config {
    /// Build a config by merging `patch` over the defaults
    pub fn from_patch(patch: &Value) -> Self {
        let mut config = Self::default();
        config.merge(patch);
        config
    }

    /// Shallow-merge a JSON object over this config.
    ///
    /// Unknown keys and values of the wrong type are ignored, so a bad patch
    /// never leaves the config half-applied in an invalid state.
    pub fn merge(&mut self, patch: &Value) {
        let Some(fields) = patch.as_object() else {
            log::debug!("Ignoring non-object config patch");
            return;
        };

        for (key, value) in fields {
            match key.as_str() {
                "theme" => match value.as_str().and_then(Theme::from_str) {
                    Some(theme) => self.theme = theme,
                    None => log::debug!("Ignoring unknown theme {value}"),
                },
                "maxSpins" | "maxPlays" => match value.as_u64() {
                    Some(n) => self.max_plays = u32::try_from(n).unwrap_or(u32::MAX),
                    None => log::debug!("Ignoring non-integer {key}: {value}"),
                },
                "parentOrigin" => {
                    if let Some(origin) = value.as_str().filter(|s| !s.is_empty()) {
                        self.parent_origin = origin.to_string();
                    }
                }
                "playerImage" => {
                    self.player_image = value.as_str().filter(|s| !s.is_empty()).map(str::to_string);
                }
                "userId" => match value {
                    Value::String(id) => self.user_id = Some(id.clone()),
                    Value::Number(n) => self.user_id = Some(n.to_string()),
                    Value::Null => self.user_id = None,
                    _ => log::debug!("Ignoring userId {value}"),
                },
                _ => {}
            }
        }
    }
}
