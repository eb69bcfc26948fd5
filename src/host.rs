//! Messages exchanged with the embedding page
//!
//! Outbound messages are best-effort: a failed post is logged by the caller
//! and dropped. The only inbound message is a config patch.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const CONFIG_MESSAGE: &str = "we:game:config";

/// Lifecycle/analytics event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum GameEvent {
    Started {
        play: u32,
    },
    Score {
        score: u32,
    },
    Collision {
        lives: u8,
    },
    GameOver {
        score: u32,
        discount: u8,
        code: String,
    },
    Redeem {
        code: String,
        discount: u8,
    },
    PlayAgain {
        #[serde(rename = "playsLeft")]
        plays_left: u32,
    },
    DetailsSubmitted,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Started { .. } => "started",
            GameEvent::Score { .. } => "score",
            GameEvent::Collision { .. } => "collision",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::Redeem { .. } => "redeem",
            GameEvent::PlayAgain { .. } => "play_again",
            GameEvent::DetailsSubmitted => "details_submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    #[serde(flatten)]
    pub event: GameEvent,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Outbound message to the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "we:game:height")]
    Height { px: u32 },
    #[serde(rename = "we:game:event")]
    Event { payload: EventPayload },
}

impl HostMessage {
    pub fn event(event: GameEvent, user_id: Option<String>) -> Self {
        HostMessage::Event {
            payload: EventPayload { event, user_id },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One-way channel to the embedding context
pub trait HostChannel {
    fn post(&mut self, message: &HostMessage, target_origin: &str) -> Result<()>;
}

/// Extract the config patch from an inbound host message, if it is one
pub fn config_patch(message: &Value) -> Option<&Value> {
    if message.get("type").and_then(Value::as_str) != Some(CONFIG_MESSAGE) {
        return None;
    }
    message.get("payload").filter(|p| p.is_object())
}

/// Channel that keeps every posted message (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    pub sent: Vec<(HostMessage, String)>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the analytics events posted so far, in order
    pub fn event_names(&self) -> Vec<&'static str> {
        self.sent
            .iter()
            .filter_map(|(m, _)| match m {
                HostMessage::Event { payload } => Some(payload.event.name()),
                HostMessage::Height { .. } => None,
            })
            .collect()
    }

    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.sent.iter().filter_map(|(m, _)| match m {
            HostMessage::Event { payload } => Some(&payload.event),
            HostMessage::Height { .. } => None,
        })
    }

    pub fn heights(&self) -> Vec<u32> {
        self.sent
            .iter()
            .filter_map(|(m, _)| match m {
                HostMessage::Height { px } => Some(*px),
                HostMessage::Event { .. } => None,
            })
            .collect()
    }
}

impl HostChannel for RecordingChannel {
    fn post(&mut self, message: &HostMessage, target_origin: &str) -> Result<()> {
        self.sent.push((message.clone(), target_origin.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_height_wire_shape() {
        let msg = HostMessage::Height { px: 480 };
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({ "type": "we:game:height", "px": 480 }));
    }

    #[test]
    fn test_event_wire_shape_with_user() {
        let msg = HostMessage::event(
            GameEvent::GameOver {
                score: 12,
                discount: 10,
                code: "AB12CD".into(),
            },
            Some("u-9".into()),
        );
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "we:game:event",
                "payload": {
                    "name": "game_over",
                    "score": 12,
                    "discount": 10,
                    "code": "AB12CD",
                    "userId": "u-9",
                }
            })
        );
    }

    #[test]
    fn test_unit_event_and_renamed_fields() {
        let msg = HostMessage::event(GameEvent::DetailsSubmitted, None);
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({ "type": "we:game:event", "payload": { "name": "details_submitted" } }));

        let msg = HostMessage::event(GameEvent::PlayAgain { plays_left: 1 }, None);
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["payload"]["playsLeft"], json!(1));
    }

    #[test]
    fn test_config_patch_extraction() {
        let msg = json!({ "type": "we:game:config", "payload": { "theme": "dark" } });
        assert_eq!(config_patch(&msg), Some(&json!({ "theme": "dark" })));

        assert!(config_patch(&json!({ "type": "we:game:height", "px": 3 })).is_none());
        assert!(config_patch(&json!({ "type": "we:game:config", "payload": 5 })).is_none());
        assert!(config_patch(&json!("we:game:config")).is_none());
    }
}
