//! Typed profile over a key-value store
//!
//! Values are read once when the profile is opened and cached; every update
//! writes through. A failed read or a malformed value yields the default, a
//! failed write is logged and the cached value stays authoritative for the
//! rest of the page lifetime.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::details::UserDetails;
use super::store::KeyValueStore;
use crate::scoreboard::Scoreboard;

pub const SCOREBOARD_KEY: &str = "we_game_scoreboard";
pub const PLAY_COUNT_KEY: &str = "we_game_play_count";
pub const DETAILS_KEY: &str = "we_game_details";
pub const DETAILS_FLAG_KEY: &str = "we_game_details_captured";

#[derive(Debug)]
pub struct Profile<S: KeyValueStore> {
    store: S,
    scoreboard: Scoreboard,
    play_count: u32,
    details_captured: bool,
}

impl<S: KeyValueStore> Profile<S> {
    /// Open a profile, falling back to defaults for anything unreadable
    pub fn open(store: S) -> Self {
        let scoreboard = read_json::<_, Vec<u32>>(&store, SCOREBOARD_KEY)
            .map(Scoreboard::from_scores)
            .unwrap_or_default();
        let play_count = read_raw(&store, PLAY_COUNT_KEY)
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    log::warn!("Corrupt play count {raw:?}, resetting to 0");
                    None
                }
            })
            .unwrap_or(0);
        let details_captured = read_raw(&store, DETAILS_FLAG_KEY).as_deref() == Some("1");

        log::info!(
            "Profile opened: {} plays, {} scores, details {}",
            play_count,
            scoreboard.scores().len(),
            if details_captured { "captured" } else { "missing" }
        );

        Self {
            store,
            scoreboard,
            play_count,
            details_captured,
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Record a finalized score and persist the board. Returns the rank.
    pub fn record_score(&mut self, score: u32) -> Option<usize> {
        let rank = self.scoreboard.record(score);
        write_json(&mut self.store, SCOREBOARD_KEY, &self.scoreboard);
        rank
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    /// Count one more session and persist the counter
    pub fn increment_play_count(&mut self) -> u32 {
        self.play_count = self.play_count.saturating_add(1);
        write_raw(&mut self.store, PLAY_COUNT_KEY, &self.play_count.to_string());
        self.play_count
    }

    pub fn has_details(&self) -> bool {
        self.details_captured
    }

    /// Persist details and mark them captured
    pub fn save_details(&mut self, details: &UserDetails) {
        write_json(&mut self.store, DETAILS_KEY, details);
        write_raw(&mut self.store, DETAILS_FLAG_KEY, "1");
        self.details_captured = true;
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn read_raw<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Reading {key} failed, using default: {e}");
            None
        }
    }
}

fn read_json<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = read_raw(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Corrupt value under {key}, using default: {e}");
            None
        }
    }
}

fn write_raw<S: KeyValueStore>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.save(key, value) {
        log::warn!("Writing {key} failed, keeping in-memory value: {e}");
    }
}

fn write_json<S: KeyValueStore, T: Serialize>(store: &mut S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => write_raw(store, key, &json),
        Err(e) => log::warn!("Serializing {key} failed: {e}"),
    }
}
