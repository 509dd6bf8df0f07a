//! Player profile and preferences
//!
//! Persisted separately from the leaderboard under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};
use crate::sim::GameMode;

/// Storage key
pub const SETTINGS_KEY: &str = "neon_dash_settings";

/// Who is playing, as shown on the leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub dedication: String,
    /// Cosmetic avatar image, base64 encoded
    pub avatar_base64: Option<String>,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Profile ===
    pub player_name: String,
    /// Free text shown next to the personal record
    pub dedication: String,
    pub avatar_base64: Option<String>,

    /// Mode the menu preselects
    pub preferred_mode: GameMode,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player 1".to_string(),
            dedication: String::new(),
            avatar_base64: None,

            preferred_mode: GameMode::Normal,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Profile used for leaderboard entries and the personal record
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.player_name.clone(),
            dedication: self.dedication.clone(),
            avatar_base64: self.avatar_base64.clone(),
        }
    }

    /// Load settings, using defaults if missing or unreadable
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let settings: Self = persistence::load_or_default(storage, SETTINGS_KEY);
        log::info!("Settings loaded for {:?}", settings.player_name);
        settings
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> persistence::Result<()> {
        persistence::save(storage, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
