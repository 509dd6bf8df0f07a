//! Audio cues
//!
//! The session only ever asks for four cues: background music on and off, and
//! the game-over alarm on and off. Hosts that play real sound implement
//! `AudioCues`; `AudioManager` keeps the volume/mute state and what should be
//! audible right now.

use crate::settings::Settings;

/// Cues the session drives on phase changes
pub trait AudioCues {
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn play_alarm(&mut self);
    fn stop_alarm(&mut self);
}

/// Audio state for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    alarm_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
            alarm_playing: false,
        }
    }

    /// Take volumes and mute from the player's preferences
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn alarm_playing(&self) -> bool {
        self.alarm_playing
    }

    /// Output gain for the music track
    pub fn music_gain(&self) -> f32 {
        if self.muted || !self.music_playing {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Output gain for the alarm
    pub fn alarm_gain(&self) -> f32 {
        if self.muted || !self.alarm_playing {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioCues for AudioManager {
    fn start_music(&mut self) {
        if !self.music_playing {
            log::debug!("Music on (gain {:.2})", self.master_volume * self.music_volume);
        }
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            log::debug!("Music off");
        }
        self.music_playing = false;
    }

    fn play_alarm(&mut self) {
        log::debug!("Alarm");
        self.alarm_playing = true;
    }

    fn stop_alarm(&mut self) {
        self.alarm_playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_state() {
        let mut audio = AudioManager::new();
        assert_eq!(audio.music_gain(), 0.0);

        audio.start_music();
        assert!(audio.music_playing());
        assert!((audio.music_gain() - 0.8 * 0.7).abs() < 1e-6);

        audio.stop_music();
        audio.play_alarm();
        assert!(!audio.music_playing());
        assert!(audio.alarm_playing());

        audio.stop_alarm();
        assert_eq!(audio.alarm_gain(), 0.0);
    }

    #[test]
    fn test_mute_and_clamp() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(3.0);
        audio.set_music_volume(-1.0);
        audio.start_music();
        assert_eq!(audio.music_gain(), 0.0);

        audio.set_music_volume(0.5);
        assert_eq!(audio.music_gain(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.music_gain(), 0.0);
        // Muting doesn't stop the cue itself
        assert!(audio.music_playing());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            muted: true,
            music_volume: 0.25,
            ..Settings::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(audio.is_muted());
        assert_eq!(audio.music_volume, 0.25);
    }
}
