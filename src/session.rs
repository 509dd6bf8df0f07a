//! Session state machine
//!
//! Owns the `GameState` and drives the audio and persistence collaborators
//! on phase changes. The UI only sees `Snapshot`s and the tick's events.
//!
//! ```text
//! Menu --start(Normal)--> Playing --lethal--> GameOver --restart--> Menu
//! Menu --start(Infinite)--> GeneratingLevel --first tick--> Playing
//! ```

use serde::Serialize;

use crate::audio::AudioCues;
use crate::consts::SIM_DT;
use crate::highscores::{LeaderboardEntry, PersonalRecord};
use crate::persistence::RunRecorder;
use crate::platform::{FrameClock, now_ms};
use crate::settings::Profile;
use crate::sim::{GameEvent, GameMode, GamePhase, GameState, PlayerMode, TickInput, tick};

/// Leaderboard name used when the profile has none
pub const ANONYMOUS: &str = "Anonymous";

/// Read-only view published to the UI after every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: u64,
    pub speed: f32,
    pub player_mode: PlayerMode,
    pub alive: bool,
    pub distance: f32,
    /// Best recorded score (updated when a run ends)
    pub high_score: u64,
    /// The run that just ended set a new personal record
    pub new_record: bool,
}

pub struct Session<A: AudioCues, R: RunRecorder> {
    state: GameState,
    audio: A,
    recorder: R,
    profile: Profile,
    clock: FrameClock,
    // Track phase for collaborator cues
    last_phase: GamePhase,
    high_score: u64,
    new_record: bool,
    events: Vec<GameEvent>,
}

impl<A: AudioCues, R: RunRecorder> Session<A, R> {
    pub fn new(seed: u64, profile: Profile, audio: A, recorder: R) -> Self {
        let high_score = recorder.high_score();
        Self {
            state: GameState::new(seed),
            audio,
            recorder,
            profile,
            clock: FrameClock::new(),
            last_phase: GamePhase::Menu,
            high_score,
            new_record: false,
            events: Vec::new(),
        }
    }

    /// Start a run from the menu. Returns false if not in the menu.
    pub fn start(&mut self, mode: GameMode) -> bool {
        if !self.state.start_run(mode) {
            log::debug!("Ignoring start in {:?}", self.state.phase);
            return false;
        }
        self.new_record = false;
        self.events.clear();
        self.clock.reset();
        self.sync_phase();
        true
    }

    /// Leave the game-over screen for the menu
    pub fn restart(&mut self) -> bool {
        if !self.state.return_to_menu() {
            return false;
        }
        self.events.clear();
        self.sync_phase();
        true
    }

    /// Run exactly one simulation step
    pub fn tick(&mut self, input: &TickInput) -> Snapshot {
        self.events.clear();
        self.step(input);
        self.snapshot()
    }

    /// Feed one display frame; runs as many steps as the frame time covers.
    /// A jump press is delivered to the first step only.
    pub fn frame(&mut self, frame_dt: f32, input: &TickInput) -> Snapshot {
        self.events.clear();
        let mut input = *input;
        for _ in 0..self.clock.advance(frame_dt) {
            self.step(&input);
            input.jump = false;
        }
        self.snapshot()
    }

    fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, SIM_DT);
        self.events.extend(self.state.events.iter().cloned());
        self.sync_phase();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            mode: self.state.mode,
            score: self.state.score(),
            speed: self.state.speed(),
            player_mode: self.state.player.mode,
            alive: self.state.player.alive,
            distance: self.state.distance,
            high_score: self.high_score,
            new_record: self.new_record,
        }
    }

    /// Events from the most recent `tick` or `frame`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Applies to runs that end after the change
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn into_parts(self) -> (A, R) {
        (self.audio, self.recorder)
    }

    /// Fire collaborator cues for a phase change
    fn sync_phase(&mut self) {
        let phase = self.state.phase;
        if phase == self.last_phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
        self.last_phase = phase;

        match phase {
            GamePhase::Playing => self.audio.start_music(),
            GamePhase::GameOver => {
                self.audio.stop_music();
                self.audio.play_alarm();
                self.finish_run();
            }
            GamePhase::Menu => {
                self.audio.stop_music();
                self.audio.stop_alarm();
            }
            GamePhase::GeneratingLevel => {}
        }
    }

    fn finish_run(&mut self) {
        let score = self.state.score();
        let prior = self.recorder.high_score();
        self.new_record = score > 0 && score >= prior;

        let entry = (score > 0).then(|| {
            let name = self.profile.name.trim();
            LeaderboardEntry {
                name: if name.is_empty() { ANONYMOUS } else { name }.to_string(),
                score,
                avatar_base64: self.profile.avatar_base64.clone(),
                timestamp: now_ms(),
            }
        });
        let record = PersonalRecord {
            name: self.profile.name.clone(),
            score: score.max(prior),
            dedication: self.profile.dedication.clone(),
        };

        self.recorder.record_run(entry, record);
        self.high_score = score.max(prior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::persistence::{MemoryStorage, RecordStore};
    use crate::sim::{DeathCause, Obstacle, ObstacleKind, Timeline};

    #[derive(Debug, Default)]
    struct Cues(Vec<&'static str>);

    impl AudioCues for Cues {
        fn start_music(&mut self) {
            self.0.push("start_music");
        }
        fn stop_music(&mut self) {
            self.0.push("stop_music");
        }
        fn play_alarm(&mut self) {
            self.0.push("play_alarm");
        }
        fn stop_alarm(&mut self) {
            self.0.push("stop_alarm");
        }
    }

    fn session() -> Session<AudioManager, RecordStore<MemoryStorage>> {
        let profile = Profile {
            name: "Vex".to_string(),
            ..Default::default()
        };
        Session::new(3, profile, AudioManager::new(), RecordStore::open(MemoryStorage::new()))
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut session = session();
        assert_eq!(session.snapshot().phase, GamePhase::Menu);
        assert!(session.start(GameMode::Normal));
        assert!(!session.start(GameMode::Infinite));
        assert_eq!(session.snapshot().mode, GameMode::Normal);
        assert!(session.audio().music_playing());
        assert!(!session.restart());
    }

    #[test]
    fn test_infinite_music_waits_for_playing() {
        let mut session = session();
        session.start(GameMode::Infinite);
        assert_eq!(session.snapshot().phase, GamePhase::GeneratingLevel);
        assert!(!session.audio().music_playing());

        let snap = session.tick(&TickInput::default());
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(session.audio().music_playing());
    }

    #[test]
    fn test_idle_run_dies_and_records() {
        let mut session = session();
        session.start(GameMode::Normal);

        let mut snap = session.snapshot();
        for _ in 0..2000 {
            snap = session.tick(&TickInput::default());
            if snap.phase == GamePhase::GameOver {
                break;
            }
        }

        // First authored spike ends a run with no input
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(!snap.alive);
        assert!(!session.audio().music_playing());
        assert!(session.audio().alarm_playing());
        assert!(session
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Died { .. })));

        session.restart();
        assert_eq!(session.snapshot().phase, GamePhase::Menu);
        assert!(!session.audio().alarm_playing());
    }

    #[test]
    fn test_airborne_spike_hit_cues_on_same_tick() {
        let mut session = Session::new(
            3,
            Profile::default(),
            Cues::default(),
            RecordStore::open(MemoryStorage::new()),
        );
        session.start(GameMode::Normal);
        // Raised spike, in reach from the second tick
        session.state.timeline = Timeline::from_obstacles(vec![Obstacle::spike(195.0, 40.0)]);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert_eq!(session.tick(&jump).phase, GamePhase::Playing);
        assert_eq!(session.audio().0, vec!["start_music"]);

        let snap = session.tick(&TickInput::default());
        assert_eq!(session.state().time_ticks, 2);
        assert!(session.state().player.vel_y < 0.0);
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(!snap.alive);
        assert_eq!(session.audio().0, vec!["start_music", "stop_music", "play_alarm"]);
        assert!(session.events().iter().any(|e| matches!(
            e,
            GameEvent::Died {
                cause: DeathCause::Obstacle {
                    kind: ObstacleKind::Spike,
                    ..
                }
            }
        )));
    }

    #[test]
    fn test_frame_runs_whole_steps() {
        let mut session = session();
        session.start(GameMode::Normal);
        session.frame(SIM_DT * 2.5, &TickInput::default());
        assert_eq!(session.state().time_ticks, 2);
        session.frame(SIM_DT * 0.75, &TickInput::default());
        assert_eq!(session.state().time_ticks, 3);
    }
}
