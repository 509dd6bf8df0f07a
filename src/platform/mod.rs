//! Platform glue
//!
//! Handles host differences for:
//! - Wall-clock timestamps
//! - Turning variable frame times into whole simulation ticks

use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Unix time in milliseconds (0 if the clock is before the epoch)
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Fixed-step accumulator for a display-refresh driven host
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (tab switch, debugger) don't turn into a burst
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Whatever the cap left over is dropped, not carried into later frames
        if substeps == MAX_SUBSTEPS {
            self.accumulator %= SIM_DT;
        }
        substeps
    }

    /// Drop any pending time, e.g. after leaving the menu
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
