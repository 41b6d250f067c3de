//! Playback Scheduler
//!
//! Drives the virtual playhead: a per-frame tick measures elapsed
//! wall-clock time, scales it by the signed playback rate, and advances
//! `current_time`, clamping at the timeline bounds. The tick source holds
//! no state while paused, so stopping playback structurally tears the frame
//! loop down.

use std::time::Instant;

use tracing::debug;

use crate::core::{project::EditorState, TimeSec};

/// Timelines are never reported shorter than this (seconds)
pub const MIN_TIMELINE_DURATION: TimeSec = 30.0;

/// Buffer appended after the last clip (seconds)
pub const TIMELINE_TAIL: TimeSec = 15.0;

/// Fastest shuttle rate reachable via J/L
pub const MAX_SHUTTLE_RATE: f64 = 4.0;

/// Derived timeline duration: the last clip end plus a tail, floored at the
/// minimum. Recomputed whenever tracks change; never stored.
pub fn timeline_duration(state: &EditorState) -> TimeSec {
    (state.latest_clip_end() + TIMELINE_TAIL).max(MIN_TIMELINE_DURATION)
}

/// Virtual transport clock
#[derive(Clone, Debug)]
pub struct PlaybackScheduler {
    current_time: TimeSec,
    is_playing: bool,
    playback_rate: f64,
    last_tick: Option<Instant>,
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            playback_rate: 1.0,
            last_tick: None,
        }
    }

    pub fn current_time(&self) -> TimeSec {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    // =========================================================================
    // Transport Controls
    // =========================================================================

    /// Starts playback at the current rate
    pub fn play(&mut self) {
        self.is_playing = true;
    }

    /// Stops playback; manual pause always resets the rate to 1
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.playback_rate = 1.0;
        self.last_tick = None;
    }

    /// Toggles play/pause
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seeks to a position, pausing first when playing
    pub fn seek(&mut self, time: TimeSec, timeline_duration: TimeSec) {
        if self.is_playing {
            self.pause();
        }
        self.current_time = time.clamp(0.0, timeline_duration);
    }

    /// "L": doubles the forward rate up to 4x; from a stop or from reverse,
    /// starts forward at 1x
    pub fn shuttle_forward(&mut self) {
        if self.is_playing && self.playback_rate >= 1.0 {
            self.playback_rate = (self.playback_rate * 2.0).min(MAX_SHUTTLE_RATE);
        } else {
            self.playback_rate = 1.0;
        }
        self.is_playing = true;
    }

    /// "J": symmetric reverse shuttle
    pub fn shuttle_reverse(&mut self) {
        if self.is_playing && self.playback_rate <= -1.0 {
            self.playback_rate = (self.playback_rate * 2.0).max(-MAX_SHUTTLE_RATE);
        } else {
            self.playback_rate = -1.0;
        }
        self.is_playing = true;
    }

    /// "K": stops shuttling
    pub fn shuttle_stop(&mut self) {
        self.pause();
    }

    // =========================================================================
    // Frame Tick
    // =========================================================================

    /// Per-frame callback: measures the wall-clock delta since the previous
    /// tick and advances the clock. The first tick after (re)starting only
    /// arms the timer.
    pub fn tick(&mut self, now: Instant, timeline_duration: TimeSec) {
        if !self.is_playing {
            self.last_tick = None;
            return;
        }
        let Some(previous) = self.last_tick.replace(now) else {
            return;
        };
        let elapsed = now.saturating_duration_since(previous).as_secs_f64();
        self.advance(elapsed, timeline_duration);
    }

    /// Advances the clock by `elapsed` wall-clock seconds scaled by the
    /// playback rate, clamping at the timeline bounds. Reaching either
    /// bound stops playback (no wraparound).
    pub fn advance(&mut self, elapsed: TimeSec, timeline_duration: TimeSec) {
        if !self.is_playing {
            return;
        }
        let next = self.current_time + elapsed * self.playback_rate;
        if next <= 0.0 {
            debug!("playhead reached timeline start, stopping");
            self.current_time = 0.0;
            self.pause();
        } else if next >= timeline_duration {
            debug!("playhead reached timeline end, stopping");
            self.current_time = timeline_duration;
            self.pause();
        } else {
            self.current_time = next;
        }
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
