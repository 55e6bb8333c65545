//! Playback state machine driven by an external per-frame clock.
//!
//! The timeline never blocks and owns no timer: the host calls
//! [`Timeline::tick`] with a monotonic `now_ms` each frame. Current time is
//! recomputed from a stored clock reference, so repeated ticks with the same
//! `now_ms` are idempotent — there is no double-advance.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TIMELINE_DURATION_MS;

/// Playback state. `Playing → Idle` on completion under [`LoopMode::Once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playback {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// What happens when the playhead reaches the total duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop: transition to Idle and reset the playhead to zero.
    #[default]
    Once,
    /// Wrap the playhead and keep playing.
    Loop,
}

/// Snapshot of the externally visible timeline state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    pub current_time_ms: f64,
    pub total_duration_ms: f64,
    pub playback: Playback,
}

/// The timeline clock. Created with the project; reset on explicit reset;
/// mutated only here or by explicit scrub.
#[derive(Debug, Clone)]
pub struct Timeline {
    current_time_ms: f64,
    total_duration_ms: f64,
    playback: Playback,
    loop_mode: LoopMode,
    /// `now_ms` corresponding to playhead zero while playing.
    clock_reference_ms: f64,
    /// Most recent `now_ms` observed by `play` or `tick`; scrubbing while
    /// playing re-anchors the clock reference against this immediately, so
    /// no wall time is lost before the next tick.
    last_now_ms: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_TIMELINE_DURATION_MS)
    }
}

impl Timeline {
    /// Create an idle timeline with the given total duration.
    #[must_use]
    pub fn new(total_duration_ms: f64) -> Self {
        Self {
            current_time_ms: 0.0,
            total_duration_ms: total_duration_ms.max(0.0),
            playback: Playback::Idle,
            loop_mode: LoopMode::Once,
            clock_reference_ms: 0.0,
            last_now_ms: 0.0,
        }
    }

    /// Set the loop policy. Defaults to [`LoopMode::Once`].
    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    /// Change the total duration. Non-finite or negative values are ignored.
    pub fn set_total_duration(&mut self, total_duration_ms: f64) {
        if total_duration_ms.is_finite() && total_duration_ms >= 0.0 {
            self.total_duration_ms = total_duration_ms;
        }
    }

    /// Start or resume playback. `Idle`/`Paused` → `Playing`; a no-op while
    /// already playing. `now_ms` anchors the clock reference so the playhead
    /// continues from its current position.
    pub fn play(&mut self, now_ms: f64) {
        if self.playback == Playback::Playing {
            return;
        }
        self.playback = Playback::Playing;
        self.clock_reference_ms = now_ms - self.current_time_ms;
        self.last_now_ms = now_ms;
    }

    /// `Playing` → `Paused`, preserving the playhead. No-op otherwise.
    pub fn pause(&mut self) {
        if self.playback == Playback::Playing {
            self.playback = Playback::Paused;
        }
    }

    /// Any state → `Idle` with the playhead at zero.
    pub fn reset(&mut self) {
        self.playback = Playback::Idle;
        self.current_time_ms = 0.0;
    }

    /// Set the playhead directly, clamped to `[0, total]`, without changing
    /// the playback state. While playing, the clock reference re-anchors
    /// against the last observed `now_ms` so the next tick continues from
    /// here with no elapsed wall time dropped.
    pub fn scrub(&mut self, time_ms: f64) {
        if !time_ms.is_finite() {
            return;
        }
        self.current_time_ms = time_ms.clamp(0.0, self.total_duration_ms);
        if self.playback == Playback::Playing {
            self.clock_reference_ms = self.last_now_ms - self.current_time_ms;
        }
    }

    /// Advance the playhead from the external frame clock.
    ///
    /// Only meaningful while `Playing`; strictly advancing (a clock that
    /// runs backwards cannot rewind the playhead). On reaching the total
    /// duration the timeline either wraps ([`LoopMode::Loop`]) or goes
    /// `Idle` with the playhead reset to zero ([`LoopMode::Once`]).
    pub fn tick(&mut self, now_ms: f64) {
        if self.playback != Playback::Playing || !now_ms.is_finite() {
            return;
        }
        // Observed clock only moves forward; a backwards jump must not
        // poison a later scrub re-anchor.
        self.last_now_ms = self.last_now_ms.max(now_ms);
        let next = (now_ms - self.clock_reference_ms).max(self.current_time_ms);
        if next < self.total_duration_ms || self.total_duration_ms <= 0.0 {
            self.current_time_ms = next;
            return;
        }
        match self.loop_mode {
            LoopMode::Once => {
                self.playback = Playback::Idle;
                self.current_time_ms = 0.0;
            }
            LoopMode::Loop => {
                self.current_time_ms = next % self.total_duration_ms;
                self.clock_reference_ms = now_ms - self.current_time_ms;
            }
        }
    }

    /// The current playhead position in milliseconds.
    #[must_use]
    pub fn current_time_ms(&self) -> f64 {
        self.current_time_ms
    }

    /// The configured total duration in milliseconds.
    #[must_use]
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    /// The current playback state.
    #[must_use]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Externally visible state for the UI shell.
    #[must_use]
    pub fn state(&self) -> TimelineState {
        TimelineState {
            current_time_ms: self.current_time_ms,
            total_duration_ms: self.total_duration_ms,
            playback: self.playback,
        }
    }
}
