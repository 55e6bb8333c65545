//! Keyframe tracks and easing curves.
//!
//! A track animates one transform property of one element over a time span
//! derived from its first and last keyframe. Evaluation brackets the
//! playhead between the two keyframes whose segment contains it and
//! interpolates component-wise between their values with eased progress,
//! so keyframe times are exact: evaluating at any keyframe's time yields
//! that keyframe's value.

#[cfg(test)]
#[path = "track_test.rs"]
mod track_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{ElementId, Vec3};

/// Unique identifier for an animation track.
pub type TrackId = Uuid;

/// Which transform property a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackProperty {
    Position,
    Rotation,
    Scale,
}

/// Monotonic remapping of linear progress used to shape interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
}

impl Easing {
    /// Remap linear progress `x` in `[0, 1]`.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::EaseInQuad => x * x,
            Self::EaseOutQuad => x * (2.0 - x),
            Self::EaseInOutQuad => {
                if x < 0.5 {
                    2.0 * x * x
                } else {
                    -1.0 + (4.0 - 2.0 * x) * x
                }
            }
        }
    }
}

/// A `(time, value)` pair anchoring interpolation. Times are milliseconds
/// from timeline zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time_ms: f64,
    pub value: Vec3,
}

impl Keyframe {
    #[must_use]
    pub fn new(time_ms: f64, value: Vec3) -> Self {
        Self { time_ms, value }
    }
}

/// A timed sequence of keyframes animating one property of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Unique identifier for this track.
    pub id: TrackId,
    /// The element this track animates.
    pub target_id: ElementId,
    /// The transform property this track overrides.
    pub property: TrackProperty,
    /// Sorted ascending by `time_ms`. Kept private so the invariant holds.
    keyframes: Vec<Keyframe>,
    /// Easing curve applied to progress across the span.
    pub easing: Easing,
}

impl AnimationTrack {
    /// Build a track. Keyframes with negative or non-finite times, or
    /// non-finite values, are dropped; the rest are sorted ascending.
    #[must_use]
    pub fn new(
        target_id: ElementId,
        property: TrackProperty,
        mut keyframes: Vec<Keyframe>,
        easing: Easing,
    ) -> Self {
        keyframes.retain(|k| k.time_ms.is_finite() && k.time_ms >= 0.0 && k.value.is_finite());
        keyframes.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        Self { id: Uuid::new_v4(), target_id, property, keyframes, easing }
    }

    /// The sorted keyframe sequence.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Span start in milliseconds (first keyframe time). `None` if the track
    /// has fewer than two keyframes and thus never activates.
    #[must_use]
    pub fn start_ms(&self) -> Option<f64> {
        (self.keyframes.len() >= 2).then(|| self.keyframes[0].time_ms)
    }

    /// Span length in milliseconds (last minus first keyframe time).
    #[must_use]
    pub fn duration_ms(&self) -> Option<f64> {
        let start = self.start_ms()?;
        let end = self.keyframes.last()?.time_ms;
        Some(end - start)
    }

    /// Whether the track's span contains `t_ms` (inclusive on both ends).
    #[must_use]
    pub fn is_active_at(&self, t_ms: f64) -> bool {
        let Some(start) = self.start_ms() else {
            return false;
        };
        let Some(duration) = self.duration_ms() else {
            return false;
        };
        t_ms >= start && t_ms <= start + duration
    }

    /// Evaluate the track at `t_ms`. Returns `None` outside the span or for
    /// tracks with fewer than two keyframes.
    ///
    /// The sorted keyframes are scanned for the pair bracketing `t_ms` (at
    /// most one segment contains it); progress within that segment is
    /// clamped to `[0, 1]`, eased, then used for a component-wise lerp
    /// between the pair's values. A zero-length segment resolves to its
    /// later keyframe value.
    #[must_use]
    pub fn value_at(&self, t_ms: f64) -> Option<Vec3> {
        if !self.is_active_at(t_ms) {
            return None;
        }
        let pair = self
            .keyframes
            .windows(2)
            .find(|w| t_ms >= w[0].time_ms && t_ms <= w[1].time_ms)?;
        let (prev, next) = (pair[0], pair[1]);
        let segment = next.time_ms - prev.time_ms;
        if segment <= 0.0 {
            return Some(next.value);
        }
        let progress = ((t_ms - prev.time_ms) / segment).clamp(0.0, 1.0);
        Some(prev.value.lerp(next.value, self.easing.apply(progress)))
    }
}
