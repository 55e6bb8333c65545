//! Detection feed seam: typed results for image, face, and pose tracking.
//!
//! Detection runs against video frames handed in by the host, asynchronously
//! relative to the render loop — the session only ever reads frames and
//! reports results; element placement driven by a detection still funnels
//! through the element store like any other mutation. A detector failure
//! halts tracking for the session without terminating the host.

#[cfg(test)]
#[path = "tracking_test.rs"]
mod tracking_test;

use serde::{Deserialize, Serialize};

/// Which tracking model a detector implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingKind {
    Image,
    Face,
    Pose,
}

/// A single video frame handed to a detector.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Raw pixel data; layout is detector-defined.
    pub data: Vec<u8>,
}

/// Axis-aligned detection region in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A 2D landmark in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

/// One detected face as a landmark set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub landmarks: Vec<Landmark>,
}

/// One named, scored pose keypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

/// One detected pose as a keypoint set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseKeypoints {
    pub keypoints: Vec<Keypoint>,
}

/// Detection output, tagged by tracking type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum DetectionResult {
    Image(Vec<BoundingBox>),
    Face(Vec<FaceLandmarks>),
    Pose(Vec<PoseKeypoints>),
}

impl DetectionResult {
    /// The tracking type this result belongs to.
    #[must_use]
    pub fn kind(&self) -> TrackingKind {
        match self {
            Self::Image(_) => TrackingKind::Image,
            Self::Face(_) => TrackingKind::Face,
            Self::Pose(_) => TrackingKind::Pose,
        }
    }
}

/// A detector failure. Halts the owning session; never fatal to the host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackingError {
    #[error("detector failed: {0}")]
    Detector(String),
    #[error("detector model failed to load: {0}")]
    ModelLoad(String),
}

/// A tracking model boundary: takes a frame, returns typed detections.
pub trait Detector {
    /// The tracking type this detector produces.
    fn kind(&self) -> TrackingKind;

    /// Run detection on one frame.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError`] on model failure; the session halts.
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, TrackingError>;
}

/// Drives a detector across frames and latches its most recent result.
///
/// The first detector error halts the session: later frames are ignored and
/// the error is kept for inspection. The host application keeps running.
pub struct TrackingSession {
    detector: Box<dyn Detector>,
    last_result: Option<DetectionResult>,
    halted: Option<TrackingError>,
}

impl TrackingSession {
    #[must_use]
    pub fn new(detector: Box<dyn Detector>) -> Self {
        Self { detector, last_result: None, halted: None }
    }

    /// The tracking type of the underlying detector.
    #[must_use]
    pub fn kind(&self) -> TrackingKind {
        self.detector.kind()
    }

    /// Feed one frame. Returns the new result, or `None` when the session
    /// is halted or detection failed on this frame.
    pub fn process(&mut self, frame: &VideoFrame) -> Option<&DetectionResult> {
        if self.halted.is_some() {
            return None;
        }
        match self.detector.detect(frame) {
            Ok(result) => {
                self.last_result = Some(result);
                self.last_result.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "tracking halted for this session");
                self.halted = Some(e);
                None
            }
        }
    }

    /// The most recent successful detection, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&DetectionResult> {
        self.last_result.as_ref()
    }

    /// Whether the session has halted on a detector error.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// The error that halted the session, if any.
    #[must_use]
    pub fn halt_reason(&self) -> Option<&TrackingError> {
        self.halted.as_ref()
    }
}
