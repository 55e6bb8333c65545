//! Shared numeric constants for the scene engine.

/// Offset applied to a duplicated element's position, per axis (x, y).
/// The z component is left unchanged.
pub const DUPLICATE_OFFSET_X: f64 = 0.5;
/// See [`DUPLICATE_OFFSET_X`].
pub const DUPLICATE_OFFSET_Y: f64 = 0.5;

/// Default timeline length for a new project, in milliseconds.
pub const DEFAULT_TIMELINE_DURATION_MS: f64 = 10_000.0;

/// Suffix appended to a duplicated element's name.
pub const DUPLICATE_NAME_SUFFIX: &str = " (Copy)";
