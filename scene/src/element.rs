//! Element model: vectors, transforms, element kinds, and sparse updates.
//!
//! This module defines the value types that describe what is in the scene
//! (`SceneElement`, `ElementKind`, `Transform`) and a sparse-update type for
//! incremental edits (`PartialElement`). Data flows into this layer from the
//! network (JSON deserialization) and from the UI shell (mutations); the
//! store applies updates, the resolver reads transforms each frame.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene element.
pub type ElementId = Uuid;

/// A three-component vector used for positions, euler rotations, and scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    /// The all-ones vector (identity scale).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };

    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A vector with all three components set to `v`.
    #[must_use]
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise linear interpolation from `self` to `other`.
    #[must_use]
    pub fn lerp(self, other: Self, alpha: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
            z: self.z + (other.z - self.z) * alpha,
        }
    }

    /// Whether every component is a finite number.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

/// An element's placement in the scene.
///
/// `rotation` is euler angles in radians. `scale` is per-axis; uniform
/// scaling goes through [`Transform::set_uniform_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE }
    }
}

impl Transform {
    /// Whether every component of every vector is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Set the same scale factor on all three axes.
    pub fn set_uniform_scale(&mut self, factor: f64) {
        self.scale = Vec3::splat(factor);
    }
}

/// The kind of a scene element. Immutable after creation — the sparse-update
/// type deliberately has no `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A 3D model referenced by `source_ref`.
    Model,
    /// A textured image plane.
    Image,
    /// A video plane.
    Video,
    /// A text billboard; the string lives in `content`.
    Text,
}

/// A scene element as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Element kind. Immutable after creation.
    pub kind: ElementKind,
    /// Display name shown in the element list.
    pub name: String,
    /// Asset reference (URL or asset id) resolved by the asset provider.
    pub source_ref: String,
    /// Placement in the scene.
    pub transform: Transform,
    /// Text content. Only meaningful for [`ElementKind::Text`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Whether the render adapter should draw this element.
    pub visible: bool,
}

impl SceneElement {
    /// Create an element with a fresh id, default transform, and no content.
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            source_ref: source_ref.into(),
            transform: Transform::default(),
            content: None,
            visible: true,
        }
    }

    /// Builder-style text content setter, used when placing text elements.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Sparse update for a scene element. Only present fields are applied.
///
/// The field set is the whitelist: `id` and `kind` cannot be expressed here,
/// so they cannot be changed by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    /// New display name, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New asset reference, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
    /// New position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    /// New euler rotation in radians, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    /// New per-axis scale, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    /// New text content, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New visibility flag, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl PartialElement {
    /// Whether every transform component present in the update is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_none_or(Vec3::is_finite)
            && self.rotation.is_none_or(Vec3::is_finite)
            && self.scale.is_none_or(Vec3::is_finite)
    }

    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.source_ref.is_none()
            && self.position.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.content.is_none()
            && self.visible.is_none()
    }
}
