//! Per-frame resolved-transform computation.
//!
//! The render adapter contract: given the current elements, the track list
//! in creation order, and the timeline time, produce each element's resolved
//! transform. Base transform values are overridden by any active track
//! targeting that `(element, property)` pair; when several tracks overlap
//! the same pair, they apply in ascending creation order so the
//! later-created track's value wins deterministically.
//!
//! Resolution never mutates the store — the renderer re-derives its own
//! objects from this output each frame.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use crate::element::{ElementId, SceneElement, Transform};
use crate::track::{AnimationTrack, TrackProperty};

/// One element's resolved state for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement {
    pub id: ElementId,
    pub transform: Transform,
    /// Carried through so the renderer can skip hidden elements.
    pub visible: bool,
}

/// Resolve one element's transform at `t_ms`.
#[must_use]
pub fn resolve_transform(element: &SceneElement, tracks: &[AnimationTrack], t_ms: f64) -> Transform {
    let mut transform = element.transform;
    for track in tracks {
        if track.target_id != element.id {
            continue;
        }
        let Some(value) = track.value_at(t_ms) else {
            continue;
        };
        match track.property {
            TrackProperty::Position => transform.position = value,
            TrackProperty::Rotation => transform.rotation = value,
            TrackProperty::Scale => transform.scale = value,
        }
    }
    transform
}

/// Resolve all elements at `t_ms`, in the element list's order.
///
/// `tracks` must be in creation order; see the module docs for the
/// overlapping-track resolution rule.
#[must_use]
pub fn resolve_scene(
    elements: &[&SceneElement],
    tracks: &[AnimationTrack],
    t_ms: f64,
) -> Vec<ResolvedElement> {
    elements
        .iter()
        .map(|element| ResolvedElement {
            id: element.id,
            transform: resolve_transform(element, tracks, t_ms),
            visible: element.visible,
        })
        .collect()
}
