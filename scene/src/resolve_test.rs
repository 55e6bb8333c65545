#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementKind, Vec3};
use crate::track::{Easing, Keyframe};

fn element_at_origin(name: &str) -> SceneElement {
    SceneElement::new(ElementKind::Model, name, "assets/cube.glb")
}

fn position_track(target: ElementId, from: Vec3, to: Vec3, easing: Easing) -> AnimationTrack {
    AnimationTrack::new(
        target,
        TrackProperty::Position,
        vec![Keyframe::new(0.0, from), Keyframe::new(1000.0, to)],
        easing,
    )
}

#[test]
fn base_transform_when_no_tracks() {
    let mut el = element_at_origin("A");
    el.transform.position = Vec3::new(4.0, 5.0, 6.0);
    let resolved = resolve_transform(&el, &[], 500.0);
    assert_eq!(resolved, el.transform);
}

#[test]
fn linear_track_midpoint() {
    // Element at (0,0,0); position track 0 -> (1,1,1) over 1000ms, linear.
    let el = element_at_origin("A");
    let track = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    let resolved = resolve_transform(&el, &[track], 500.0);
    assert_eq!(resolved.position, Vec3::splat(0.5));
}

#[test]
fn ease_in_quad_track_midpoint() {
    let el = element_at_origin("A");
    let track = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::EaseInQuad);
    let resolved = resolve_transform(&el, &[track], 500.0);
    assert_eq!(resolved.position, Vec3::splat(0.25));
}

#[test]
fn inactive_track_leaves_base_value() {
    let mut el = element_at_origin("A");
    el.transform.position = Vec3::new(9.0, 9.0, 9.0);
    let track = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    // Past the span end: base transform shows through.
    let resolved = resolve_transform(&el, &[track], 2000.0);
    assert_eq!(resolved.position, Vec3::new(9.0, 9.0, 9.0));
}

#[test]
fn track_for_other_element_ignored() {
    let el = element_at_origin("A");
    let other = element_at_origin("B");
    let track = position_track(other.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    let resolved = resolve_transform(&el, &[track], 500.0);
    assert_eq!(resolved.position, Vec3::ZERO);
}

#[test]
fn later_created_track_wins_overlap() {
    let el = element_at_origin("A");
    let first = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    let second = position_track(el.id, Vec3::splat(10.0), Vec3::splat(20.0), Easing::Linear);

    let resolved = resolve_transform(&el, &[first.clone(), second.clone()], 500.0);
    assert_eq!(resolved.position, Vec3::splat(15.0));

    // Reversed creation order flips the winner.
    let resolved = resolve_transform(&el, &[second, first], 500.0);
    assert_eq!(resolved.position, Vec3::splat(0.5));
}

#[test]
fn tracks_on_different_properties_compose() {
    let el = element_at_origin("A");
    let pos = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    let scale = AnimationTrack::new(
        el.id,
        TrackProperty::Scale,
        vec![
            Keyframe::new(0.0, Vec3::ONE),
            Keyframe::new(1000.0, Vec3::splat(3.0)),
        ],
        Easing::Linear,
    );
    let resolved = resolve_transform(&el, &[pos, scale], 500.0);
    assert_eq!(resolved.position, Vec3::splat(0.5));
    assert_eq!(resolved.scale, Vec3::splat(2.0));
    assert_eq!(resolved.rotation, Vec3::ZERO);
}

#[test]
fn resolve_scene_preserves_element_order_and_visibility() {
    let a = element_at_origin("A");
    let mut b = element_at_origin("B");
    b.visible = false;
    let elements = [&a, &b];

    let resolved = resolve_scene(&elements, &[], 0.0);
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].id, a.id);
    assert!(resolved[0].visible);
    assert_eq!(resolved[1].id, b.id);
    assert!(!resolved[1].visible);
}

#[test]
fn invisible_elements_still_resolve_transforms() {
    let mut el = element_at_origin("A");
    el.visible = false;
    let track = position_track(el.id, Vec3::ZERO, Vec3::ONE, Easing::Linear);
    let elements = [&el];
    let resolved = resolve_scene(&elements, std::slice::from_ref(&track), 500.0);
    assert_eq!(resolved[0].transform.position, Vec3::splat(0.5));
}
