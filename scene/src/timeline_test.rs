#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// State machine
// =============================================================

#[test]
fn starts_idle_at_zero() {
    let tl = Timeline::new(5000.0);
    assert_eq!(tl.playback(), Playback::Idle);
    assert_eq!(tl.current_time_ms(), 0.0);
    assert_eq!(tl.total_duration_ms(), 5000.0);
}

#[test]
fn play_tick_advances_from_clock() {
    let mut tl = Timeline::new(5000.0);
    tl.play(10_000.0);
    assert_eq!(tl.playback(), Playback::Playing);
    tl.tick(10_250.0);
    assert_eq!(tl.current_time_ms(), 250.0);
    tl.tick(11_000.0);
    assert_eq!(tl.current_time_ms(), 1000.0);
}

#[test]
fn tick_idempotent_for_same_now() {
    let mut tl = Timeline::new(5000.0);
    tl.play(0.0);
    tl.tick(300.0);
    tl.tick(300.0);
    tl.tick(300.0);
    assert_eq!(tl.current_time_ms(), 300.0);
}

#[test]
fn tick_never_retroactive() {
    let mut tl = Timeline::new(5000.0);
    tl.play(0.0);
    tl.tick(400.0);
    // A clock that jumps backwards cannot rewind the playhead.
    tl.tick(100.0);
    assert_eq!(tl.current_time_ms(), 400.0);
}

#[test]
fn tick_ignored_unless_playing() {
    let mut tl = Timeline::new(5000.0);
    tl.tick(1000.0);
    assert_eq!(tl.current_time_ms(), 0.0);

    tl.play(0.0);
    tl.tick(100.0);
    tl.pause();
    tl.tick(900.0);
    assert_eq!(tl.current_time_ms(), 100.0);
}

#[test]
fn pause_preserves_playhead_and_resume_continues() {
    let mut tl = Timeline::new(5000.0);
    tl.play(0.0);
    tl.tick(1000.0);
    tl.pause();
    assert_eq!(tl.playback(), Playback::Paused);
    assert_eq!(tl.current_time_ms(), 1000.0);

    // Resuming later re-anchors the clock; no time passed while paused.
    tl.play(50_000.0);
    tl.tick(50_500.0);
    assert_eq!(tl.current_time_ms(), 1500.0);
}

#[test]
fn reset_from_any_state() {
    let mut tl = Timeline::new(5000.0);
    tl.play(0.0);
    tl.tick(1234.0);
    tl.reset();
    assert_eq!(tl.playback(), Playback::Idle);
    assert_eq!(tl.current_time_ms(), 0.0);

    tl.play(0.0);
    tl.pause();
    tl.reset();
    assert_eq!(tl.playback(), Playback::Idle);
}

// =============================================================
// Completion
// =============================================================

#[test]
fn once_mode_completes_to_idle_at_zero() {
    let mut tl = Timeline::new(1000.0);
    tl.play(0.0);
    tl.tick(999.0);
    assert_eq!(tl.playback(), Playback::Playing);
    tl.tick(1000.0);
    assert_eq!(tl.playback(), Playback::Idle);
    assert_eq!(tl.current_time_ms(), 0.0);
}

#[test]
fn loop_mode_wraps_and_keeps_playing() {
    let mut tl = Timeline::new(1000.0);
    tl.set_loop_mode(LoopMode::Loop);
    tl.play(0.0);
    tl.tick(1250.0);
    assert_eq!(tl.playback(), Playback::Playing);
    assert_eq!(tl.current_time_ms(), 250.0);
    // Keeps advancing after the wrap.
    tl.tick(1600.0);
    assert_eq!(tl.current_time_ms(), 600.0);
}

// =============================================================
// Scrub
// =============================================================

#[test]
fn scrub_sets_playhead_without_changing_state() {
    let mut tl = Timeline::new(5000.0);
    tl.scrub(2000.0);
    assert_eq!(tl.current_time_ms(), 2000.0);
    assert_eq!(tl.playback(), Playback::Idle);

    tl.play(0.0);
    tl.scrub(500.0);
    assert_eq!(tl.playback(), Playback::Playing);
    assert_eq!(tl.current_time_ms(), 500.0);
}

#[test]
fn scrub_clamps_to_duration() {
    let mut tl = Timeline::new(5000.0);
    tl.scrub(99_999.0);
    assert_eq!(tl.current_time_ms(), 5000.0);
    tl.scrub(-50.0);
    assert_eq!(tl.current_time_ms(), 0.0);
}

#[test]
fn scrub_while_playing_rebases_next_tick() {
    let mut tl = Timeline::new(10_000.0);
    tl.play(0.0);
    tl.tick(4000.0);
    tl.scrub(1000.0);
    // Next tick continues from the scrubbed position, not the old clock.
    tl.tick(4200.0);
    assert_eq!(tl.current_time_ms(), 1200.0);
}

#[test]
fn scrub_after_backwards_clock_keeps_later_anchor() {
    let mut tl = Timeline::new(10_000.0);
    tl.play(0.0);
    tl.tick(4000.0);
    // Backwards jump is ignored for the playhead and for the anchor.
    tl.tick(3000.0);
    tl.scrub(1000.0);
    tl.tick(4500.0);
    assert_eq!(tl.current_time_ms(), 1500.0);
}

#[test]
fn scrub_non_finite_ignored() {
    let mut tl = Timeline::new(5000.0);
    tl.scrub(1000.0);
    tl.scrub(f64::NAN);
    assert_eq!(tl.current_time_ms(), 1000.0);
}

// =============================================================
// State snapshot
// =============================================================

#[test]
fn state_reflects_fields() {
    let mut tl = Timeline::new(3000.0);
    tl.play(0.0);
    tl.tick(100.0);
    let state = tl.state();
    assert_eq!(state.current_time_ms, 100.0);
    assert_eq!(state.total_duration_ms, 3000.0);
    assert_eq!(state.playback, Playback::Playing);
}

#[test]
fn set_total_duration_validates() {
    let mut tl = Timeline::new(1000.0);
    tl.set_total_duration(-5.0);
    assert_eq!(tl.total_duration_ms(), 1000.0);
    tl.set_total_duration(f64::NAN);
    assert_eq!(tl.total_duration_ms(), 1000.0);
    tl.set_total_duration(2500.0);
    assert_eq!(tl.total_duration_ms(), 2500.0);
}
