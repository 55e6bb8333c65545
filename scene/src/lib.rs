//! Scene authoring and animation engine for ARScape.
//!
//! This crate is the single source of truth for an authored AR scene: the
//! elements placed in it, the keyframe tracks animating them, the timeline
//! clock, and the undo/redo history. It owns no I/O — the render adapter
//! reads resolved transforms each frame, and the sync layer funnels remote
//! edits through the same store operations used for local ones.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::SceneEngine`] facade and mutation [`engine::Action`]s |
//! | [`element`] | Element model: vectors, transforms, kinds, sparse updates |
//! | [`store`] | In-memory element store and its mutation operations |
//! | [`track`] | Keyframe tracks and easing curves |
//! | [`resolve`] | Per-frame resolved-transform computation |
//! | [`timeline`] | Playback state machine driven by an external clock |
//! | [`history`] | Snapshot stack for undo/redo |
//! | [`assets`] | Asset provider seam and load-failure handling |
//! | [`tracking`] | Detection feed seam (image/face/pose) |
//! | [`consts`] | Shared numeric constants |

pub mod assets;
pub mod consts;
pub mod element;
pub mod engine;
pub mod history;
pub mod resolve;
pub mod store;
pub mod timeline;
pub mod track;
pub mod tracking;
