//! Top-level scene engine: store + tracks + timeline + history + selection.
//!
//! Local mutations return an [`Action`] for the host to hand to the sync
//! layer; remote events come back in through the `apply_remote_*` methods,
//! which run the *same* store operations — there is no privileged code path,
//! so an edit has the identical effect whether it originated locally or on a
//! peer. Every successful mutation commits a history snapshot.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use crate::assets::{AssetProvider, LoadError};
use crate::element::{ElementId, ElementKind, PartialElement, SceneElement};
use crate::history::{History, Snapshot};
use crate::resolve::{ResolvedElement, resolve_scene};
use crate::store::{ElementStore, SceneError, UpdateOutcome};
use crate::timeline::Timeline;
use crate::track::{AnimationTrack, Easing, Keyframe, TrackId, TrackProperty};

/// A completed local mutation, returned for the sync layer to broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(SceneElement),
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementDeleted { id: ElementId },
}

/// The authoring engine. Owns all scene state; the renderer and tracking
/// adapters only ever read from it.
pub struct SceneEngine {
    store: ElementStore,
    /// Tracks in creation order; order is the overlap tie-break in resolve.
    tracks: Vec<AnimationTrack>,
    timeline: Timeline,
    history: History,
    selected_id: Option<ElementId>,
    /// Elements whose asset failed to load; rendered with a placeholder.
    failed_assets: HashSet<ElementId>,
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEngine {
    /// Create an empty engine with an unbounded history. The initial empty
    /// state is committed as the history baseline so a full undo walks back
    /// to an empty scene.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self {
            store: ElementStore::new(),
            tracks: Vec::new(),
            timeline: Timeline::default(),
            history: History::new(),
            selected_id: None,
            failed_assets: HashSet::new(),
        };
        engine.history.commit(Snapshot::default());
        engine
    }

    /// Like [`SceneEngine::new`] but with a bounded undo depth.
    #[must_use]
    pub fn with_history_capacity(capacity: usize) -> Self {
        let mut engine = Self::new();
        engine.history = History::with_capacity(capacity);
        engine.history.commit(Snapshot::default());
        engine
    }

    // --- Local mutations ---

    /// Place a new element, select it, and return the creation action.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Validation`] for non-finite transform
    /// components; no state changes.
    pub fn create_element(&mut self, element: SceneElement) -> Result<Action, SceneError> {
        let broadcast = element.clone();
        let id = self.store.create(element)?;
        self.selected_id = Some(id);
        self.commit();
        Ok(Action::ElementCreated(broadcast))
    }

    /// Convenience constructor-and-create for UI "add" buttons.
    ///
    /// # Errors
    ///
    /// See [`SceneEngine::create_element`].
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        name: impl Into<String>,
        source_ref: impl Into<String>,
    ) -> Result<Action, SceneError> {
        self.create_element(SceneElement::new(kind, name, source_ref))
    }

    /// Apply a sparse update. `Ok(None)` means the id was unknown — a safe,
    /// logged no-op with nothing to broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Validation`] for non-finite transform
    /// components; no state changes.
    pub fn update_element(
        &mut self,
        id: ElementId,
        fields: PartialElement,
    ) -> Result<Option<Action>, SceneError> {
        match self.store.update(id, &fields)? {
            UpdateOutcome::Updated(_) => {
                self.commit();
                Ok(Some(Action::ElementUpdated { id, fields }))
            }
            UpdateOutcome::NotFound => Ok(None),
        }
    }

    /// Hard-delete an element. `None` if the id was unknown.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Action> {
        if !self.store.remove(id) {
            return None;
        }
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        self.failed_assets.remove(&id);
        self.commit();
        Some(Action::ElementDeleted { id })
    }

    /// Duplicate an element (fresh id, name suffix, position offset).
    /// Returns the new id and a creation action, or `None` for an unknown
    /// source id.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<(ElementId, Action)> {
        let new_id = self.store.duplicate(id)?;
        self.selected_id = Some(new_id);
        self.commit();
        let copy = self.store.get(new_id).cloned()?;
        Some((new_id, Action::ElementCreated(copy)))
    }

    // --- Tracks (local-only state; still snapshotted) ---

    /// Add a keyframe track for one property of one element.
    pub fn add_track(
        &mut self,
        target_id: ElementId,
        property: TrackProperty,
        keyframes: Vec<Keyframe>,
        easing: Easing,
    ) -> TrackId {
        let track = AnimationTrack::new(target_id, property, keyframes, easing);
        let id = track.id;
        self.tracks.push(track);
        self.commit();
        id
    }

    /// Remove a track by id. Returns `true` if one was removed.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        if self.tracks.len() == before {
            return false;
        }
        self.commit();
        true
    }

    /// Tracks in creation order.
    #[must_use]
    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }

    // --- Remote application (same operations, no re-broadcast) ---

    /// Apply a peer's create event. Replayed events are idempotent; a
    /// validation failure is logged and dropped.
    pub fn apply_remote_create(&mut self, element: SceneElement) {
        match self.store.create(element) {
            Ok(_) => self.commit(),
            Err(e) => tracing::warn!(error = %e, "remote create rejected"),
        }
    }

    /// Apply a peer's update event. An unknown id — including one deleted by
    /// a tombstone that arrived first — is a safe no-op.
    pub fn apply_remote_update(&mut self, id: ElementId, fields: &PartialElement) {
        match self.store.update(id, fields) {
            Ok(UpdateOutcome::Updated(_)) => self.commit(),
            Ok(UpdateOutcome::NotFound) => {}
            Err(e) => tracing::warn!(error = %e, %id, "remote update rejected"),
        }
    }

    /// Apply a peer's delete tombstone.
    pub fn apply_remote_delete(&mut self, id: ElementId) {
        if self.store.remove(id) {
            if self.selected_id == Some(id) {
                self.selected_id = None;
            }
            self.failed_assets.remove(&id);
            self.commit();
        }
    }

    // --- History ---

    /// Step back one snapshot and restore it. Returns `false` when already
    /// at the oldest state (no-op).
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward one snapshot and restore it. Returns `false` when
    /// already at the newest state (no-op).
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Deep copy of the current authoring state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { elements: self.store.to_vec(), tracks: self.tracks.clone() }
    }

    fn commit(&mut self) {
        self.history.commit(self.snapshot());
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.store.load_snapshot(snapshot.elements);
        self.tracks = snapshot.tracks;
        if let Some(id) = self.selected_id
            && !self.store.contains(id)
        {
            self.selected_id = None;
        }
        self.failed_assets.retain(|id| self.store.contains(*id));
    }

    // --- Assets ---

    /// Resolve an element's asset through the injected provider. On failure
    /// the element is flagged for fallback rendering, never removed.
    pub fn resolve_asset(
        &mut self,
        provider: &dyn AssetProvider,
        id: ElementId,
    ) -> Option<String> {
        let element = self.store.get(id)?;
        match provider.resolve(&element.source_ref) {
            Ok(url) => {
                self.failed_assets.remove(&id);
                Some(url)
            }
            Err(e) => {
                self.on_load_error(id, &e);
                None
            }
        }
    }

    /// Record an asset load failure for an element.
    pub fn on_load_error(&mut self, id: ElementId, error: &LoadError) {
        tracing::warn!(%id, error = %error, "asset load failed; using placeholder");
        self.failed_assets.insert(id);
    }

    /// Whether an element's asset failed and it should render a placeholder.
    #[must_use]
    pub fn asset_failed(&self, id: ElementId) -> bool {
        self.failed_assets.contains(&id)
    }

    // --- Frame loop ---

    /// Advance the timeline from the external frame clock.
    pub fn tick(&mut self, now_ms: f64) {
        self.timeline.tick(now_ms);
    }

    /// Resolved transforms at the current timeline time, in element order.
    /// This is the render adapter's read surface.
    #[must_use]
    pub fn resolved(&self) -> Vec<ResolvedElement> {
        resolve_scene(
            &self.store.elements(),
            &self.tracks,
            self.timeline.current_time_ms(),
        )
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected_id
    }

    /// Select an element (or clear the selection with `None`).
    pub fn select(&mut self, id: Option<ElementId>) {
        if id.is_none_or(|id| self.store.contains(id)) {
            self.selected_id = id;
        }
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.store.get(id)
    }

    /// The element store (read-only).
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The timeline clock.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Mutable timeline access for play/pause/scrub controls.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}
