//! In-memory element store and its mutation operations.
//!
//! The store is the single source of truth for scene elements. All writes —
//! local edits and remote collaboration events alike — funnel through the
//! operations here so history and sync observe every change exactly once.
//! Iteration order is creation order, which keeps snapshots, broadcasts,
//! and the renderer's element list deterministic across clients.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::consts::{DUPLICATE_NAME_SUFFIX, DUPLICATE_OFFSET_X, DUPLICATE_OFFSET_Y};
use crate::element::{ElementId, PartialElement, SceneElement, Vec3};

/// Error raised at the store boundary. Failed operations leave the store
/// unchanged; none of these are fatal to the host.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A transform component in the element or update was not a finite number.
    #[error("non-finite transform component in {context}")]
    Validation {
        /// Which operation rejected the value (`"create"` or `"update"`).
        context: &'static str,
    },
}

/// Result of an update operation. An unknown id is a non-fatal outcome,
/// not an error — a late update for a deleted element must be a safe no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The element was found and the update applied; carries the new state.
    Updated(SceneElement),
    /// No element with the given id exists. Store unchanged.
    NotFound,
}

/// In-memory store of scene elements, iterated in creation order.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, SceneElement>,
    /// Creation-order index into `elements`.
    order: Vec<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, returning its id.
    ///
    /// Re-inserting an existing id replaces the element in place without
    /// changing its creation-order slot, which makes replayed create events
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Validation`] if any transform component is
    /// non-finite. The store is unchanged on error.
    pub fn create(&mut self, element: SceneElement) -> Result<ElementId, SceneError> {
        if !element.transform.is_finite() {
            return Err(SceneError::Validation { context: "create" });
        }
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
        Ok(id)
    }

    /// Apply a sparse update to an existing element.
    ///
    /// Only whitelisted fields can be expressed in [`PartialElement`];
    /// `id` and `kind` are immutable. An unknown id is a logged no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Validation`] if a present transform component
    /// is non-finite. The store is unchanged on error.
    pub fn update(&mut self, id: ElementId, fields: &PartialElement) -> Result<UpdateOutcome, SceneError> {
        if !fields.is_finite() {
            return Err(SceneError::Validation { context: "update" });
        }
        let Some(element) = self.elements.get_mut(&id) else {
            tracing::debug!(%id, "update for unknown element ignored");
            return Ok(UpdateOutcome::NotFound);
        };
        if let Some(ref name) = fields.name {
            element.name = name.clone();
        }
        if let Some(ref source_ref) = fields.source_ref {
            element.source_ref = source_ref.clone();
        }
        if let Some(position) = fields.position {
            element.transform.position = position;
        }
        if let Some(rotation) = fields.rotation {
            element.transform.rotation = rotation;
        }
        if let Some(scale) = fields.scale {
            element.transform.scale = scale;
        }
        if let Some(ref content) = fields.content {
            element.content = Some(content.clone());
        }
        if let Some(visible) = fields.visible {
            element.visible = visible;
        }
        Ok(UpdateOutcome::Updated(element.clone()))
    }

    /// Remove an element. Returns `true` if it was present.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|eid| *eid != id);
        true
    }

    /// Duplicate an element: fresh id, `" (Copy)"` name suffix, position
    /// offset by `(+0.5, +0.5, 0)`, all other fields equal. Returns the new
    /// id, or `None` if the source id is unknown.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.elements.get(&id)?;
        let mut copy = source.clone();
        copy.id = uuid::Uuid::new_v4();
        copy.name = format!("{}{DUPLICATE_NAME_SUFFIX}", source.name);
        copy.transform.position =
            copy.transform.position + Vec3::new(DUPLICATE_OFFSET_X, DUPLICATE_OFFSET_Y, 0.0);
        let new_id = copy.id;
        self.elements.insert(new_id, copy);
        self.order.push(new_id);
        Some(new_id)
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    /// Whether an element with the given id exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// All elements in creation order.
    #[must_use]
    pub fn elements(&self) -> Vec<&SceneElement> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .collect()
    }

    /// Replace all elements with a snapshot, preserving the snapshot's order.
    pub fn load_snapshot(&mut self, elements: Vec<SceneElement>) {
        self.elements.clear();
        self.order.clear();
        for element in elements {
            self.order.push(element.id);
            self.elements.insert(element.id, element);
        }
    }

    /// Deep copy of all elements in creation order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SceneElement> {
        self.elements().into_iter().cloned().collect()
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
