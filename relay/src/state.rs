//! Shared relay state.
//!
//! Each room holds its connected clients and the last-known presence entry
//! per user. Presence is kept only so the relay can synthesize a `leave`
//! when a client drops without sending one.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashMap;
use std::sync::Arc;

use events::User;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// Per-room live state.
pub struct RoomState {
    /// Connected clients: `client_id` -> sender for outgoing raw frames.
    pub clients: HashMap<Uuid, mpsc::Sender<Vec<u8>>>,
    /// Last announced user per client, for synthesized leaves.
    pub presence: HashMap<Uuid, User>,
}

impl RoomState {
    #[must_use]
    pub fn new() -> Self {
        Self { clients: HashMap::new(), presence: HashMap::new() }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the rooms map is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<String, RoomState>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client's outbound channel in a room, creating the room on
    /// first join.
    pub async fn join_room(&self, room: &str, client_id: Uuid, tx: mpsc::Sender<Vec<u8>>) {
        let mut rooms = self.rooms.write().await;
        rooms.entry(room.to_owned()).or_default().clients.insert(client_id, tx);
    }

    /// Remove a client from a room, returning its last presence entry. The
    /// room itself is dropped once empty.
    pub async fn part_room(&self, room: &str, client_id: Uuid) -> Option<User> {
        let mut rooms = self.rooms.write().await;
        let room_state = rooms.get_mut(room)?;
        room_state.clients.remove(&client_id);
        let user = room_state.presence.remove(&client_id);
        if room_state.clients.is_empty() {
            rooms.remove(room);
        }
        user
    }

    /// Record the user a client announced, for a synthesized leave later.
    pub async fn record_presence(&self, room: &str, client_id: Uuid, user: User) {
        let mut rooms = self.rooms.write().await;
        if let Some(room_state) = rooms.get_mut(room) {
            room_state.presence.insert(client_id, user);
        }
    }

    /// Drop a client's presence entry after an explicit leave, so disconnect
    /// does not synthesize a second one.
    pub async fn forget_presence(&self, room: &str, client_id: Uuid) {
        let mut rooms = self.rooms.write().await;
        if let Some(room_state) = rooms.get_mut(room) {
            room_state.presence.remove(&client_id);
        }
    }

    /// Forward raw bytes to every client in the room except `exclude`.
    pub async fn broadcast(&self, room: &str, bytes: &[u8], exclude: Option<Uuid>) {
        let rooms = self.rooms.read().await;
        let Some(room_state) = rooms.get(room) else {
            return;
        };

        for (client_id, tx) in &room_state.clients {
            if exclude == Some(*client_id) {
                continue;
            }
            // Best-effort: if a client's channel is full, skip it.
            let _ = tx.try_send(bytes.to_vec());
        }
    }
}
