//! Bridges a local [`SceneEngine`] onto the event wire.
//!
//! Outbound: the host hands every [`Action`] returned by an engine mutation
//! to [`SyncAdapter::publish`]. Inbound: the host calls
//! [`SyncAdapter::pump`] each frame, which drains the transport and applies
//! peer events through the engine's `apply_remote_*` methods. Envelopes
//! carrying this client's own origin id are skipped, so a relay that echoes
//! is harmless.

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;

use events::{ChatMessage, Envelope, SceneEvent, User, now_ms};
use scene::engine::{Action, SceneEngine};
use uuid::Uuid;

use crate::roster::Roster;
use crate::transport::{SyncError, Transport};

/// A connected session participant: one transport, one user, plus the
/// session state that lives outside the scene (roster and chat log).
pub struct SyncAdapter<T: Transport> {
    transport: T,
    local_user: User,
    roster: Roster,
    chat: Vec<ChatMessage>,
}

impl<T: Transport> SyncAdapter<T> {
    /// Join a session: announce the local user and start listening.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] if the transport is already closed.
    pub fn connect(mut transport: T, local_user: User) -> Result<Self, SyncError> {
        let mut roster = Roster::new();
        roster.upsert(local_user.clone());
        transport.send(&Envelope::new(
            local_user.id,
            SceneEvent::Join { user: local_user.clone() },
        ))?;
        Ok(Self { transport, local_user, roster, chat: Vec::new() })
    }

    /// Broadcast a completed local mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] once the transport has been closed.
    pub fn publish(&mut self, action: &Action) -> Result<(), SyncError> {
        let event = match action {
            Action::ElementCreated(element) => {
                SceneEvent::ElementCreate { element: element.clone() }
            }
            Action::ElementUpdated { id, fields } => {
                SceneEvent::ElementUpdate { id: *id, fields: fields.clone() }
            }
            Action::ElementDeleted { id } => SceneEvent::ElementDelete { id: *id },
        };
        self.send(event)
    }

    /// Send a chat message and append it to the local log.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Closed`] once the transport has been closed.
    #[allow(clippy::cast_precision_loss)]
    pub fn send_chat(&mut self, body: impl Into<String>) -> Result<(), SyncError> {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            user_id: self.local_user.id,
            body: body.into(),
            ts: now_ms() as f64,
        };
        self.send(SceneEvent::ChatMessage { message: message.clone() })?;
        self.chat.push(message);
        Ok(())
    }

    /// Announce departure and close the transport. Send failures are
    /// ignored; the connection may already be gone.
    pub fn leave(mut self) {
        let _ = self.send(SceneEvent::Leave { user_id: self.local_user.id });
        self.transport.close();
    }

    /// Drain the transport and apply every peer event to the engine.
    /// Returns the number of envelopes applied.
    pub fn pump(&mut self, engine: &mut SceneEngine) -> usize {
        let mut applied = 0;
        for envelope in self.transport.drain() {
            if envelope.origin_user_id == self.local_user.id {
                continue;
            }
            tracing::debug!(
                kind = envelope.event.kind(),
                origin = %envelope.origin_user_id,
                "applying remote event"
            );
            match envelope.event {
                SceneEvent::Join { user } => {
                    self.roster.upsert(user);
                }
                SceneEvent::Leave { user_id } => {
                    self.roster.remove(user_id);
                }
                SceneEvent::ElementCreate { element } => engine.apply_remote_create(element),
                SceneEvent::ElementUpdate { id, fields } => {
                    engine.apply_remote_update(id, &fields);
                }
                SceneEvent::ElementDelete { id } => engine.apply_remote_delete(id),
                SceneEvent::ChatMessage { message } => self.chat.push(message),
            }
            applied += 1;
        }
        applied
    }

    /// The local user, as announced on join.
    #[must_use]
    pub fn local_user(&self) -> &User {
        &self.local_user
    }

    /// Everyone currently in the session, the local user included.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The chat log in arrival order, local messages included.
    #[must_use]
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    fn send(&mut self, event: SceneEvent) -> Result<(), SyncError> {
        self.transport.send(&Envelope::new(self.local_user.id, event))
    }
}
