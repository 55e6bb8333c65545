//! WebSocket handler — binary envelope relay.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register the client's outbound channel in the room
//! 2. Inbound binary frame → validate as an envelope → forward raw bytes to
//!    every room peer except the sender
//! 3. Close or error → deregister; if the client had announced a user and
//!    never sent a leave, synthesize one for the peers

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use events::{Envelope, SceneEvent, encode_envelope};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

pub async fn handle_ws(
    State(state): State<AppState>,
    Path(room): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state, room))
}

async fn run_ws(mut socket: WebSocket, state: AppState, room: String) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for raw frames forwarded from peers.
    let (client_tx, mut client_rx) = mpsc::channel::<Vec<u8>>(256);
    state.join_room(&room, client_id, client_tx).await;

    info!(%client_id, room, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Binary(bytes) => {
                        handle_inbound(&state, &room, client_id, &bytes).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(bytes) = client_rx.recv() => {
                if socket.send(Message::Binary(bytes.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    // Deregister BEFORE broadcasting so the dead channel is gone; synthesize
    // a leave if the client announced a user and never sent one.
    if let Some(user) = state.part_room(&room, client_id).await {
        let leave = Envelope::new(user.id, SceneEvent::Leave { user_id: user.id });
        state.broadcast(&room, &encode_envelope(&leave), None).await;
        info!(%client_id, user_id = %user.id, room, "ws: synthesized leave");
    }
    info!(%client_id, room, "ws: client disconnected");
}

/// Validate one inbound frame and fan it out to the room.
///
/// The envelope is decoded only to reject garbage and to track presence for
/// synthesized leaves; peers receive the sender's original bytes untouched.
pub(crate) async fn handle_inbound(state: &AppState, room: &str, client_id: Uuid, bytes: &[u8]) {
    let envelope = match events::decode_envelope(bytes) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(%client_id, room, error = %e, "ws: dropping undecodable frame");
            return;
        }
    };

    match &envelope.event {
        SceneEvent::Join { user } => {
            state.record_presence(room, client_id, user.clone()).await;
        }
        SceneEvent::Leave { .. } => {
            state.forget_presence(room, client_id).await;
        }
        _ => {}
    }

    tracing::debug!(
        %client_id,
        room,
        kind = envelope.event.kind(),
        "ws: relaying envelope"
    );
    state.broadcast(room, bytes, Some(client_id)).await;
}
