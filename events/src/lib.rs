//! Shared event model and protobuf codec for realtime scene sync.
//!
//! This crate owns the wire representation used by both the relay and the
//! sync adapter. Event payloads stay flexible (`serde_json::Value` on the
//! wire) while encoding over protobuf for compact binary transport; the
//! relay fans envelopes out without ever inspecting payloads.

use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use scene::element::{ElementId, PartialElement, SceneElement};

/// Error returned by [`decode_envelope`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireEnvelope`.
    #[error("failed to decode protobuf envelope: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The `id` or `origin_user_id` string on the wire is not a UUID.
    #[error("invalid envelope id: {0}")]
    InvalidId(#[from] uuid::Error),
    /// The event payload does not deserialize as a known [`SceneEvent`].
    #[error("invalid event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A participant in a session, as announced on join.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Display name shown in the roster.
    pub name: String,
    /// Presence color as a CSS hex string, e.g. `"#e45858"`.
    pub color: String,
}

/// One chat message in a session's log.
///
/// The timestamp is `f64` because the proto `Value` payload carries every
/// number as a double; epoch millis are exactly representable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    /// Milliseconds since the Unix epoch at the sender.
    pub ts: f64,
}

/// A session event: scene mutation, presence change, or chat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SceneEvent {
    /// A user joined the session.
    Join { user: User },
    /// A user left the session (sent by the peer, or synthesized by the
    /// relay on disconnect).
    Leave { user_id: Uuid },
    /// A full element to insert.
    ElementCreate { element: SceneElement },
    /// A sparse update to one element.
    ElementUpdate { id: ElementId, fields: PartialElement },
    /// A delete tombstone.
    ElementDelete { id: ElementId },
    /// A chat message.
    ChatMessage { message: ChatMessage },
}

impl SceneEvent {
    /// Short event name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::ElementCreate { .. } => "elementCreate",
            Self::ElementUpdate { .. } => "elementUpdate",
            Self::ElementDelete { .. } => "elementDelete",
            Self::ChatMessage { .. } => "chatMessage",
        }
    }
}

/// A single message on the realtime wire: one event plus routing metadata.
///
/// The origin id lets a client skip its own events when the relay echoes
/// them back, so replays stay idempotent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Unique identifier for this envelope.
    pub id: Uuid,
    /// Milliseconds since the Unix epoch when the envelope was created.
    pub ts: i64,
    /// The user whose client produced the event.
    pub origin_user_id: Uuid,
    pub event: SceneEvent,
}

impl Envelope {
    /// Wrap an event with a fresh id and the current wall-clock time.
    #[must_use]
    pub fn new(origin_user_id: Uuid, event: SceneEvent) -> Self {
        Self { id: Uuid::new_v4(), ts: now_ms(), origin_user_id, event }
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Encode an envelope into protobuf bytes.
///
/// # Panics
///
/// Never panics in practice; the event model always serializes, and writing
/// to `Vec<u8>` is infallible.
#[must_use]
pub fn encode_envelope(envelope: &Envelope) -> Vec<u8> {
    let wire = envelope_to_wire(envelope);

    let mut out = Vec::with_capacity(wire.encoded_len());
    // prost only fails on a fixed buffer that runs out of room; a growable
    // Vec never does, so the encode result carries no information.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes,
/// [`CodecError::InvalidId`] for non-UUID id fields, and
/// [`CodecError::Payload`] for an unrecognized event payload.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
    let wire = WireEnvelope::decode(bytes)?;
    wire_to_envelope(wire)
}

fn envelope_to_wire(envelope: &Envelope) -> WireEnvelope {
    // The event model is plain data and always serializes; fall back to an
    // empty object rather than threading an impossible error outward.
    let payload = serde_json::to_value(&envelope.event)
        .unwrap_or_else(|_| Value::Object(Map::new()));

    WireEnvelope {
        id: envelope.id.to_string(),
        ts: envelope.ts,
        origin_user_id: envelope.origin_user_id.to_string(),
        event: Some(json_to_proto_value(&payload)),
    }
}

fn wire_to_envelope(wire: WireEnvelope) -> Result<Envelope, CodecError> {
    let payload = wire
        .event
        .map_or(Value::Object(Map::new()), |v| proto_to_json_value(&v));

    Ok(Envelope {
        id: Uuid::parse_str(&wire.id)?,
        ts: wire.ts,
        origin_user_id: Uuid::parse_str(&wire.origin_user_id)?,
        event: serde_json::from_value(payload)?,
    })
}

// The payload crosses the wire as a `google.protobuf.Value`, so every event
// field has to survive the JSON -> proto -> JSON trip. Numbers collapse to
// f64 on the way through; the event model only carries doubles for that
// reason.
fn json_to_proto_value(value: &Value) -> prost_types::Value {
    use prost_types::value::Kind;

    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(items) => {
            let values = items.iter().map(json_to_proto_value).collect();
            Kind::ListValue(prost_types::ListValue { values })
        }
        Value::Object(entries) => {
            let fields = entries
                .iter()
                .map(|(key, field)| (key.clone(), json_to_proto_value(field)))
                .collect();
            Kind::StructValue(prost_types::Struct { fields })
        }
    };

    prost_types::Value { kind: Some(kind) }
}

fn proto_to_json_value(value: &prost_types::Value) -> Value {
    use prost_types::value::Kind;

    match &value.kind {
        // An absent kind and an explicit null both map to JSON null.
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        // NaN and infinity have no JSON spelling; degrade to null.
        Some(Kind::NumberValue(n)) => {
            serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number)
        }
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.iter().map(proto_to_json_value).collect())
        }
        Some(Kind::StructValue(map)) => Value::Object(
            map.fields
                .iter()
                .map(|(key, field)| (key.clone(), proto_to_json_value(field)))
                .collect(),
        ),
    }
}

#[derive(Clone, PartialEq, Message)]
struct WireEnvelope {
    #[prost(string, tag = "1")]
    id: String,
    #[prost(int64, tag = "2")]
    ts: i64,
    #[prost(string, tag = "3")]
    origin_user_id: String,
    #[prost(message, optional, tag = "4")]
    event: Option<prost_types::Value>,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
