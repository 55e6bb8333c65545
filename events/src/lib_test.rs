use super::*;

use scene::element::{ElementKind, Vec3};

fn sample_user() -> User {
    User {
        id: Uuid::new_v4(),
        name: "ada".to_owned(),
        color: "#e45858".to_owned(),
    }
}

fn sample_element() -> SceneElement {
    let mut el = SceneElement::new(ElementKind::Model, "Cube", "assets/cube.glb");
    el.transform.position = Vec3::new(1.25, -2.5, 0.0);
    el
}

fn envelope_with(event: SceneEvent) -> Envelope {
    Envelope {
        id: Uuid::new_v4(),
        ts: 42,
        origin_user_id: Uuid::new_v4(),
        event,
    }
}

fn assert_round_trips(event: SceneEvent) {
    let envelope = envelope_with(event);
    let bytes = encode_envelope(&envelope);
    let decoded = decode_envelope(&bytes).expect("decode should succeed");
    assert_eq!(decoded, envelope);
}

// =============================================================
// Codec round trips
// =============================================================

#[test]
fn join_round_trips() {
    assert_round_trips(SceneEvent::Join { user: sample_user() });
}

#[test]
fn leave_round_trips() {
    assert_round_trips(SceneEvent::Leave { user_id: Uuid::new_v4() });
}

#[test]
fn element_create_round_trips() {
    assert_round_trips(SceneEvent::ElementCreate { element: sample_element() });
}

#[test]
fn element_create_with_content_round_trips() {
    let element = SceneElement::new(ElementKind::Text, "Label", "").with_content("hello");
    assert_round_trips(SceneEvent::ElementCreate { element });
}

#[test]
fn element_update_round_trips() {
    let fields = PartialElement {
        name: Some("Renamed".to_owned()),
        position: Some(Vec3::new(0.5, 0.5, 0.0)),
        visible: Some(false),
        ..Default::default()
    };
    assert_round_trips(SceneEvent::ElementUpdate { id: Uuid::new_v4(), fields });
}

#[test]
fn element_delete_round_trips() {
    assert_round_trips(SceneEvent::ElementDelete { id: Uuid::new_v4() });
}

#[test]
fn chat_round_trips() {
    assert_round_trips(SceneEvent::ChatMessage {
        message: ChatMessage {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            body: "looks good".to_owned(),
            ts: 1_700_000_000_000.0,
        },
    });
}

#[test]
fn chat_serializes_with_chat_message_tag() {
    let event = SceneEvent::ChatMessage {
        message: ChatMessage {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            body: "ship it".to_owned(),
            ts: 1_700_000_000_000.0,
        },
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], "chatMessage");
    assert_eq!(event.kind(), "chatMessage");
}

#[test]
fn encode_envelope_outputs_non_empty_binary() {
    let envelope = envelope_with(SceneEvent::Leave { user_id: Uuid::new_v4() });
    assert!(!encode_envelope(&envelope).is_empty());
}

// =============================================================
// Decode failures
// =============================================================

#[test]
fn decode_rejects_malformed_bytes() {
    let err = decode_envelope(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_rejects_non_uuid_id() {
    let wire = WireEnvelope {
        id: "not-a-uuid".to_owned(),
        ts: 1,
        origin_user_id: Uuid::new_v4().to_string(),
        event: Some(json_to_proto_value(&serde_json::json!({
            "type": "leave",
            "payload": {"userId": Uuid::new_v4()}
        }))),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let err = decode_envelope(&bytes).expect_err("id should fail");
    assert!(matches!(err, CodecError::InvalidId(_)));
}

#[test]
fn decode_rejects_unknown_event_type() {
    let wire = WireEnvelope {
        id: Uuid::new_v4().to_string(),
        ts: 1,
        origin_user_id: Uuid::new_v4().to_string(),
        event: Some(json_to_proto_value(&serde_json::json!({
            "type": "teleport",
            "payload": {}
        }))),
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let err = decode_envelope(&bytes).expect_err("payload should fail");
    assert!(matches!(err, CodecError::Payload(_)));
}

#[test]
fn decode_rejects_missing_event_payload() {
    let wire = WireEnvelope {
        id: Uuid::new_v4().to_string(),
        ts: 1,
        origin_user_id: Uuid::new_v4().to_string(),
        event: None,
    };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    assert!(decode_envelope(&bytes).is_err());
}

// =============================================================
// JSON shape
// =============================================================

#[test]
fn event_serializes_with_camel_case_tag() {
    let id = Uuid::new_v4();
    let json = serde_json::to_value(SceneEvent::ElementDelete { id }).expect("serialize");
    assert_eq!(json["type"], "elementDelete");
    assert_eq!(json["payload"]["id"], serde_json::json!(id));
}

#[test]
fn event_kind_matches_wire_tag() {
    let event = SceneEvent::Join { user: sample_user() };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], event.kind());
}

#[test]
fn envelope_new_stamps_fresh_id_and_time() {
    let origin = Uuid::new_v4();
    let a = Envelope::new(origin, SceneEvent::Leave { user_id: origin });
    let b = Envelope::new(origin, SceneEvent::Leave { user_id: origin });
    assert_ne!(a.id, b.id);
    assert!(a.ts > 0);
    assert_eq!(a.origin_user_id, origin);
}
